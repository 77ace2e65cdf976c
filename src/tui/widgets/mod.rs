//! TUI Widget components

pub mod footer;
pub mod input_form;
pub mod market;
pub mod recommendation;
pub mod weather;

pub use footer::render_footer;
pub use input_form::render_input_form;
pub use market::render_market;
pub use recommendation::render_recommendation;
pub use weather::render_weather;
