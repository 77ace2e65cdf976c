pub mod farm;
pub mod market;
pub mod recommendation;
pub mod weather;

pub use farm::*;
pub use market::*;
pub use recommendation::*;
pub use weather::*;
