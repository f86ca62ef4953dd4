pub mod formations;
pub mod tactics;

pub use formations::*;
pub use tactics::*;
