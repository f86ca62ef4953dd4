pub mod lineup;
pub mod tactics;

pub use lineup::*;
pub use tactics::*;
