pub mod generator;
pub mod provider;
pub mod schema;

pub use generator::*;
pub use provider::*;
pub use schema::*;
