pub mod schedule;
pub mod season;
pub mod settings;
pub mod statistics;
pub mod table;

pub use schedule::*;
pub use season::*;
pub use settings::*;
pub use statistics::*;
pub use table::*;
