pub mod events;
pub mod performance;
pub mod result;
pub mod simulator;

pub use events::*;
pub use performance::*;
pub use result::*;
pub use simulator::*;
