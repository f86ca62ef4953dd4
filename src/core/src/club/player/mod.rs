pub mod attributes;
pub mod injury;
pub mod player;
pub mod positions;
pub mod skills;
pub mod statistics;

pub use attributes::*;
pub use injury::*;
pub use player::*;
pub use positions::*;
pub use skills::*;
pub use statistics::*;
