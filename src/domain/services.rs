pub mod grouping;
pub mod navigation;

pub use grouping::{group_by_row, SpaceRow};
pub use navigation::{neighbors, Navigation};
