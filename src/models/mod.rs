pub mod file;
pub mod lane;
pub mod project;

pub use file::FileEntry;
pub use lane::{Lane, LaneSet};
pub use project::Project;
