//! Author directory implementations

mod memory;
mod names;

pub use memory::MemoryAuthorDirectory;
pub use names::random_author_name;
