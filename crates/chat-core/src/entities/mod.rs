//! Domain entities - core business objects

mod author;

pub use author::ChatAuthor;
