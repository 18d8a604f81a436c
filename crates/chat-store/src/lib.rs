//! # chat-store
//!
//! In-memory implementation of the `AuthorDirectory` port, used for local
//! wiring and tests.
//!
//! ## Example
//!
//! ```ignore
//! use chat_store::MemoryAuthorDirectory;
//!
//! let directory = MemoryAuthorDirectory::new_shared();
//! let author = directory.create(&chat_id, None);
//! directory.claim(&author.id, user_id)?;
//! ```

pub mod directory;

pub use directory::{random_author_name, MemoryAuthorDirectory};
