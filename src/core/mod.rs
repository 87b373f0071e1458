//! Core logic: the credential tree, path resolution, persistence, and
//! attachment operations.

pub mod attachment;
pub mod file_lock;
pub mod resolver;
pub mod store;
pub mod tree;
