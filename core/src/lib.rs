//! ctf-core: the capture-the-flag filesystem.
//!
//! An in-memory tree of directories and text files, a path resolver that
//! walks typed tokens through it one segment at a time, and the fixed seed
//! tree every session starts from.

#![allow(missing_docs)]

pub mod error;
pub mod node;
pub mod path;
pub mod seed;
pub mod tree;

pub use error::{FsError, FsResult};
pub use node::{DirNode, FileNode, Node, NodeKind};
pub use path::{split_token, NodePath, Step};
pub use tree::{DirEntry, MemoryTree};
