//! File upload module for corkboard.

mod storage;

pub use storage::{FileKind, FileStorage};
