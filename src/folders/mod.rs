//! Nested note folders: hierarchy building and cascading deletion.

pub mod delete;
pub mod tree;

pub use delete::{DeletePlan, plan_delete, plan_shallow_delete};
pub use tree::{FlatFolder, FolderTree, descendants_of};
