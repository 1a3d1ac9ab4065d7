//! Support data structures used by the layout passes.

pub mod list_pool;
pub mod trees;
