//! Grid layout for control-flow graphs.
//!
//! Places basic blocks on a 2-D grid so that edges flow downward where possible, selects a
//! spanning tree to arrange subtrees compactly, then routes every edge as an orthogonal polyline
//! through dedicated edge rows and columns before mapping the grid to pixel coordinates.
//!
//! ```
//! use blockgrid::{layout, Block, LayoutConfig, LayoutKind};
//! use rustc_hash::FxHashMap;
//!
//! let mut blocks = FxHashMap::default();
//! blocks.insert(0, Block::new(100, 50, vec![1, 2]));
//! blocks.insert(1, Block::new(80, 40, vec![3]));
//! blocks.insert(2, Block::new(80, 40, vec![3]));
//! blocks.insert(3, Block::new(100, 50, vec![]));
//!
//! let config = LayoutConfig::new(LayoutKind::Medium);
//! let (width, height) = layout(&mut blocks, 0, &config).unwrap();
//! assert!(width > 0 && height > 0);
//! ```

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod coords;
pub mod data;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod placement;
pub mod route;
pub mod rows;
pub mod state;
pub mod toposort;

pub use error::{LayoutError, Result};
pub use model::{Block, BlockId, Edge, LayoutConfig, LayoutKind, Point};
pub use pipeline::layout;
