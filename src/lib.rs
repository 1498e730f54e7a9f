//! # scopegen: dwscope layouts from tree databases
//!
//! Finds the signal nodes below a point in a hierarchical tree database and
//! writes a dwscope `.dat` file that shows every one of them in a grid of
//! plot panes.
//!
//! ## Architecture
//!
//! - **Tree**: the [`TreeNode`] / [`SignalTree`] traits the rest of the crate
//!   consumes, plus [`MemoryTree`], an implementation loaded from JSON/TOML
//! - **Discover**: post-order walk that collects signal nodes
//! - **Layout**: column/row/pixel arithmetic for the pane grid
//! - **Scope**: the `.dat` descriptor writer
//! - **Config**: persistent defaults for layout, smoothing, and filters
//!
//! ## Example
//!
//! ```ignore
//! use scopegen::{discover, emit_tree_scope, DiscoverOptions, MemoryTree, ScopeOptions, SignalTree};
//!
//! fn main() -> scopegen::Result<()> {
//!     let tree = MemoryTree::load("magnetics.json")?;
//!     let root = tree.find(".probes").unwrap_or_else(|| tree.top());
//!
//!     let signals = discover(&root, DiscoverOptions::default());
//!     emit_tree_scope(&tree, "all_sigs", &signals, None, &ScopeOptions::default())?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod layout;
pub mod scope;
pub mod tree;

// Re-export commonly used types
pub use config::ScopeConfig;
pub use discover::{discover, discover_into, DiscoverOptions};
pub use error::{Result, ScopeError};
pub use layout::{PanePosition, ScopeLayout};
pub use scope::{emit_scope, emit_tree_scope, ScopeOptions, ScopeSummary, Smoothing};
pub use tree::{MemoryTree, NodeId, NodeRef, SignalTree, TreeNode};
