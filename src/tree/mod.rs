//! Tree database capability interface
//!
//! The scope generator never talks to a tree database directly. Everything it
//! needs from a node is expressed by the [`TreeNode`] trait, and everything it
//! needs from an opened tree by [`SignalTree`]. Handles are cheap read-only
//! views; nothing in this crate mutates a node.
//!
//! # Implementations
//!
//! - [`MemoryTree`] - flat-storage tree loaded from a JSON/TOML description,
//!   used by the `scopegen` binary and the test suite

pub mod id;
pub mod memory;

pub use id::NodeId;
pub use memory::{
    DataDescription, MemoryTree, NodeDescription, NodeKind, NodeRef, TreeDescription, TreeEntry,
};

use crate::error::Result;

/// Wildcard that selects every member directly below a node.
pub const WILDCARD_ALL: &str = "*";

/// Read-only accessors the discoverer and descriptor writer consume.
pub trait TreeNode: Clone {
    /// Direct children, in tree order.
    fn children(&self) -> Vec<Self>;

    /// Nodes matched by `pattern`, anchored at this node.
    fn wildcard_children(&self, pattern: &str) -> Vec<Self>;

    /// Usage tag (e.g. `"SIGNAL"`), or `None` when the node has none.
    fn usage(&self) -> Option<String>;

    /// Whether the node is turned on.
    fn is_enabled(&self) -> bool;

    /// Node name without any path.
    fn name(&self) -> String;

    /// Absolute path, e.g. `\MAGNETICS::TOP.PROBES:BP01`.
    fn full_path(&self) -> String;

    /// Shortest path that resolves to this node from the tree's default node.
    fn minimal_path(&self) -> String;

    /// Shortest path that resolves to this node from `base`: relative when
    /// the node lies below `base`, otherwise the full path.
    fn path_from(&self, base: &Self) -> String;

    /// Resolve `label` relative to this node.
    fn related_node(&self, label: &str) -> Option<Self>;

    /// Unit string attached to this node's data.
    ///
    /// `Ok(None)` means the data carries no units; `Err` means the data could
    /// not be read at all.
    fn units(&self) -> Result<Option<String>>;
}

/// An opened tree that hands out [`TreeNode`] handles.
pub trait SignalTree {
    type Node<'a>: TreeNode
    where
        Self: 'a;

    /// Tree (experiment) name.
    fn name(&self) -> String;

    /// The top node of the tree.
    fn top(&self) -> Self::Node<'_>;

    /// The node relative paths resolve against.
    fn default_node(&self) -> Self::Node<'_>;

    /// Resolve an absolute path or a path relative to the default node.
    fn find(&self, path: &str) -> Option<Self::Node<'_>>;
}
