//! Signal discovery
//!
//! Walks a subtree depth-first and collects every node whose usage marks it
//! as a signal. The walk is post-order: a node's children, then the members
//! matched by the `*` wildcard, are fully explored before the node itself is
//! tested. Filters decide only whether a node is collected, never whether its
//! subtree is explored.
//!
//! Recursion depth equals tree depth. Tree databases are shallow (tens of
//! levels at most), so no explicit depth guard is used.
//!
//! A node reachable both as a direct child and through the wildcard query is
//! visited (and possibly collected) twice. Duplicates are kept.

use crate::tree::{TreeNode, WILDCARD_ALL};
use serde::{Deserialize, Serialize};

/// Usage tag a node must carry to be collected.
pub const SIGNAL_USAGE: &str = "signal";

/// Name of raw-data signal nodes, skipped unless `include_raw` is set.
pub const RAW_NODE_NAME: &str = "raw";

/// Inclusion filters for [`discover`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverOptions {
    /// Collect signal nodes named `raw`.
    #[serde(default)]
    pub include_raw: bool,
    /// Collect signal nodes that are turned off.
    #[serde(default)]
    pub include_off: bool,
}

impl DiscoverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(mut self, include_raw: bool) -> Self {
        self.include_raw = include_raw;
        self
    }

    pub fn with_off(mut self, include_off: bool) -> Self {
        self.include_off = include_off;
        self
    }

    /// Whether `node` is collected under these filters.
    pub fn accepts<N: TreeNode>(&self, node: &N) -> bool {
        let is_signal = node
            .usage()
            .map(|usage| usage.to_lowercase() == SIGNAL_USAGE)
            .unwrap_or(false);

        is_signal
            && (self.include_off || node.is_enabled())
            && (self.include_raw || node.name().to_lowercase() != RAW_NODE_NAME)
    }
}

/// Collect every signal node at or below `root`, in post-order.
pub fn discover<N: TreeNode>(root: &N, options: DiscoverOptions) -> Vec<N> {
    let mut signals = Vec::new();
    discover_into(root, options, &mut signals);
    tracing::debug!(
        "Discovered {} signal(s) below {}",
        signals.len(),
        root.full_path()
    );
    signals
}

/// Append the signal nodes at or below `root` to `signals`.
///
/// Existing entries in `signals` are left untouched.
pub fn discover_into<N: TreeNode>(root: &N, options: DiscoverOptions, signals: &mut Vec<N>) {
    for child in root.children() {
        discover_into(&child, options, signals);
    }
    for member in root.wildcard_children(WILDCARD_ALL) {
        discover_into(&member, options, signals);
    }

    if options.accepts(root) {
        tracing::trace!("Signal {}", root.full_path());
        signals.push(root.clone());
    }
}
