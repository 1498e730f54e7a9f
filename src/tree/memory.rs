//! Flat-storage tree database held in memory.
//!
//! Nodes live in a single `Vec` indexed by [`NodeId`]; each entry keeps its
//! children and members as id lists. Children and members differ only in the
//! separator they contribute to a path:
//!
//! ```text
//! \MAGNETICS::TOP                 (top)
//! +-- .PROBES                     (child,  \MAGNETICS::TOP.PROBES)
//!     +-- :BP01                   (member, \MAGNETICS::TOP.PROBES:BP01)
//!         +-- :CALIB              (member, \MAGNETICS::TOP.PROBES:BP01:CALIB)
//! ```
//!
//! Trees are usually loaded from a [`TreeDescription`] written as JSON or TOML.
//! Names and paths are stored upper-case and looked up case-insensitively.

use super::{NodeId, SignalTree, TreeNode};
use crate::error::{Result, ResultExt, ScopeError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// How a node hangs off its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Top,
    Child,
    Member,
}

impl NodeKind {
    fn separator(self) -> &'static str {
        match self {
            NodeKind::Top => "",
            NodeKind::Child => ".",
            NodeKind::Member => ":",
        }
    }
}

/// Data record attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDescription {
    /// Unit string, e.g. `"T/s/V"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

/// Serialized form of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    #[serde(default = "default_true")]
    pub on: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataDescription>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescription>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<NodeDescription>,
}

fn default_true() -> bool {
    true
}

/// Serialized form of a whole tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeDescription {
    /// Tree (experiment) name.
    pub name: String,

    /// Default node path; the top node when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_node: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescription>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<NodeDescription>,
}

/// A single node in the tree.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub id: NodeId,
    /// Upper-case node name, e.g. `"BP01"`.
    pub name: String,
    pub kind: NodeKind,
    /// Parent node (INVALID for the top node).
    pub parent: NodeId,
    /// Usage tag, if any.
    pub usage: Option<String>,
    /// Node's own on/off state.
    pub enabled: bool,
    /// Attached data record.
    pub data: Option<DataDescription>,
    /// Depth in the tree (0 for top).
    pub depth: u16,
    children: Vec<NodeId>,
    members: Vec<NodeId>,
    full_path: String,
}

impl TreeEntry {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }
}

/// In-memory tree database.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    name: String,
    nodes: Vec<TreeEntry>,
    path_index: HashMap<String, NodeId>,
    default: NodeId,
}

impl MemoryTree {
    /// Create a tree holding only its top node.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().to_uppercase();
        let full_path = format!("\\{}::TOP", name);
        let top = TreeEntry {
            id: NodeId::TOP,
            name: "TOP".to_string(),
            kind: NodeKind::Top,
            parent: NodeId::INVALID,
            usage: Some("STRUCTURE".to_string()),
            enabled: true,
            data: None,
            depth: 0,
            children: Vec::new(),
            members: Vec::new(),
            full_path: full_path.clone(),
        };

        let mut path_index = HashMap::new();
        path_index.insert(full_path, NodeId::TOP);

        Self {
            name,
            nodes: vec![top],
            path_index,
            default: NodeId::TOP,
        }
    }

    /// Build a tree from its serialized description.
    pub fn from_description(desc: &TreeDescription) -> Result<Self> {
        let mut tree = Self::new(&desc.name);
        for child in &desc.children {
            tree.add_described(NodeId::TOP, NodeKind::Child, child)?;
        }
        for member in &desc.members {
            tree.add_described(NodeId::TOP, NodeKind::Member, member)?;
        }

        if let Some(path) = &desc.default_node {
            let id = tree
                .resolve_from(NodeId::TOP, path)
                .ok_or_else(|| ScopeError::Tree(format!("Default node not found: {}", path)))?;
            tree.set_default(id)?;
        }

        tracing::debug!("Built tree {} with {} nodes", tree.name, tree.len());
        Ok(tree)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let desc: TreeDescription = serde_json::from_str(content)
            .map_err(|e| ScopeError::Serialization(format!("Failed to parse tree JSON: {}", e)))?;
        Self::from_description(&desc)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let desc: TreeDescription = toml::from_str(content)
            .map_err(|e| ScopeError::Serialization(format!("Failed to parse tree TOML: {}", e)))?;
        Self::from_description(&desc)
    }

    /// Load a tree description file. `.toml` files are read as TOML, anything
    /// else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tree file {}", path.display()))?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let tree = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        };
        tree.with_context(|| format!("Failed to load tree {}", path.display()))
    }

    fn add_described(&mut self, parent: NodeId, kind: NodeKind, desc: &NodeDescription) -> Result<()> {
        let id = self.add_node(parent, &desc.name, kind)?;
        {
            let entry = &mut self.nodes[id.index()];
            entry.usage = desc.usage.clone();
            entry.enabled = desc.on;
            entry.data = desc.data.clone();
        }
        for child in &desc.children {
            self.add_described(id, NodeKind::Child, child)?;
        }
        for member in &desc.members {
            self.add_described(id, NodeKind::Member, member)?;
        }
        Ok(())
    }

    /// Tree name (upper-case).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of nodes, including the top node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a child node (`.` separator) under `parent`.
    pub fn add_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.add_node(parent, name, NodeKind::Child)
    }

    /// Add a member node (`:` separator) under `parent`.
    pub fn add_member(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.add_node(parent, name, NodeKind::Member)
    }

    fn add_node(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> Result<NodeId> {
        let name = name.trim().to_uppercase();
        if name.is_empty() || name.contains(['.', ':', '\\']) {
            return Err(ScopeError::Tree(format!("Invalid node name: {:?}", name)));
        }

        let parent_entry = self
            .get(parent)
            .ok_or_else(|| ScopeError::Tree(format!("Unknown parent {}", parent)))?;
        let full_path = format!("{}{}{}", parent_entry.full_path, kind.separator(), name);
        let depth = parent_entry.depth + 1;

        if self.path_index.contains_key(&full_path) {
            return Err(ScopeError::Tree(format!("Duplicate node: {}", full_path)));
        }

        let id = NodeId(self.nodes.len() as u32);
        self.path_index.insert(full_path.clone(), id);
        self.nodes.push(TreeEntry {
            id,
            name,
            kind,
            parent,
            usage: None,
            enabled: true,
            data: None,
            depth,
            children: Vec::new(),
            members: Vec::new(),
            full_path,
        });

        let parent_entry = &mut self.nodes[parent.index()];
        match kind {
            NodeKind::Member => parent_entry.members.push(id),
            _ => parent_entry.children.push(id),
        }

        Ok(id)
    }

    /// Get a node by id (O(1) array index).
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&TreeEntry> {
        if id.is_valid() {
            self.nodes.get(id.index())
        } else {
            None
        }
    }

    /// Get a mutable reference to a node.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeEntry> {
        if id.is_valid() {
            self.nodes.get_mut(id.index())
        } else {
            None
        }
    }

    /// Iterate over all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.nodes.iter()
    }

    /// Handle for `id`. Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(self.get(id).is_some(), "{} is not a node of {}", id, self.name);
        NodeRef { tree: self, id }
    }

    /// Make `id` the node relative paths resolve against.
    pub fn set_default(&mut self, id: NodeId) -> Result<()> {
        if self.get(id).is_none() {
            return Err(ScopeError::Tree(format!("Unknown default node {}", id)));
        }
        self.default = id;
        Ok(())
    }

    pub fn default_id(&self) -> NodeId {
        self.default
    }

    /// Resolve `path` relative to `base`.
    ///
    /// Absolute paths start with `\`. Relative paths starting with `.` or `:`
    /// are appended to the base path verbatim; bare names are tried as a
    /// member first, then as a child.
    pub fn resolve_from(&self, base: NodeId, path: &str) -> Option<NodeId> {
        let path = path.trim().to_uppercase();
        if path.is_empty() {
            return None;
        }
        if path.starts_with('\\') {
            return self.path_index.get(&path).copied();
        }

        let base_path = &self.get(base)?.full_path;
        if path.starts_with('.') || path.starts_with(':') {
            return self.path_index.get(&format!("{}{}", base_path, path)).copied();
        }

        self.path_index
            .get(&format!("{}:{}", base_path, path))
            .or_else(|| self.path_index.get(&format!("{}.{}", base_path, path)))
            .copied()
    }

    /// A node is on only if it and every ancestor are on.
    fn is_on(&self, id: NodeId) -> bool {
        let mut cur = id;
        while let Some(entry) = self.get(cur) {
            if !entry.enabled {
                return false;
            }
            cur = entry.parent;
        }
        true
    }

    /// Path relative to the default node when `id` lies below it, otherwise
    /// the full path.
    fn minimal_path(&self, id: NodeId) -> String {
        self.relative_path(id, self.default)
    }

    fn relative_path(&self, id: NodeId, base: NodeId) -> String {
        let full = &self.nodes[id.index()].full_path;
        if id == base {
            return full.clone();
        }
        let base_path = &self.nodes[base.index()].full_path;
        match full.strip_prefix(base_path.as_str()) {
            Some(rest) if rest.starts_with('.') || rest.starts_with(':') => rest.to_string(),
            _ => full.clone(),
        }
    }

    fn refs(&self, ids: &[NodeId]) -> Vec<NodeRef<'_>> {
        ids.iter().map(|&id| NodeRef { tree: self, id }).collect()
    }
}

impl SignalTree for MemoryTree {
    type Node<'a> = NodeRef<'a> where Self: 'a;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn top(&self) -> NodeRef<'_> {
        self.node(NodeId::TOP)
    }

    fn default_node(&self) -> NodeRef<'_> {
        self.node(self.default)
    }

    fn find(&self, path: &str) -> Option<NodeRef<'_>> {
        self.resolve_from(self.default, path)
            .map(|id| NodeRef { tree: self, id })
    }
}

/// Borrowed handle to a node of a [`MemoryTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a MemoryTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn entry(&self) -> &'a TreeEntry {
        &self.tree.nodes[self.id.index()]
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.entry().full_path)
    }
}

impl TreeNode for NodeRef<'_> {
    fn children(&self) -> Vec<Self> {
        self.tree.refs(&self.entry().children)
    }

    /// Bare patterns match members; a leading `.` matches children and a
    /// leading `:` matches members explicitly.
    fn wildcard_children(&self, pattern: &str) -> Vec<Self> {
        let entry = self.entry();
        let pattern = pattern.trim().to_uppercase();
        let (candidates, pattern) = if let Some(p) = pattern.strip_prefix('.') {
            (&entry.children, p)
        } else if let Some(p) = pattern.strip_prefix(':') {
            (&entry.members, p)
        } else {
            (&entry.members, pattern.as_str())
        };

        candidates
            .iter()
            .copied()
            .filter(|id| glob_match::glob_match(pattern, &self.tree.nodes[id.index()].name))
            .map(|id| NodeRef { tree: self.tree, id })
            .collect()
    }

    fn usage(&self) -> Option<String> {
        self.entry().usage.clone()
    }

    fn is_enabled(&self) -> bool {
        self.tree.is_on(self.id)
    }

    fn name(&self) -> String {
        self.entry().name.clone()
    }

    fn full_path(&self) -> String {
        self.entry().full_path.clone()
    }

    fn minimal_path(&self) -> String {
        self.tree.minimal_path(self.id)
    }

    fn path_from(&self, base: &Self) -> String {
        if std::ptr::eq(self.tree, base.tree) {
            self.tree.relative_path(self.id, base.id)
        } else {
            self.full_path()
        }
    }

    fn related_node(&self, label: &str) -> Option<Self> {
        self.tree
            .resolve_from(self.id, label)
            .map(|id| NodeRef { tree: self.tree, id })
    }

    fn units(&self) -> Result<Option<String>> {
        let entry = self.entry();
        entry
            .data
            .as_ref()
            .map(|data| data.units.clone())
            .ok_or_else(|| ScopeError::Tree(format!("{}: node has no data", entry.full_path)))
    }
}
