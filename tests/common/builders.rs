//! Test data builders for creating test trees

use scopegen::tree::{DataDescription, MemoryTree, NodeId};

/// Builder for in-memory trees addressed by relative paths such as
/// `.probes:bp01`. Missing intermediate nodes are created on the way.
pub struct TreeBuilder {
    tree: MemoryTree,
}

impl TreeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            tree: MemoryTree::new(name),
        }
    }

    /// Create the nodes along `path` and return the last one
    fn ensure(&mut self, path: &str) -> NodeId {
        let mut current = NodeId::TOP;
        let mut rest = path;

        while !rest.is_empty() {
            let member = rest.starts_with(':');
            let body = &rest[1..];
            let end = body.find(['.', ':']).unwrap_or(body.len());
            let name = &body[..end];
            let separator = if member { ":" } else { "." };

            current = match self
                .tree
                .resolve_from(current, &format!("{}{}", separator, name))
            {
                Some(id) => id,
                None if member => self.tree.add_member(current, name).unwrap(),
                None => self.tree.add_child(current, name).unwrap(),
            };
            rest = &body[end..];
        }

        current
    }

    /// Structure node with no usage
    pub fn structure(mut self, path: &str) -> Self {
        self.ensure(path);
        self
    }

    /// Node with the given usage tag
    pub fn usage(mut self, path: &str, usage: &str) -> Self {
        let id = self.ensure(path);
        self.tree.get_mut(id).unwrap().usage = Some(usage.to_string());
        self
    }

    /// Signal node
    pub fn signal(self, path: &str) -> Self {
        self.usage(path, "SIGNAL")
    }

    /// Signal node whose `:calib` member carries `units`
    pub fn calibrated_signal(mut self, path: &str, units: &str) -> Self {
        self = self.signal(path);
        let calib = self.ensure(&format!("{}:calib", path));
        self.tree.get_mut(calib).unwrap().data = Some(DataDescription {
            units: Some(units.to_string()),
        });
        self
    }

    /// Turn a node off
    pub fn off(mut self, path: &str) -> Self {
        let id = self.ensure(path);
        self.tree.get_mut(id).unwrap().enabled = false;
        self
    }

    /// Make `path` the default node
    pub fn default_node(mut self, path: &str) -> Self {
        let id = self.ensure(path);
        self.tree.set_default(id).unwrap();
        self
    }

    pub fn build(self) -> MemoryTree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopegen::{SignalTree, TreeNode};

    #[test]
    fn test_tree_builder() {
        let tree = TreeBuilder::new("mag")
            .calibrated_signal(".probes:bp01", "T/s/V")
            .off(".probes:bp01")
            .build();

        let bp01 = tree.find("\\MAG::TOP.PROBES:BP01").unwrap();
        assert_eq!(bp01.usage().as_deref(), Some("SIGNAL"));
        assert!(!bp01.is_enabled());
        assert!(bp01.related_node("calib").is_some());
        assert_eq!(tree.len(), 4);
    }
}
