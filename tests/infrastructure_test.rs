//! Test to verify test infrastructure works correctly

mod common;

use common::builders::TreeBuilder;
use common::{pane_count, scope_value};
use scopegen::{SignalTree, TreeNode};

#[test]
fn test_infrastructure_setup() {
    // Test that builders work
    let tree = TreeBuilder::new("test")
        .signal(".a:b")
        .default_node(".a")
        .build();

    let b = tree.find(":b").unwrap();
    assert_eq!(b.full_path(), "\\TEST::TOP.A:B");
    assert_eq!(b.minimal_path(), ":B");
}

#[test]
fn test_scope_helpers() {
    let text = "Scope.columns: 2\n\nScope.plot_1_1.height: 10\nScope.plot_1_2.height: 10\n";
    assert_eq!(scope_value(text, "columns"), Some("2"));
    assert_eq!(scope_value(text, "rows"), None);
    assert_eq!(pane_count(text), 2);
}
