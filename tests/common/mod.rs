//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::path::Path;

/// Read a generated scope file, panicking with the path on failure
pub fn read_scope(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read scope file {}: {}", path.display(), e))
}

/// Value of the first `Scope.<key>: <value>` line for `key`
pub fn scope_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let prefix = format!("Scope.{}: ", key);
    text.lines().find_map(|line| line.strip_prefix(prefix.as_str()))
}

/// Number of panes declared in a scope file
pub fn pane_count(text: &str) -> usize {
    text.lines()
        .filter(|line| line.starts_with("Scope.plot_") && line.contains(".height: "))
        .count()
}
