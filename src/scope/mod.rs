//! Scope file generation
//!
//! Turns a list of signal nodes into a dwscope `.dat` descriptor: the grid is
//! sized by [`ScopeLayout`], then [`ScopeWriter`] streams the header, the
//! global defaults, and one block per pane into the file.
//!
//! # Example
//!
//! ```ignore
//! use scopegen::{discover, emit_tree_scope, DiscoverOptions, MemoryTree, ScopeOptions, SignalTree};
//!
//! let tree = MemoryTree::load("magnetics.json")?;
//! let signals = discover(&tree.top(), DiscoverOptions::default());
//! let summary = emit_tree_scope(&tree, "all_sigs", &signals, None, &ScopeOptions::default())?;
//! println!("wrote {} panes to {}", summary.panes, summary.path.display());
//! ```

pub mod units;
pub mod writer;

pub use units::{bracket_units, signal_units, unit_annotation, CALIBRATION_NODE};
pub use writer::ScopeWriter;

use crate::error::{Result, ResultExt, ScopeError};
use crate::layout::ScopeLayout;
use crate::tree::{SignalTree, TreeNode};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension appended to the caller's base name.
pub const SCOPE_FILE_EXTENSION: &str = "dat";

/// Default maximum number of rows per column
pub const DEFAULT_MAX_ROWS: usize = 11;

/// Default scope window width in pixels
pub const DEFAULT_WIDTH: u32 = 1000;

/// Default scope window height in pixels
pub const DEFAULT_HEIGHT: u32 = 1000;

/// Default smoothing window in samples
pub const DEFAULT_SMOOTH_WINDOW: u32 = 100;

/// Moving-window smoothing applied to every pane's y expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoothing {
    pub enabled: bool,
    /// Window size in samples; must be positive when enabled
    pub window: u32,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            enabled: true,
            window: DEFAULT_SMOOTH_WINDOW,
        }
    }
}

impl Smoothing {
    /// Smoothing over `window` samples.
    pub fn window(window: u32) -> Self {
        Self {
            enabled: true,
            window,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Presentation options for a generated scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeOptions {
    /// Maximum rows in a column before a new column is started
    pub max_rows: usize,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    pub smoothing: Smoothing,
}

impl Default for ScopeOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            smoothing: Smoothing::default(),
        }
    }
}

impl ScopeOptions {
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Check the options before any output is produced.
    pub fn validate(&self) -> Result<()> {
        if self.smoothing.enabled && self.smoothing.window == 0 {
            return Err(ScopeError::InvalidArgument(
                "smoothing window must be positive when smoothing is enabled".to_string(),
            ));
        }
        if self.max_rows == 0 {
            return Err(ScopeError::InvalidArgument(
                "max_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a successful scope generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSummary {
    /// File that was written
    pub path: PathBuf,
    pub layout: ScopeLayout,
    /// Number of panes written (one per signal)
    pub panes: usize,
}

/// `<base>.dat`, keeping any extension already present in `base`.
pub fn scope_file_path(base: impl AsRef<Path>) -> PathBuf {
    let mut name = base.as_ref().as_os_str().to_owned();
    name.push(".");
    name.push(SCOPE_FILE_EXTENSION);
    PathBuf::from(name)
}

/// Write a scope for `signals` to `<base>.dat`, replacing any existing file.
///
/// Pane expressions use paths relative to `default_node`, whatever the
/// tree's own default node is.
///
/// Options are validated first; on failure no file is created or truncated.
pub fn emit_scope<N: TreeNode>(
    base: impl AsRef<Path>,
    tree_label: &str,
    signals: &[N],
    default_node: &N,
    options: &ScopeOptions,
) -> Result<ScopeSummary> {
    options.validate()?;

    let layout = ScopeLayout::compute(signals.len(), options.max_rows, options.width, options.height);
    if layout.pane_height == 0 && !signals.is_empty() {
        tracing::warn!(
            "Scope height {} leaves no room for {} row(s)",
            options.height,
            layout.rows_per_column
        );
    }

    let path = scope_file_path(base);

    let file = File::create(&path)
        .with_context(|| format!("Failed to create scope file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let panes = ScopeWriter::new(&mut out, tree_label, default_node, options)
        .write(&layout, signals)
        .with_context(|| format!("Failed to write scope file {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to flush scope file {}", path.display()))?;

    tracing::info!(
        "{} complete! ({} panes in {} column(s))",
        path.display(),
        panes,
        layout.columns
    );

    Ok(ScopeSummary {
        path,
        layout,
        panes,
    })
}

/// [`emit_scope`] labelled with the tree's name, falling back to the tree's
/// default node when `default_node` is `None`.
pub fn emit_tree_scope<'t, T: SignalTree>(
    tree: &'t T,
    base: impl AsRef<Path>,
    signals: &[T::Node<'t>],
    default_node: Option<T::Node<'t>>,
    options: &ScopeOptions,
) -> Result<ScopeSummary> {
    let default_node = default_node.unwrap_or_else(|| tree.default_node());
    emit_scope(base, &tree.name(), signals, &default_node, options)
}
