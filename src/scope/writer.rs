//! Line-oriented dwscope descriptor writer.
//!
//! Output is a sequence of `Scope.<key>: <value>` lines in three sections
//! separated by blank lines:
//!
//! ```text
//! Scope.geometry: 1000x1000+207+258          header
//! ...
//! Scope.vpane_1: 500
//!
//! Scope.global_1_1.experiment: magnetics     global defaults
//! ...
//!
//! Scope.rows_in_column_1: 8                  one block per column,
//! Scope.plot_1_1.height: 115                 one sub-block per pane
//! ...
//! ```

use super::units::unit_annotation;
use super::ScopeOptions;
use crate::layout::{PanePosition, ScopeLayout};
use crate::tree::TreeNode;
use std::fmt::Display;
use std::io::{self, Write};

/// Screen offset appended to the geometry string.
pub const WINDOW_OFFSET: &str = "+207+258";
pub const ICON_NAME: &str = "\"all sigs\"";
/// Event that refreshes the scope title.
pub const TITLE_EVENT: &str = "dpcs_store_done";
pub const PRINT_FILE: &str = "all_sigs.ps";
pub const PRINTER: &str = "lp";
pub const FONT: &str = "-misc-fixed-bold-r-normal--14-130-75-75-c-70-iso8859-1";
/// Event that triggers a pane refresh.
pub const STREAM_EVENT: &str = "STREAM";

/// Streams a scope descriptor to `out`.
///
/// Pane expressions address each signal relative to `default_node`, the
/// node written into the `default_node` lines.
pub struct ScopeWriter<'a, W: Write, N: TreeNode> {
    out: W,
    tree_label: &'a str,
    default_node: &'a N,
    options: &'a ScopeOptions,
}

impl<'a, W: Write, N: TreeNode> ScopeWriter<'a, W, N> {
    pub fn new(out: W, tree_label: &'a str, default_node: &'a N, options: &'a ScopeOptions) -> Self {
        Self {
            out,
            tree_label,
            default_node,
            options,
        }
    }

    /// Write the whole descriptor. Returns the number of panes written.
    pub fn write(&mut self, layout: &ScopeLayout, signals: &[N]) -> io::Result<usize> {
        self.write_header(layout)?;
        self.write_globals()?;
        self.write_columns(layout, signals)
    }

    /// Release the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn entry(&mut self, key: &str, value: impl Display) -> io::Result<()> {
        writeln!(self.out, "Scope.{}: {}", key, value)
    }

    fn write_header(&mut self, layout: &ScopeLayout) -> io::Result<()> {
        let title = format!("\"All {} sigs,\"//$shot", self.tree_label.to_uppercase());

        self.entry(
            "geometry",
            format_args!("{}x{}{}", layout.width, layout.height, WINDOW_OFFSET),
        )?;
        self.entry("title", title)?;
        self.entry("icon_name", ICON_NAME)?;
        self.entry("title_event", TITLE_EVENT)?;
        self.entry("print_file", PRINT_FILE)?;
        self.entry("print_event", "")?;
        self.entry("print_portrait", 0)?;
        self.entry("print_window_title", 0)?;
        self.entry("printer", PRINTER)?;
        self.entry("font", FONT)?;
        self.entry("columns", layout.columns)?;

        for (i, divider) in layout.dividers().into_iter().enumerate() {
            self.entry(&format!("vpane_{}", i + 1), divider)?;
        }
        Ok(())
    }

    fn write_globals(&mut self) -> io::Result<()> {
        let experiment = self.tree_label.to_lowercase();
        let default_path = self.default_node.full_path();

        writeln!(self.out)?;
        self.entry("global_1_1.experiment", &experiment)?;
        self.entry(
            "global_1_1.shot",
            format_args!("current_shot({})", experiment),
        )?;
        self.entry("global_1_1.default_node", &default_path)?;
        self.entry("global_1_1.event", STREAM_EVENT)
    }

    fn write_columns(&mut self, layout: &ScopeLayout, signals: &[N]) -> io::Result<usize> {
        let mut written = 0;
        let mut panes = layout.panes().peekable();

        for column in 1..=layout.columns {
            writeln!(self.out)?;
            self.entry(
                &format!("rows_in_column_{}", column),
                layout.rows_per_column,
            )?;

            let mut first = true;
            while let Some(pane) = panes.next_if(|pane| pane.column == column) {
                // Stop as soon as every signal has a pane
                let Some(signal) = signals.get(pane.index) else {
                    return Ok(written);
                };
                if !first {
                    writeln!(self.out)?;
                }
                first = false;

                self.write_pane(&pane, layout.pane_height, signal)?;
                written += 1;
            }
        }

        Ok(written)
    }

    fn write_pane(&mut self, pane: &PanePosition, height: u32, signal: &N) -> io::Result<()> {
        let plot = format!("plot_{}_{}", pane.row, pane.column);
        let default_node = self.default_node;
        let min_path = signal.path_from(default_node);
        let label = format!("{} {}", signal.name(), unit_annotation(signal));
        let default_path = default_node.full_path();

        self.entry(&format!("{}.height", plot), height)?;
        self.entry(&format!("{}.default_node", plot), &default_path)?;
        self.entry(&format!("{}.x", plot), format_args!("dim_of({})", min_path))?;

        let smoothing = self.options.smoothing;
        if smoothing.enabled {
            self.entry(
                &format!("{}.y", plot),
                format_args!("smooth1d({},{})", min_path, smoothing.window),
            )?;
        } else {
            self.entry(&format!("{}.y", plot), &min_path)?;
        }

        self.entry(&format!("{}.label", plot), &label)?;
        self.entry(&format!("{}.title", plot), format_args!("\"{}\"//$shot", label))?;
        self.entry(&format!("{}.event", plot), STREAM_EVENT)
    }
}
