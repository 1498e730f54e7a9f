//! Grid layout for scope panes
//!
//! Signals fill the first column top to bottom, then the next column, and so
//! on. The number of columns is the smallest that keeps every column at or
//! under `max_rows`; rows are then spread as evenly as possible, so only the
//! last column can come up short.
//!
//! ```text
//! 23 signals, max_rows = 11
//! columns = ceil(23 / 11) = 3
//! rows    = ceil(23 / 3)  = 8      (24 slots, last one left empty)
//! ```

/// Pixels taken by the scope window's title, file, and status panels.
pub const WINDOW_HEAD_AND_FOOT: u32 = 75;

/// Geometry of a scope grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeLayout {
    /// Number of signals the grid was sized for
    pub signal_count: usize,
    /// Number of columns (0 when there are no signals)
    pub columns: usize,
    /// Rows declared in every column
    pub rows_per_column: usize,
    /// Height of one pane in pixels
    pub pane_height: u32,
    /// Scope window width in pixels
    pub width: u32,
    /// Scope window height in pixels
    pub height: u32,
}

/// Position of one populated pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanePosition {
    /// 1-based row within the column
    pub row: usize,
    /// 1-based column
    pub column: usize,
    /// Index of the signal bound to this pane
    pub index: usize,
}

impl ScopeLayout {
    /// Compute the grid for `signal_count` signals.
    ///
    /// A `max_rows` of zero is treated as one; callers that need to reject it
    /// should validate beforehand.
    pub fn compute(signal_count: usize, max_rows: usize, width: u32, height: u32) -> Self {
        let max_rows = max_rows.max(1);
        let columns = signal_count.div_ceil(max_rows);
        let rows_per_column = if columns == 0 {
            0
        } else {
            signal_count.div_ceil(columns)
        };

        let usable = height.saturating_sub(WINDOW_HEAD_AND_FOOT);
        let pane_height = if rows_per_column == 0 {
            usable
        } else {
            usable / rows_per_column as u32
        };

        Self {
            signal_count,
            columns,
            rows_per_column,
            pane_height,
            width,
            height,
        }
    }

    /// Total number of pane slots in the grid.
    pub fn slots(&self) -> usize {
        self.columns * self.rows_per_column
    }

    /// Right edge of every column except the last, in pixels.
    ///
    /// The last column's edge is the window width and is left implicit.
    /// Values are whole pixels and are written without a fractional part
    /// (`333`, not `333.0`); dwscope reads either form.
    pub fn dividers(&self) -> Vec<u32> {
        let columns = self.columns as u64;
        (1..columns)
            .map(|i| (i * self.width as u64 / columns) as u32)
            .collect()
    }

    /// Populated panes in column order. Yields exactly `signal_count` items.
    pub fn panes(&self) -> impl Iterator<Item = PanePosition> + '_ {
        let rows = self.rows_per_column;
        (0..self.columns)
            .flat_map(move |col| (0..rows).map(move |row| (row, col)))
            .map(move |(row, col)| PanePosition {
                row: row + 1,
                column: col + 1,
                index: col * rows + row,
            })
            .take_while(|pane| pane.index < self.signal_count)
    }
}
