//! Unit annotations for pane labels.
//!
//! A signal is usually stored as `calib * amplifier_output`, where the
//! amplifier output is in volts and the calibration factor carries units of
//! `something/V`. Dropping the last `/` component of the calibration units
//! therefore gives the units of the signal itself.

use crate::tree::TreeNode;

/// Related node holding a signal's calibration factor.
pub const CALIBRATION_NODE: &str = "calib";

/// Bracketed units of `signal`, or `None` when they cannot be determined.
///
/// Missing calibration nodes, unreadable data and data without units all
/// collapse to `None`.
pub fn signal_units<N: TreeNode>(signal: &N) -> Option<String> {
    let calib = signal.related_node(CALIBRATION_NODE)?;
    match calib.units() {
        Ok(units) => units.map(|units| bracket_units(&units)),
        Err(e) => {
            tracing::debug!("No units for {}: {}", signal.full_path(), e);
            None
        }
    }
}

/// Units text placed after a signal's name in its label; empty if unknown.
pub fn unit_annotation<N: TreeNode>(signal: &N) -> String {
    signal_units(signal).unwrap_or_default()
}

/// Strip whitespace, drop the last `/` component, and wrap in brackets.
///
/// `"T / s / V"` becomes `"[T/s]"`; a unit with no `/` becomes `"[]"`.
pub fn bracket_units(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parts: Vec<&str> = compact.split('/').collect();
    parts.pop();
    format!("[{}]", parts.join("/"))
}
