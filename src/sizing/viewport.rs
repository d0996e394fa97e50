//! Reconciliation of resolved column widths against the viewport.
//!
//! # Modes
//!
//! - `Independent`: widths pass through; `size_to_remaining` is meaningless
//!   and reported.
//! - `FitColsToViewport`: if the columns overflow the viewport by more than
//!   the scroll threshold, fall back to `Independent`. Otherwise leftover
//!   space goes to the `size_to_remaining` columns, or, when there are none
//!   (or the viewport is narrower than the columns), every flexible column
//!   is scaled so the total equals the viewport width.
//! - `FitViewportToCols`: the viewport takes the total column width, clamped
//!   to its limits; if clamping kicked in, the columns are fitted to the
//!   clamped viewport. That fit can itself fall back to `Independent`
//!   through the scroll threshold, in which case no viewport width is
//!   reported.
//!
//! Locked and non-resizable columns are never scaled. When scaling pushes a
//! column outside its own min/max it is clamped and the difference is shared
//! among the remaining unclamped columns once. There is no second retry, so
//! a column pushed out of range by the redistribution itself is clamped and
//! the total may then miss the target.

use super::options::{ViewportMode, ViewportState};
use super::resolver::ResolvedColumnWidth;
use crate::model::ColumnId;
use tracing::{debug, warn};

/// Something the reconciler noticed but worked around.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileNote {
    /// `size_to_remaining` has no effect in Independent mode.
    SizeToRemainingIgnored(ColumnId),
    /// The columns were too wide to fit; scrolling instead.
    SwitchedToScroll {
        /// Total resolved width.
        total_px: u64,
        /// Largest total the threshold allows.
        limit_px: f64,
    },
    /// FitViewportToCols hit a viewport limit.
    ViewportClamped {
        /// Total column width the viewport would have taken.
        wanted_px: u64,
        /// Viewport width after the limits.
        clamped_px: u32,
    },
}

/// Final widths of one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    /// One width per input column, same order.
    pub widths: Vec<u32>,
    /// New viewport width, when the mode resizes the viewport.
    pub viewport_width_px: Option<u32>,
    /// The mode actually applied after any fallback.
    pub effective_mode: ViewportMode,
    /// Adjustments made along the way.
    pub notes: Vec<ReconcileNote>,
}

impl ReconcileOutcome {
    /// Sum of all widths.
    pub fn total_width(&self) -> u64 {
        self.widths.iter().map(|w| u64::from(*w)).sum()
    }
}

/// Fit the resolved widths to the viewport according to `viewport.mode`.
pub fn reconcile(resolved: &[ResolvedColumnWidth], viewport: &ViewportState) -> ReconcileOutcome {
    match viewport.mode {
        ViewportMode::Independent => independent(resolved),
        ViewportMode::FitColsToViewport => fit_cols_to_viewport(
            resolved,
            viewport.available_width_px,
            viewport.switch_to_scroll_threshold_percent,
        ),
        ViewportMode::FitViewportToCols => fit_viewport_to_cols(resolved, viewport),
    }
}

fn widths_of(resolved: &[ResolvedColumnWidth]) -> Vec<u32> {
    resolved.iter().map(|r| r.width_px).collect()
}

fn total_of(resolved: &[ResolvedColumnWidth]) -> u64 {
    resolved.iter().map(|r| u64::from(r.width_px)).sum()
}

fn independent(resolved: &[ResolvedColumnWidth]) -> ReconcileOutcome {
    let notes = resolved
        .iter()
        .filter(|r| r.size_to_remaining)
        .map(|r| {
            warn!(
                column = %r.column_id,
                "size_to_remaining is ignored in Independent viewport mode"
            );
            ReconcileNote::SizeToRemainingIgnored(r.column_id.clone())
        })
        .collect();

    ReconcileOutcome {
        widths: widths_of(resolved),
        viewport_width_px: None,
        effective_mode: ViewportMode::Independent,
        notes,
    }
}

fn fit_cols_to_viewport(
    resolved: &[ResolvedColumnWidth],
    available_px: u32,
    threshold: Option<f64>,
) -> ReconcileOutcome {
    let total = total_of(resolved);
    let available = f64::from(available_px);

    if let Some(percent) = threshold {
        let limit_px = available * (1.0 + percent);
        if total as f64 > limit_px {
            debug!(total, limit_px, "Columns too wide to fit, switching to scroll");
            return ReconcileOutcome {
                widths: widths_of(resolved),
                viewport_width_px: None,
                effective_mode: ViewportMode::Independent,
                notes: vec![ReconcileNote::SwitchedToScroll {
                    total_px: total,
                    limit_px,
                }],
            };
        }
    }

    let growers: Vec<usize> = resolved
        .iter()
        .enumerate()
        .filter(|(_, r)| r.size_to_remaining && !r.fixed)
        .map(|(i, _)| i)
        .collect();

    let mut targets: Vec<f64> = resolved.iter().map(|r| f64::from(r.width_px)).collect();

    if u64::from(available_px) > total && !growers.is_empty() {
        grow_remaining(resolved, &mut targets, &growers, available - total as f64);
        clamp_and_redistribute(resolved, &mut targets, &growers);
    } else {
        let flexible: Vec<usize> = resolved
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.fixed)
            .map(|(i, _)| i)
            .collect();
        let fixed_total: f64 = resolved
            .iter()
            .filter(|r| r.fixed)
            .map(|r| f64::from(r.width_px))
            .sum();
        let flexible_total = total as f64 - fixed_total;

        if flexible_total > 0.0 {
            let factor = (available - fixed_total).max(0.0) / flexible_total;
            for &i in &flexible {
                targets[i] *= factor;
            }
            clamp_and_redistribute(resolved, &mut targets, &flexible);
        }
    }

    ReconcileOutcome {
        widths: apportion(&targets),
        viewport_width_px: None,
        effective_mode: ViewportMode::FitColsToViewport,
        notes: Vec::new(),
    }
}

fn fit_viewport_to_cols(resolved: &[ResolvedColumnWidth], viewport: &ViewportState) -> ReconcileOutcome {
    let total = total_of(resolved);
    let mut target = total;
    if let Some(max) = viewport.max_viewport_width_px {
        target = target.min(u64::from(max));
    }
    if let Some(min) = viewport.min_viewport_width_px {
        target = target.max(u64::from(min));
    }
    let target_px = u32::try_from(target).unwrap_or(u32::MAX);

    if target == total {
        return ReconcileOutcome {
            widths: widths_of(resolved),
            viewport_width_px: Some(target_px),
            effective_mode: ViewportMode::FitViewportToCols,
            notes: Vec::new(),
        };
    }

    let mut outcome = fit_cols_to_viewport(
        resolved,
        target_px,
        viewport.switch_to_scroll_threshold_percent,
    );
    // A degraded fit scrolls; the viewport keeps its size.
    if outcome.effective_mode != ViewportMode::Independent {
        outcome.viewport_width_px = Some(target_px);
    }
    outcome.notes.insert(
        0,
        ReconcileNote::ViewportClamped {
            wanted_px: total,
            clamped_px: target_px,
        },
    );
    outcome
}

/// Share `surplus` among `growers` by weight (explicit weight, else own width).
fn grow_remaining(
    resolved: &[ResolvedColumnWidth],
    targets: &mut [f64],
    growers: &[usize],
    surplus: f64,
) {
    let weights: Vec<f64> = growers
        .iter()
        .map(|&i| {
            resolved[i]
                .remaining_weight
                .unwrap_or(f64::from(resolved[i].width_px))
                .max(0.0)
        })
        .collect();
    let weight_total: f64 = weights.iter().sum();

    for (&i, weight) in growers.iter().zip(&weights) {
        let share = if weight_total > 0.0 {
            weight / weight_total
        } else {
            1.0 / growers.len() as f64
        };
        targets[i] += surplus * share;
    }
}

fn clamp_to(r: &ResolvedColumnWidth, value: f64) -> f64 {
    let mut v = value;
    if let Some(max) = r.max_width_px {
        v = v.min(f64::from(max));
    }
    if let Some(min) = r.min_width_px {
        v = v.max(f64::from(min));
    }
    v.max(0.0)
}

/// Clamp every eligible column, then share the clamped-off difference among
/// the unclamped ones in a single second pass.
fn clamp_and_redistribute(resolved: &[ResolvedColumnWidth], targets: &mut [f64], eligible: &[usize]) {
    let mut clamped = vec![false; targets.len()];
    let mut delta = 0.0;

    for &i in eligible {
        let c = clamp_to(&resolved[i], targets[i]);
        if c != targets[i] {
            delta += targets[i] - c;
            targets[i] = c;
            clamped[i] = true;
        }
    }

    if delta == 0.0 {
        return;
    }

    let receivers: Vec<usize> = eligible.iter().copied().filter(|&i| !clamped[i]).collect();
    if receivers.is_empty() {
        return;
    }

    let base: f64 = receivers.iter().map(|&i| targets[i]).sum();
    for &i in &receivers {
        let share = if base > 0.0 {
            targets[i] / base
        } else {
            1.0 / receivers.len() as f64
        };
        targets[i] = clamp_to(&resolved[i], targets[i] + delta * share);
    }
}

/// Round to whole pixels keeping the rounded total of `targets`.
///
/// Largest-remainder: floor everything, then hand the missing pixels to the
/// largest fractional parts, earliest column first on ties.
fn apportion(targets: &[f64]) -> Vec<u32> {
    const EPSILON: f64 = 1e-9;

    let floors: Vec<f64> = targets.iter().map(|t| t.max(0.0).floor()).collect();
    let wanted = targets.iter().map(|t| t.max(0.0)).sum::<f64>().round();
    let mut missing = (wanted - floors.iter().sum::<f64>()).max(0.0) as usize;

    let mut order: Vec<usize> = (0..targets.len())
        .filter(|&i| targets[i] - floors[i] > EPSILON)
        .collect();
    order.sort_by(|&a, &b| {
        let fa = targets[a] - floors[a];
        let fb = targets[b] - floors[b];
        fb.total_cmp(&fa).then(a.cmp(&b))
    });

    let mut widths: Vec<u32> = floors.iter().map(|f| f.min(u32::MAX as f64) as u32).collect();
    for i in order {
        if missing == 0 {
            break;
        }
        widths[i] = widths[i].saturating_add(1);
        missing -= 1;
    }
    widths
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
