// src/planning/shrinkage.rs

// Rounding slack in units of the value's own precision. A handful of float
// operations lie between the inputs and the value being rounded.
const CEIL_ULPS: f64 = 8.0;

/// Rounds a fractional headcount up to whole people.
///
/// Only float noise is absorbed: a value within `CEIL_ULPS` machine epsilons
/// (relative) above an integer is taken as that integer, so the slack never
/// reaches a real fraction of a person for any representable headcount.
pub fn ceil_headcount(value: f64) -> i64 {
    let slack = value.abs() * f64::EPSILON * CEIL_ULPS;
    (value - slack).ceil() as i64
}

/// `value / shrinkage_factor(pct)`, computed as `value * 100 / (100 - pct)`
/// so whole-number percentages divide exactly once.
pub fn inflate(value: f64, shrinkage_percent: f64) -> f64 {
    value * 100.0 / (100.0 - shrinkage_percent)
}

pub fn shrinkage_factor(shrinkage_percent: f64) -> f64 {
    1.0 - shrinkage_percent / 100.0
}

/// Inflates base manpower by the shrinkage buffer.
///
/// A factor of zero or below (shrinkage of 100% or more) returns `base`
/// unchanged.
pub fn apply_shrinkage(base: i64, shrinkage_percent: f64) -> i64 {
    if shrinkage_factor(shrinkage_percent) > 0.0 {
        ceil_headcount(inflate(base as f64, shrinkage_percent))
    } else {
        base
    }
}

/// Back-solves the shrinkage that relates an aggregate base to an aggregate
/// requirement. `None` when nothing is required.
pub fn effective_shrinkage(total_base: i64, total_required: i64) -> Option<f64> {
    if total_required > 0 {
        Some(round2((1.0 - total_base as f64 / total_required as f64) * 100.0))
    } else {
        None
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
