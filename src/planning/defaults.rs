// src/planning/defaults.rs

/// Shrinkage buffer applied when a city has no workshop parameter row.
pub const DEFAULT_SHRINKAGE_PERCENT: f64 = 15.0;
/// Share of the demand base expected to need a workshop visit on a given day.
pub const DEFAULT_FAULT_RATE_PERCENT: f64 = 8.0;
/// Faulty units one mechanic clears per day.
pub const DEFAULT_MECHANIC_CAPACITY: f64 = 10.0;

/// Fallbacks used wherever a planning input is unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanningDefaults {
    pub shrinkage_percent: f64,
    pub fault_rate_percent: f64,
    pub mechanic_capacity: f64,
}

impl Default for PlanningDefaults {
    fn default() -> Self {
        Self {
            shrinkage_percent: DEFAULT_SHRINKAGE_PERCENT,
            fault_rate_percent: DEFAULT_FAULT_RATE_PERCENT,
            mechanic_capacity: DEFAULT_MECHANIC_CAPACITY,
        }
    }
}
