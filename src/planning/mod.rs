// src/planning/mod.rs
//
// Manpower requirement engine. Pure functions over a `PlanningSnapshot`;
// the routes load the snapshot and the roster headcount, this module does
// the arithmetic.

mod calculator;
mod category;
pub mod defaults;
mod lines;
mod reconcile;
mod report;
mod rollup;
mod shrinkage;
mod workshop;

pub use calculator::{BaseManpower, Calculator, PlanningSnapshot, Scope};
pub use category::{DesignationCategory, PlanningType};
pub use defaults::PlanningDefaults;
pub use lines::{base_manpower, planning_lines};
pub use reconcile::{HeadcountIndex, UnmatchedHeadcount, WORKING_STATUS};
pub use report::*;
pub use rollup::{pan_india, rollup_designation};
pub use shrinkage::{apply_shrinkage, ceil_headcount, effective_shrinkage, inflate, round2, shrinkage_factor};
pub use workshop::{workshop_requirement, DemandBasis, WorkshopParams, WorkshopRequirement};
