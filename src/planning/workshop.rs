// src/planning/workshop.rs

use serde::Serialize;

use super::{ceil_headcount, inflate, round2, shrinkage_factor, PlanningDefaults};
use crate::models::WorkshopTechnicianPlanning;

/// Demand metric a city sizes its workshop on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DemandBasis {
    Dau,
    Bic,
}

impl DemandBasis {
    pub fn from_use_bic(use_bic: bool) -> Self {
        if use_bic {
            Self::Bic
        } else {
            Self::Dau
        }
    }
}

/// Per-city inputs of the workshop technician formula. Unset values take
/// the configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkshopParams {
    pub dau: Option<i64>,
    pub bikes_in_city: Option<i64>,
    pub fault_rate_percent: Option<f64>,
    pub per_mechanic_capacity: Option<f64>,
    pub shrinkage_percent: Option<f64>,
    pub use_bic: bool,
}

impl From<&WorkshopTechnicianPlanning> for WorkshopParams {
    fn from(row: &WorkshopTechnicianPlanning) -> Self {
        Self {
            dau: row.dau,
            bikes_in_city: row.bikes_in_city,
            fault_rate_percent: row.fault_rate_percent,
            per_mechanic_capacity: row.per_mechanic_capacity,
            shrinkage_percent: row.shrinkage_percent,
            use_bic: row.use_bic,
        }
    }
}

impl WorkshopParams {
    pub fn basis(&self) -> DemandBasis {
        DemandBasis::from_use_bic(self.use_bic)
    }

    /// Bikes in city or DAU, whichever the city plans on.
    pub fn base_value(&self) -> Option<i64> {
        match self.basis() {
            DemandBasis::Bic => self.bikes_in_city,
            DemandBasis::Dau => self.dau,
        }
    }

    pub fn shrinkage_or(&self, defaults: &PlanningDefaults) -> f64 {
        self.shrinkage_percent.unwrap_or(defaults.shrinkage_percent)
    }
}

/// Combined requirement for all workshop technician designations of a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopRequirement {
    pub basis: DemandBasis,
    pub base_value: i64,
    pub fault_rate_percent: f64,
    pub per_mechanic_capacity: f64,
    pub faulty_units: f64,
    pub base_technicians: f64,
    pub shrinkage_percent: f64,
    pub required: i64,
}

pub fn workshop_requirement(params: &WorkshopParams, defaults: &PlanningDefaults) -> WorkshopRequirement {
    let base_value = params.base_value().unwrap_or(0);
    let fault_rate_percent = params.fault_rate_percent.unwrap_or(defaults.fault_rate_percent);
    // zero capacity would divide by zero
    let per_mechanic_capacity = params
        .per_mechanic_capacity
        .filter(|c| *c > 0.0)
        .unwrap_or(defaults.mechanic_capacity);
    let shrinkage_percent = params.shrinkage_or(defaults);

    let faulty_units = base_value as f64 * fault_rate_percent / 100.0;
    let base_technicians = faulty_units / per_mechanic_capacity;
    let required = if shrinkage_factor(shrinkage_percent) > 0.0 {
        ceil_headcount(inflate(base_technicians, shrinkage_percent))
    } else {
        ceil_headcount(base_technicians)
    };

    WorkshopRequirement {
        basis: params.basis(),
        base_value,
        fault_rate_percent,
        per_mechanic_capacity,
        faulty_units: round2(faulty_units),
        base_technicians: round2(base_technicians),
        shrinkage_percent,
        required,
    }
}
