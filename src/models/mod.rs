// src/models/mod.rs

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::planning::DesignationCategory;

// ───────────────────────────────────────
// Master data: geography
// ───────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub city_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub cluster_id: i64,
    pub city_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Centre {
    pub centre_id: i64,
    pub cluster_id: i64,
    pub name: String,
}

// ───────────────────────────────────────
// Master data: job functions
// ───────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    pub designation_id: i64,
    pub name: String,
    pub role_id: Option<i64>,
    pub sub_department_id: Option<i64>,
    pub manpower_planning_required: bool,
    #[sqlx(try_from = "String")]
    pub category: DesignationCategory,
}

// ───────────────────────────────────────
// Planning inputs
// ───────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CentreManpowerShift {
    pub centre_manpower_shift_id: i64,
    pub centre_id: i64,
    pub designation_id: i64,
    pub shift_name: String,
    pub shift_start: Option<NaiveTime>,
    pub shift_end: Option<NaiveTime>,
    pub required_manpower: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CentreManpowerPlanning {
    pub centre_id: i64,
    pub designation_id: i64,
    pub num_shifts: i32,
    pub employees_per_shift: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopTechnicianPlanning {
    pub workshop_technician_planning_id: i64,
    pub city_id: i64,
    pub dau: Option<i64>,
    pub bikes_in_city: Option<i64>,
    pub fault_rate_percent: Option<f64>,
    pub per_mechanic_capacity: Option<f64>,
    pub shrinkage_percent: Option<f64>,
    pub use_dau: bool,
    pub use_bic: bool,
    pub updated_at: DateTime<Utc>,
}

// ───────────────────────────────────────
// Read models
// ───────────────────────────────────────

/// One planning line joined with its full hierarchy.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CentrePlanRow {
    pub city_id: i64,
    pub city_name: String,
    pub cluster_id: i64,
    pub cluster_name: String,
    pub centre_id: i64,
    pub centre_name: String,
    pub designation_id: i64,
    pub designation_name: String,
    pub num_shifts: i32,
    pub employees_per_shift: i32,
    pub base_manpower: i64,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopPlanWithCity {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub plan: WorkshopTechnicianPlanning,
    pub city_name: String,
}

/// Working employees grouped by their free-text city/cluster/designation.
#[derive(Debug, Clone, FromRow)]
pub struct HeadcountRow {
    pub city: Option<String>,
    pub cluster: Option<String>,
    pub designation: Option<String>,
    pub headcount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}
