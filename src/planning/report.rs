// src/planning/report.rs
//
// Computed, never persisted. Serialized straight into API responses.

use serde::Serialize;

use super::{DemandBasis, PlanningType, UnmatchedHeadcount, WorkshopRequirement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeKind {
    Centre,
    Cluster,
    City,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignationRequirement {
    pub designation_id: i64,
    pub designation_name: String,
    pub is_planned: bool,
    pub planning_type: PlanningType,
    pub total_shifts: i64,
    pub base_manpower: i64,
    pub required_manpower: Option<i64>,
    /// `None` at centre scope: the roster does not record centres.
    pub current_headcount: Option<i64>,
    pub surplus_deficit: Option<i64>,
    pub shrinkage_percent: Option<f64>,
    pub is_workshop_technician: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeTotals {
    pub required_manpower: i64,
    pub current_headcount: Option<i64>,
    pub surplus_deficit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopSummary {
    #[serde(flatten)]
    pub requirement: WorkshopRequirement,
    pub current_headcount: Option<i64>,
    pub surplus_deficit: Option<i64>,
}

/// Requirement for one centre, cluster or city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeReport {
    pub scope: ScopeKind,
    pub id: i64,
    pub name: String,
    pub city_id: i64,
    pub city_name: String,
    pub shrinkage_percent: f64,
    pub designations: Vec<DesignationRequirement>,
    pub workshop_technician_required: Option<i64>,
    pub workshop_technician: Option<WorkshopSummary>,
    pub totals: ScopeTotals,
}

/// Organisation-wide rollup across cities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanIndiaReport {
    pub designations: Vec<DesignationRequirement>,
    pub workshop_technician_required: i64,
    pub totals: ScopeTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityAnalysis {
    pub cities: Vec<ScopeReport>,
    pub pan_india: PanIndiaReport,
    pub unmatched_headcount: Vec<UnmatchedHeadcount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDesignationSummary {
    pub designation_id: i64,
    pub designation_name: String,
    pub total_shifts: i64,
    pub base_manpower: i64,
    pub required_manpower: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub cluster_id: i64,
    pub cluster_name: String,
    pub city_id: i64,
    pub city_name: String,
    pub shrinkage_percent: f64,
    pub designations: Vec<ClusterDesignationSummary>,
    pub total_shifts: i64,
    pub base_manpower: i64,
    pub required_manpower: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityBikesPerEmployee {
    pub city_id: i64,
    pub city_name: String,
    pub base_value: Option<i64>,
    pub working_employees: i64,
    pub bikes_per_employee: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanIndiaBikesPerEmployee {
    pub base_value: i64,
    pub working_employees: i64,
    pub bikes_per_employee: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BikesPerEmployeeReport {
    pub basis: DemandBasis,
    pub cities: Vec<CityBikesPerEmployee>,
    pub pan_india: PanIndiaBikesPerEmployee,
}
