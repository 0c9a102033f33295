// src/routes/analysis.rs

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::planning::{
    BikesPerEmployeeReport, Calculator, CityAnalysis, ClusterSummary, HeadcountIndex,
    PanIndiaReport, PlanningSnapshot, Scope, ScopeReport,
};
use crate::{db, AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikesQ {
    #[serde(alias = "use_bic")]
    pub use_bic: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementQ {
    #[serde(alias = "centre_id")]
    pub centre_id: Option<i64>,
    #[serde(alias = "cluster_id")]
    pub cluster_id: Option<i64>,
    #[serde(alias = "city_id")]
    pub city_id: Option<i64>,
}

impl RequirementQ {
    /// `None` means PAN India.
    fn scope(&self) -> ApiResult<Option<Scope>> {
        match (self.centre_id, self.cluster_id, self.city_id) {
            (None, None, None) => Ok(None),
            (Some(id), None, None) => Ok(Some(Scope::Centre(id))),
            (None, Some(id), None) => Ok(Some(Scope::Cluster(id))),
            (None, None, Some(id)) => Ok(Some(Scope::City(id))),
            _ => Err(ApiError::validation(
                "give at most one of centreId, clusterId, cityId",
            )),
        }
    }
}

fn scope_not_found(scope: Scope) -> String {
    match scope {
        Scope::Centre(id) => format!("centre {id} not found"),
        Scope::Cluster(id) => format!("cluster {id} not found"),
        Scope::City(id) => format!("city {id} not found"),
    }
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum RequirementResp {
    Scope(ScopeReport),
    PanIndia(PanIndiaReport),
}

async fn load_with_headcount(state: &AppState) -> ApiResult<(PlanningSnapshot, HeadcountIndex)> {
    let (snapshot, rows) = tokio::try_join!(
        db::load_snapshot(&state.pool),
        db::load_headcount(&state.pool)
    )?;
    let headcount = HeadcountIndex::build(
        &snapshot.cities,
        &snapshot.clusters,
        &snapshot.designations,
        &rows,
    );
    Ok((snapshot, headcount))
}

/// GET /manpower-planning/cluster/:cluster_id/summary
pub async fn cluster_summary(
    State(state): State<AppState>,
    ApiPath(cluster_id): ApiPath<i64>,
) -> ApiResult<Json<ClusterSummary>> {
    let snapshot = db::load_snapshot(&state.pool).await?;
    let summary = Calculator::new(&snapshot, state.planning)
        .cluster_summary(cluster_id)
        .ok_or_else(|| ApiError::not_found(format!("cluster {cluster_id} not found")))?;
    Ok(Json(summary))
}

/// GET /manpower-planning/bikes-per-employee?useBic=bool
pub async fn bikes_per_employee(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<BikesQ>,
) -> ApiResult<Json<BikesPerEmployeeReport>> {
    let (snapshot, headcount) = load_with_headcount(&state).await?;
    let report = Calculator::new(&snapshot, state.planning)
        .bikes_per_employee(q.use_bic.unwrap_or(true), &headcount);
    Ok(Json(report))
}

/// GET /manpower-planning/city-analysis
pub async fn city_analysis(State(state): State<AppState>) -> ApiResult<Json<CityAnalysis>> {
    let (snapshot, headcount) = load_with_headcount(&state).await?;
    let analysis = Calculator::new(&snapshot, state.planning).city_analysis(&headcount);
    tracing::debug!(
        cities = analysis.cities.len(),
        required = analysis.pan_india.totals.required_manpower,
        unmatched = analysis.unmatched_headcount.len(),
        "city analysis computed"
    );
    Ok(Json(analysis))
}

/// GET /manpower-planning/requirement?centreId=|clusterId=|cityId=
pub async fn requirement(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<RequirementQ>,
) -> ApiResult<Json<RequirementResp>> {
    let scope = q.scope()?;
    let (snapshot, headcount) = load_with_headcount(&state).await?;
    let calc = Calculator::new(&snapshot, state.planning);

    let resp = match scope {
        None => RequirementResp::PanIndia(calc.city_analysis(&headcount).pan_india),
        Some(scope) => {
            let report = calc
                .scope_report(scope, &headcount)
                .ok_or_else(|| ApiError::not_found(scope_not_found(scope)))?;
            RequirementResp::Scope(report)
        }
    };
    Ok(Json(resp))
}
