// src/routes/workshop.rs

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::{query, query_as};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{Deleted, WorkshopPlanWithCity, WorkshopTechnicianPlanning};
use crate::planning::{workshop_requirement, WorkshopParams, WorkshopRequirement};
use crate::{db, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertWorkshopBody {
    #[serde(alias = "city_id")]
    pub city_id: Option<i64>,
    pub dau: Option<i64>,
    #[serde(alias = "bikes_in_city")]
    pub bikes_in_city: Option<i64>,
    #[serde(alias = "fault_rate_percent")]
    pub fault_rate_percent: Option<f64>,
    #[serde(alias = "per_mechanic_capacity")]
    pub per_mechanic_capacity: Option<f64>,
    #[serde(alias = "shrinkage_percent")]
    pub shrinkage_percent: Option<f64>,
    #[serde(alias = "use_dau")]
    pub use_dau: Option<bool>,
    #[serde(alias = "use_bic")]
    pub use_bic: Option<bool>,
}

impl UpsertWorkshopBody {
    /// (use_dau, use_bic). BIC wins unless only DAU is asked for.
    fn basis_flags(&self) -> (bool, bool) {
        let use_bic = self
            .use_bic
            .unwrap_or_else(|| !self.use_dau.unwrap_or(false));
        let use_dau = self.use_dau.unwrap_or(!use_bic);
        (use_dau, use_bic)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopPlanView {
    #[serde(flatten)]
    pub plan: WorkshopPlanWithCity,
    pub requirement: WorkshopRequirement,
}

/// GET /manpower-planning/workshop-technician
pub async fn list_workshop_plans(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WorkshopPlanView>>> {
    let rows = query_as::<_, WorkshopPlanWithCity>(
        r#"
        SELECT w.*, c.name AS city_name
        FROM public.workshop_technician_planning w
        JOIN public.cities c ON c.city_id = w.city_id
        ORDER BY c.name
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let views = rows
        .into_iter()
        .map(|plan| WorkshopPlanView {
            requirement: workshop_requirement(&WorkshopParams::from(&plan.plan), &state.planning),
            plan,
        })
        .collect();
    Ok(Json(views))
}

/// POST /manpower-planning/workshop-technician
pub async fn upsert_workshop_plan(
    State(state): State<AppState>,
    ApiJson(b): ApiJson<UpsertWorkshopBody>,
) -> ApiResult<Json<WorkshopTechnicianPlanning>> {
    let city_id = b.city_id.ok_or_else(|| ApiError::validation("cityId is required"))?;
    let (use_dau, use_bic) = b.basis_flags();

    db::find_city(&state.pool, city_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("city {city_id} not found")))?;

    let row = query_as::<_, WorkshopTechnicianPlanning>(
        r#"
        INSERT INTO public.workshop_technician_planning
            (city_id, dau, bikes_in_city, fault_rate_percent, per_mechanic_capacity,
             shrinkage_percent, use_dau, use_bic)
        VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
        ON CONFLICT (city_id) DO UPDATE
           SET dau = EXCLUDED.dau,
               bikes_in_city = EXCLUDED.bikes_in_city,
               fault_rate_percent = EXCLUDED.fault_rate_percent,
               per_mechanic_capacity = EXCLUDED.per_mechanic_capacity,
               shrinkage_percent = EXCLUDED.shrinkage_percent,
               use_dau = EXCLUDED.use_dau,
               use_bic = EXCLUDED.use_bic,
               updated_at = now()
        RETURNING *
        "#,
    )
    .bind(city_id)
    .bind(b.dau)
    .bind(b.bikes_in_city)
    .bind(b.fault_rate_percent)
    .bind(b.per_mechanic_capacity)
    .bind(b.shrinkage_percent)
    .bind(use_dau)
    .bind(use_bic)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(city_id, use_bic, shrinkage = ?row.shrinkage_percent, "workshop parameters saved");
    Ok(Json(row))
}

/// DELETE /manpower-planning/workshop-technician/:city_id
pub async fn delete_workshop_plan(
    State(state): State<AppState>,
    ApiPath(city_id): ApiPath<i64>,
) -> ApiResult<Json<Deleted>> {
    let res = query(r#"DELETE FROM public.workshop_technician_planning WHERE city_id = $1"#)
        .bind(city_id)
        .execute(&state.pool)
        .await?;
    if res.rows_affected() == 0 {
        return Err(ApiError::not_found(format!(
            "no workshop parameters for city {city_id}"
        )));
    }
    tracing::info!(city_id, "workshop parameters removed");
    Ok(Json(Deleted { deleted: true }))
}
