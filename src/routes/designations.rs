// src/routes/designations.rs

use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::query_as;

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::planning::DesignationCategory;
use crate::{models::Designation, AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesignationBody {
    pub name: Option<String>,
    #[serde(alias = "role_id")]
    pub role_id: Option<i64>,
    #[serde(alias = "sub_department_id")]
    pub sub_department_id: Option<i64>,
    #[serde(alias = "manpower_planning_required")]
    pub manpower_planning_required: Option<bool>,
    pub category: Option<String>,
}

impl CreateDesignationBody {
    /// Explicit category if given, else derived from the name.
    fn category(&self, name: &str) -> ApiResult<DesignationCategory> {
        match self.category.as_deref() {
            Some(raw) => raw.parse().map_err(ApiError::Validation),
            None => Ok(DesignationCategory::from_legacy_name(name)),
        }
    }
}

pub async fn list_designations(State(state): State<AppState>) -> ApiResult<Json<Vec<Designation>>> {
    let rows = query_as::<_, Designation>(
        r#"SELECT designation_id, name, role_id, sub_department_id, manpower_planning_required, category
           FROM public.designations ORDER BY name"#,
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(rows))
}

pub async fn create_designation(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateDesignationBody>,
) -> ApiResult<Json<Designation>> {
    let name = super::required_name(body.name.clone())?;
    let category = body.category(&name)?;
    let row = query_as::<_, Designation>(
        r#"
        INSERT INTO public.designations
            (name, role_id, sub_department_id, manpower_planning_required, category)
        VALUES ($1, $2, $3, COALESCE($4, FALSE), $5)
        RETURNING designation_id, name, role_id, sub_department_id, manpower_planning_required, category
        "#,
    )
    .bind(&name)
    .bind(body.role_id)
    .bind(body.sub_department_id)
    .bind(body.manpower_planning_required)
    .bind(category.as_str())
    .fetch_one(&state.pool)
    .await
    .map_err(|e| ApiError::from_write(e, &format!("designation '{name}'")))?;
    tracing::info!(designation_id = row.designation_id, category = %category, "designation created");
    Ok(Json(row))
}
