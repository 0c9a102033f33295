// src/routes/cities.rs

use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::query_as;

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::{models::City, AppState};

#[derive(Deserialize)]
pub struct CreateCityBody {
    #[serde(default)]
    pub name: Option<String>,
}

pub async fn list_cities(State(state): State<AppState>) -> ApiResult<Json<Vec<City>>> {
    let rows = query_as::<_, City>(r#"SELECT city_id, name FROM public.cities ORDER BY name"#)
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(rows))
}

pub async fn create_city(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateCityBody>,
) -> ApiResult<Json<City>> {
    let name = super::required_name(body.name)?;
    let row = query_as::<_, City>(
        r#"INSERT INTO public.cities(name) VALUES ($1) RETURNING city_id, name"#,
    )
    .bind(&name)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| ApiError::from_write(e, &format!("city '{name}'")))?;
    tracing::info!(city_id = row.city_id, name = %row.name, "city created");
    Ok(Json(row))
}
