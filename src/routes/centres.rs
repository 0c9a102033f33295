// src/routes/centres.rs

use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::query_as;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::{models::Centre, AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCentresQ {
    #[serde(alias = "cluster_id")]
    pub cluster_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCentreBody {
    #[serde(alias = "cluster_id")]
    pub cluster_id: Option<i64>,
    pub name: Option<String>,
}

pub async fn list_centres(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ListCentresQ>,
) -> ApiResult<Json<Vec<Centre>>> {
    let rows = match q.cluster_id {
        Some(cluster_id) => {
            query_as::<_, Centre>(
                r#"SELECT centre_id, cluster_id, name FROM public.centres
                   WHERE cluster_id = $1 ORDER BY name"#)
                .bind(cluster_id)
                .fetch_all(&state.pool).await?
        }
        None => {
            query_as::<_, Centre>(
                r#"SELECT centre_id, cluster_id, name FROM public.centres ORDER BY name"#)
                .fetch_all(&state.pool).await?
        }
    };
    Ok(Json(rows))
}

pub async fn create_centre(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateCentreBody>,
) -> ApiResult<Json<Centre>> {
    let cluster_id = body.cluster_id.ok_or_else(|| ApiError::validation("clusterId is required"))?;
    let name = super::required_name(body.name)?;
    let row = query_as::<_, Centre>(
        r#"
        INSERT INTO public.centres(cluster_id, name)
        VALUES ($1, $2)
        RETURNING centre_id, cluster_id, name
        "#,
    )
    .bind(cluster_id)
    .bind(&name)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| ApiError::from_write(e, &format!("centre '{name}' in cluster {cluster_id}")))?;
    Ok(Json(row))
}
