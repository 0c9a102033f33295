// src/routes/clusters.rs

use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::query_as;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::{models::Cluster, AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersQ {
    #[serde(alias = "city_id")]
    pub city_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClusterBody {
    #[serde(alias = "city_id")]
    pub city_id: Option<i64>,
    pub name: Option<String>,
}

pub async fn list_clusters(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ListClustersQ>,
) -> ApiResult<Json<Vec<Cluster>>> {
    let rows = if let Some(city_id) = q.city_id {
        query_as::<_, Cluster>(
            r#"SELECT cluster_id, city_id, name FROM public.clusters WHERE city_id = $1 ORDER BY name"#,
        )
        .bind(city_id)
        .fetch_all(&state.pool)
        .await?
    } else {
        query_as::<_, Cluster>(r#"SELECT cluster_id, city_id, name FROM public.clusters ORDER BY name"#)
            .fetch_all(&state.pool)
            .await?
    };
    Ok(Json(rows))
}

pub async fn create_cluster(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateClusterBody>,
) -> ApiResult<Json<Cluster>> {
    let city_id = body.city_id.ok_or_else(|| ApiError::validation("cityId is required"))?;
    let name = super::required_name(body.name)?;
    let row = query_as::<_, Cluster>(
        r#"
        INSERT INTO public.clusters(city_id, name)
        VALUES ($1, $2)
        RETURNING cluster_id, city_id, name
        "#,
    )
    .bind(city_id)
    .bind(&name)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| ApiError::from_write(e, &format!("cluster '{name}' in city {city_id}")))?;
    tracing::info!(cluster_id = row.cluster_id, city_id, "cluster created");
    Ok(Json(row))
}
