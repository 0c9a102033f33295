use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub mod analysis;
pub mod centre_planning;
pub mod centres;
pub mod cities;
pub mod clusters;
pub mod designations;
pub mod health;
pub mod workshop;

/// Trimmed, non-empty `name` from a create body.
pub(crate) fn required_name(name: Option<String>) -> ApiResult<String> {
    name.map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::validation("name is required"))
}

pub fn router(state: AppState) -> Router {
    // Very permissive CORS for local dev (tighten for prod)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // masters
        .route(
            "/masters/cities",
            get(cities::list_cities).post(cities::create_city),
        )
        .route(
            "/masters/clusters",
            get(clusters::list_clusters).post(clusters::create_cluster),
        )
        .route(
            "/masters/centres",
            get(centres::list_centres).post(centres::create_centre),
        )
        .route(
            "/masters/designations",
            get(designations::list_designations).post(designations::create_designation),
        )
        // centre shift plans
        .route("/manpower-planning/centre", post(centre_planning::save_centre_plan))
        .route(
            "/manpower-planning/centre/:centre_id",
            get(centre_planning::get_centre_plan),
        )
        .route("/manpower-planning/all", get(centre_planning::list_all_plans))
        // workshop technicians
        .route(
            "/manpower-planning/workshop-technician",
            get(workshop::list_workshop_plans).post(workshop::upsert_workshop_plan),
        )
        .route(
            "/manpower-planning/workshop-technician/:city_id",
            delete(workshop::delete_workshop_plan),
        )
        // reports
        .route(
            "/manpower-planning/cluster/:cluster_id/summary",
            get(analysis::cluster_summary),
        )
        .route(
            "/manpower-planning/bikes-per-employee",
            get(analysis::bikes_per_employee),
        )
        .route("/manpower-planning/city-analysis", get(analysis::city_analysis))
        .route("/manpower-planning/requirement", get(analysis::requirement));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
