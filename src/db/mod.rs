// src/db/mod.rs

use sqlx::{postgres::PgPoolOptions, query_as, PgPool};

use crate::config::Config;
use crate::models::{
    Centre, CentreManpowerPlanning, City, Cluster, Designation, HeadcountRow,
    WorkshopTechnicianPlanning,
};
use crate::planning::{PlanningSnapshot, WORKING_STATUS};

pub async fn connect(cfg: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect(&cfg.database_url)
        .await?;

    tracing::info!(max_connections = cfg.max_connections, "connected to PostgreSQL");
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("migrations applied");
    Ok(())
}

/// Loads every input of the requirement calculation.
pub async fn load_snapshot(pool: &PgPool) -> Result<PlanningSnapshot, sqlx::Error> {
    let cities = query_as::<_, City>(r#"SELECT city_id, name FROM public.cities ORDER BY name"#)
        .fetch_all(pool)
        .await?;
    let clusters = query_as::<_, Cluster>(
        r#"SELECT cluster_id, city_id, name FROM public.clusters ORDER BY name"#,
    )
    .fetch_all(pool)
    .await?;
    let centres = query_as::<_, Centre>(
        r#"SELECT centre_id, cluster_id, name FROM public.centres ORDER BY name"#,
    )
    .fetch_all(pool)
    .await?;
    let designations = query_as::<_, Designation>(
        r#"SELECT designation_id, name, role_id, sub_department_id,
                  manpower_planning_required, category
           FROM public.designations ORDER BY name"#,
    )
    .fetch_all(pool)
    .await?;
    let lines = query_as::<_, CentreManpowerPlanning>(
        r#"SELECT centre_id, designation_id, num_shifts, employees_per_shift
           FROM public.centre_manpower_planning"#,
    )
    .fetch_all(pool)
    .await?;
    let workshop = query_as::<_, WorkshopTechnicianPlanning>(
        r#"SELECT * FROM public.workshop_technician_planning"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(PlanningSnapshot { cities, clusters, centres, designations, lines, workshop })
}

/// Working employees grouped by their free-text city/cluster/designation.
pub async fn load_headcount(pool: &PgPool) -> Result<Vec<HeadcountRow>, sqlx::Error> {
    query_as::<_, HeadcountRow>(
        r#"
        SELECT city, cluster, designation, COUNT(*)::BIGINT AS headcount
        FROM public.employees
        WHERE LOWER(TRIM(working_status)) = $1
        GROUP BY city, cluster, designation
        "#,
    )
    .bind(WORKING_STATUS)
    .fetch_all(pool)
    .await
}

pub async fn find_city(pool: &PgPool, city_id: i64) -> Result<Option<City>, sqlx::Error> {
    query_as::<_, City>(r#"SELECT city_id, name FROM public.cities WHERE city_id = $1"#)
        .bind(city_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_cluster(pool: &PgPool, cluster_id: i64) -> Result<Option<Cluster>, sqlx::Error> {
    query_as::<_, Cluster>(
        r#"SELECT cluster_id, city_id, name FROM public.clusters WHERE cluster_id = $1"#,
    )
    .bind(cluster_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_centre(pool: &PgPool, centre_id: i64) -> Result<Option<Centre>, sqlx::Error> {
    query_as::<_, Centre>(
        r#"SELECT centre_id, cluster_id, name FROM public.centres WHERE centre_id = $1"#,
    )
    .bind(centre_id)
    .fetch_optional(pool)
    .await
}
