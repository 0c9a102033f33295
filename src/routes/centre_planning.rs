// src/routes/centre_planning.rs

use axum::{extract::State, Json};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::{query, query_as, PgConnection};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{CentreManpowerPlanning, CentreManpowerShift, CentrePlanRow};
use crate::planning::{base_manpower, planning_lines};
use crate::{db, AppState};

// ─────────────────────────────────────────────────────────────────────────────
// Request / Response models
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCentrePlanBody {
    #[serde(alias = "centre_id")]
    pub centre_id: Option<i64>,
    #[serde(default)]
    pub shifts: Vec<ShiftItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftItem {
    #[serde(alias = "designation_id")]
    pub designation_id: Option<i64>,
    #[serde(alias = "shift_name")]
    pub shift_name: Option<String>,
    #[serde(alias = "shift_start")]
    pub shift_start: Option<String>,
    #[serde(alias = "shift_end")]
    pub shift_end: Option<String>,
    #[serde(alias = "required_manpower")]
    pub required_manpower: Option<i32>,
}

/// A shift that passed validation.
#[derive(Debug, PartialEq)]
pub struct NewShift {
    pub designation_id: i64,
    pub shift_name: String,
    pub shift_start: Option<NaiveTime>,
    pub shift_end: Option<NaiveTime>,
    pub required_manpower: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCentrePlan {
    pub centre_id: i64,
    pub shifts: Vec<CentreManpowerShift>,
    pub planning_lines: usize,
    pub base_manpower: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn parse_time(field: &str, raw: Option<&str>) -> ApiResult<Option<NaiveTime>> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map(Some)
        .map_err(|e| ApiError::validation(format!("invalid {field} '{s}': {e}")))
}

impl SaveCentrePlanBody {
    /// Checks the whole body before anything touches the database.
    pub fn validate(self) -> ApiResult<(i64, Vec<NewShift>)> {
        let centre_id = self
            .centre_id
            .ok_or_else(|| ApiError::validation("centreId is required"))?;

        let shifts = self
            .shifts
            .into_iter()
            .enumerate()
            .map(|(i, s)| -> ApiResult<NewShift> {
                let designation_id = s.designation_id.ok_or_else(|| {
                    ApiError::validation(format!("shifts[{i}].designationId is required"))
                })?;
                Ok(NewShift {
                    designation_id,
                    shift_name: s
                        .shift_name
                        .map(|n| n.trim().to_string())
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| format!("Shift {}", i + 1)),
                    shift_start: parse_time(&format!("shifts[{i}].shiftStart"), s.shift_start.as_deref())?,
                    shift_end: parse_time(&format!("shifts[{i}].shiftEnd"), s.shift_end.as_deref())?,
                    required_manpower: s.required_manpower.unwrap_or(0),
                })
            })
            .collect::<ApiResult<Vec<_>>>()?;

        Ok((centre_id, shifts))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /manpower-planning/centre/:centre_id
pub async fn get_centre_plan(
    State(state): State<AppState>,
    ApiPath(centre_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<CentreManpowerShift>>> {
    db::find_centre(&state.pool, centre_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("centre {centre_id} not found")))?;

    let rows = query_as::<_, CentreManpowerShift>(
        r#"SELECT * FROM public.centre_manpower_shifts
           WHERE centre_id = $1
           ORDER BY designation_id, shift_start NULLS LAST, centre_manpower_shift_id"#)
        .bind(centre_id)
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(rows))
}

/// POST /manpower-planning/centre
///
/// Replaces the centre's shifts and planning lines in one transaction.
pub async fn save_centre_plan(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SaveCentrePlanBody>,
) -> ApiResult<Json<SavedCentrePlan>> {
    let (centre_id, shifts) = body.validate()?;

    db::find_centre(&state.pool, centre_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("centre {centre_id} not found")))?;

    let lines = planning_lines(
        centre_id,
        shifts.iter().map(|s| (s.designation_id, s.required_manpower)),
    );

    let mut tx = state.pool.begin().await?;
    let saved = replace_centre_plan(&mut *tx, centre_id, &shifts, &lines).await?;
    tx.commit().await?;

    let base = base_manpower(&lines);
    tracing::info!(centre_id, shifts = saved.len(), lines = lines.len(), base, "centre plan replaced");

    Ok(Json(SavedCentrePlan {
        centre_id,
        shifts: saved,
        planning_lines: lines.len(),
        base_manpower: base,
    }))
}

/// Deletes the centre's shifts and planning lines and writes the new ones.
/// Callers run it inside a transaction.
pub async fn replace_centre_plan(
    conn: &mut PgConnection,
    centre_id: i64,
    shifts: &[NewShift],
    lines: &[CentreManpowerPlanning],
) -> ApiResult<Vec<CentreManpowerShift>> {
    query(r#"DELETE FROM public.centre_manpower_shifts WHERE centre_id = $1"#)
        .bind(centre_id)
        .execute(&mut *conn)
        .await?;
    query(r#"DELETE FROM public.centre_manpower_planning WHERE centre_id = $1"#)
        .bind(centre_id)
        .execute(&mut *conn)
        .await?;

    let mut saved = Vec::with_capacity(shifts.len());
    for s in shifts {
        let row = query_as::<_, CentreManpowerShift>(
            r#"
            INSERT INTO public.centre_manpower_shifts
                (centre_id, designation_id, shift_name, shift_start, shift_end, required_manpower)
            VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING centre_manpower_shift_id, centre_id, designation_id, shift_name,
                      shift_start, shift_end, required_manpower
            "#
        )
        .bind(centre_id)
        .bind(s.designation_id)
        .bind(&s.shift_name)
        .bind(s.shift_start)
        .bind(s.shift_end)
        .bind(s.required_manpower)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| ApiError::from_write(e, &format!("shift '{}' for designation {}", s.shift_name, s.designation_id)))?;
        saved.push(row);
    }

    for l in lines {
        query(
            r#"
            INSERT INTO public.centre_manpower_planning
                (centre_id, designation_id, num_shifts, employees_per_shift)
            VALUES ($1,$2,$3,$4)
            "#
        )
        .bind(l.centre_id)
        .bind(l.designation_id)
        .bind(l.num_shifts)
        .bind(l.employees_per_shift)
        .execute(&mut *conn)
        .await?;
    }

    Ok(saved)
}

/// GET /manpower-planning/all
pub async fn list_all_plans(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CentrePlanRow>>> {
    let rows = query_as::<_, CentrePlanRow>(
        r#"
        SELECT ci.city_id, ci.name AS city_name,
               cl.cluster_id, cl.name AS cluster_name,
               ce.centre_id, ce.name AS centre_name,
               d.designation_id, d.name AS designation_name,
               p.num_shifts, p.employees_per_shift,
               (p.num_shifts::BIGINT * p.employees_per_shift::BIGINT) AS base_manpower
        FROM public.centre_manpower_planning p
        JOIN public.centres ce ON ce.centre_id = p.centre_id
        JOIN public.clusters cl ON cl.cluster_id = ce.cluster_id
        JOIN public.cities ci ON ci.city_id = cl.city_id
        JOIN public.designations d ON d.designation_id = p.designation_id
        ORDER BY ci.name, cl.name, ce.name, d.name, p.employees_per_shift
        "#
    )
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(rows))
}
