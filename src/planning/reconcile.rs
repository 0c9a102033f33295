// src/planning/reconcile.rs

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{City, Cluster, Designation, HeadcountRow};

/// Employees counted towards headcount.
pub const WORKING_STATUS: &str = "working";

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Working employees whose free-text city or designation names no master
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedHeadcount {
    pub city: Option<String>,
    pub designation: Option<String>,
    pub count: i64,
}

/// Live headcount keyed by master-data ids.
///
/// Employee rows carry names, not ids; they are resolved once here
/// (trimmed, case-insensitive). Rows that do not resolve are kept aside in
/// [`HeadcountIndex::unmatched`] instead of disappearing.
#[derive(Debug, Default)]
pub struct HeadcountIndex {
    by_city: HashMap<(i64, i64), i64>,
    by_cluster: HashMap<(i64, i64), i64>,
    city_totals: HashMap<i64, i64>,
    unmatched: Vec<UnmatchedHeadcount>,
}

impl HeadcountIndex {
    pub fn build(
        cities: &[City],
        clusters: &[Cluster],
        designations: &[Designation],
        rows: &[HeadcountRow],
    ) -> Self {
        let city_ids: HashMap<String, i64> =
            cities.iter().map(|c| (normalize(&c.name), c.city_id)).collect();
        let cluster_ids: HashMap<(i64, String), i64> = clusters
            .iter()
            .map(|c| ((c.city_id, normalize(&c.name)), c.cluster_id))
            .collect();
        let designation_ids: HashMap<String, i64> = designations
            .iter()
            .map(|d| (normalize(&d.name), d.designation_id))
            .collect();

        let mut index = Self::default();
        let mut unmatched: BTreeMap<(Option<String>, Option<String>), i64> = BTreeMap::new();

        for row in rows {
            let city_id = row
                .city
                .as_deref()
                .and_then(|c| city_ids.get(&normalize(c)))
                .copied();
            let designation_id = row
                .designation
                .as_deref()
                .and_then(|d| designation_ids.get(&normalize(d)))
                .copied();

            if let Some(city_id) = city_id {
                *index.city_totals.entry(city_id).or_default() += row.headcount;
            }

            match (city_id, designation_id) {
                (Some(city_id), Some(designation_id)) => {
                    *index.by_city.entry((city_id, designation_id)).or_default() += row.headcount;
                    let cluster_id = row
                        .cluster
                        .as_deref()
                        .and_then(|c| cluster_ids.get(&(city_id, normalize(c))))
                        .copied();
                    if let Some(cluster_id) = cluster_id {
                        *index
                            .by_cluster
                            .entry((cluster_id, designation_id))
                            .or_default() += row.headcount;
                    }
                }
                _ => {
                    *unmatched
                        .entry((row.city.clone(), row.designation.clone()))
                        .or_default() += row.headcount;
                }
            }
        }

        index.unmatched = unmatched
            .into_iter()
            .map(|((city, designation), count)| UnmatchedHeadcount { city, designation, count })
            .collect();

        if !index.unmatched.is_empty() {
            let employees: i64 = index.unmatched.iter().map(|u| u.count).sum();
            tracing::warn!(
                pairs = index.unmatched.len(),
                employees,
                "working employees do not match city/designation master data"
            );
        }
        index
    }

    pub fn city(&self, city_id: i64, designation_id: i64) -> i64 {
        self.by_city.get(&(city_id, designation_id)).copied().unwrap_or(0)
    }

    pub fn cluster(&self, cluster_id: i64, designation_id: i64) -> i64 {
        self.by_cluster
            .get(&(cluster_id, designation_id))
            .copied()
            .unwrap_or(0)
    }

    /// All working employees of a city, whatever their designation.
    pub fn city_total(&self, city_id: i64) -> i64 {
        self.city_totals.get(&city_id).copied().unwrap_or(0)
    }

    pub fn unmatched(&self) -> &[UnmatchedHeadcount] {
        &self.unmatched
    }
}
