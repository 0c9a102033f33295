// src/planning/rollup.rs

use std::collections::BTreeMap;

use super::{effective_shrinkage, DesignationRequirement, PanIndiaReport, ScopeReport, ScopeTotals};

pub(crate) fn surplus(current: Option<i64>, required: Option<i64>) -> Option<i64> {
    Some(current? - required?)
}

/// Combines one designation's rows from several child scopes.
///
/// Base and required manpower are summed over planned children only and the
/// shrinkage is back-solved from those sums, since children may sit in
/// cities with different shrinkage.
pub fn rollup_designation<'a, I>(rows: I) -> Option<DesignationRequirement>
where
    I: IntoIterator<Item = &'a DesignationRequirement>,
{
    let mut rows = rows.into_iter();
    let first = rows.next()?;

    let mut acc = first.clone();
    acc.is_planned = false;
    acc.total_shifts = 0;
    acc.base_manpower = 0;
    let mut total_required = 0;
    let mut current = Some(0);

    for row in std::iter::once(first).chain(rows) {
        acc.total_shifts += row.total_shifts;
        current = current.zip(row.current_headcount).map(|(a, b)| a + b);
        if row.is_planned {
            acc.is_planned = true;
            acc.base_manpower += row.base_manpower;
            total_required += row.required_manpower.unwrap_or(0);
        }
    }

    acc.required_manpower = acc.is_planned.then_some(total_required);
    acc.shrinkage_percent = if acc.is_planned {
        effective_shrinkage(acc.base_manpower, total_required)
    } else {
        None
    };
    acc.current_headcount = current;
    acc.surplus_deficit = surplus(current, acc.required_manpower);
    Some(acc)
}

/// Rolls city reports up to the organisation.
pub fn pan_india(cities: &[ScopeReport]) -> PanIndiaReport {
    let mut by_designation: BTreeMap<(&str, i64), Vec<&DesignationRequirement>> = BTreeMap::new();
    for row in cities.iter().flat_map(|c| c.designations.iter()) {
        by_designation
            .entry((row.designation_name.as_str(), row.designation_id))
            .or_default()
            .push(row);
    }
    let designations = by_designation
        .into_values()
        .filter_map(rollup_designation)
        .collect();

    let required_manpower: i64 = cities.iter().map(|c| c.totals.required_manpower).sum();
    let current_headcount: Option<i64> = cities.iter().map(|c| c.totals.current_headcount).sum();

    PanIndiaReport {
        designations,
        workshop_technician_required: cities
            .iter()
            .filter_map(|c| c.workshop_technician_required)
            .sum(),
        totals: ScopeTotals {
            required_manpower,
            current_headcount,
            surplus_deficit: surplus(current_headcount, Some(required_manpower)),
        },
    }
}
