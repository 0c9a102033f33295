// src/planning/calculator.rs

use std::collections::{BTreeMap, HashMap};

use super::rollup::{pan_india, surplus};
use super::{
    apply_shrinkage, round2, workshop_requirement, BikesPerEmployeeReport, CityAnalysis,
    CityBikesPerEmployee, ClusterDesignationSummary, ClusterSummary, DemandBasis,
    DesignationRequirement, HeadcountIndex, PanIndiaBikesPerEmployee, PlanningDefaults,
    PlanningType, ScopeKind, ScopeReport, ScopeTotals, WorkshopParams, WorkshopRequirement,
    WorkshopSummary,
};
use crate::models::{
    Centre, CentreManpowerPlanning, City, Cluster, Designation, WorkshopTechnicianPlanning,
};

/// Everything the calculator reads, loaded fresh for each request.
#[derive(Debug, Clone, Default)]
pub struct PlanningSnapshot {
    pub cities: Vec<City>,
    pub clusters: Vec<Cluster>,
    pub centres: Vec<Centre>,
    pub designations: Vec<Designation>,
    pub lines: Vec<CentreManpowerPlanning>,
    pub workshop: Vec<WorkshopTechnicianPlanning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Centre(i64),
    Cluster(i64),
    City(i64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseManpower {
    pub total_shifts: i64,
    pub base: i64,
}

struct Resolved<'a> {
    kind: ScopeKind,
    id: i64,
    name: &'a str,
    city: &'a City,
}

/// Shrinkage-adjusted requirement over a [`PlanningSnapshot`].
///
/// Rows whose hierarchy does not resolve (a centre without its cluster, a
/// cluster without its city, a line for an unknown designation) are
/// skipped, as an inner join would.
pub struct Calculator<'a> {
    snapshot: &'a PlanningSnapshot,
    defaults: PlanningDefaults,
    cities: HashMap<i64, &'a City>,
    clusters: HashMap<i64, &'a Cluster>,
    centres: HashMap<i64, &'a Centre>,
    designations: HashMap<i64, &'a Designation>,
    workshop: HashMap<i64, &'a WorkshopTechnicianPlanning>,
}

impl<'a> Calculator<'a> {
    pub fn new(snapshot: &'a PlanningSnapshot, defaults: PlanningDefaults) -> Self {
        Self {
            snapshot,
            defaults,
            cities: snapshot.cities.iter().map(|c| (c.city_id, c)).collect(),
            clusters: snapshot.clusters.iter().map(|c| (c.cluster_id, c)).collect(),
            centres: snapshot.centres.iter().map(|c| (c.centre_id, c)).collect(),
            designations: snapshot
                .designations
                .iter()
                .map(|d| (d.designation_id, d))
                .collect(),
            workshop: snapshot.workshop.iter().map(|w| (w.city_id, w)).collect(),
        }
    }

    fn cluster_path(&self, cluster_id: i64) -> Option<(&'a Cluster, &'a City)> {
        let cluster = *self.clusters.get(&cluster_id)?;
        let city = *self.cities.get(&cluster.city_id)?;
        Some((cluster, city))
    }

    fn resolve(&self, scope: Scope) -> Option<Resolved<'a>> {
        match scope {
            Scope::Centre(id) => {
                let centre = *self.centres.get(&id)?;
                let (_, city) = self.cluster_path(centre.cluster_id)?;
                Some(Resolved { kind: ScopeKind::Centre, id, name: &centre.name, city })
            }
            Scope::Cluster(id) => {
                let (cluster, city) = self.cluster_path(id)?;
                Some(Resolved { kind: ScopeKind::Cluster, id, name: &cluster.name, city })
            }
            Scope::City(id) => {
                let city = *self.cities.get(&id)?;
                Some(Resolved { kind: ScopeKind::City, id, name: &city.name, city })
            }
        }
    }

    /// City shrinkage from its workshop row, else the configured default.
    pub fn shrinkage_percent(&self, city_id: i64) -> f64 {
        self.workshop
            .get(&city_id)
            .and_then(|w| w.shrinkage_percent)
            .unwrap_or(self.defaults.shrinkage_percent)
    }

    fn is_shift_planned(d: &Designation) -> bool {
        d.manpower_planning_required && !d.category.is_workshop()
    }

    /// Designations shown in requirement reports, by name.
    fn reported_designations(&self) -> Vec<&'a Designation> {
        let mut out: Vec<&Designation> = self
            .snapshot
            .designations
            .iter()
            .filter(|d| d.manpower_planning_required || d.category.is_workshop())
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then(a.designation_id.cmp(&b.designation_id)));
        out
    }

    /// Shift-based base manpower per (centre, designation) within `scope`.
    fn centre_bases(&self, scope: Scope) -> BTreeMap<(i64, i64), BaseManpower> {
        let mut out: BTreeMap<(i64, i64), BaseManpower> = BTreeMap::new();
        for line in &self.snapshot.lines {
            let Some(centre) = self.centres.get(&line.centre_id) else { continue };
            let Some((cluster, city)) = self.cluster_path(centre.cluster_id) else { continue };
            let in_scope = match scope {
                Scope::Centre(id) => centre.centre_id == id,
                Scope::Cluster(id) => cluster.cluster_id == id,
                Scope::City(id) => city.city_id == id,
            };
            if !in_scope {
                continue;
            }
            let Some(designation) = self.designations.get(&line.designation_id) else { continue };
            if !Self::is_shift_planned(designation) {
                continue;
            }
            let entry = out.entry((centre.centre_id, line.designation_id)).or_default();
            entry.total_shifts += line.num_shifts as i64;
            entry.base += line.num_shifts as i64 * line.employees_per_shift as i64;
        }
        out
    }

    /// Shift-based base manpower per designation within `scope`.
    pub fn base_manpower(&self, scope: Scope) -> BTreeMap<i64, BaseManpower> {
        let mut out: BTreeMap<i64, BaseManpower> = BTreeMap::new();
        for ((_, designation_id), b) in self.centre_bases(scope) {
            let entry = out.entry(designation_id).or_default();
            entry.total_shifts += b.total_shifts;
            entry.base += b.base;
        }
        out
    }

    /// Requirement per designation within `scope`: each centre's base is
    /// adjusted on its own and the results are summed.
    pub fn required_manpower(&self, scope: Scope, shrinkage_percent: f64) -> BTreeMap<i64, i64> {
        let mut out: BTreeMap<i64, i64> = BTreeMap::new();
        for ((_, designation_id), b) in self.centre_bases(scope) {
            *out.entry(designation_id).or_default() += apply_shrinkage(b.base, shrinkage_percent);
        }
        out
    }

    /// Combined workshop technician requirement, `None` without a parameter row.
    pub fn workshop_requirement(&self, city_id: i64) -> Option<WorkshopRequirement> {
        let row = self.workshop.get(&city_id)?;
        Some(workshop_requirement(&WorkshopParams::from(*row), &self.defaults))
    }

    pub fn scope_report(&self, scope: Scope, headcount: &HeadcountIndex) -> Option<ScopeReport> {
        let resolved = self.resolve(scope)?;
        let shrinkage = self.shrinkage_percent(resolved.city.city_id);
        let bases = self.base_manpower(scope);
        let required = self.required_manpower(scope, shrinkage);
        let workshop = match scope {
            Scope::City(id) => self.workshop_requirement(id),
            _ => None,
        };
        let headcount_of = |designation_id: i64| match scope {
            Scope::Centre(_) => None,
            Scope::Cluster(id) => Some(headcount.cluster(id, designation_id)),
            Scope::City(id) => Some(headcount.city(id, designation_id)),
        };

        let designations: Vec<DesignationRequirement> = self
            .reported_designations()
            .into_iter()
            .map(|d| {
                let current = headcount_of(d.designation_id);
                if d.category.is_workshop() {
                    workshop_row(d, current)
                } else {
                    let base = bases.get(&d.designation_id).copied().unwrap_or_default();
                    let required = required.get(&d.designation_id).copied().unwrap_or(0);
                    shift_row(d, base, required, shrinkage, current)
                }
            })
            .collect();

        let workshop_headcount = (!matches!(scope, Scope::Centre(_))).then(|| {
            designations
                .iter()
                .filter(|d| d.is_workshop_technician)
                .filter_map(|d| d.current_headcount)
                .sum::<i64>()
        });

        let required_manpower = designations
            .iter()
            .filter_map(|d| d.required_manpower)
            .sum::<i64>()
            + workshop.as_ref().map_or(0, |w| w.required);
        let current_headcount = (!matches!(scope, Scope::Centre(_))).then(|| {
            designations
                .iter()
                .filter(|d| d.is_planned || (d.is_workshop_technician && workshop.is_some()))
                .filter_map(|d| d.current_headcount)
                .sum::<i64>()
        });

        Some(ScopeReport {
            scope: resolved.kind,
            id: resolved.id,
            name: resolved.name.to_string(),
            city_id: resolved.city.city_id,
            city_name: resolved.city.name.clone(),
            shrinkage_percent: shrinkage,
            designations,
            workshop_technician_required: workshop.as_ref().map(|w| w.required),
            workshop_technician: workshop.map(|w| WorkshopSummary {
                current_headcount: workshop_headcount,
                surplus_deficit: surplus(workshop_headcount, Some(w.required)),
                requirement: w,
            }),
            totals: ScopeTotals {
                required_manpower,
                current_headcount,
                surplus_deficit: surplus(current_headcount, Some(required_manpower)),
            },
        })
    }

    /// Shift totals per designation for a cluster, with the city shrinkage
    /// applied once to the cluster sum.
    pub fn cluster_summary(&self, cluster_id: i64) -> Option<ClusterSummary> {
        let (cluster, city) = self.cluster_path(cluster_id)?;
        let shrinkage = self.shrinkage_percent(city.city_id);

        let mut designations: Vec<ClusterDesignationSummary> = self
            .base_manpower(Scope::Cluster(cluster_id))
            .into_iter()
            .filter_map(|(id, b)| {
                let d = self.designations.get(&id)?;
                Some(ClusterDesignationSummary {
                    designation_id: id,
                    designation_name: d.name.clone(),
                    total_shifts: b.total_shifts,
                    base_manpower: b.base,
                    required_manpower: apply_shrinkage(b.base, shrinkage),
                })
            })
            .collect();
        designations.sort_by(|a, b| a.designation_name.cmp(&b.designation_name));

        Some(ClusterSummary {
            cluster_id,
            cluster_name: cluster.name.clone(),
            city_id: city.city_id,
            city_name: city.name.clone(),
            shrinkage_percent: shrinkage,
            total_shifts: designations.iter().map(|d| d.total_shifts).sum(),
            base_manpower: designations.iter().map(|d| d.base_manpower).sum(),
            required_manpower: designations.iter().map(|d| d.required_manpower).sum(),
            designations,
        })
    }

    fn cities_by_name(&self) -> Vec<&'a City> {
        let mut cities: Vec<&City> = self.snapshot.cities.iter().collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        cities
    }

    /// Per-city reports plus the PAN India rollup.
    pub fn city_analysis(&self, headcount: &HeadcountIndex) -> CityAnalysis {
        let cities: Vec<ScopeReport> = self
            .cities_by_name()
            .into_iter()
            .filter_map(|c| self.scope_report(Scope::City(c.city_id), headcount))
            .collect();
        CityAnalysis {
            pan_india: pan_india(&cities),
            cities,
            unmatched_headcount: headcount.unmatched().to_vec(),
        }
    }

    pub fn bikes_per_employee(&self, use_bic: bool, headcount: &HeadcountIndex) -> BikesPerEmployeeReport {
        let mut pan_base = 0;
        let mut pan_employees = 0;

        let cities = self
            .cities_by_name()
            .into_iter()
            .map(|c| {
                let base_value = self.workshop.get(&c.city_id).and_then(|w| {
                    WorkshopParams { use_bic, ..WorkshopParams::from(*w) }.base_value()
                });
                let working_employees = headcount.city_total(c.city_id);
                if let Some(base) = base_value {
                    pan_base += base;
                    pan_employees += working_employees;
                }
                CityBikesPerEmployee {
                    city_id: c.city_id,
                    city_name: c.name.clone(),
                    base_value,
                    working_employees,
                    bikes_per_employee: ratio(base_value, working_employees),
                }
            })
            .collect();

        BikesPerEmployeeReport {
            basis: DemandBasis::from_use_bic(use_bic),
            cities,
            pan_india: PanIndiaBikesPerEmployee {
                base_value: pan_base,
                working_employees: pan_employees,
                bikes_per_employee: ratio(Some(pan_base), pan_employees),
            },
        }
    }
}

fn ratio(base: Option<i64>, employees: i64) -> Option<f64> {
    let base = base?;
    (employees > 0).then(|| round2(base as f64 / employees as f64))
}

fn shift_row(
    d: &Designation,
    base: BaseManpower,
    required: i64,
    shrinkage: f64,
    current: Option<i64>,
) -> DesignationRequirement {
    let is_planned = base.base > 0;
    let required = is_planned.then_some(required);
    DesignationRequirement {
        designation_id: d.designation_id,
        designation_name: d.name.clone(),
        is_planned,
        planning_type: PlanningType::ShiftBased,
        total_shifts: base.total_shifts,
        base_manpower: base.base,
        required_manpower: required,
        current_headcount: current,
        surplus_deficit: surplus(current, required),
        shrinkage_percent: Some(shrinkage),
        is_workshop_technician: false,
    }
}

// Sized once per city; see `Calculator::workshop_requirement`.
fn workshop_row(d: &Designation, current: Option<i64>) -> DesignationRequirement {
    DesignationRequirement {
        designation_id: d.designation_id,
        designation_name: d.name.clone(),
        is_planned: false,
        planning_type: PlanningType::AsPerBic,
        total_shifts: 0,
        base_manpower: 0,
        required_manpower: None,
        current_headcount: current,
        surplus_deficit: None,
        shrinkage_percent: None,
        is_workshop_technician: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeadcountRow;
    use chrono::Utc;

    const FIELD_EXEC: i64 = 100;
    const CAPTAIN: i64 = 101;
    const TRAINER: i64 = 102;
    const WT: i64 = 200;
    const SENIOR_WT: i64 = 201;

    fn designation(id: i64, name: &str, planned: bool, category: &str) -> Designation {
        Designation {
            designation_id: id,
            name: name.into(),
            role_id: None,
            sub_department_id: None,
            manpower_planning_required: planned,
            category: category.parse().unwrap(),
        }
    }

    fn line(centre_id: i64, designation_id: i64, num_shifts: i32, employees_per_shift: i32) -> CentreManpowerPlanning {
        CentreManpowerPlanning { centre_id, designation_id, num_shifts, employees_per_shift }
    }

    fn workshop(city_id: i64, bikes: i64, shrinkage: Option<f64>) -> WorkshopTechnicianPlanning {
        WorkshopTechnicianPlanning {
            workshop_technician_planning_id: city_id,
            city_id,
            dau: Some(bikes / 2),
            bikes_in_city: Some(bikes),
            fault_rate_percent: Some(8.0),
            per_mechanic_capacity: Some(10.0),
            shrinkage_percent: shrinkage,
            use_dau: false,
            use_bic: true,
            updated_at: Utc::now(),
        }
    }

    /// Bangalore (15% via workshop row) with two clusters, Pune (20%) with
    /// one, Delhi with no workshop row. Centre 99 points at a deleted cluster.
    fn snapshot() -> PlanningSnapshot {
        PlanningSnapshot {
            cities: vec![
                City { city_id: 1, name: "Bangalore".into() },
                City { city_id: 2, name: "Pune".into() },
                City { city_id: 3, name: "Delhi".into() },
            ],
            clusters: vec![
                Cluster { cluster_id: 10, city_id: 1, name: "North".into() },
                Cluster { cluster_id: 11, city_id: 1, name: "South".into() },
                Cluster { cluster_id: 20, city_id: 2, name: "Central".into() },
                Cluster { cluster_id: 30, city_id: 3, name: "East".into() },
            ],
            centres: vec![
                Centre { centre_id: 1, cluster_id: 10, name: "Hebbal".into() },
                Centre { centre_id: 2, cluster_id: 10, name: "Yelahanka".into() },
                Centre { centre_id: 3, cluster_id: 11, name: "BTM".into() },
                Centre { centre_id: 4, cluster_id: 20, name: "Kothrud".into() },
                Centre { centre_id: 5, cluster_id: 30, name: "Noida".into() },
                Centre { centre_id: 99, cluster_id: 404, name: "Orphan".into() },
            ],
            designations: vec![
                designation(FIELD_EXEC, "Field Executive", true, "standard"),
                designation(CAPTAIN, "Captain", true, "standard"),
                designation(TRAINER, "Trainer", false, "standard"),
                designation(WT, "Workshop Technician", false, "workshop_technician"),
                designation(SENIOR_WT, "Senior Workshop Technician", true, "workshop_technician"),
            ],
            lines: vec![
                // Bangalore / North: 3x10 + 2x5 field execs, 2x3 captains
                line(1, FIELD_EXEC, 3, 10),
                line(2, FIELD_EXEC, 2, 5),
                line(1, CAPTAIN, 2, 3),
                // Bangalore / South: 1x7 field execs
                line(3, FIELD_EXEC, 1, 7),
                // Pune: 2x20 field execs
                line(4, FIELD_EXEC, 2, 20),
                // Delhi: 1x17 captains
                line(5, CAPTAIN, 1, 17),
                // excluded: not planned, workshop, orphan centre, unknown designation
                line(1, TRAINER, 3, 3),
                line(1, WT, 4, 4),
                line(99, FIELD_EXEC, 10, 10),
                line(1, 777, 1, 1),
            ],
            workshop: vec![workshop(1, 10_000, Some(15.0)), workshop(2, 5_000, Some(20.0))],
        }
    }

    fn headcount(snap: &PlanningSnapshot) -> HeadcountIndex {
        let rows = [
            ("Bangalore", "North", "Field Executive", 40),
            ("Bangalore", "South", "Field Executive", 6),
            ("Bangalore", "North", "Captain", 8),
            ("Bangalore", "North", "Trainer", 2),
            ("Bangalore", "North", "Workshop Technician", 60),
            ("Bangalore", "South", "Senior Workshop Technician", 20),
            ("Pune", "Central", "Field Executive", 55),
            ("Delhi", "East", "Captain", 25),
            ("Delhi", "East", "Field Executive", 3),
            ("Bengaluru", "North", "Captain", 9),
        ]
        .into_iter()
        .map(|(city, cluster, designation, n)| HeadcountRow {
            city: Some(city.into()),
            cluster: Some(cluster.into()),
            designation: Some(designation.into()),
            headcount: n,
        })
        .collect::<Vec<_>>();
        HeadcountIndex::build(&snap.cities, &snap.clusters, &snap.designations, &rows)
    }

    fn row<'r>(report: &'r ScopeReport, id: i64) -> &'r DesignationRequirement {
        report.designations.iter().find(|d| d.designation_id == id).unwrap()
    }

    #[test]
    fn base_manpower_per_scope() {
        let snap = snapshot();
        let calc = Calculator::new(&snap, PlanningDefaults::default());

        let centre = calc.base_manpower(Scope::Centre(1));
        assert_eq!(centre[&FIELD_EXEC], BaseManpower { total_shifts: 3, base: 30 });
        assert_eq!(centre[&CAPTAIN], BaseManpower { total_shifts: 2, base: 6 });
        assert!(!centre.contains_key(&TRAINER));
        assert!(!centre.contains_key(&WT));
        assert!(!centre.contains_key(&777));

        let city = calc.base_manpower(Scope::City(1));
        assert_eq!(city[&FIELD_EXEC], BaseManpower { total_shifts: 6, base: 47 });
    }

    #[test]
    fn city_shrinkage_defaults_without_workshop_row() {
        let snap = snapshot();
        let calc = Calculator::new(&snap, PlanningDefaults::default());
        assert_eq!(calc.shrinkage_percent(2), 20.0);
        assert_eq!(calc.shrinkage_percent(3), 15.0);

        let custom = PlanningDefaults { shrinkage_percent: 10.0, ..Default::default() };
        assert_eq!(Calculator::new(&snap, custom).shrinkage_percent(3), 10.0);
    }

    #[test]
    fn city_report() {
        let snap = snapshot();
        let hc = headcount(&snap);
        let calc = Calculator::new(&snap, PlanningDefaults::default());
        let report = calc.scope_report(Scope::City(1), &hc).unwrap();

        assert_eq!(report.scope, ScopeKind::City);
        assert_eq!(report.shrinkage_percent, 15.0);

        // per centre: 30 -> 36, 10 -> 12, 7 -> 9
        let fe = row(&report, FIELD_EXEC);
        assert!(fe.is_planned);
        assert_eq!(fe.planning_type, PlanningType::ShiftBased);
        assert_eq!(fe.base_manpower, 47);
        assert_eq!(fe.required_manpower, Some(57));
        assert_eq!(fe.current_headcount, Some(46));
        assert_eq!(fe.surplus_deficit, Some(-11));

        // 6 / 0.85 = 7.06
        assert_eq!(row(&report, CAPTAIN).required_manpower, Some(8));
        assert_eq!(row(&report, CAPTAIN).surplus_deficit, Some(0));

        // Trainer is not a planning designation
        assert!(report.designations.iter().all(|d| d.designation_id != TRAINER));

        assert_eq!(report.workshop_technician_required, Some(95));
        let ws = report.workshop_technician.as_ref().unwrap();
        assert_eq!(ws.current_headcount, Some(80));
        assert_eq!(ws.surplus_deficit, Some(-15));

        assert_eq!(report.totals.required_manpower, 57 + 8 + 95);
        assert_eq!(report.totals.current_headcount, Some(46 + 8 + 80));
        assert_eq!(report.totals.surplus_deficit, Some(134 - 160));
    }

    #[test]
    fn workshop_designations_never_use_shift_formula() {
        let snap = snapshot();
        let hc = headcount(&snap);
        let calc = Calculator::new(&snap, PlanningDefaults::default());
        for scope in [Scope::City(1), Scope::Cluster(10), Scope::Centre(1)] {
            let report = calc.scope_report(scope, &hc).unwrap();
            for id in [WT, SENIOR_WT] {
                let r = row(&report, id);
                assert!(r.is_workshop_technician);
                assert!(!r.is_planned);
                assert_eq!(r.planning_type, PlanningType::AsPerBic);
                assert_eq!(r.required_manpower, None);
                assert_eq!(r.surplus_deficit, None);
            }
        }
        assert_eq!(row(&calc.scope_report(Scope::City(1), &hc).unwrap(), WT).current_headcount, Some(60));
    }

    #[test]
    fn unplanned_designation_still_reports_headcount() {
        let snap = snapshot();
        let hc = headcount(&snap);
        let calc = Calculator::new(&snap, PlanningDefaults::default());
        let delhi = calc.scope_report(Scope::City(3), &hc).unwrap();

        let fe = row(&delhi, FIELD_EXEC);
        assert!(!fe.is_planned);
        assert_eq!(fe.base_manpower, 0);
        assert_eq!(fe.required_manpower, None);
        assert_eq!(fe.surplus_deficit, None);
        assert_eq!(fe.current_headcount, Some(3));

        // no workshop row: default shrinkage, no workshop requirement
        // 17 / 0.85 = 20
        assert_eq!(row(&delhi, CAPTAIN).required_manpower, Some(20));
        assert_eq!(delhi.workshop_technician_required, None);
        assert!(delhi.workshop_technician.is_none());
        assert_eq!(delhi.totals.required_manpower, 20);
        assert_eq!(delhi.totals.current_headcount, Some(25));
    }

    #[test]
    fn cluster_and_centre_reports() {
        let snap = snapshot();
        let hc = headcount(&snap);
        let calc = Calculator::new(&snap, PlanningDefaults::default());

        let north = calc.scope_report(Scope::Cluster(10), &hc).unwrap();
        assert_eq!(north.scope, ScopeKind::Cluster);
        assert_eq!(north.name, "North");
        assert_eq!(north.city_name, "Bangalore");
        // 30 -> 36 plus 10 -> 12
        assert_eq!(row(&north, FIELD_EXEC).required_manpower, Some(48));
        assert_eq!(row(&north, FIELD_EXEC).current_headcount, Some(40));
        assert_eq!(north.workshop_technician_required, None);
        assert_eq!(north.totals.required_manpower, 48 + 8);

        let hebbal = calc.scope_report(Scope::Centre(1), &hc).unwrap();
        assert_eq!(hebbal.scope, ScopeKind::Centre);
        // 30 / 0.85 = 35.3
        assert_eq!(row(&hebbal, FIELD_EXEC).required_manpower, Some(36));
        assert_eq!(row(&hebbal, FIELD_EXEC).current_headcount, None);
        assert_eq!(hebbal.totals.current_headcount, None);
        assert_eq!(hebbal.totals.surplus_deficit, None);

        assert!(calc.scope_report(Scope::Centre(99), &hc).is_none());
        assert!(calc.scope_report(Scope::Cluster(404), &hc).is_none());
    }

    #[test]
    fn cluster_summary_applies_shrinkage_once() {
        let snap = snapshot();
        let calc = Calculator::new(&snap, PlanningDefaults::default());
        let summary = calc.cluster_summary(10).unwrap();

        assert_eq!(summary.shrinkage_percent, 15.0);
        let fe = summary
            .designations
            .iter()
            .find(|d| d.designation_id == FIELD_EXEC)
            .unwrap();
        assert_eq!(fe.total_shifts, 5);
        assert_eq!(fe.base_manpower, 40);
        // 40 / 0.85 = 47.06
        assert_eq!(fe.required_manpower, 48);
        assert_eq!(summary.total_shifts, 7);
        assert_eq!(summary.base_manpower, 46);
        assert_eq!(summary.required_manpower, 48 + 8);

        let names: Vec<_> = summary.designations.iter().map(|d| d.designation_name.as_str()).collect();
        assert_eq!(names, ["Captain", "Field Executive"]);
        assert!(calc.cluster_summary(404).is_none());
    }

    /// One city, one cluster, three centres with 30, 10 and 7 captains.
    fn three_centre_snapshot() -> PlanningSnapshot {
        PlanningSnapshot {
            cities: vec![City { city_id: 1, name: "Bangalore".into() }],
            clusters: vec![Cluster { cluster_id: 10, city_id: 1, name: "North".into() }],
            centres: vec![
                Centre { centre_id: 1, cluster_id: 10, name: "A".into() },
                Centre { centre_id: 2, cluster_id: 10, name: "B".into() },
                Centre { centre_id: 3, cluster_id: 10, name: "C".into() },
            ],
            designations: vec![designation(CAPTAIN, "Captain", true, "standard")],
            lines: vec![line(1, CAPTAIN, 1, 30), line(2, CAPTAIN, 1, 10), line(3, CAPTAIN, 1, 7)],
            workshop: vec![],
        }
    }

    #[test]
    fn city_and_cluster_reports_add_up_centres() {
        let snap = three_centre_snapshot();
        let hc = HeadcountIndex::default();
        let calc = Calculator::new(&snap, PlanningDefaults::default());

        let centre_sum: i64 = [1, 2, 3]
            .into_iter()
            .map(|id| {
                let report = calc.scope_report(Scope::Centre(id), &hc).unwrap();
                row(&report, CAPTAIN).required_manpower.unwrap()
            })
            .sum();
        // 36 + 12 + 9
        assert_eq!(centre_sum, 57);

        let city = calc.scope_report(Scope::City(1), &hc).unwrap();
        assert_eq!(row(&city, CAPTAIN).base_manpower, 47);
        assert_eq!(row(&city, CAPTAIN).required_manpower, Some(centre_sum));
        assert_eq!(city.totals.required_manpower, centre_sum);

        let cluster = calc.scope_report(Scope::Cluster(10), &hc).unwrap();
        assert_eq!(row(&cluster, CAPTAIN).required_manpower, Some(centre_sum));
    }

    #[test]
    fn cluster_summary_divides_the_cluster_sum_once() {
        let snap = three_centre_snapshot();
        let calc = Calculator::new(&snap, PlanningDefaults::default());
        // ceil(47 / 0.85) = 56, one less than the per-centre sum
        assert_eq!(calc.cluster_summary(10).unwrap().required_manpower, 56);
        assert_eq!(calc.required_manpower(Scope::Cluster(10), 15.0)[&CAPTAIN], 57);
    }

    #[test]
    fn city_analysis_rolls_up_pan_india() {
        let snap = snapshot();
        let hc = headcount(&snap);
        let calc = Calculator::new(&snap, PlanningDefaults::default());
        let analysis = calc.city_analysis(&hc);

        let names: Vec<_> = analysis.cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Bangalore", "Delhi", "Pune"]);

        let pan = &analysis.pan_india;
        let fe = pan.designations.iter().find(|d| d.designation_id == FIELD_EXEC).unwrap();
        // Bangalore 47 -> 57, Pune 40 / 0.8 -> 50, Delhi unplanned
        assert!(fe.is_planned);
        assert_eq!(fe.base_manpower, 87);
        assert_eq!(fe.required_manpower, Some(107));
        assert_eq!(fe.current_headcount, Some(46 + 55 + 3));
        assert_eq!(fe.shrinkage_percent, Some(18.69));

        let per_city: i64 = analysis
            .cities
            .iter()
            .map(|c| row(c, FIELD_EXEC))
            .filter(|r| r.is_planned)
            .filter_map(|r| r.required_manpower)
            .sum();
        assert_eq!(fe.required_manpower, Some(per_city));

        // Pune: 5000 * 0.08 / 10 = 40, / 0.8 = 50
        assert_eq!(pan.workshop_technician_required, 95 + 50);
        let city_totals: i64 = analysis.cities.iter().map(|c| c.totals.required_manpower).sum();
        assert_eq!(pan.totals.required_manpower, city_totals);

        let wt = pan.designations.iter().find(|d| d.designation_id == WT).unwrap();
        assert!(!wt.is_planned);
        assert_eq!(wt.required_manpower, None);

        assert_eq!(analysis.unmatched_headcount.len(), 1);
        assert_eq!(analysis.unmatched_headcount[0].city.as_deref(), Some("Bengaluru"));
    }

    #[test]
    fn bikes_per_employee_by_basis() {
        let snap = snapshot();
        let hc = headcount(&snap);
        let calc = Calculator::new(&snap, PlanningDefaults::default());

        let bic = calc.bikes_per_employee(true, &hc);
        assert_eq!(bic.basis, DemandBasis::Bic);
        let blr = bic.cities.iter().find(|c| c.city_id == 1).unwrap();
        // 40 + 6 + 8 + 2 + 60 + 20 working in Bangalore
        assert_eq!(blr.working_employees, 136);
        assert_eq!(blr.base_value, Some(10_000));
        assert_eq!(blr.bikes_per_employee, Some(73.53));

        let delhi = bic.cities.iter().find(|c| c.city_id == 3).unwrap();
        assert_eq!(delhi.base_value, None);
        assert_eq!(delhi.bikes_per_employee, None);

        assert_eq!(bic.pan_india.base_value, 15_000);
        assert_eq!(bic.pan_india.working_employees, 136 + 55);
        assert_eq!(bic.pan_india.bikes_per_employee, Some(78.53));

        let dau = calc.bikes_per_employee(false, &hc);
        assert_eq!(dau.basis, DemandBasis::Dau);
        assert_eq!(dau.pan_india.base_value, 7_500);
    }

    #[test]
    fn empty_snapshot() {
        let snap = PlanningSnapshot::default();
        let hc = HeadcountIndex::default();
        let calc = Calculator::new(&snap, PlanningDefaults::default());
        let analysis = calc.city_analysis(&hc);
        assert!(analysis.cities.is_empty());
        assert!(analysis.pan_india.designations.is_empty());
        assert_eq!(analysis.pan_india.totals.required_manpower, 0);
        assert_eq!(analysis.pan_india.totals.current_headcount, Some(0));
        assert_eq!(calc.bikes_per_employee(true, &hc).pan_india.bikes_per_employee, None);
    }
}
