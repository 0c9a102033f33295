// src/planning/lines.rs

use std::collections::BTreeMap;

use crate::models::CentreManpowerPlanning;

/// Collapses a centre's shifts into planning lines: one line per
/// designation and heads-per-shift, counting the shifts that share it.
pub fn planning_lines<I>(centre_id: i64, shifts: I) -> Vec<CentreManpowerPlanning>
where
    I: IntoIterator<Item = (i64, i32)>,
{
    let mut grouped: BTreeMap<(i64, i32), i32> = BTreeMap::new();
    for (designation_id, heads) in shifts {
        *grouped.entry((designation_id, heads)).or_default() += 1;
    }
    grouped
        .into_iter()
        .map(|((designation_id, employees_per_shift), num_shifts)| CentreManpowerPlanning {
            centre_id,
            designation_id,
            num_shifts,
            employees_per_shift,
        })
        .collect()
}

/// Σ numShifts × employeesPerShift.
pub fn base_manpower<'a, I>(lines: I) -> i64
where
    I: IntoIterator<Item = &'a CentreManpowerPlanning>,
{
    lines
        .into_iter()
        .map(|l| l.num_shifts as i64 * l.employees_per_shift as i64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_shifts_with_equal_headcount() {
        let lines = planning_lines(7, [(1, 4), (1, 4), (1, 6), (2, 3)]);
        assert_eq!(lines.len(), 3);
        assert_eq!((lines[0].designation_id, lines[0].num_shifts, lines[0].employees_per_shift), (1, 2, 4));
        assert_eq!((lines[1].designation_id, lines[1].num_shifts, lines[1].employees_per_shift), (1, 1, 6));
        assert_eq!((lines[2].designation_id, lines[2].num_shifts, lines[2].employees_per_shift), (2, 1, 3));
        assert!(lines.iter().all(|l| l.centre_id == 7));
    }

    #[test]
    fn base_equals_sum_of_shift_heads() {
        let shifts = [(1, 4), (1, 4), (1, 6), (2, 3)];
        let lines = planning_lines(7, shifts);
        let expected: i64 = shifts.iter().map(|(_, h)| *h as i64).sum();
        assert_eq!(base_manpower(&lines), expected);
    }

    #[test]
    fn same_input_gives_same_lines() {
        let shifts = vec![(3, 2), (1, 5), (3, 2)];
        let first = planning_lines(1, shifts.clone());
        let second = planning_lines(1, shifts);
        let key = |l: &CentreManpowerPlanning| (l.designation_id, l.num_shifts, l.employees_per_shift);
        assert_eq!(
            first.iter().map(key).collect::<Vec<_>>(),
            second.iter().map(key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn no_shifts_no_lines() {
        assert!(planning_lines(1, Vec::new()).is_empty());
        assert_eq!(base_manpower(&Vec::<CentreManpowerPlanning>::new()), 0);
    }
}
