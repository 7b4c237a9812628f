use std::cmp::Ordering;

use crate::shared::student::StudentAttendanceSummary;

use super::sort::{SortKey, SortOrder};

/// Case-insensitive substring match on name or roll number.
///
/// An empty query matches every student.
pub fn matches_query(student: &StudentAttendanceSummary, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    student.name.to_lowercase().contains(&needle) || student.roll_no.to_lowercase().contains(&needle)
}

fn compare(a: &StudentAttendanceSummary, b: &StudentAttendanceSummary, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::RollNo => a.roll_no.cmp(&b.roll_no),
        SortKey::Percentage => a.percentage.total_cmp(&b.percentage),
    }
}

/// Filters the roster by `query` and sorts the survivors by `key`.
///
/// The sort is stable in both directions: equal keys keep their input
/// order. Strings compare ordinally (no locale collation). The input is
/// left untouched.
pub fn filter_and_sort(
    roster: &[StudentAttendanceSummary],
    query: &str,
    key: SortKey,
    order: SortOrder,
) -> Vec<StudentAttendanceSummary> {
    let mut rows: Vec<StudentAttendanceSummary> = roster
        .iter()
        .filter(|s| matches_query(s, query))
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, name: &str, roll_no: &str, percentage: f64) -> StudentAttendanceSummary {
        StudentAttendanceSummary {
            id: id.to_string(),
            name: name.to_string(),
            roll_no: roll_no.to_string(),
            present: 0,
            total: 30,
            percentage,
        }
    }

    fn roster() -> Vec<StudentAttendanceSummary> {
        vec![
            student("s3", "Priya Singh", "CS003", 82.0),
            student("s1", "Lohit Kumar", "CS001", 64.5),
            student("s5", "Sneha Patel", "CS005", 91.0),
            student("s2", "Vineet Sharma", "CS002", 47.0),
            student("s4", "Rahul Verma", "CS004", 64.5),
        ]
    }

    fn ids(rows: &[StudentAttendanceSummary]) -> Vec<&str> {
        rows.iter().map(|s| s.id.as_str()).collect()
    }

    // ── Filter ───────────────────────────────────────────────────────

    #[test]
    fn test_empty_query_keeps_everyone() {
        let input = roster();
        let out = filter_and_sort(&input, "", SortKey::Name, SortOrder::Asc);
        assert_eq!(out.len(), input.len());
    }

    #[test]
    fn test_query_matches_name_case_insensitively() {
        let out = filter_and_sort(&roster(), "SINGH", SortKey::Name, SortOrder::Asc);
        assert_eq!(ids(&out), vec!["s3"]);
    }

    #[test]
    fn test_query_matches_roll_number() {
        let out = filter_and_sort(&roster(), "cs004", SortKey::Name, SortOrder::Asc);
        assert_eq!(ids(&out), vec!["s4"]);
    }

    #[test]
    fn test_roll_number_prefix_ascending() {
        let out = filter_and_sort(&roster(), "cs00", SortKey::RollNo, SortOrder::Asc);
        let rolls: Vec<_> = out.iter().map(|s| s.roll_no.as_str()).collect();
        assert_eq!(rolls, vec!["CS001", "CS002", "CS003", "CS004", "CS005"]);
    }

    #[test]
    fn test_query_substring_in_middle_of_name() {
        let out = filter_and_sort(&roster(), "ar", SortKey::Name, SortOrder::Asc);
        // Lohit Kumar, Vineet Sharma
        assert_eq!(ids(&out), vec!["s1", "s2"]);
    }

    #[test]
    fn test_no_matches() {
        assert!(filter_and_sort(&roster(), "zzz", SortKey::Name, SortOrder::Asc).is_empty());
    }

    #[test]
    fn test_empty_roster() {
        assert!(filter_and_sort(&[], "", SortKey::Percentage, SortOrder::Desc).is_empty());
    }

    // ── Sort ─────────────────────────────────────────────────────────

    #[test]
    fn test_sort_by_name_ascending() {
        let out = filter_and_sort(&roster(), "", SortKey::Name, SortOrder::Asc);
        assert_eq!(ids(&out), vec!["s1", "s3", "s4", "s5", "s2"]);
    }

    #[test]
    fn test_sort_by_name_descending() {
        let out = filter_and_sort(&roster(), "", SortKey::Name, SortOrder::Desc);
        assert_eq!(ids(&out), vec!["s2", "s5", "s4", "s3", "s1"]);
    }

    #[test]
    fn test_sort_by_percentage_descending() {
        let input = vec![
            student("a", "A", "1", 10.0),
            student("b", "B", "2", 90.0),
            student("c", "C", "3", 50.0),
        ];
        let out = filter_and_sort(&input, "", SortKey::Percentage, SortOrder::Desc);
        let pcts: Vec<_> = out.iter().map(|s| s.percentage).collect();
        assert_eq!(pcts, vec![90.0, 50.0, 10.0]);
    }

    #[test]
    fn test_ties_keep_input_order_ascending() {
        let out = filter_and_sort(&roster(), "", SortKey::Percentage, SortOrder::Asc);
        // s1 and s4 share 64.5; s1 comes first in the input
        assert_eq!(ids(&out), vec!["s2", "s1", "s4", "s3", "s5"]);
    }

    #[test]
    fn test_ties_keep_input_order_descending() {
        let out = filter_and_sort(&roster(), "", SortKey::Percentage, SortOrder::Desc);
        assert_eq!(ids(&out), vec!["s5", "s3", "s1", "s4", "s2"]);
    }

    #[test]
    fn test_string_sort_is_ordinal() {
        let input = vec![
            student("a", "adam", "1", 0.0),
            student("b", "Zoe", "2", 0.0),
            student("c", "Bea", "3", 0.0),
        ];
        let out = filter_and_sort(&input, "", SortKey::Name, SortOrder::Asc);
        // Uppercase sorts before lowercase in byte order
        assert_eq!(ids(&out), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_nan_percentage_does_not_panic() {
        let input = vec![
            student("a", "A", "1", f64::NAN),
            student("b", "B", "2", 40.0),
        ];
        let out = filter_and_sort(&input, "", SortKey::Percentage, SortOrder::Asc);
        assert_eq!(out.len(), 2);
    }

    // ── Purity ───────────────────────────────────────────────────────

    #[test]
    fn test_idempotent_and_input_untouched() {
        let input = roster();
        let snapshot = input.clone();
        let first = filter_and_sort(&input, "cs", SortKey::Percentage, SortOrder::Desc);
        let second = filter_and_sort(&input, "cs", SortKey::Percentage, SortOrder::Desc);
        assert_eq!(first, second);
        assert_eq!(input, snapshot);
    }
}
