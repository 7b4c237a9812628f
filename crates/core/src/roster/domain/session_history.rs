use crate::shared::student::SessionSummary;

/// Sessions ordered newest date first; same-day sessions by id.
pub fn newest_first(sessions: &[SessionSummary]) -> Vec<SessionSummary> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    sorted
}

/// Total number of present marks across all sessions.
pub fn total_present(sessions: &[SessionSummary]) -> u64 {
    sessions.iter().map(|s| s.attendance_count as u64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(id: &str, y: i32, m: u32, d: u32, count: u32) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            attendance_count: count,
        }
    }

    #[test]
    fn test_newest_first() {
        let sessions = vec![
            session("a", 2024, 9, 2, 3),
            session("b", 2024, 9, 10, 4),
            session("c", 2024, 8, 30, 5),
        ];
        let ids: Vec<_> = newest_first(&sessions).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_same_day_sorted_by_id() {
        let sessions = vec![session("z", 2024, 9, 2, 1), session("m", 2024, 9, 2, 1)];
        let ids: Vec<_> = newest_first(&sessions).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["m", "z"]);
    }

    #[test]
    fn test_total_present() {
        let sessions = vec![session("a", 2024, 9, 2, 3), session("b", 2024, 9, 3, 4)];
        assert_eq!(total_present(&sessions), 7);
        assert_eq!(total_present(&[]), 0);
    }
}
