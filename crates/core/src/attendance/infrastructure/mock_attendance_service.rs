use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::attendance::domain::attendance_service::AttendanceService;
use crate::attendance::domain::image_upload::ImageUpload;
use crate::attendance::domain::service_error::{Endpoint, ServiceError};
use crate::shared::constants::{
    MOCK_FETCH_LATENCY_MS, MOCK_MARK_LATENCY_MS, MOCK_RECOGNIZE_LATENCY_MS, MOCK_STUDENTS,
};
use crate::shared::detection::Detection;
use crate::shared::student::{SessionSummary, StudentAttendanceSummary};

/// Classes already held before the fixture roster starts recording.
const INITIAL_TOTAL: u32 = 30;

/// Artificial per-call delays that mimic a real backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockLatency {
    pub recognize: Duration,
    pub mark: Duration,
    pub fetch: Duration,
}

impl MockLatency {
    pub fn none() -> Self {
        Self {
            recognize: Duration::ZERO,
            mark: Duration::ZERO,
            fetch: Duration::ZERO,
        }
    }

    pub fn realistic() -> Self {
        Self {
            recognize: Duration::from_millis(MOCK_RECOGNIZE_LATENCY_MS),
            mark: Duration::from_millis(MOCK_MARK_LATENCY_MS),
            fetch: Duration::from_millis(MOCK_FETCH_LATENCY_MS),
        }
    }
}

struct MockState {
    rng: StdRng,
    students: Vec<StudentAttendanceSummary>,
    /// Date → names marked present on that date.
    sessions: BTreeMap<NaiveDate, BTreeSet<String>>,
}

/// In-memory backend for development without a server.
///
/// Serves a five-student fixture roster. Recognition returns two to four
/// of those students with random scores and boxes. Marking attendance
/// updates the roster and session list, so later fetches reflect it.
/// Output is reproducible for a given seed.
pub struct MockAttendanceService {
    state: Mutex<MockState>,
    latency: MockLatency,
}

impl MockAttendanceService {
    pub fn new(seed: u64, latency: MockLatency) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let students = MOCK_STUDENTS
            .iter()
            .enumerate()
            .map(|(i, (name, roll_no))| {
                let present = rng.gen_range(10..INITIAL_TOTAL);
                StudentAttendanceSummary {
                    id: format!("student-{}", i + 1),
                    name: name.to_string(),
                    roll_no: roll_no.to_string(),
                    present,
                    total: INITIAL_TOTAL,
                    percentage: 0.0,
                }
                .with_recomputed_percentage()
            })
            .collect();

        Self {
            state: Mutex::new(MockState {
                rng,
                students,
                sessions: BTreeMap::new(),
            }),
            latency,
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn simulate(&self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl AttendanceService for MockAttendanceService {
    fn recognize(&self, upload: &ImageUpload) -> Result<Vec<Detection>, ServiceError> {
        self.simulate(self.latency.recognize);
        let mut state = self.state();
        let count = state.rng.gen_range(2..=4).min(state.students.len());

        let rng = &mut state.rng;
        let detections: Vec<Detection> = MOCK_STUDENTS
            .iter()
            .take(count)
            .map(|(name, _)| {
                let score = round_to(rng.gen_range(0.8..1.3), 2);
                // Corners are drawn independently, so they may arrive swapped.
                let bbox = [
                    rng.gen_range(0.0..300.0),
                    rng.gen_range(0.0..300.0),
                    rng.gen_range(150.0..300.0),
                    rng.gen_range(150.0..300.0),
                ];
                Detection::new(*name, score, bbox)
            })
            .collect();

        log::info!(
            "Mock: recognized {} face(s) in {}",
            detections.len(),
            upload.file_name()
        );
        Ok(detections)
    }

    fn mark_attendance(&self, date: NaiveDate, names: &[String]) -> Result<(), ServiceError> {
        self.simulate(self.latency.mark);
        let mut state = self.state();
        let MockState {
            students, sessions, ..
        } = &mut *state;

        let is_new_session = !sessions.contains_key(&date);
        let marked = sessions.entry(date).or_default();

        for student in students.iter_mut() {
            if is_new_session {
                student.total += 1;
            }
            let named = names.iter().any(|n| n == &student.name);
            if named && marked.insert(student.name.clone()) {
                student.present += 1;
            }
            *student = student.clone().with_recomputed_percentage();
        }

        for name in names {
            if !students.iter().any(|s| &s.name == name) {
                log::warn!("Mock: no student named '{name}', ignoring");
            }
        }

        log::info!("Mock: marked attendance for {:?} on {date}", names);
        Ok(())
    }

    fn all_students(&self) -> Result<Vec<StudentAttendanceSummary>, ServiceError> {
        self.simulate(self.latency.fetch);
        Ok(self.state().students.clone())
    }

    fn student(&self, id: &str) -> Result<StudentAttendanceSummary, ServiceError> {
        self.simulate(self.latency.fetch);
        self.state()
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ServiceError::Status {
                endpoint: Endpoint::StudentAttendance,
                status: 404,
            })
    }

    fn sessions(&self) -> Result<Vec<SessionSummary>, ServiceError> {
        self.simulate(self.latency.fetch);
        Ok(self
            .state()
            .sessions
            .iter()
            .map(|(date, names)| SessionSummary {
                id: format!("session-{date}"),
                date: *date,
                attendance_count: names.len() as u32,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mock() -> MockAttendanceService {
        MockAttendanceService::new(7, MockLatency::none())
    }

    fn upload() -> ImageUpload {
        ImageUpload::new("class.jpg", "image/jpeg", vec![0xff, 0xd8])
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_fixture_roster() {
        let students = mock().all_students().unwrap();
        assert_eq!(students.len(), 5);
        assert_eq!(students[0].id, "student-1");
        assert_eq!(students[0].roll_no, "CS001");
        assert_eq!(students[4].name, "Sneha Patel");
        for s in &students {
            assert_eq!(s.total, 30);
            assert!((10..30).contains(&s.present));
            assert_relative_eq!(s.percentage, s.computed_percentage());
        }
    }

    #[test]
    fn test_same_seed_same_roster() {
        let a = MockAttendanceService::new(42, MockLatency::none()).all_students().unwrap();
        let b = MockAttendanceService::new(42, MockLatency::none()).all_students().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recognize_returns_two_to_four_known_students() {
        let svc = mock();
        for _ in 0..20 {
            let detections = svc.recognize(&upload()).unwrap();
            assert!((2..=4).contains(&detections.len()));
            for (d, (name, _)) in detections.iter().zip(MOCK_STUDENTS) {
                assert_eq!(&d.name, name);
                assert!((0.8..=1.3).contains(&d.score));
                assert!(d.bbox.iter().all(|v| (0.0..300.0).contains(v)));
            }
        }
    }

    #[test]
    fn test_student_by_id() {
        let svc = mock();
        assert_eq!(svc.student("student-3").unwrap().name, "Priya Singh");
    }

    #[test]
    fn test_unknown_student_is_not_found() {
        assert!(matches!(
            mock().student("student-99"),
            Err(ServiceError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_mark_attendance_updates_roster() {
        let svc = mock();
        let before = svc.all_students().unwrap();

        svc.mark_attendance(date(2), &["Lohit Kumar".to_string()])
            .unwrap();
        let after = svc.all_students().unwrap();

        assert_eq!(after[0].present, before[0].present + 1);
        assert_eq!(after[0].total, before[0].total + 1);
        assert_eq!(after[1].present, before[1].present);
        assert_eq!(after[1].total, before[1].total + 1);
        assert_relative_eq!(after[1].percentage, after[1].computed_percentage());
    }

    #[test]
    fn test_remarking_same_date_does_not_double_count() {
        let svc = mock();
        let before = svc.student("student-2").unwrap();
        let names = vec!["Vineet Sharma".to_string()];

        svc.mark_attendance(date(3), &names).unwrap();
        svc.mark_attendance(date(3), &names).unwrap();

        let after = svc.student("student-2").unwrap();
        assert_eq!(after.present, before.present + 1);
        assert_eq!(after.total, before.total + 1);
    }

    #[test]
    fn test_sessions_track_present_counts() {
        let svc = mock();
        assert!(svc.sessions().unwrap().is_empty());

        svc.mark_attendance(
            date(2),
            &["Lohit Kumar".to_string(), "Priya Singh".to_string()],
        )
        .unwrap();
        svc.mark_attendance(date(3), &["Sneha Patel".to_string()])
            .unwrap();
        svc.mark_attendance(date(2), &["Rahul Verma".to_string()])
            .unwrap();

        let sessions = svc.sessions().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].date, date(2));
        assert_eq!(sessions[0].attendance_count, 3);
        assert_eq!(sessions[1].attendance_count, 1);
        assert_eq!(sessions[1].id, "session-2024-09-03");
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let svc = mock();
        let before = svc.all_students().unwrap();
        svc.mark_attendance(date(4), &["Nobody".to_string()]).unwrap();
        let after = svc.all_students().unwrap();
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(a.present, b.present);
        }
        assert_eq!(svc.sessions().unwrap()[0].attendance_count, 0);
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(1.23456, 2), 1.23);
        assert_relative_eq!(round_to(0.805, 1), 0.8);
    }
}
