use std::sync::Arc;

use chrono::NaiveDate;
use rollcall_core::attendance::domain::image_upload::ImageUpload;
use rollcall_core::attendance::domain::notifier::{LogNotifier, NotificationLevel};
use rollcall_core::attendance::infrastructure::service_factory::{
    create_service, DataSource, ServiceConfig,
};
use rollcall_core::dashboard::mark_attendance_use_case::{
    MarkAttendanceError, MarkAttendanceUseCase,
};
use rollcall_core::dashboard::recognition_session::RecognitionSession;
use rollcall_core::dashboard::recognize_faces_use_case::RecognizeFacesUseCase;
use rollcall_core::dashboard::roster_report_use_case::RosterReportUseCase;
use rollcall_core::overlay::domain::display_geometry::DisplayGeometry;
use rollcall_core::overlay::domain::overlay_mapper::compute_overlay;
use rollcall_core::roster::domain::sort::{SortKey, SortOrder, SortState};

fn mock_config(seed: u64) -> ServiceConfig {
    ServiceConfig {
        data_source: DataSource::Mock,
        mock_seed: seed,
        ..ServiceConfig::default()
    }
}

#[test]
fn recognize_then_mark_updates_reports() {
    let service = create_service(&mock_config(11)).unwrap();
    let notifier = Arc::new(LogNotifier::new());
    let recognize = RecognizeFacesUseCase::new(service.clone(), notifier.clone());
    let mark = MarkAttendanceUseCase::new(service.clone(), notifier.clone());
    let reports = RosterReportUseCase::new(service, notifier.clone());

    let before = reports.overview("", SortState::default()).unwrap();
    assert_eq!(before.stats.total_students, 5);

    let mut session = RecognitionSession::new();
    let upload = ImageUpload::new("class.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff]);
    let detections = recognize.execute(&upload, &mut session).unwrap();
    assert!((2..=4).contains(&detections.len()));

    // Boxes from the mock live in a 300x300 area; show them at half size.
    let geometry = DisplayGeometry::new(300.0, 300.0, 150.0, 150.0);
    let overlay = compute_overlay(&detections, &geometry).unwrap();
    assert_eq!(overlay.len(), detections.len());
    for instruction in &overlay {
        assert!(instruction.rect.right() <= 150.0 + 1e-9);
        assert!(instruction.rect.bottom() <= 150.0 + 1e-9);
    }

    let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
    let report = mark.execute(date, &mut session).unwrap();
    assert_eq!(report.marked.len(), detections.len());
    assert!(session.is_empty());

    let roster = report.roster.unwrap();
    assert_eq!(roster.len(), before.rows.len());
    for new in &roster {
        let old = &before
            .rows
            .iter()
            .find(|r| r.student.id == new.id)
            .unwrap()
            .student;
        assert_eq!(new.total, old.total + 1);
        let was_marked = report.marked.contains(&new.name);
        assert_eq!(new.present, old.present + u32::from(was_marked));
    }

    let sessions = reports.sessions().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].date, date);
    assert_eq!(sessions[0].attendance_count as usize, detections.len());

    let first = reports.student_report("student-1").unwrap();
    assert_eq!(first.summary.name, "Lohit Kumar");
    assert_eq!(first.absent + first.summary.present, first.summary.total);

    let levels: Vec<NotificationLevel> = notifier.history().iter().map(|n| n.level).collect();
    assert_eq!(levels, vec![NotificationLevel::Success, NotificationLevel::Success]);
}

#[test]
fn marking_twice_requires_a_new_recognition() {
    let service = create_service(&mock_config(3)).unwrap();
    let notifier = Arc::new(LogNotifier::new());
    let recognize = RecognizeFacesUseCase::new(service.clone(), notifier.clone());
    let mark = MarkAttendanceUseCase::new(service, notifier.clone());

    let mut session = RecognitionSession::new();
    let upload = ImageUpload::new("class.png", "image/png", vec![0x89]);
    recognize.execute(&upload, &mut session).unwrap();

    let date = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
    mark.execute(date, &mut session).unwrap();
    assert!(matches!(
        mark.execute(date, &mut session),
        Err(MarkAttendanceError::EmptyRecognition)
    ));

    let last = notifier.history().pop().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
}

#[test]
fn roster_search_and_sort_against_mock() {
    let service = create_service(&mock_config(5)).unwrap();
    let reports = RosterReportUseCase::new(service, Arc::new(LogNotifier::new()));

    let overview = reports
        .overview("cs00", SortState::new(SortKey::RollNo, SortOrder::Desc))
        .unwrap();
    let rolls: Vec<&str> = overview
        .rows
        .iter()
        .map(|r| r.student.roll_no.as_str())
        .collect();
    assert_eq!(rolls, vec!["CS005", "CS004", "CS003", "CS002", "CS001"]);

    let sneha = reports.overview("SNEHA", SortState::default()).unwrap();
    assert_eq!(sneha.rows.len(), 1);
    assert_eq!(sneha.rows[0].student.name, "Sneha Patel");
}
