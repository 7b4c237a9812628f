use std::fmt::Write;

use rollcall_core::dashboard::roster_report_use_case::{RosterOverview, StudentReport};
use rollcall_core::overlay::domain::overlay_instruction::{LabelPlacement, OverlayInstruction};
use rollcall_core::roster::domain::session_history::total_present;
use rollcall_core::shared::student::SessionSummary;

fn placement_name(placement: LabelPlacement) -> &'static str {
    match placement {
        LabelPlacement::Above => "above",
        LabelPlacement::Below => "below",
        LabelPlacement::Inside => "inside",
    }
}

/// One row per recognized face, boxes in display pixels.
pub fn format_faces(overlay: &[OverlayInstruction]) -> String {
    if overlay.is_empty() {
        return "No faces recognized.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<3} {:<20} {:>6}  {:<32} LABEL",
        "#", "NAME", "SCORE", "BOX (x, y, w, h)"
    );
    for (i, instruction) in overlay.iter().enumerate() {
        let r = &instruction.rect;
        let bbox = format!("({:.1}, {:.1}, {:.1}, {:.1})", r.x, r.y, r.width, r.height);
        let _ = writeln!(
            out,
            "{:<3} {:<20} {:>6.2}  {:<32} {}",
            i + 1,
            instruction.label.text,
            instruction.score,
            bbox,
            placement_name(instruction.label.placement)
        );
    }
    out
}

pub fn format_roster(overview: &RosterOverview) -> String {
    let mut out = String::new();
    if overview.rows.is_empty() {
        out.push_str("No students found.\n");
    } else {
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:<20} {:>7} {:>5} {:>10}  STATUS",
            "ID", "ROLL NO", "NAME", "PRESENT", "TOTAL", "ATTENDANCE"
        );
        for row in &overview.rows {
            let s = &row.student;
            let _ = writeln!(
                out,
                "{:<12} {:<12} {:<20} {:>7} {:>5} {:>9.1}%  {}",
                s.id, s.roll_no, s.name, s.present, s.total, s.percentage, row.status
            );
        }
    }

    let stats = &overview.stats;
    let _ = writeln!(
        out,
        "\n{} student(s), average attendance {:.1}% (excellent {}, average {}, poor {})",
        stats.total_students, stats.average_percentage, stats.excellent, stats.average, stats.poor
    );
    out
}

pub fn format_student_report(report: &StudentReport) -> String {
    let s = &report.summary;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", s.name, s.roll_no);
    let _ = writeln!(
        out,
        "  Present:    {} of {} ({:.1}%)",
        s.present, s.total, report.present_share
    );
    let _ = writeln!(
        out,
        "  Absent:     {} ({:.1}%)",
        report.absent, report.absent_share
    );
    let _ = writeln!(out, "  Attendance: {:.1}%", s.percentage);
    let _ = writeln!(out, "  Status:     {}", report.status);
    out
}

/// Sessions in the order given, with a long-form date and weekday.
pub fn format_sessions(sessions: &[SessionSummary]) -> String {
    if sessions.is_empty() {
        return "No attendance sessions recorded yet.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<14} {:<10} {:>7}", "DATE", "DAY", "PRESENT");
    for session in sessions {
        let _ = writeln!(
            out,
            "{:<14} {:<10} {:>7}",
            session.date.format("%b %d, %Y").to_string(),
            session.date.format("%A").to_string(),
            session.attendance_count
        );
    }
    let _ = writeln!(
        out,
        "\n{} session(s), {} present mark(s)",
        sessions.len(),
        total_present(sessions)
    );
    out
}
