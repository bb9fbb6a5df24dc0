//! Conflict predicates over normalized sections.
//!
//! Every predicate is total: bad input degrades to a defensive answer
//! instead of an error. Analysis features consume these outputs rather
//! than re-implementing overlap logic.

use crate::time::{format_range, parse_minutes};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;
use types::{ConflictRecord, ExamSlot, Meeting, MeetingKind, PairKind, ScheduleConflict, Section};

/// Half-open interval overlap on minutes of the day.
pub fn overlaps(start1: u16, end1: u16, start2: u16, end2: u16) -> bool {
    start1.max(start2) < end1.min(end2)
}

fn meetings_clash(a: &Meeting, b: &Meeting) -> bool {
    a.day == b.day && overlaps(a.start_min, a.end_min, b.start_min, b.end_min)
}

/// True if any two of the section's own meetings (classes and labs
/// combined) share a day and overlap.
pub fn internal_conflict(section: &Section) -> bool {
    let ms = &section.meetings;
    for i in 0..ms.len() {
        for j in (i + 1)..ms.len() {
            if meetings_clash(&ms[i], &ms[j]) {
                return true;
            }
        }
    }
    false
}

/// True if any meeting of `a` overlaps any meeting of `b` on the same
/// day. Two sections of the same course under the same instructor are
/// interchangeable slots of one teaching unit and are exempt — for
/// schedule purposes only, never for exams.
pub fn pairwise_conflict(a: &Section, b: &Section) -> bool {
    if a.course_code == b.course_code && a.instructor == b.instructor {
        return false;
    }
    a.meetings
        .iter()
        .any(|m1| b.meetings.iter().any(|m2| meetings_clash(m1, m2)))
}

/// Compares every midterm/final pair of `a` against `b`, producing one
/// record per date+time overlap. Sections sharing a section id or a
/// course code are never compared (self-comparison guard). The
/// same-instructor exemption of [`pairwise_conflict`] deliberately does
/// NOT apply here: exams clash regardless of who teaches.
pub fn exam_conflicts(a: &Section, b: &Section) -> Vec<ConflictRecord> {
    if a.section_id == b.section_id || a.course_code == b.course_code {
        return Vec::new();
    }
    let mut records = Vec::new();
    for exam1 in &a.exams {
        for exam2 in &b.exams {
            if exam1.date != exam2.date {
                continue;
            }
            if exam_times_clash(exam1, exam2) {
                records.push(ConflictRecord {
                    course1: a.course_code.clone(),
                    course2: b.course_code.clone(),
                    date: exam1.date.clone(),
                    kind1: exam1.kind,
                    kind2: exam2.kind,
                    time1: format!("{} - {}", exam1.start, exam1.end),
                    time2: format!("{} - {}", exam2.start, exam2.end),
                });
            }
        }
    }
    records
}

/// Fail-safe exam time comparison: a time that parses to 0 (midnight
/// or unparseable) forces a conflict, so a broken time cannot hide a
/// real clash.
fn exam_times_clash(exam1: &ExamSlot, exam2: &ExamSlot) -> bool {
    let start1 = parse_minutes(&exam1.start).unwrap_or(0);
    let end1 = parse_minutes(&exam1.end).unwrap_or(0);
    let start2 = parse_minutes(&exam2.start).unwrap_or(0);
    let end2 = parse_minutes(&exam2.end).unwrap_or(0);
    if start1 == 0 || end1 == 0 || start2 == 0 || end2 == 0 {
        warn!(
            time1 = %format!("{} - {}", exam1.start, exam1.end),
            time2 = %format!("{} - {}", exam2.start, exam2.end),
            "invalid exam time; assuming conflict for safety"
        );
        return true;
    }
    overlaps(start1, end1, start2, end2)
}

/// Reporting variant of the pairwise check: one record per same-day
/// overlap, tagged by which side was a class and which a lab. No
/// exemptions — this feeds analysis, not filtering.
pub fn schedule_conflicts(a: &Section, b: &Section) -> Vec<ScheduleConflict> {
    let mut out = Vec::new();
    for m1 in &a.meetings {
        for m2 in &b.meetings {
            if !meetings_clash(m1, m2) {
                continue;
            }
            let kind = match (m1.kind, m2.kind) {
                (MeetingKind::Class, MeetingKind::Class) => PairKind::ClassClass,
                (MeetingKind::Lab, MeetingKind::Lab) => PairKind::LabLab,
                (MeetingKind::Lab, MeetingKind::Class) => PairKind::LabClass,
                (MeetingKind::Class, MeetingKind::Lab) => PairKind::ClassLab,
            };
            out.push(ScheduleConflict {
                kind,
                course1: a.course_code.clone(),
                course2: b.course_code.clone(),
                day: m1.day,
                time1: format_range(m1.start_min, m1.end_min),
                time2: format_range(m2.start_min, m2.end_min),
            });
        }
    }
    out
}

/// Renders exam conflicts grouped by unique course pair, midterms and
/// finals in separate sections, self-conflicts excluded. A section with
/// no entries is omitted entirely, header included.
pub fn format_exam_conflicts(records: &[ConflictRecord]) -> String {
    let mut mids: BTreeMap<(String, String), (String, String)> = BTreeMap::new();
    let mut finals: BTreeMap<(String, String), (String, String)> = BTreeMap::new();
    let mut courses: BTreeSet<String> = BTreeSet::new();

    for r in records {
        if r.course1 == r.course2 {
            continue;
        }
        courses.insert(r.course1.clone());
        courses.insert(r.course2.clone());
        let pair = if r.course1 <= r.course2 {
            (r.course1.clone(), r.course2.clone())
        } else {
            (r.course2.clone(), r.course1.clone())
        };
        if r.kind1 == types::ExamKind::Mid || r.kind2 == types::ExamKind::Mid {
            mids.insert(pair.clone(), (r.date.clone(), r.time1.clone()));
        }
        if r.kind1 == types::ExamKind::Final || r.kind2 == types::ExamKind::Final {
            finals.insert(pair, (r.date.clone(), r.time1.clone()));
        }
    }

    if mids.is_empty() && finals.is_empty() {
        return String::new();
    }

    let mut message = String::from("Exam Conflicts\n\n");
    message.push_str(&format!(
        "Affected Courses: {}\n\n",
        courses.iter().cloned().collect::<Vec<_>>().join(", ")
    ));
    if !mids.is_empty() {
        message.push_str("Midterm Conflicts\n");
        for ((c1, c2), (date, time)) in &mids {
            message.push_str(&format!("{c1} ↔ {c2}: {date}, {time}\n"));
        }
    }
    if !finals.is_empty() {
        if !mids.is_empty() {
            message.push('\n');
        }
        message.push_str("Final Conflicts\n");
        for ((c1, c2), (date, time)) in &finals {
            message.push_str(&format!("{c1} ↔ {c2}: {date}, {time}\n"));
        }
    }
    message.trim_end().to_string()
}
