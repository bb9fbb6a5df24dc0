//! Schedule extraction: the single normalization step from raw upstream
//! records to [`Section`]. Downstream components never see raw shapes.

use crate::time::parse_minutes_lenient;
use serde_json::Value;
use tracing::warn;
use types::raw::{RawLabSchedules, RawMeeting, RawSection};
use types::{Day, ExamKind, ExamSlot, Meeting, MeetingKind, Section};

const TBA: &str = "TBA";

/// Normalizes a whole catalog snapshot. Malformed records are dropped
/// with a warning so one bad row cannot abort a generation request.
pub fn normalize_snapshot(records: &[Value]) -> Vec<Section> {
    records.iter().filter_map(normalize_section).collect()
}

pub fn normalize_section(record: &Value) -> Option<Section> {
    let raw: RawSection = match serde_json::from_value(record.clone()) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "skipping malformed section record");
            return None;
        }
    };
    let course_code = match &raw.course_code {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => {
            warn!("skipping section record without a course code");
            return None;
        }
    };

    let mut meetings = class_meetings(&raw);
    meetings.extend(lab_meetings(&raw));

    Some(Section {
        course_code,
        course_name: raw.course_name.clone(),
        section_name: raw.section_name.clone().unwrap_or_default(),
        section_id: raw.section_id.as_ref().map(id_string).unwrap_or_default(),
        instructor: raw.faculties.clone(),
        capacity: raw.capacity,
        consumed_seats: raw.consumed_seat,
        meetings,
        exams: exam_slots(&raw),
    })
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn class_meetings(raw: &RawSection) -> Vec<Meeting> {
    let instructor = raw
        .faculties
        .clone()
        .unwrap_or_else(|| TBA.to_string());
    raw.section_schedule
        .iter()
        .flat_map(|s| s.class_schedules.iter())
        .filter_map(|m| meeting_from(MeetingKind::Class, m, m.room.clone(), instructor.clone()))
        .collect()
}

fn lab_meetings(raw: &RawSection) -> Vec<Meeting> {
    let Some(labs) = &raw.lab_schedules else {
        return Vec::new();
    };
    let instructor = raw
        .lab_faculties
        .clone()
        .unwrap_or_else(|| TBA.to_string());
    match labs {
        RawLabSchedules::Flat(list) => list
            .iter()
            .filter_map(|m| {
                let room = raw.lab_room_name.clone().or_else(|| m.room.clone());
                meeting_from(MeetingKind::Lab, m, room, instructor.clone())
            })
            .collect(),
        RawLabSchedules::Nested(nested) => {
            let room = raw.lab_room_name.clone().or_else(|| nested.room.clone());
            nested
                .class_schedules
                .iter()
                .filter_map(|m| meeting_from(MeetingKind::Lab, m, room.clone(), instructor.clone()))
                .collect()
        }
        RawLabSchedules::Other(v) => {
            warn!(
                course = raw.course_code.as_deref().unwrap_or(""),
                shape = shape_name(v),
                "unrecognized lab schedule shape; treating as no lab meetings"
            );
            Vec::new()
        }
    }
}

fn meeting_from(
    kind: MeetingKind,
    m: &RawMeeting,
    room: Option<String>,
    instructor: String,
) -> Option<Meeting> {
    let day_text = m.day.as_deref()?;
    let day = match Day::parse(day_text) {
        Some(d) => d,
        None => {
            warn!(day = day_text, "unknown day token in schedule entry");
            return None;
        }
    };
    let (start, end) = match (&m.start_time, &m.end_time) {
        (Some(s), Some(e)) => (s, e),
        _ => return None,
    };
    Some(Meeting {
        kind,
        day,
        start_min: parse_minutes_lenient(start),
        end_min: parse_minutes_lenient(end),
        room: room.unwrap_or_else(|| TBA.to_string()),
        instructor,
    })
}

/// Exam fields may live nested under the section schedule or at the
/// top level; the nested copy wins. A slot needs date, start and end.
fn exam_slots(raw: &RawSection) -> Vec<ExamSlot> {
    let sched = raw.section_schedule.as_ref();
    let mut exams = Vec::new();

    let mid = (
        sched
            .and_then(|s| s.mid_exam_date.clone())
            .or_else(|| raw.mid_exam_date.clone()),
        sched
            .and_then(|s| s.mid_exam_start_time.clone())
            .or_else(|| raw.mid_exam_start_time.clone()),
        sched
            .and_then(|s| s.mid_exam_end_time.clone())
            .or_else(|| raw.mid_exam_end_time.clone()),
    );
    if let (Some(date), Some(start), Some(end)) = mid {
        exams.push(ExamSlot {
            kind: ExamKind::Mid,
            date,
            start,
            end,
        });
    }

    let fin = (
        sched
            .and_then(|s| s.final_exam_date.clone())
            .or_else(|| raw.final_exam_date.clone()),
        sched
            .and_then(|s| s.final_exam_start_time.clone())
            .or_else(|| raw.final_exam_start_time.clone()),
        sched
            .and_then(|s| s.final_exam_end_time.clone())
            .or_else(|| raw.final_exam_end_time.clone()),
    );
    if let (Some(date), Some(start), Some(end)) = fin {
        exams.push(ExamSlot {
            kind: ExamKind::Final,
            date,
            start,
            end,
        });
    }

    exams
}

fn shape_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_flat_lab_shape() {
        let record = json!({
            "courseCode": "CSE341",
            "sectionName": "01",
            "sectionId": 4217,
            "faculties": "MMH",
            "capacity": 35,
            "consumedSeat": 30,
            "labSchedules": [
                {"day": "Tuesday", "startTime": "11:00:00", "endTime": "13:50:00"}
            ],
            "labRoomName": "FT-905"
        });
        let section = normalize_section(&record).unwrap();
        assert_eq!(section.section_id, "4217");
        assert_eq!(section.available_seats(), 5);
        let labs: Vec<_> = section.lab_meetings().collect();
        assert_eq!(labs.len(), 1);
        assert_eq!(labs[0].day, Day::Tuesday);
        assert_eq!(labs[0].start_min, 660);
        assert_eq!(labs[0].end_min, 830);
        assert_eq!(labs[0].room, "FT-905");
        assert_eq!(labs[0].instructor, "TBA");
    }

    #[test]
    fn normalizes_nested_lab_shape() {
        let record = json!({
            "courseCode": "CSE341",
            "sectionName": "02",
            "labFaculties": "TAS",
            "labSchedules": {
                "room": "FT-906",
                "classSchedules": [
                    {"day": "Sunday", "startTime": "08:00:00", "endTime": "10:50:00"},
                ]
            }
        });
        let section = normalize_section(&record).unwrap();
        let labs: Vec<_> = section.lab_meetings().collect();
        assert_eq!(labs.len(), 1);
        assert_eq!(labs[0].room, "FT-906");
        assert_eq!(labs[0].instructor, "TAS");
    }

    #[test]
    fn unrecognized_lab_shape_degrades_to_no_labs() {
        let record = json!({
            "courseCode": "CSE341",
            "sectionName": "03",
            "labSchedules": "corrupted"
        });
        let section = normalize_section(&record).unwrap();
        assert_eq!(section.lab_meetings().count(), 0);
    }

    #[test]
    fn nested_exam_fields_win_over_top_level() {
        let record = json!({
            "courseCode": "MAT216",
            "sectionName": "05",
            "midExamDate": "2024-03-01",
            "midExamStartTime": "09:00:00",
            "midExamEndTime": "10:00:00",
            "sectionSchedule": {
                "classSchedules": [],
                "midExamDate": "2024-03-08",
                "midExamStartTime": "11:00:00",
                "midExamEndTime": "12:00:00"
            }
        });
        let section = normalize_section(&record).unwrap();
        assert_eq!(section.exams.len(), 1);
        assert_eq!(section.exams[0].kind, ExamKind::Mid);
        assert_eq!(section.exams[0].date, "2024-03-08");
    }

    #[test]
    fn missing_day_or_times_drops_the_entry() {
        let record = json!({
            "courseCode": "PHY111",
            "sectionName": "01",
            "sectionSchedule": {
                "classSchedules": [
                    {"day": "Monday", "startTime": "08:00:00"},
                    {"startTime": "08:00:00", "endTime": "09:20:00"},
                    {"day": "Wednesday", "startTime": "08:00:00", "endTime": "09:20:00"}
                ]
            }
        });
        let section = normalize_section(&record).unwrap();
        assert_eq!(section.meetings.len(), 1);
        assert_eq!(section.meetings[0].day, Day::Wednesday);
    }

    #[test]
    fn snapshot_skips_malformed_records() {
        let records = vec![
            json!("not an object"),
            json!({"sectionName": "no course code"}),
            json!({"courseCode": "ENG101", "sectionName": "09"}),
        ];
        let sections = normalize_snapshot(&records);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].course_code, "ENG101");
    }
}
