//! Campus-day counting and candidate summaries for tie-breaking.

use crate::time::format_range;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use types::{Day, Section};

/// Distinct days the combination puts the student on campus, counted
/// once per day and listed in week order.
pub fn campus_days(sections: &[&Section]) -> (usize, Vec<Day>) {
    let days: BTreeSet<Day> = sections
        .iter()
        .flat_map(|s| s.meetings.iter().map(|m| m.day))
        .collect();
    let list: Vec<Day> = days.into_iter().collect();
    (list.len(), list)
}

/// Compact view of one tied candidate, serialized for the advisory
/// ranker prompt.
#[derive(Clone, Debug, Serialize)]
pub struct CandidateSummary {
    pub id: usize,
    pub campus_days: usize,
    pub days_list: Vec<Day>,
    pub courses: Vec<CourseSummary>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CourseSummary {
    #[serde(rename = "courseCode")]
    pub course_code: String,
    pub section: String,
    pub schedules: Vec<MeetingSummary>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MeetingSummary {
    #[serde(rename = "type")]
    pub kind: String,
    pub day: Day,
    pub time: String,
}

/// Builds the summary for one combination, listing only meetings on the
/// selected days so the ranker sees exactly what the routine will hold.
pub fn summarize(id: usize, sections: &[&Section], selected_days: &HashSet<Day>) -> CandidateSummary {
    let (count, list) = campus_days(sections);
    let courses = sections
        .iter()
        .map(|s| CourseSummary {
            course_code: s.course_code.clone(),
            section: s.section_name.clone(),
            schedules: s
                .meetings
                .iter()
                .filter(|m| selected_days.contains(&m.day))
                .map(|m| MeetingSummary {
                    kind: m.kind.to_string(),
                    day: m.day,
                    time: format_range(m.start_min, m.end_min),
                })
                .collect(),
        })
        .collect();
    CandidateSummary {
        id,
        campus_days: count,
        days_list: list,
        courses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Meeting, MeetingKind};

    fn section(course: &str, meetings: Vec<(Day, u16, u16)>) -> Section {
        Section {
            course_code: course.into(),
            course_name: None,
            section_name: "01".into(),
            section_id: course.into(),
            instructor: None,
            capacity: 30,
            consumed_seats: 0,
            meetings: meetings
                .into_iter()
                .map(|(day, start, end)| Meeting {
                    kind: MeetingKind::Class,
                    day,
                    start_min: start,
                    end_min: end,
                    room: "TBA".into(),
                    instructor: "TBA".into(),
                })
                .collect(),
            exams: vec![],
        }
    }

    #[test]
    fn counts_each_day_once_in_week_order() {
        let a = section("A", vec![(Day::Wednesday, 480, 560), (Day::Sunday, 480, 560)]);
        let b = section("B", vec![(Day::Sunday, 570, 650)]);
        let (count, list) = campus_days(&[&a, &b]);
        assert_eq!(count, 2);
        assert_eq!(list, vec![Day::Sunday, Day::Wednesday]);
    }

    #[test]
    fn summary_serializes_with_feed_field_names() {
        let a = section("CSE110", vec![(Day::Monday, 480, 560)]);
        let days: HashSet<Day> = [Day::Monday].into_iter().collect();
        let summary = summarize(0, &[&a], &days);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["campus_days"], 1);
        assert_eq!(json["courses"][0]["courseCode"], "CSE110");
        assert_eq!(json["courses"][0]["schedules"][0]["type"], "Class");
        assert_eq!(json["courses"][0]["schedules"][0]["day"], "MONDAY");
        assert_eq!(
            json["courses"][0]["schedules"][0]["time"],
            "08:00:00 - 09:20:00"
        );
    }

    #[test]
    fn summary_hides_unselected_days() {
        let a = section("CSE110", vec![(Day::Monday, 480, 560), (Day::Thursday, 480, 560)]);
        let days: HashSet<Day> = [Day::Monday].into_iter().collect();
        let summary = summarize(3, &[&a], &days);
        assert_eq!(summary.id, 3);
        assert_eq!(summary.courses[0].schedules.len(), 1);
        // campus days still reflect the full meeting set
        assert_eq!(summary.campus_days, 2);
    }
}
