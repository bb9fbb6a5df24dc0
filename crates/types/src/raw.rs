//! Upstream catalog record shapes, exactly as the data feed sends them.
//!
//! These are deliberately loose: every field optional, lab schedules an
//! untagged union of the two legacy layouts. The schedule extractor in
//! `routine-core` normalizes them into [`crate::Section`] once at
//! ingestion; nothing downstream re-interprets raw shapes.

use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub section_name: Option<String>,
    /// May arrive as a string or a number.
    pub section_id: Option<Value>,
    pub faculties: Option<String>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub consumed_seat: u32,
    pub section_schedule: Option<RawSectionSchedule>,
    pub lab_schedules: Option<RawLabSchedules>,
    pub lab_room_name: Option<String>,
    pub lab_faculties: Option<String>,
    pub mid_exam_date: Option<String>,
    pub mid_exam_start_time: Option<String>,
    pub mid_exam_end_time: Option<String>,
    pub final_exam_date: Option<String>,
    pub final_exam_start_time: Option<String>,
    pub final_exam_end_time: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSectionSchedule {
    #[serde(default)]
    pub class_schedules: Vec<RawMeeting>,
    pub mid_exam_date: Option<String>,
    pub mid_exam_start_time: Option<String>,
    pub mid_exam_end_time: Option<String>,
    pub final_exam_date: Option<String>,
    pub final_exam_start_time: Option<String>,
    pub final_exam_end_time: Option<String>,
}

/// The two legacy lab layouts, plus a catch-all for anything else the
/// feed has shipped over the years.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawLabSchedules {
    Flat(Vec<RawMeeting>),
    Nested(RawNestedLab),
    Other(Value),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNestedLab {
    #[serde(default)]
    pub class_schedules: Vec<RawMeeting>,
    pub room: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeeting {
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room: Option<String>,
}
