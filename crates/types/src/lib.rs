use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod raw;

/// Canonical weekday tokens. Declaration order is the academic week
/// (Sunday-first), which `Ord` and `BTreeSet` iteration inherit.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Case-insensitive parse of a full weekday name.
    pub fn parse(text: &str) -> Option<Day> {
        match text.trim().to_ascii_uppercase().as_str() {
            "SUNDAY" => Some(Day::Sunday),
            "MONDAY" => Some(Day::Monday),
            "TUESDAY" => Some(Day::Tuesday),
            "WEDNESDAY" => Some(Day::Wednesday),
            "THURSDAY" => Some(Day::Thursday),
            "FRIDAY" => Some(Day::Friday),
            "SATURDAY" => Some(Day::Saturday),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Day::Sunday => "SUNDAY",
            Day::Monday => "MONDAY",
            Day::Tuesday => "TUESDAY",
            Day::Wednesday => "WEDNESDAY",
            Day::Thursday => "THURSDAY",
            Day::Friday => "FRIDAY",
            Day::Saturday => "SATURDAY",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MeetingKind {
    Class,
    Lab,
}

impl fmt::Display for MeetingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MeetingKind::Class => "Class",
            MeetingKind::Lab => "Lab",
        })
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash)]
pub enum ExamKind {
    Mid,
    Final,
}

impl fmt::Display for ExamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExamKind::Mid => "Mid",
            ExamKind::Final => "Final",
        })
    }
}

/// One weekly class or lab occurrence, normalized to minute-of-day.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
pub struct Meeting {
    pub kind: MeetingKind,
    pub day: Day,
    pub start_min: u16,
    pub end_min: u16,
    pub room: String,
    pub instructor: String,
}

/// One exam sitting. Times stay as the upstream strings: the conflict
/// checker parses them with its own fail-safe policy, and conflict
/// records report them verbatim.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
pub struct ExamSlot {
    pub kind: ExamKind,
    pub date: String,
    pub start: String,
    pub end: String,
}

/// One offering of one course, immutable for the duration of a request.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub course_code: String,
    #[serde(default)]
    pub course_name: Option<String>,
    pub section_name: String,
    pub section_id: String,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub consumed_seats: u32,
    /// Flat ordered schedule: class meetings first, then lab meetings.
    pub meetings: Vec<Meeting>,
    pub exams: Vec<ExamSlot>,
}

impl Section {
    pub fn available_seats(&self) -> i64 {
        self.capacity as i64 - self.consumed_seats as i64
    }

    pub fn class_meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.meetings
            .iter()
            .filter(|m| m.kind == MeetingKind::Class)
    }

    pub fn lab_meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.meetings.iter().filter(|m| m.kind == MeetingKind::Lab)
    }
}

/// Exam clash between two sections, kept for reporting only.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
pub struct ConflictRecord {
    pub course1: String,
    pub course2: String,
    pub date: String,
    pub kind1: ExamKind,
    pub kind2: ExamKind,
    pub time1: String,
    pub time2: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum PairKind {
    ClassClass,
    LabLab,
    LabClass,
    ClassLab,
}

/// Same-day meeting overlap between two sections, tagged by which side
/// was a class and which a lab.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
pub struct ScheduleConflict {
    pub kind: PairKind,
    pub course1: String,
    pub course2: String,
    pub day: Day,
    pub time1: String,
    pub time2: String,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CommutePreference {
    Far,
    Near,
    #[default]
    Neutral,
}

impl CommutePreference {
    /// Lenient parse: anything other than "far"/"near" is neutral.
    pub fn parse(text: Option<&str>) -> Self {
        match text.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("far") => CommutePreference::Far,
            Some("near") => CommutePreference::Near,
            _ => CommutePreference::Neutral,
        }
    }

    /// Preference line handed to the advisory ranker.
    pub fn commute_text(self) -> &'static str {
        match self {
            CommutePreference::Far => {
                "Student lives FAR from campus. Prefer fewer campus days (more compact schedule)."
            }
            CommutePreference::Near => {
                "Student lives NEAR campus. Prefer more spread out schedule (more campus days is fine)."
            }
            CommutePreference::Neutral => {
                "No commute preference specified. Balance schedule as needed."
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutineRequest {
    pub courses: Vec<String>,
    pub days: Vec<String>,
    pub times: Vec<String>,
    #[serde(default)]
    pub commute_preference: Option<String>,
    #[serde(default)]
    pub use_ai: bool,
}

/// The chosen combination: one section per requested course, in request
/// order, plus the derived campus-days figures for display.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub sections: Vec<Section>,
    pub campus_day_count: usize,
    pub campus_days: Vec<Day>,
}
