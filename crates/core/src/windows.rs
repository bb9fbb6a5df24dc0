//! Selected-day and selected-window admissibility for a single meeting.

use crate::time::format_range_12h;
use std::collections::HashSet;
use thiserror::Error;
use types::{Day, Meeting, MeetingKind};

/// The seven catalog slots students pick from, in day order.
pub const TIME_SLOT_CATALOG: [&str; 7] = [
    "8:00 AM-9:20 AM",
    "9:30 AM-10:50 AM",
    "11:00 AM-12:20 PM",
    "12:30 PM-1:50 PM",
    "2:00 PM-3:20 PM",
    "3:30 PM-4:50 PM",
    "5:00 PM-6:20 PM",
];

/// Same catalog as [`TIME_SLOT_CATALOG`], pre-parsed to minutes.
pub const SLOT_CATALOG: [TimeWindow; 7] = [
    TimeWindow { start: 480, end: 560 },
    TimeWindow { start: 570, end: 650 },
    TimeWindow { start: 660, end: 740 },
    TimeWindow { start: 750, end: 830 },
    TimeWindow { start: 840, end: 920 },
    TimeWindow { start: 930, end: 1010 },
    TimeWindow { start: 1020, end: 1100 },
];

/// Labs at or above this duration span multiple catalog slots and must
/// have every slot they touch selected.
pub const MIN_LAB_MINUTES: u16 = 170;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimeWindow {
    pub start: u16,
    pub end: u16,
}

impl TimeWindow {
    /// Parses a `"start-end"` label such as `"8:00 AM-9:20 AM"`.
    pub fn parse(label: &str) -> Result<Self, crate::time::TimeParseError> {
        let (start, end) = label
            .split_once('-')
            .ok_or_else(|| crate::time::TimeParseError::NotARange(label.to_string()))?;
        Ok(TimeWindow {
            start: crate::time::parse_minutes(start)?,
            end: crate::time::parse_minutes(end)?,
        })
    }

    pub fn label(&self) -> String {
        format_range_12h(self.start, self.end)
    }

    /// Closed-endpoint touch test: a meeting sharing only a boundary
    /// minute with the window still counts as touching it.
    pub fn touches(&self, start: u16, end: u16) -> bool {
        start <= self.end && end >= self.start
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FitError {
    #[error("{kind} meets on {day}, which is not a selected day")]
    DayNotSelected { kind: MeetingKind, day: Day },
    #[error("lab runs {minutes} minutes, too short for a lab block")]
    LabTooShort { minutes: u16 },
    #[error("lab spans {spanned} catalog slots that are not all selected")]
    LabSlotsNotCovered { spanned: usize },
    #[error("{kind} at {start}..{end} falls outside the selected times")]
    OutsideSelectedTimes { kind: MeetingKind, start: u16, end: u16 },
}

/// Checks one meeting against the selected days and time windows.
///
/// Classes fit if they touch any selected window. Labs are long blocks:
/// they must run at least [`MIN_LAB_MINUTES`] and every catalog slot
/// the lab touches must be among the selected windows, so a student
/// cannot select only the first half of a three-slot lab.
pub fn window_fit(
    meeting: &Meeting,
    days: &HashSet<Day>,
    windows: &[TimeWindow],
) -> Result<(), FitError> {
    if !days.contains(&meeting.day) {
        return Err(FitError::DayNotSelected {
            kind: meeting.kind,
            day: meeting.day,
        });
    }
    match meeting.kind {
        MeetingKind::Lab => {
            let minutes = meeting.end_min.saturating_sub(meeting.start_min);
            if minutes < MIN_LAB_MINUTES {
                return Err(FitError::LabTooShort { minutes });
            }
            let spanned: Vec<TimeWindow> = SLOT_CATALOG
                .iter()
                .copied()
                .filter(|slot| slot.touches(meeting.start_min, meeting.end_min))
                .collect();
            if spanned.iter().any(|slot| !windows.contains(slot)) {
                return Err(FitError::LabSlotsNotCovered {
                    spanned: spanned.len(),
                });
            }
            Ok(())
        }
        MeetingKind::Class => {
            if windows
                .iter()
                .any(|w| w.touches(meeting.start_min, meeting.end_min))
            {
                Ok(())
            } else {
                Err(FitError::OutsideSelectedTimes {
                    kind: meeting.kind,
                    start: meeting.start_min,
                    end: meeting.end_min,
                })
            }
        }
    }
}
