//! Routine enumeration and selection.
//!
//! The planner walks the cartesian product of candidate sections (one
//! per requested course), drops combinations that miss the selected
//! days and windows or clash internally, and then picks a winner. The
//! ranked path scores survivors by campus days and hands exact ties to
//! a [`Ranker`]; the manual path returns the first survivor.

use routine_core::conflict::{exam_conflicts, internal_conflict, pairwise_conflict};
use routine_core::scoring::{campus_days, summarize};
use routine_core::windows::{window_fit, TimeWindow};
use routine_core::{validate_request, GenerateError, Ranker};
use std::collections::HashSet;
use tracing::{debug, warn};
use types::{CommutePreference, ConflictRecord, Day, Routine, RoutineRequest, Section};

#[derive(Clone, Copy, Debug, Default)]
pub struct PlannerConfig {
    /// Apply the exam-conflict gate on the manual path too. Off by
    /// default: manual selection historically ignores exam clashes and
    /// only the ranked path refuses them.
    pub exam_gate_in_manual: bool,
}

pub struct RoutinePlanner<R> {
    ranker: R,
    config: PlannerConfig,
}

impl<R: Ranker> RoutinePlanner<R> {
    pub fn new(ranker: R) -> Self {
        Self {
            ranker,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(ranker: R, config: PlannerConfig) -> Self {
        Self { ranker, config }
    }

    /// Generates one routine for the request, or the most specific
    /// error describing why none exists.
    pub async fn generate(
        &self,
        catalog: &[Section],
        req: &RoutineRequest,
    ) -> Result<Routine, GenerateError> {
        validate_request(req)?;
        let per_course = group_by_course(catalog, &req.courses)?;
        let days = parse_days(&req.days);
        let windows = parse_windows(&req.times);
        let pref = CommutePreference::parse(req.commute_preference.as_deref());

        if req.use_ai {
            self.generate_ranked(&per_course, &days, &windows, pref).await
        } else {
            self.generate_manual(&per_course, &days, &windows)
        }
    }

    async fn generate_ranked(
        &self,
        per_course: &[Vec<&Section>],
        days: &HashSet<Day>,
        windows: &[TimeWindow],
        pref: CommutePreference,
    ) -> Result<Routine, GenerateError> {
        let mut candidates: Vec<(Vec<&Section>, usize)> = Vec::new();

        for combo in CartesianProduct::new(per_course.iter().map(Vec::len).collect()) {
            let sections: Vec<&Section> = combo
                .iter()
                .zip(per_course)
                .map(|(&i, group)| group[i])
                .collect();

            // exam clashes are structural: no alternative combination
            // can resolve them, so the first hit aborts the request
            let records = combination_exam_conflicts(&sections);
            if !records.is_empty() {
                return Err(GenerateError::ExamConflicts(records));
            }

            if combination_fits(&sections, days, windows) {
                let (count, _) = campus_days(&sections);
                candidates.push((sections, count));
            }
        }

        if candidates.is_empty() {
            return Err(GenerateError::NoValidCombination);
        }

        // far commuters want fewer campus days, everyone else gets the
        // spread-out end of the ordering
        match pref {
            CommutePreference::Far => candidates.sort_by_key(|(_, count)| *count),
            _ => candidates.sort_by_key(|(_, count)| std::cmp::Reverse(*count)),
        }

        let best = candidates[0].1;
        let tied: Vec<&Vec<&Section>> = candidates
            .iter()
            .take_while(|(_, count)| *count == best)
            .map(|(sections, _)| sections)
            .collect();
        debug!(candidates = candidates.len(), tied = tied.len(), "ranking candidates");

        if tied.len() == 1 {
            return Ok(routine(tied[0]));
        }

        let summaries: Vec<_> = tied
            .iter()
            .enumerate()
            .map(|(id, sections)| summarize(id, sections, days))
            .collect();
        let chosen = match self.ranker.rank(&summaries, pref.commute_text()).await {
            Ok(i) => i % tied.len(),
            Err(e) => {
                warn!(error = %e, "ranker failed; falling back to first tied candidate");
                0
            }
        };
        Ok(routine(tied[chosen]))
    }

    fn generate_manual(
        &self,
        per_course: &[Vec<&Section>],
        days: &HashSet<Day>,
        windows: &[TimeWindow],
    ) -> Result<Routine, GenerateError> {
        let mut first_records: Option<Vec<ConflictRecord>> = None;

        for combo in CartesianProduct::new(per_course.iter().map(Vec::len).collect()) {
            let sections: Vec<&Section> = combo
                .iter()
                .zip(per_course)
                .map(|(&i, group)| group[i])
                .collect();
            if !combination_fits(&sections, days, windows) {
                continue;
            }
            if self.config.exam_gate_in_manual {
                let records = combination_exam_conflicts(&sections);
                if !records.is_empty() {
                    first_records.get_or_insert(records);
                    continue;
                }
            }
            return Ok(routine(&sections));
        }

        match first_records {
            Some(records) => Err(GenerateError::ExamConflicts(records)),
            None => Err(GenerateError::NoValidCombination),
        }
    }
}

/// Sections per requested course, request order preserved.
fn group_by_course<'a>(
    catalog: &'a [Section],
    courses: &[String],
) -> Result<Vec<Vec<&'a Section>>, GenerateError> {
    courses
        .iter()
        .map(|course| {
            let wanted = course.trim();
            let group: Vec<&Section> = catalog
                .iter()
                .filter(|s| s.course_code.eq_ignore_ascii_case(wanted))
                .collect();
            if group.is_empty() {
                Err(GenerateError::NoSectionsForCourse(course.clone()))
            } else {
                Ok(group)
            }
        })
        .collect()
}

fn parse_days(tokens: &[String]) -> HashSet<Day> {
    tokens
        .iter()
        .filter_map(|t| {
            let day = Day::parse(t);
            if day.is_none() {
                warn!(token = t.as_str(), "ignoring unknown day selection");
            }
            day
        })
        .collect()
}

fn parse_windows(labels: &[String]) -> Vec<TimeWindow> {
    labels
        .iter()
        .filter_map(|label| match TimeWindow::parse(label) {
            Ok(w) => Some(w),
            Err(e) => {
                warn!(label = label.as_str(), error = %e, "ignoring unparseable time selection");
                None
            }
        })
        .collect()
}

fn combination_exam_conflicts(sections: &[&Section]) -> Vec<ConflictRecord> {
    let mut records = Vec::new();
    for i in 0..sections.len() {
        for j in (i + 1)..sections.len() {
            records.extend(exam_conflicts(sections[i], sections[j]));
        }
    }
    records
}

fn combination_fits(sections: &[&Section], days: &HashSet<Day>, windows: &[TimeWindow]) -> bool {
    for s in sections {
        if s.meetings
            .iter()
            .any(|m| window_fit(m, days, windows).is_err())
        {
            return false;
        }
        if internal_conflict(s) {
            return false;
        }
    }
    for i in 0..sections.len() {
        for j in (i + 1)..sections.len() {
            if pairwise_conflict(sections[i], sections[j]) {
                return false;
            }
        }
    }
    true
}

fn routine(sections: &[&Section]) -> Routine {
    let (count, list) = campus_days(sections);
    Routine {
        sections: sections.iter().map(|s| (*s).clone()).collect(),
        campus_day_count: count,
        campus_days: list,
    }
}

/// Odometer over one index per course, rightmost position fastest.
struct CartesianProduct {
    lens: Vec<usize>,
    idx: Vec<usize>,
    done: bool,
}

impl CartesianProduct {
    fn new(lens: Vec<usize>) -> Self {
        let done = lens.is_empty() || lens.iter().any(|&n| n == 0);
        let idx = vec![0; lens.len()];
        Self { lens, idx, done }
    }
}

impl Iterator for CartesianProduct {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.idx.clone();
        let mut pos = self.lens.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            self.idx[pos] += 1;
            if self.idx[pos] < self.lens[pos] {
                break;
            }
            self.idx[pos] = 0;
        }
        Some(current)
    }
}
