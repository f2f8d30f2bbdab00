use chrono::{DateTime, Utc};

use crate::{ExerciseInstance, Session, SessionID, TemplateID};

/// Which earlier performance of an exercise to look up.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceQuery<'a> {
    pub template_id: &'a TemplateID,
    /// Typically the session currently being performed.
    pub exclude: Option<SessionID>,
    /// Only sessions completed strictly before this instant are considered.
    pub before: DateTime<Utc>,
}

/// The most recent performance of an exercise that has at least one completed set.
///
/// Sessions are ordered by completion time, most recent first. Among sessions completed at
/// the same instant, the one listed first wins. Within a session, the first instance of the
/// exercise with a completed set is returned.
#[must_use]
pub fn last_performance<'a>(
    sessions: &'a [Session],
    query: &PerformanceQuery,
) -> Option<&'a ExerciseInstance> {
    find_last(sessions, query, ExerciseInstance::has_completed_set)
}

/// Like [`last_performance`], but the performance must contain a completed set with positive
/// weight and reps.
#[must_use]
pub fn last_weighted_performance<'a>(
    sessions: &'a [Session],
    query: &PerformanceQuery,
) -> Option<&'a ExerciseInstance> {
    find_last(sessions, query, |e| e.weighted_sets().next().is_some())
}

fn find_last<'a>(
    sessions: &'a [Session],
    query: &PerformanceQuery,
    accept: impl Fn(&ExerciseInstance) -> bool,
) -> Option<&'a ExerciseInstance> {
    let mut candidates = sessions
        .iter()
        .filter_map(|s| s.completed_at.map(|completed_at| (completed_at, s)))
        .filter(|(completed_at, s)| {
            *completed_at < query.before && Some(s.id) != query.exclude
        })
        .collect::<Vec<_>>();
    candidates.sort_by(|(a, _), (b, _)| b.cmp(a));

    candidates.into_iter().find_map(|(_, s)| {
        s.exercises
            .iter()
            .find(|e| e.template_id.as_ref() == Some(query.template_id) && accept(e))
    })
}
