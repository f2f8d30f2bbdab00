use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{ExerciseInstance, Session, TemplateID, WeightedSet, epley_1rm, weight_for_reps};

/// Results of a completed session, including the personal records set in it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WorkoutSummary {
    /// Sum of weight times reps over all weighted sets, in kg.
    pub total_volume: f32,
    pub duration_seconds: Option<i64>,
    pub exercises: Vec<ExerciseSummary>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExerciseSummary {
    pub template_id: TemplateID,
    /// Completed sets with positive weight and reps.
    pub sets: Vec<AnalyzedSet>,
    /// Number of record kinds (e1RM, e10RM, set volume) improved in this session.
    pub total_prs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AnalyzedSet {
    pub order: u32,
    pub weight: f32,
    pub reps: u32,
    pub rir: Option<u32>,
    pub new_e1rm_pr: bool,
    pub new_e10rm_pr: bool,
    pub new_volume_pr: bool,
}

#[derive(Debug, Default, Clone, Copy)]
struct Bests {
    e1rm: f32,
    set_volume: f32,
}

impl WorkoutSummary {
    /// Summarize a completed session.
    ///
    /// Records are compared to the sessions in `history` completed strictly before this one.
    /// An exercise never performed before sets all records. Within the session, the record
    /// is attributed to the first set that reached the session best. Returns `None` for a
    /// session in progress.
    #[must_use]
    pub fn of(session: &Session, history: &[Session]) -> Option<Self> {
        let completed_at = session.completed_at?;
        let historical_bests = historical_bests(history, completed_at);

        let exercises = session
            .exercises
            .iter()
            .filter_map(|e| ExerciseSummary::of(e, &historical_bests))
            .collect::<Vec<_>>();

        Some(Self {
            total_volume: exercises
                .iter()
                .flat_map(|e| &e.sets)
                .map(|s| {
                    #[allow(clippy::cast_precision_loss)]
                    let reps = s.reps as f32;
                    s.weight * reps
                })
                .sum(),
            duration_seconds: session.duration().map(|d| d.num_seconds()),
            exercises,
        })
    }
}

impl ExerciseSummary {
    fn of(
        exercise: &ExerciseInstance,
        historical_bests: &BTreeMap<&TemplateID, Bests>,
    ) -> Option<Self> {
        let template_id = exercise.template_id.as_ref()?;
        let sets = exercise.weighted_sets().collect::<Vec<_>>();
        let (e1rm_set, e1rm) = best_by(&sets, one_rep_max)?;
        let (volume_set, volume) = best_by(&sets, WeightedSet::volume)?;

        let historical = historical_bests
            .get(template_id)
            .copied()
            .unwrap_or_default();
        let new_e1rm_pr = e1rm > historical.e1rm;
        let new_e10rm_pr = weight_for_reps(e1rm, 10) > weight_for_reps(historical.e1rm, 10);
        let new_volume_pr = volume > historical.set_volume;

        Some(Self {
            template_id: template_id.clone(),
            sets: sets
                .iter()
                .enumerate()
                .map(|(i, s)| AnalyzedSet {
                    order: s.order,
                    weight: s.weight,
                    reps: s.reps,
                    rir: s.rir,
                    new_e1rm_pr: new_e1rm_pr && i == e1rm_set,
                    new_e10rm_pr: new_e10rm_pr && i == e1rm_set,
                    new_volume_pr: new_volume_pr && i == volume_set,
                })
                .collect(),
            total_prs: [new_e1rm_pr, new_e10rm_pr, new_volume_pr]
                .into_iter()
                .map(u32::from)
                .sum(),
        })
    }
}

fn one_rep_max(set: &WeightedSet) -> f32 {
    epley_1rm(set.weight, set.reps, set.rir.unwrap_or(0))
}

/// Index and value of the first set with the highest value.
fn best_by(sets: &[WeightedSet], value: impl Fn(&WeightedSet) -> f32) -> Option<(usize, f32)> {
    sets.iter()
        .map(value)
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
}

fn historical_bests(
    history: &[Session],
    before: DateTime<Utc>,
) -> BTreeMap<&TemplateID, Bests> {
    let mut bests: BTreeMap<&TemplateID, Bests> = BTreeMap::new();
    for session in history
        .iter()
        .filter(|s| s.completed_at.is_some_and(|c| c < before))
    {
        for exercise in &session.exercises {
            let Some(template_id) = &exercise.template_id else {
                continue;
            };
            for set in exercise.weighted_sets() {
                let best = bests.entry(template_id).or_default();
                best.e1rm = best.e1rm.max(one_rep_max(&set));
                best.set_volume = best.set_volume.max(set.volume());
            }
        }
    }
    bests
}
