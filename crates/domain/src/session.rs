use chrono::{DateTime, Duration, Utc};

use crate::{
    DayID, Plan, PlanExercise, PlanID, SessionID, Set, SetStatus, Settings, TemplateID, Weight,
    WeightUnit, WeightedSet,
    history::{PerformanceQuery, last_performance},
};

/// A workout, either in progress or completed.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub id: SessionID,
    pub plan_id: Option<PlanID>,
    pub day_id: Option<DayID>,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Absent while the session is in progress.
    pub completed_at: Option<DateTime<Utc>>,
    pub exercises: Vec<ExerciseInstance>,
}

impl Session {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// Start a session for a day of a plan.
    ///
    /// Every planned exercise gets its target number of sets, prefilled with the target reps
    /// and the default RIR. Weights are carried over set by set from the last time the
    /// exercise was performed before `start_time`. If the plan asks for more sets than were
    /// done back then, the extra sets repeat the last known weight.
    #[must_use]
    pub fn from_plan_day(
        id: SessionID,
        plan: &Plan,
        day_id: DayID,
        history: &[Session],
        start_time: DateTime<Utc>,
        settings: &Settings,
    ) -> Option<Session> {
        let (_, day) = plan.day(day_id)?;
        Some(Session {
            id,
            plan_id: Some(plan.id),
            day_id: Some(day_id),
            name: day.name.clone(),
            start_time,
            end_time: None,
            completed_at: None,
            exercises: day
                .exercises
                .iter()
                .map(|e| ExerciseInstance::from_plan(e, history, start_time, settings))
                .collect(),
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExerciseInstance {
    /// Free-text exercises without a library entry have no template.
    pub template_id: Option<TemplateID>,
    pub sets: Vec<Set>,
    /// Seconds.
    pub rest_between_sets: Option<u32>,
    pub weight_unit: Option<WeightUnit>,
}

impl ExerciseInstance {
    #[must_use]
    pub fn has_completed_set(&self) -> bool {
        self.sets.iter().any(Set::is_completed)
    }

    pub fn weighted_sets(&self) -> impl Iterator<Item = WeightedSet> + '_ {
        self.sets.iter().filter_map(Set::weighted)
    }

    fn from_plan(
        plan_exercise: &PlanExercise,
        history: &[Session],
        start_time: DateTime<Utc>,
        settings: &Settings,
    ) -> Self {
        let last_weights: Vec<Option<Weight>> = plan_exercise
            .template_id
            .as_ref()
            .and_then(|template_id| {
                last_performance(
                    history,
                    &PerformanceQuery {
                        template_id,
                        exclude: None,
                        before: start_time,
                    },
                )
            })
            .map(|e| e.sets.iter().map(|s| s.weight).collect())
            .unwrap_or_default();

        Self {
            template_id: plan_exercise.template_id.clone(),
            sets: (0..plan_exercise.target_sets)
                .map(|order| {
                    let i = order as usize;
                    Set {
                        order,
                        status: SetStatus::Todo,
                        reps: plan_exercise.target_reps,
                        weight: last_weights
                            .get(i)
                            .or(last_weights.last())
                            .copied()
                            .flatten(),
                        rir: settings.default_rir,
                        side: plan_exercise.side_type.side(i),
                        ..Set::default()
                    }
                })
                .collect(),
            rest_between_sets: Some(
                plan_exercise
                    .rest_between_sets
                    .unwrap_or(settings.global_rest_timer),
            ),
            weight_unit: None,
        }
    }
}
