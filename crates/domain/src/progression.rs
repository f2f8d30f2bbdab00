use log::trace;

use crate::{
    Equipment, ProgressionSettings, Session, Settings, Translate, WeightUnit,
    history::{PerformanceQuery, last_weighted_performance},
};

/// Starting weight without any history, in the display unit.
const SEED_WEIGHT_KG: f32 = 60.0;
const SEED_WEIGHT_LBS: f32 = 135.0;
const DEFAULT_SET_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressionSuggestion {
    FirstTime,
    MasteredWeight,
    StandardProgress,
    HighEffort,
    Plateau,
}

impl ProgressionSuggestion {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ProgressionSuggestion::FirstTime => "progression.firstTime",
            ProgressionSuggestion::MasteredWeight => "progression.masteredWeight",
            ProgressionSuggestion::StandardProgress => "progression.standardProgress",
            ProgressionSuggestion::HighEffort => "progression.highEffort",
            ProgressionSuggestion::Plateau => "progression.plateau",
        }
    }
}

/// Target of a single set.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Prescription {
    pub weight: f32,
    pub reps: u32,
    pub rir: u32,
}

/// A set of the reference performance, with its weight in the display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformedSet {
    pub weight: f32,
    pub reps: u32,
    pub rir: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionPlan {
    pub settings: ProgressionSettings,
    /// In the display unit.
    pub weight_increment: f32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NextWorkout {
    pub suggestion: ProgressionSuggestion,
    pub sets: Vec<Prescription>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Progression {
    pub suggestion: ProgressionSuggestion,
    /// Translated suggestion.
    pub message: String,
    pub next_workout_plan: Vec<Prescription>,
    /// Unit of all weights in `next_workout_plan`.
    pub unit: WeightUnit,
}

/// How the sets of the reference performance compare to the targets.
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    last_weight: f32,
    top_reps: u32,
    all_met_min_reps: bool,
    all_met_max_reps: bool,
    all_met_target_rir: bool,
}

impl Evaluation {
    fn of(sets: &[PerformedSet], first: PerformedSet, settings: &ProgressionSettings) -> Self {
        Self {
            last_weight: first.weight,
            top_reps: sets.iter().map(|s| s.reps).max().unwrap_or(first.reps),
            all_met_min_reps: sets.iter().all(|s| s.reps >= settings.rep_range_min),
            all_met_max_reps: sets.iter().all(|s| s.reps >= settings.rep_range_max),
            all_met_target_rir: sets
                .iter()
                .all(|s| s.rir.unwrap_or(settings.rir) >= settings.rir),
        }
    }
}

struct Rule {
    suggestion: ProgressionSuggestion,
    applies: fn(&Evaluation) -> bool,
    prescribe: fn(&Evaluation, &ProgressionPlan) -> Prescription,
}

/// Evaluated in order, the first rule that applies determines the next workout. The last
/// rule always applies.
static RULES: [Rule; 4] = [
    Rule {
        suggestion: ProgressionSuggestion::MasteredWeight,
        applies: |e| e.all_met_max_reps && e.all_met_target_rir,
        prescribe: |e, p| Prescription {
            weight: e.last_weight + p.weight_increment,
            reps: p.settings.rep_range_min,
            rir: p.settings.rir,
        },
    },
    Rule {
        suggestion: ProgressionSuggestion::StandardProgress,
        applies: |e| e.all_met_min_reps && e.all_met_target_rir,
        prescribe: |e, p| Prescription {
            weight: e.last_weight,
            reps: (e.top_reps + 1).min(p.settings.rep_range_max),
            rir: p.settings.rir,
        },
    },
    Rule {
        suggestion: ProgressionSuggestion::HighEffort,
        applies: |e| e.all_met_min_reps && !e.all_met_target_rir,
        prescribe: |e, p| Prescription {
            weight: e.last_weight,
            reps: e.top_reps,
            rir: p.settings.rir,
        },
    },
    Rule {
        suggestion: ProgressionSuggestion::Plateau,
        applies: |_| true,
        prescribe: |e, p| Prescription {
            weight: (e.last_weight - p.weight_increment).max(0.0),
            reps: p.settings.rep_range_mid(),
            rir: p.settings.rir,
        },
    },
];

/// Determine the next workout of an exercise from its last performance.
///
/// All prescribed sets are identical. Their number matches the last performance, or three
/// sets without one. The reference weight is the weight of the first set.
#[must_use]
pub fn analyze_exercise(
    last_performance: Option<&[PerformedSet]>,
    plan: &ProgressionPlan,
    unit: WeightUnit,
) -> NextWorkout {
    let sets = last_performance.unwrap_or_default();
    let Some(first) = sets.first().copied() else {
        return NextWorkout {
            suggestion: ProgressionSuggestion::FirstTime,
            sets: vec![
                Prescription {
                    weight: match unit {
                        WeightUnit::Kg => SEED_WEIGHT_KG,
                        WeightUnit::Lbs => SEED_WEIGHT_LBS,
                    },
                    reps: plan.settings.rep_range_min,
                    rir: plan.settings.rir,
                };
                DEFAULT_SET_COUNT
            ],
        };
    };

    let evaluation = Evaluation::of(sets, first, &plan.settings);
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(&evaluation))
        .unwrap_or(&RULES[RULES.len() - 1]);

    NextWorkout {
        suggestion: rule.suggestion,
        sets: vec![(rule.prescribe)(&evaluation, plan); sets.len()],
    }
}

/// Recommend the next workout of an exercise.
///
/// The reference is the last performance with at least one completed set with positive
/// weight and reps, only those sets are evaluated. Returns `None` if progression is
/// disabled.
pub fn generate_progression(
    query: &PerformanceQuery,
    equipment: &str,
    sessions: &[Session],
    settings: &Settings,
    t: &impl Translate,
) -> Option<Progression> {
    if !settings.progression_enabled {
        return None;
    }

    let unit = settings.weight_unit;
    let plan = ProgressionPlan {
        settings: settings.effective_progression(query.template_id),
        weight_increment: Equipment::classify(equipment).weight_increment(unit),
    };
    let last_performance = last_weighted_performance(sessions, query).map(|performance| {
        performance
            .weighted_sets()
            .map(|s| PerformedSet {
                weight: unit.convert_from_kg(s.weight),
                reps: s.reps,
                rir: s.rir,
            })
            .collect::<Vec<_>>()
    });

    let next_workout = analyze_exercise(last_performance.as_deref(), &plan, unit);
    trace!(
        "{}: {:?} with {} sets",
        query.template_id,
        next_workout.suggestion,
        next_workout.sets.len()
    );

    Some(Progression {
        suggestion: next_workout.suggestion,
        message: t.translate(next_workout.suggestion.key(), &[]),
        next_workout_plan: next_workout.sets,
        unit,
    })
}
