use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Utc};
use log::{debug, trace};

use crate::{
    ExerciseLibrary, MuscleGroup, Param, Plan, Session, SpecificMuscle, Translate, VolumeConfig,
};

pub type PlanAnalysis = BTreeMap<MuscleGroup, MuscleGroupAnalysis>;

/// Sets of a muscle group accumulated over one cycle of a plan.
///
/// All figures are fractional, secondary sets are weighted before they are summed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupVolume {
    pub primary: f32,
    pub secondary_unweighted: f32,
    pub secondary_weighted: f32,
    pub days: BTreeMap<usize, DayVolume>,
    pub specific_primary: BTreeSet<SpecificMuscle>,
    pub specific_secondary: BTreeSet<SpecificMuscle>,
}

impl GroupVolume {
    #[must_use]
    pub fn total(&self) -> f32 {
        self.primary + self.secondary_weighted
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DayVolume {
    pub primary: f32,
    pub secondary_weighted: f32,
}

impl DayVolume {
    #[must_use]
    pub fn total(&self) -> f32 {
        self.primary + self.secondary_weighted
    }
}

#[derive(Clone, Copy)]
enum Role {
    Primary,
    Secondary,
}

/// Accumulate the planned sets of one cycle per muscle group.
///
/// Exercises without template, without target sets or unknown to the library are skipped.
/// Each exercise contributes at most once to a group. If one of its primary muscles
/// already belongs to a group, its secondary muscles of the same group are only recorded as
/// specific muscles. Cardio is ignored.
pub fn accumulate_plan_volume(
    plan: &Plan,
    library: &impl ExerciseLibrary,
    config: &VolumeConfig,
) -> BTreeMap<MuscleGroup, GroupVolume> {
    let mut groups: BTreeMap<MuscleGroup, GroupVolume> = BTreeMap::new();

    for (day_index, day) in plan.days.iter().enumerate() {
        for exercise in &day.exercises {
            let Some(template_id) = &exercise.template_id else {
                continue;
            };
            if exercise.target_sets == 0 {
                continue;
            }
            let Some(details) = library.exercise_details(template_id) else {
                debug!("skipping unresolved exercise {template_id} on day {day_index}");
                continue;
            };

            #[allow(clippy::cast_precision_loss)]
            let sets = exercise.target_sets as f32;
            let mut processed = BTreeSet::new();
            let muscles = details
                .primary()
                .map(|m| (m, Role::Primary))
                .chain(details.secondary().map(|m| (m, Role::Secondary)));

            for (muscle, role) in muscles {
                let group = muscle.group();
                if group == MuscleGroup::Cardio {
                    continue;
                }
                let volume = groups.entry(group).or_default();
                match role {
                    Role::Primary => volume.specific_primary.insert(muscle),
                    Role::Secondary => volume.specific_secondary.insert(muscle),
                };
                if !processed.insert(group) {
                    continue;
                }
                let day_volume = volume.days.entry(day_index).or_default();
                match role {
                    Role::Primary => {
                        volume.primary += sets;
                        day_volume.primary += sets;
                    }
                    Role::Secondary => {
                        let weighted = sets * config.secondary_weight;
                        volume.secondary_unweighted += sets;
                        volume.secondary_weighted += weighted;
                        day_volume.secondary_weighted += weighted;
                    }
                }
            }
        }
    }

    groups
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MuscleGroupAnalysis {
    pub total_weekly_sets: u32,
    pub primary_sets: u32,
    pub secondary_sets_unweighted: u32,
    pub secondary_sets_weighted: u32,
    /// Sessions per week that trained the group as primary muscle, averaged over the
    /// frequency window.
    pub frequency: f32,
    pub max_sets_in_one_session: u32,
    pub sessions_in_cycle: Vec<CycleSession>,
    pub distribution_rating: DistributionRating,
    pub recovery_rating: RecoveryRating,
    pub suggestion: Suggestion,
    pub suggestion_level: SuggestionLevel,
    /// Translated suggestion.
    pub message: String,
    pub specific_primary: Vec<SpecificMuscle>,
    pub specific_secondary: Vec<SpecificMuscle>,
}

impl MuscleGroupAnalysis {
    fn not_trained(group: MuscleGroup, t: &impl Translate) -> Self {
        Self {
            total_weekly_sets: 0,
            primary_sets: 0,
            secondary_sets_unweighted: 0,
            secondary_sets_weighted: 0,
            frequency: 0.0,
            max_sets_in_one_session: 0,
            sessions_in_cycle: vec![],
            distribution_rating: DistributionRating::Good,
            recovery_rating: RecoveryRating::Good,
            suggestion: Suggestion::NotTrained,
            suggestion_level: Suggestion::NotTrained.level(),
            message: Suggestion::NotTrained.message(group, t),
            specific_primary: vec![],
            specific_secondary: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CycleSession {
    pub day_index: usize,
    pub total_sets: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionRating {
    Good,
    Concentrated,
    Inefficient,
}

impl DistributionRating {
    fn of(max_sets_in_one_session: u32, config: &VolumeConfig) -> Self {
        if max_sets_in_one_session >= config.inefficient_sets {
            DistributionRating::Inefficient
        } else if max_sets_in_one_session >= config.concentrated_sets {
            DistributionRating::Concentrated
        } else {
            DistributionRating::Good
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryRating {
    Good,
    AtRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionLevel {
    Good,
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Suggestion {
    NotTrained,
    /// A session is followed by fewer rest days than its sets require.
    RecoveryWarning {
        sets: u32,
        required: u32,
        actual: u32,
    },
    HighSessionVolume {
        sets: u32,
    },
    LowFrequency {
        frequency: f32,
    },
    HighWeeklyVolume {
        sets: u32,
    },
    LowWeeklyVolume {
        sets: u32,
    },
    GoodVolume,
    IndirectOnly,
}

impl Suggestion {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Suggestion::NotTrained => "planAnalysis.notTrained",
            Suggestion::RecoveryWarning { .. } => "planAnalysis.recoveryWarning",
            Suggestion::HighSessionVolume { .. } => "planAnalysis.highSessionVolume",
            Suggestion::LowFrequency { .. } => "planAnalysis.lowFrequency",
            Suggestion::HighWeeklyVolume { .. } => "planAnalysis.highWeeklyVolume",
            Suggestion::LowWeeklyVolume { .. } => "planAnalysis.lowWeeklyVolume",
            Suggestion::GoodVolume => "planAnalysis.goodVolume",
            Suggestion::IndirectOnly => "planAnalysis.indirectOnly",
        }
    }

    #[must_use]
    pub fn level(self) -> SuggestionLevel {
        match self {
            Suggestion::RecoveryWarning { .. } | Suggestion::HighSessionVolume { .. } => {
                SuggestionLevel::Warning
            }
            Suggestion::NotTrained
            | Suggestion::LowFrequency { .. }
            | Suggestion::HighWeeklyVolume { .. }
            | Suggestion::LowWeeklyVolume { .. }
            | Suggestion::IndirectOnly => SuggestionLevel::Info,
            Suggestion::GoodVolume => SuggestionLevel::Good,
        }
    }

    #[must_use]
    pub fn message(self, group: MuscleGroup, t: &impl Translate) -> String {
        let mut params: Vec<(&str, Param)> = match self {
            Suggestion::RecoveryWarning {
                sets,
                required,
                actual,
            } => vec![
                ("sets", sets.into()),
                ("required", required.into()),
                ("actual", actual.into()),
            ],
            Suggestion::HighSessionVolume { sets }
            | Suggestion::HighWeeklyVolume { sets }
            | Suggestion::LowWeeklyVolume { sets } => vec![("sets", sets.into())],
            Suggestion::LowFrequency { frequency } => vec![("freq", frequency.into())],
            Suggestion::NotTrained | Suggestion::GoodVolume | Suggestion::IndirectOnly => vec![],
        };
        params.push(("groupName", group.display_name(t).into()));
        t.translate(self.key(), &params)
    }
}

/// Weekly figures of a trained group that the suggestion is derived from.
#[derive(Debug, Clone, Copy)]
struct Figures {
    total_weekly_sets: u32,
    primary_sets: u32,
    secondary_sets_weighted: u32,
    max_sets_in_one_session: u32,
    frequency: f32,
    recovery_violation: Option<RecoveryViolation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecoveryViolation {
    sets: u32,
    required: u32,
    actual: u32,
}

type SuggestionRule = fn(&Figures, &VolumeConfig) -> Option<Suggestion>;

/// Evaluated in order, the first rule that applies determines the suggestion.
const SUGGESTION_RULES: [SuggestionRule; 6] = [
    |f, _| {
        f.recovery_violation
            .map(|v| Suggestion::RecoveryWarning {
                sets: v.sets,
                required: v.required,
                actual: v.actual,
            })
    },
    |f, c| {
        (f.max_sets_in_one_session >= c.session_overload_sets).then_some(
            Suggestion::HighSessionVolume {
                sets: f.max_sets_in_one_session,
            },
        )
    },
    |f, c| {
        (f.frequency < c.low_frequency && f.total_weekly_sets > c.low_frequency_min_sets)
            .then_some(Suggestion::LowFrequency {
                frequency: f.frequency,
            })
    },
    |f, c| {
        (f.total_weekly_sets > c.high_weekly_sets).then_some(Suggestion::HighWeeklyVolume {
            sets: f.total_weekly_sets,
        })
    },
    |f, c| {
        (f.total_weekly_sets > 0 && f.total_weekly_sets < c.low_weekly_sets).then_some(
            Suggestion::LowWeeklyVolume {
                sets: f.total_weekly_sets,
            },
        )
    },
    |_, _| Some(Suggestion::GoodVolume),
];

fn suggest(figures: &Figures, config: &VolumeConfig) -> Suggestion {
    let suggestion = SUGGESTION_RULES
        .iter()
        .find_map(|rule| rule(figures, config))
        .unwrap_or(Suggestion::GoodVolume);

    if suggestion.level() == SuggestionLevel::Good
        && figures.primary_sets == 0
        && figures.secondary_sets_weighted > 0
    {
        Suggestion::IndirectOnly
    } else {
        suggestion
    }
}

/// Analyze the weekly volume, distribution and recovery of every muscle group in a plan.
///
/// The result contains all muscle groups except cardio. Core is included only if the plan
/// trains it. Groups that are not trained, or only hit incidentally by secondary work below
/// the noise threshold, are reported as not trained.
///
/// The frequency is measured on the completed sessions of the frequency window ending at
/// `now`, independent of the plan.
pub fn analyze_plan_volume(
    plan: &Plan,
    library: &impl ExerciseLibrary,
    sessions: &[Session],
    now: DateTime<Utc>,
    config: &VolumeConfig,
    t: &impl Translate,
) -> PlanAnalysis {
    let cycle_length = plan.cycle_length();
    let recent_sessions = recent_sessions(sessions, now, config);

    let mut analysis = accumulate_plan_volume(plan, library, config)
        .into_iter()
        .filter(|(_, volume)| !(volume.total() < config.noise_threshold && volume.primary <= 0.0))
        .map(|(group, volume)| {
            let sessions_in_cycle = volume
                .days
                .iter()
                .map(|(day_index, day)| CycleSession {
                    day_index: *day_index,
                    total_sets: round_sets(day.total()),
                })
                .collect::<Vec<_>>();
            let max_sets_in_one_session = sessions_in_cycle
                .iter()
                .map(|s| s.total_sets)
                .max()
                .unwrap_or(0);
            let recovery_violation = recovery_violation(&sessions_in_cycle, cycle_length, config);
            if let Some(v) = recovery_violation {
                trace!(
                    "{group}: {} sets need {} rest days, got {}",
                    v.sets, v.required, v.actual
                );
            }
            let figures = Figures {
                total_weekly_sets: weekly_sets(volume.total(), cycle_length),
                primary_sets: weekly_sets(volume.primary, cycle_length),
                secondary_sets_weighted: weekly_sets(volume.secondary_weighted, cycle_length),
                max_sets_in_one_session,
                frequency: frequency(group, &recent_sessions, library, config),
                recovery_violation,
            };
            let suggestion = suggest(&figures, config);
            let specific_secondary = volume
                .specific_secondary
                .difference(&volume.specific_primary)
                .copied()
                .collect();

            (
                group,
                MuscleGroupAnalysis {
                    total_weekly_sets: figures.total_weekly_sets,
                    primary_sets: figures.primary_sets,
                    secondary_sets_unweighted: weekly_sets(
                        volume.secondary_unweighted,
                        cycle_length,
                    ),
                    secondary_sets_weighted: figures.secondary_sets_weighted,
                    frequency: figures.frequency,
                    max_sets_in_one_session,
                    sessions_in_cycle,
                    distribution_rating: DistributionRating::of(max_sets_in_one_session, config),
                    recovery_rating: if recovery_violation.is_some() {
                        RecoveryRating::AtRisk
                    } else {
                        RecoveryRating::Good
                    },
                    suggestion,
                    suggestion_level: suggestion.level(),
                    message: suggestion.message(group, t),
                    specific_primary: volume.specific_primary.into_iter().collect(),
                    specific_secondary,
                },
            )
        })
        .collect::<PlanAnalysis>();

    for group in MuscleGroup::reported() {
        analysis
            .entry(group)
            .or_insert_with(|| MuscleGroupAnalysis::not_trained(group, t));
    }

    analysis
}

/// Find the first session in the cycle that is followed by too few rest days.
///
/// The trained days form a ring, the last one is followed by the first one of the next
/// cycle. Groups trained on a single day of the cycle are never at risk.
fn recovery_violation(
    sessions_in_cycle: &[CycleSession],
    cycle_length: usize,
    config: &VolumeConfig,
) -> Option<RecoveryViolation> {
    let n = sessions_in_cycle.len();
    if n < 2 {
        return None;
    }
    (0..n).find_map(|i| {
        let current = sessions_in_cycle[i];
        let next = sessions_in_cycle[(i + 1) % n];
        let days_between = if i == n - 1 {
            cycle_length - current.day_index + next.day_index
        } else {
            next.day_index - current.day_index
        };
        let required = config.required_recovery_days(current.total_sets);
        let actual = u32::try_from(days_between).unwrap_or(u32::MAX);
        (actual < required).then_some(RecoveryViolation {
            sets: current.total_sets,
            required,
            actual,
        })
    })
}

fn recent_sessions<'a>(
    sessions: &'a [Session],
    now: DateTime<Utc>,
    config: &VolumeConfig,
) -> Vec<&'a Session> {
    let since = now - Duration::days(i64::from(config.frequency_window_days));
    sessions
        .iter()
        .filter(|s| {
            s.completed_at
                .is_some_and(|completed_at| completed_at > since && completed_at <= now)
        })
        .collect()
}

fn frequency(
    group: MuscleGroup,
    recent_sessions: &[&Session],
    library: &impl ExerciseLibrary,
    config: &VolumeConfig,
) -> f32 {
    let sessions = recent_sessions
        .iter()
        .filter(|s| {
            s.exercises.iter().any(|e| {
                e.template_id
                    .as_ref()
                    .and_then(|template_id| library.exercise_details(template_id))
                    .is_some_and(|details| details.primary().any(|m| m.group() == group))
            })
        })
        .map(|s| s.id)
        .collect::<BTreeSet<_>>()
        .len();
    #[allow(clippy::cast_precision_loss)]
    let per_week = sessions as f32 / config.frequency_weeks.max(1) as f32;
    (per_week * 10.0).round() / 10.0
}

/// Scale the sets of one cycle to a seven-day week.
///
/// Multiplying before dividing keeps exact halves exact, so they round up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn weekly_sets(sets_per_cycle: f32, cycle_length: usize) -> u32 {
    (f64::from(sets_per_cycle) * 7.0 / cycle_length as f64).round() as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_sets(sets: f32) -> u32 {
    sets.round() as u32
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        DayID, ExerciseDetails, ExerciseInstance, PlanDay, PlanExercise, Reps, Set, SetStatus,
        TemplateID, Weight, translate::echo,
    };

    use super::*;

    fn entry(id: &str, primary: &[&str], secondary: &[&str]) -> (TemplateID, ExerciseDetails) {
        (
            TemplateID::from(id),
            ExerciseDetails {
                primary_muscles: primary.iter().map(|m| (*m).to_string()).collect(),
                secondary_muscles: secondary.iter().map(|m| (*m).to_string()).collect(),
                equipment: String::from("barbell"),
            },
        )
    }

    static LIBRARY: LazyLock<BTreeMap<TemplateID, ExerciseDetails>> = LazyLock::new(|| {
        BTreeMap::from([
            entry("bench", &["pectoralsMajor"], &["deltoidAnterior", "tricepsLongHead"]),
            entry("fly", &["pectoralsMajor"], &["pectoralsMinor"]),
            entry("dip", &["tricepsLongHead"], &["pectoralsMajor", "deltoidAnterior"]),
            entry("squat", &["quadricepsVasti", "gluteusMaximus"], &["erectorSpinae"]),
            entry("row", &["latissimusDorsi"], &["bicepsBrachii"]),
            entry("run", &["cardio"], &["quadricepsVasti"]),
            entry("plank", &["transverseAbdominis"], &[]),
            entry("mystery", &["unknownMuscle"], &["tricepsLongHead"]),
        ])
    });

    static NOW: LazyLock<DateTime<Utc>> =
        LazyLock::new(|| Utc.with_ymd_and_hms(2024, 6, 29, 12, 0, 0).unwrap());

    fn plan(cycle_length: usize, exercises: &[(usize, &str, u32)]) -> Plan {
        Plan {
            id: 1.into(),
            name: String::from("Plan"),
            days: (0..cycle_length)
                .map(|i| PlanDay {
                    id: DayID::from(i as u128 + 1),
                    name: format!("Day {}", i + 1),
                    exercises: exercises
                        .iter()
                        .filter(|(day, _, _)| *day == i)
                        .map(|(_, template_id, target_sets)| PlanExercise {
                            template_id: Some((*template_id).into()),
                            target_sets: *target_sets,
                            target_reps: Some(Reps::new(8).unwrap()),
                            ..PlanExercise::default()
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn completed(id: u128, days_ago: i64, template_id: &str) -> Session {
        let completed_at = *NOW - Duration::days(days_ago);
        Session {
            id: id.into(),
            start_time: completed_at - Duration::hours(1),
            end_time: Some(completed_at),
            completed_at: Some(completed_at),
            exercises: vec![ExerciseInstance {
                template_id: Some(template_id.into()),
                sets: vec![Set {
                    status: SetStatus::Completed,
                    reps: Some(Reps::new(8).unwrap()),
                    weight: Some(Weight::new(60.0).unwrap()),
                    ..Set::default()
                }],
                ..ExerciseInstance::default()
            }],
            ..Session::default()
        }
    }

    fn bench_sessions(count: u128) -> Vec<Session> {
        (0..count)
            .map(|i| completed(i + 1, i64::try_from(i).unwrap() * 4 + 1, "bench"))
            .collect()
    }

    fn analyze(plan: &Plan, sessions: &[Session]) -> PlanAnalysis {
        analyze_plan_volume(
            plan,
            &*LIBRARY,
            sessions,
            *NOW,
            &VolumeConfig::default(),
            &echo,
        )
    }

    #[test]
    fn test_accumulate_plan_volume() {
        let volume = accumulate_plan_volume(
            &plan(4, &[(0, "bench", 3), (2, "bench", 2), (2, "row", 4)]),
            &*LIBRARY,
            &VolumeConfig::default(),
        );

        assert_eq!(
            volume.keys().copied().collect::<Vec<_>>(),
            vec![
                MuscleGroup::Biceps,
                MuscleGroup::Chest,
                MuscleGroup::Lats,
                MuscleGroup::Shoulders,
                MuscleGroup::Triceps
            ]
        );
        let chest = &volume[&MuscleGroup::Chest];
        assert_approx_eq!(chest.primary, 5.0);
        assert_approx_eq!(chest.secondary_unweighted, 0.0);
        assert_eq!(
            chest.days,
            BTreeMap::from([
                (0, DayVolume { primary: 3.0, secondary_weighted: 0.0 }),
                (2, DayVolume { primary: 2.0, secondary_weighted: 0.0 }),
            ])
        );
        let triceps = &volume[&MuscleGroup::Triceps];
        assert_approx_eq!(triceps.primary, 0.0);
        assert_approx_eq!(triceps.secondary_unweighted, 5.0);
        assert_approx_eq!(triceps.secondary_weighted, 2.5);
        assert_approx_eq!(triceps.days[&2].secondary_weighted, 1.0);
    }

    #[test]
    fn test_accumulate_plan_volume_secondary_weighting() {
        let volume = accumulate_plan_volume(
            &plan(
                5,
                &[(0, "bench", 3), (1, "dip", 5), (2, "squat", 7), (3, "row", 1), (4, "run", 3)],
            ),
            &*LIBRARY,
            &VolumeConfig::default(),
        );
        for (group, v) in &volume {
            assert_approx_eq!(v.secondary_weighted, 0.5 * v.secondary_unweighted);
            assert!(*group != MuscleGroup::Cardio);
        }
    }

    #[test]
    fn test_accumulate_plan_volume_counts_exercise_once_per_group() {
        let volume = accumulate_plan_volume(
            &plan(1, &[(0, "fly", 3), (0, "dip", 2)]),
            &*LIBRARY,
            &VolumeConfig::default(),
        );
        let chest = &volume[&MuscleGroup::Chest];
        assert_approx_eq!(chest.primary, 3.0);
        assert_approx_eq!(chest.secondary_unweighted, 2.0);
        assert_approx_eq!(chest.secondary_weighted, 1.0);
        assert_eq!(
            chest.specific_primary,
            BTreeSet::from([SpecificMuscle::PectoralsMajor])
        );
        assert_eq!(
            chest.specific_secondary,
            BTreeSet::from([SpecificMuscle::PectoralsMajor, SpecificMuscle::PectoralsMinor])
        );
    }

    #[test]
    fn test_accumulate_plan_volume_is_independent_of_order() {
        let config = VolumeConfig::default();
        let a = accumulate_plan_volume(
            &plan(2, &[(0, "bench", 3), (0, "dip", 2), (1, "squat", 4)]),
            &*LIBRARY,
            &config,
        );
        let b = accumulate_plan_volume(
            &plan(2, &[(1, "squat", 4), (0, "dip", 2), (0, "bench", 3)]),
            &*LIBRARY,
            &config,
        );
        for (group, volume) in &a {
            assert_approx_eq!(volume.primary, b[group].primary);
            assert_approx_eq!(volume.secondary_weighted, b[group].secondary_weighted);
        }
    }

    #[test]
    fn test_accumulate_plan_volume_skips_unresolvable_exercises() {
        let mut plan = plan(1, &[(0, "unknown", 3), (0, "bench", 0), (0, "mystery", 4)]);
        plan.days[0].exercises.push(PlanExercise {
            template_id: None,
            target_sets: 3,
            ..PlanExercise::default()
        });

        let volume = accumulate_plan_volume(&plan, &*LIBRARY, &VolumeConfig::default());

        assert_eq!(
            volume.keys().copied().collect::<Vec<_>>(),
            vec![MuscleGroup::Triceps]
        );
        assert_approx_eq!(volume[&MuscleGroup::Triceps].secondary_unweighted, 4.0);
    }

    #[test]
    fn test_analyze_plan_volume_low_weekly_volume() {
        let analysis = analyze(&plan(4, &[(0, "bench", 3)]), &[]);

        let chest = &analysis[&MuscleGroup::Chest];
        assert_eq!(chest.primary_sets, 5);
        assert_eq!(chest.total_weekly_sets, 5);
        assert_eq!(chest.max_sets_in_one_session, 3);
        assert_eq!(
            chest.sessions_in_cycle,
            vec![CycleSession { day_index: 0, total_sets: 3 }]
        );
        assert_eq!(chest.suggestion, Suggestion::LowWeeklyVolume { sets: 5 });
        assert_eq!(chest.suggestion_level, SuggestionLevel::Info);
        assert_eq!(
            chest.message,
            "planAnalysis.lowWeeklyVolume{sets=5,groupName=generalMuscles.chest}"
        );
        assert_eq!(chest.recovery_rating, RecoveryRating::Good);
        assert_eq!(chest.distribution_rating, DistributionRating::Good);
        assert_eq!(chest.specific_primary, vec![SpecificMuscle::PectoralsMajor]);

        let shoulders = &analysis[&MuscleGroup::Shoulders];
        assert_eq!(shoulders.primary_sets, 0);
        assert_eq!(shoulders.secondary_sets_unweighted, 5);
        assert_eq!(shoulders.secondary_sets_weighted, 3);
        assert_eq!(shoulders.total_weekly_sets, 3);
        assert_eq!(shoulders.specific_secondary, vec![SpecificMuscle::DeltoidAnterior]);
    }

    #[rstest]
    #[case::six_day_cycle(6, 27, 32, 16, 32)]
    #[case::three_day_cycle(3, 27, 63, 32, 63)]
    #[case::ten_day_cycle(10, 45, 32, 16, 32)]
    fn test_analyze_plan_volume_rounds_half_weekly_sets_up(
        #[case] cycle_length: usize,
        #[case] sets: u32,
        #[case] chest_sets: u32,
        #[case] shoulders_weighted: u32,
        #[case] shoulders_unweighted: u32,
    ) {
        let analysis = analyze(&plan(cycle_length, &[(0, "bench", sets)]), &[]);

        let chest = &analysis[&MuscleGroup::Chest];
        assert_eq!(chest.primary_sets, chest_sets);
        assert_eq!(chest.total_weekly_sets, chest_sets);

        let shoulders = &analysis[&MuscleGroup::Shoulders];
        assert_eq!(shoulders.secondary_sets_weighted, shoulders_weighted);
        assert_eq!(shoulders.secondary_sets_unweighted, shoulders_unweighted);
        assert_eq!(shoulders.total_weekly_sets, shoulders_weighted);
    }

    #[test]
    fn test_analyze_plan_volume_reports_untrained_groups() {
        let analysis = analyze(&Plan::default(), &[]);

        assert_eq!(analysis.len(), 18);
        assert!(!analysis.contains_key(&MuscleGroup::Cardio));
        assert!(!analysis.contains_key(&MuscleGroup::Core));
        let quads = &analysis[&MuscleGroup::Quads];
        assert_eq!(quads.total_weekly_sets, 0);
        assert_eq!(quads.suggestion, Suggestion::NotTrained);
        assert_eq!(quads.suggestion_level, SuggestionLevel::Info);
        assert_eq!(
            quads.message,
            "planAnalysis.notTrained{groupName=generalMuscles.quads}"
        );
    }

    #[test]
    fn test_analyze_plan_volume_includes_trained_core() {
        let analysis = analyze(&plan(2, &[(0, "plank", 3)]), &[]);

        assert_eq!(analysis.len(), 19);
        assert_eq!(analysis[&MuscleGroup::Core].total_weekly_sets, 11);
    }

    #[test]
    fn test_analyze_plan_volume_ignores_incidental_secondary_work() {
        let analysis = analyze(&plan(1, &[(0, "row", 2)]), &[]);

        assert_eq!(analysis[&MuscleGroup::Lats].total_weekly_sets, 14);
        assert_eq!(analysis[&MuscleGroup::Biceps].suggestion, Suggestion::NotTrained);
        assert_eq!(analysis[&MuscleGroup::Biceps].total_weekly_sets, 0);
    }

    #[test]
    fn test_analyze_plan_volume_recovery_at_risk() {
        let analysis = analyze(&plan(3, &[(0, "squat", 9), (1, "squat", 9)]), &[]);

        let quads = &analysis[&MuscleGroup::Quads];
        assert_eq!(quads.recovery_rating, RecoveryRating::AtRisk);
        assert_eq!(
            quads.suggestion,
            Suggestion::RecoveryWarning {
                sets: 9,
                required: 4,
                actual: 1
            }
        );
        assert_eq!(quads.suggestion_level, SuggestionLevel::Warning);
        assert_eq!(
            quads.message,
            "planAnalysis.recoveryWarning{sets=9,required=4,actual=1,groupName=generalMuscles.quads}"
        );
        assert_eq!(quads.distribution_rating, DistributionRating::Inefficient);

        let lower_back = &analysis[&MuscleGroup::LowerBack];
        assert_eq!(
            lower_back.sessions_in_cycle,
            vec![
                CycleSession { day_index: 0, total_sets: 5 },
                CycleSession { day_index: 1, total_sets: 5 }
            ]
        );
        assert_eq!(lower_back.recovery_rating, RecoveryRating::AtRisk);
    }

    #[rstest]
    #[case::enough_rest(&[(0, "squat", 4), (2, "squat", 4)], None)]
    #[case::wrap_around(
        &[(0, "squat", 4), (3, "squat", 4)],
        Some(Suggestion::RecoveryWarning { sets: 4, required: 2, actual: 1 })
    )]
    #[case::first_violation(
        &[(0, "squat", 6), (1, "squat", 2), (2, "squat", 8)],
        Some(Suggestion::RecoveryWarning { sets: 6, required: 3, actual: 1 })
    )]
    fn test_analyze_plan_volume_recovery_ring(
        #[case] exercises: &[(usize, &str, u32)],
        #[case] expected: Option<Suggestion>,
    ) {
        let analysis = analyze(&plan(4, exercises), &[]);
        let quads = &analysis[&MuscleGroup::Quads];
        match expected {
            Some(suggestion) => {
                assert_eq!(quads.recovery_rating, RecoveryRating::AtRisk);
                assert_eq!(quads.suggestion, suggestion);
            }
            None => assert_eq!(quads.recovery_rating, RecoveryRating::Good),
        }
    }

    #[test]
    fn test_analyze_plan_volume_single_training_day_is_never_at_risk() {
        let analysis = analyze(&plan(1, &[(0, "bench", 20)]), &[]);

        let chest = &analysis[&MuscleGroup::Chest];
        assert_eq!(chest.recovery_rating, RecoveryRating::Good);
        assert_eq!(chest.suggestion, Suggestion::HighSessionVolume { sets: 20 });
        assert_eq!(chest.suggestion_level, SuggestionLevel::Warning);
        assert_eq!(chest.distribution_rating, DistributionRating::Inefficient);
    }

    #[rstest]
    #[case::low_frequency(0, Suggestion::LowFrequency { frequency: 0.0 })]
    #[case::good_volume(6, Suggestion::GoodVolume)]
    fn test_analyze_plan_volume_frequency_suggestion(
        #[case] recent_sessions: u128,
        #[case] expected: Suggestion,
    ) {
        let analysis = analyze(
            &plan(7, &[(0, "bench", 5), (3, "bench", 5)]),
            &bench_sessions(recent_sessions),
        );

        let chest = &analysis[&MuscleGroup::Chest];
        assert_eq!(chest.total_weekly_sets, 10);
        assert_eq!(chest.recovery_rating, RecoveryRating::Good);
        assert_eq!(chest.distribution_rating, DistributionRating::Good);
        assert_eq!(chest.suggestion, expected);
    }

    #[test]
    fn test_analyze_plan_volume_high_weekly_volume() {
        let analysis = analyze(&plan(2, &[(0, "bench", 7)]), &bench_sessions(6));

        let chest = &analysis[&MuscleGroup::Chest];
        assert_eq!(chest.total_weekly_sets, 25);
        assert_eq!(chest.distribution_rating, DistributionRating::Concentrated);
        assert_eq!(chest.suggestion, Suggestion::HighWeeklyVolume { sets: 25 });
    }

    #[test]
    fn test_analyze_plan_volume_indirect_only() {
        let analysis = analyze(&plan(7, &[(0, "bench", 8), (3, "bench", 8)]), &[]);

        let triceps = &analysis[&MuscleGroup::Triceps];
        assert_eq!(triceps.total_weekly_sets, 8);
        assert_eq!(triceps.suggestion, Suggestion::IndirectOnly);
        assert_eq!(triceps.suggestion_level, SuggestionLevel::Info);

        let chest = &analysis[&MuscleGroup::Chest];
        assert_eq!(
            chest.suggestion,
            Suggestion::RecoveryWarning {
                sets: 8,
                required: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_analyze_plan_volume_frequency() {
        let mut in_progress = completed(10, 2, "bench");
        in_progress.completed_at = None;
        let mut sessions = vec![
            completed(1, 1, "bench"),
            completed(2, 10, "bench"),
            completed(3, 27, "dip"),
            completed(4, 28, "bench"),
            completed(5, 35, "bench"),
            completed(6, -1, "bench"),
            completed(7, 3, "row"),
            in_progress,
        ];
        let bench = sessions[1].exercises.clone();
        sessions[2].exercises.extend(bench);

        let analysis = analyze(&plan(4, &[(0, "bench", 3)]), &sessions);

        assert_approx_eq!(analysis[&MuscleGroup::Chest].frequency, 0.8);
        assert_approx_eq!(analysis[&MuscleGroup::Lats].frequency, 0.0);
    }

    #[test]
    fn test_analyze_plan_volume_frequency_rounding() {
        let analysis = analyze(&plan(4, &[(0, "bench", 3)]), &bench_sessions(1));
        assert_approx_eq!(analysis[&MuscleGroup::Chest].frequency, 0.3);
    }

    #[test]
    fn test_analyze_plan_volume_custom_config() {
        let config = VolumeConfig {
            secondary_weight: 1.0,
            ..VolumeConfig::default()
        };
        let analysis = analyze_plan_volume(
            &plan(7, &[(0, "bench", 4)]),
            &*LIBRARY,
            &[],
            *NOW,
            &config,
            &echo,
        );
        assert_eq!(analysis[&MuscleGroup::Triceps].secondary_sets_weighted, 4);
    }

    #[test]
    fn test_suggestion_serialization() {
        assert_eq!(
            serde_json::to_string(&Suggestion::LowWeeklyVolume { sets: 5 }).unwrap(),
            r#"{"kind":"lowWeeklyVolume","sets":5}"#
        );
        assert_eq!(
            serde_json::to_string(&RecoveryRating::AtRisk).unwrap(),
            r#""at_risk""#
        );
    }
}
