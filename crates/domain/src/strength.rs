use crate::ExerciseInstance;

/// Estimate the one-rep max with the Epley formula.
///
/// Reps in reserve are counted as reps the lifter could still have done. Returns 0 for
/// non-positive weight or reps, and the weight itself when the effective reps do not exceed
/// one.
#[must_use]
pub fn epley_1rm(weight: f32, reps: u32, rir: u32) -> f32 {
    if weight.is_nan() || weight <= 0.0 || reps == 0 {
        return 0.0;
    }
    let effective_reps = reps.saturating_add(rir);
    if effective_reps <= 1 {
        return weight;
    }
    #[allow(clippy::cast_precision_loss)]
    let effective_reps = effective_reps as f32;
    weight * (1.0 + effective_reps / 30.0)
}

/// Invert the Epley formula: the weight that can be lifted for `reps` given a one-rep max.
#[must_use]
pub fn weight_for_reps(one_rep_max: f32, reps: u32) -> f32 {
    if one_rep_max.is_nan() || one_rep_max <= 0.0 || reps == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let reps = reps as f32;
    one_rep_max / (1.0 + reps / 30.0)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PerformanceBests {
    pub best_e1rm: f32,
    pub best_e10rm: f32,
}

impl PerformanceBests {
    /// Best estimated one-rep and ten-rep max over the weighted sets of a performance, in kg.
    #[must_use]
    pub fn of(performance: &ExerciseInstance) -> Self {
        let best_e1rm = performance
            .weighted_sets()
            .map(|s| epley_1rm(s.weight, s.reps, s.rir.unwrap_or(0)))
            .fold(0.0, f32::max);
        Self {
            best_e1rm,
            best_e10rm: weight_for_reps(best_e1rm, 10),
        }
    }
}
