use std::collections::BTreeMap;

use log::warn;

use crate::{RIR, TemplateID, WeightUnit};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub progression_enabled: bool,
    pub default_progression_settings: ProgressionSettings,
    pub progression_overrides: BTreeMap<TemplateID, ProgressionSettings>,
    pub weight_unit: WeightUnit,
    /// RIR prefilled into new sets.
    pub default_rir: Option<RIR>,
    /// Seconds.
    pub global_rest_timer: u32,
}

impl Settings {
    /// The progression settings that apply to an exercise.
    ///
    /// An override replaces the default completely. Overrides with an invalid rep range are
    /// ignored.
    #[must_use]
    pub fn effective_progression(&self, template_id: &TemplateID) -> ProgressionSettings {
        match self.progression_overrides.get(template_id) {
            Some(o) if o.validate().is_ok() => *o,
            Some(o) => {
                warn!("ignoring invalid progression settings for {template_id}: {o:?}");
                self.default_progression_settings
            }
            None => self.default_progression_settings,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            progression_enabled: false,
            default_progression_settings: ProgressionSettings::default(),
            progression_overrides: BTreeMap::new(),
            weight_unit: WeightUnit::Kg,
            default_rir: None,
            global_rest_timer: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProgressionSettings {
    pub rep_range_min: u32,
    pub rep_range_max: u32,
    pub rir: u32,
}

impl ProgressionSettings {
    pub fn new(
        rep_range_min: u32,
        rep_range_max: u32,
        rir: u32,
    ) -> Result<Self, ProgressionSettingsError> {
        let settings = Self {
            rep_range_min,
            rep_range_max,
            rir,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ProgressionSettingsError> {
        if self.rep_range_min < 1 {
            return Err(ProgressionSettingsError::ZeroReps);
        }
        if self.rep_range_min >= self.rep_range_max {
            return Err(ProgressionSettingsError::EmptyRepRange(
                self.rep_range_min,
                self.rep_range_max,
            ));
        }
        Ok(())
    }

    /// Middle of the rep range, rounded half up.
    #[must_use]
    pub fn rep_range_mid(&self) -> u32 {
        (self.rep_range_min + self.rep_range_max).div_ceil(2)
    }
}

impl Default for ProgressionSettings {
    fn default() -> Self {
        Self {
            rep_range_min: 5,
            rep_range_max: 8,
            rir: 2,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProgressionSettingsError {
    #[error("Minimum reps must be at least 1")]
    ZeroReps,
    #[error("Minimum reps must be less than maximum reps ({0} >= {1})")]
    EmptyRepRange(u32, u32),
}

/// Heuristics of the volume analysis.
///
/// The values are product decisions rather than derived quantities. The defaults are the
/// calibration the analysis has always used.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Share of a set counted for a secondary muscle.
    pub secondary_weight: f32,
    /// Rest days required after a session, by sets in that session. Sorted by descending
    /// `min_sets`, the first step reached applies.
    pub recovery_days: Vec<RecoveryStep>,
    pub frequency_window_days: u32,
    pub frequency_weeks: u32,
    /// Groups below this many weighted sets per cycle without any primary set are ignored.
    pub noise_threshold: f32,
    pub session_overload_sets: u32,
    pub low_frequency: f32,
    pub low_frequency_min_sets: u32,
    pub high_weekly_sets: u32,
    pub low_weekly_sets: u32,
    pub inefficient_sets: u32,
    pub concentrated_sets: u32,
}

impl VolumeConfig {
    #[must_use]
    pub fn required_recovery_days(&self, sets: u32) -> u32 {
        self.recovery_days
            .iter()
            .find(|step| sets >= step.min_sets)
            .map_or(0, |step| step.days)
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            secondary_weight: 0.5,
            recovery_days: vec![
                RecoveryStep::new(8, 4),
                RecoveryStep::new(6, 3),
                RecoveryStep::new(4, 2),
                RecoveryStep::new(1, 1),
            ],
            frequency_window_days: 28,
            frequency_weeks: 4,
            noise_threshold: 1.5,
            session_overload_sets: 10,
            low_frequency: 1.5,
            low_frequency_min_sets: 8,
            high_weekly_sets: 20,
            low_weekly_sets: 8,
            inefficient_sets: 8,
            concentrated_sets: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecoveryStep {
    pub min_sets: u32,
    pub days: u32,
}

impl RecoveryStep {
    #[must_use]
    pub const fn new(min_sets: u32, days: u32) -> Self {
        Self { min_sets, days }
    }
}
