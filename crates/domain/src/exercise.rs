use std::collections::{BTreeMap, HashMap};

use derive_more::{Display, From};
use log::debug;

use crate::{SpecificMuscle, WeightUnit};

/// Reference into the exercise library.
#[derive(Debug, Display, From, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TemplateID(String);

impl AsRef<str> for TemplateID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Library metadata of an exercise template.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExerciseDetails {
    pub primary_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
    pub equipment: String,
}

impl ExerciseDetails {
    pub fn primary(&self) -> impl Iterator<Item = SpecificMuscle> + '_ {
        known_muscles(&self.primary_muscles)
    }

    pub fn secondary(&self) -> impl Iterator<Item = SpecificMuscle> + '_ {
        known_muscles(&self.secondary_muscles)
    }
}

fn known_muscles(keys: &[String]) -> impl Iterator<Item = SpecificMuscle> + '_ {
    keys.iter().filter_map(|key| {
        let muscle = SpecificMuscle::from_key(key);
        if muscle.is_none() {
            debug!("ignoring unknown muscle key {key:?}");
        }
        muscle
    })
}

/// Lookup of exercise templates.
///
/// Implementations must be fully loaded before an analysis runs, the analysis never waits
/// for data.
pub trait ExerciseLibrary {
    fn exercise_details(&self, template_id: &TemplateID) -> Option<&ExerciseDetails>;
}

impl ExerciseLibrary for BTreeMap<TemplateID, ExerciseDetails> {
    fn exercise_details(&self, template_id: &TemplateID) -> Option<&ExerciseDetails> {
        self.get(template_id)
    }
}

impl ExerciseLibrary for HashMap<TemplateID, ExerciseDetails> {
    fn exercise_details(&self, template_id: &TemplateID) -> Option<&ExerciseDetails> {
        self.get(template_id)
    }
}

impl<L: ExerciseLibrary + ?Sized> ExerciseLibrary for &L {
    fn exercise_details(&self, template_id: &TemplateID) -> Option<&ExerciseDetails> {
        (**self).exercise_details(template_id)
    }
}

/// The built-in library followed by the user's custom exercises.
impl<A: ExerciseLibrary, B: ExerciseLibrary> ExerciseLibrary for (A, B) {
    fn exercise_details(&self, template_id: &TemplateID) -> Option<&ExerciseDetails> {
        self.0
            .exercise_details(template_id)
            .or_else(|| self.1.exercise_details(template_id))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Equipment {
    Barbell,
    FreeWeight,
    Machine,
    Other,
}

impl Equipment {
    /// Classify a free-form equipment description.
    ///
    /// Matching is case-insensitive and ignores spaces, hyphens and underscores, so
    /// `Trap Bar`, `trap-bar` and `trapBar` are the same.
    #[must_use]
    pub fn classify(equipment: &str) -> Self {
        let e = equipment
            .to_lowercase()
            .replace([' ', '-', '_'], "");

        if ["barbell", "smith", "trapbar", "sled"]
            .iter()
            .any(|f| e.contains(f))
        {
            Equipment::Barbell
        } else if ["dumbbell", "kettlebell"].iter().any(|f| e.contains(f)) {
            Equipment::FreeWeight
        } else if ["machine", "cable"].iter().any(|f| e.contains(f)) {
            Equipment::Machine
        } else {
            Equipment::Other
        }
    }

    #[must_use]
    pub fn weight_increment(self, unit: WeightUnit) -> f32 {
        match (self, unit) {
            (Equipment::Barbell | Equipment::Machine, WeightUnit::Kg) => 2.5,
            (Equipment::Barbell | Equipment::Machine, WeightUnit::Lbs) => 5.0,
            (Equipment::FreeWeight | Equipment::Other, WeightUnit::Kg) => 1.25,
            (Equipment::FreeWeight | Equipment::Other, WeightUnit::Lbs) => 2.5,
        }
    }
}
