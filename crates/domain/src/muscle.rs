use std::collections::BTreeSet;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::Translate;

/// A specific muscle as referenced by the exercise library.
///
/// Variants are kept in alphabetical order of their keys, so the derived `Ord` sorts by key.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum SpecificMuscle {
    BicepsBrachii,
    BicepsFemoris,
    Brachialis,
    Brachioradialis,
    Cardio,
    DeltoidAnterior,
    DeltoidLateral,
    DeltoidPosterior,
    ErectorSpinae,
    Gastrocnemius,
    GluteusMaximus,
    GluteusMedius,
    GluteusMinimus,
    HipAbductors,
    HipAdductors,
    HipFlexors,
    Infraspinatus,
    LatissimusDorsi,
    Obliques,
    PectoralsMajor,
    PectoralsMinor,
    QuadricepsVasti,
    RectusAbdominis,
    RectusFemoris,
    Rhomboids,
    Semimembranosus,
    Semitendinosus,
    SerratusAnterior,
    Soleus,
    Stabilizers,
    Supraspinatus,
    TeresMajor,
    TeresMinor,
    TibialisAnterior,
    TransverseAbdominis,
    TrapsLower,
    TrapsMiddle,
    TrapsUpper,
    TricepsLateralHead,
    TricepsLongHead,
    TricepsMedialHead,
    WristExtensors,
    WristFlexors,
}

impl SpecificMuscle {
    /// Parse a muscle key from the exercise library.
    ///
    /// Keys unknown to the taxonomy yield `None`, so callers can skip them.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }

    #[must_use]
    pub fn group(self) -> MuscleGroup {
        #[allow(clippy::match_same_arms)]
        match self {
            SpecificMuscle::PectoralsMajor => MuscleGroup::Chest,
            SpecificMuscle::PectoralsMinor => MuscleGroup::Chest,
            SpecificMuscle::SerratusAnterior => MuscleGroup::Chest,
            SpecificMuscle::LatissimusDorsi => MuscleGroup::Lats,
            SpecificMuscle::TeresMajor => MuscleGroup::Lats,
            SpecificMuscle::Rhomboids => MuscleGroup::UpperBack,
            SpecificMuscle::TeresMinor => MuscleGroup::UpperBack,
            SpecificMuscle::Infraspinatus => MuscleGroup::UpperBack,
            SpecificMuscle::Supraspinatus => MuscleGroup::UpperBack,
            SpecificMuscle::ErectorSpinae => MuscleGroup::LowerBack,
            SpecificMuscle::DeltoidAnterior => MuscleGroup::Shoulders,
            SpecificMuscle::DeltoidLateral => MuscleGroup::Shoulders,
            SpecificMuscle::DeltoidPosterior => MuscleGroup::Shoulders,
            SpecificMuscle::TrapsUpper => MuscleGroup::Traps,
            SpecificMuscle::TrapsMiddle => MuscleGroup::Traps,
            SpecificMuscle::TrapsLower => MuscleGroup::Traps,
            SpecificMuscle::BicepsBrachii => MuscleGroup::Biceps,
            SpecificMuscle::Brachialis => MuscleGroup::Biceps,
            SpecificMuscle::Brachioradialis => MuscleGroup::Forearms,
            SpecificMuscle::WristExtensors => MuscleGroup::Forearms,
            SpecificMuscle::WristFlexors => MuscleGroup::Forearms,
            SpecificMuscle::TricepsLongHead => MuscleGroup::Triceps,
            SpecificMuscle::TricepsLateralHead => MuscleGroup::Triceps,
            SpecificMuscle::TricepsMedialHead => MuscleGroup::Triceps,
            SpecificMuscle::RectusAbdominis => MuscleGroup::Abs,
            SpecificMuscle::Obliques => MuscleGroup::Obliques,
            SpecificMuscle::TransverseAbdominis => MuscleGroup::Core,
            SpecificMuscle::Stabilizers => MuscleGroup::Core,
            SpecificMuscle::GluteusMaximus => MuscleGroup::Glutes,
            SpecificMuscle::GluteusMedius => MuscleGroup::Glutes,
            SpecificMuscle::GluteusMinimus => MuscleGroup::Glutes,
            SpecificMuscle::QuadricepsVasti => MuscleGroup::Quads,
            SpecificMuscle::RectusFemoris => MuscleGroup::Quads,
            SpecificMuscle::BicepsFemoris => MuscleGroup::Hamstrings,
            SpecificMuscle::Semitendinosus => MuscleGroup::Hamstrings,
            SpecificMuscle::Semimembranosus => MuscleGroup::Hamstrings,
            SpecificMuscle::HipAbductors => MuscleGroup::HipAbductors,
            SpecificMuscle::HipAdductors => MuscleGroup::HipAdductors,
            SpecificMuscle::HipFlexors => MuscleGroup::HipFlexors,
            SpecificMuscle::Gastrocnemius => MuscleGroup::Calves,
            SpecificMuscle::Soleus => MuscleGroup::Calves,
            SpecificMuscle::TibialisAnterior => MuscleGroup::Calves,
            SpecificMuscle::Cardio => MuscleGroup::Cardio,
        }
    }

    /// Muscles whose growth responds particularly well to training at long muscle lengths.
    ///
    /// Informational only, the analysis does not weight these differently.
    #[must_use]
    pub fn stretch_mediated_hypertrophy(self) -> bool {
        matches!(
            self,
            SpecificMuscle::QuadricepsVasti
                | SpecificMuscle::RectusFemoris
                | SpecificMuscle::BicepsFemoris
                | SpecificMuscle::Semitendinosus
                | SpecificMuscle::Semimembranosus
                | SpecificMuscle::GluteusMaximus
                | SpecificMuscle::PectoralsMajor
                | SpecificMuscle::Soleus
                | SpecificMuscle::Gastrocnemius
        )
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum MuscleGroup {
    Abs,
    Biceps,
    Calves,
    Cardio,
    Chest,
    Core,
    Forearms,
    Glutes,
    Hamstrings,
    HipAbductors,
    HipAdductors,
    HipFlexors,
    Lats,
    LowerBack,
    Obliques,
    Quads,
    Shoulders,
    Traps,
    Triceps,
    UpperBack,
}

impl MuscleGroup {
    /// Groups that appear in every plan analysis, trained or not.
    pub fn reported() -> impl Iterator<Item = MuscleGroup> {
        MuscleGroup::iter().filter(|g| *g != MuscleGroup::Cardio && *g != MuscleGroup::Core)
    }

    #[must_use]
    pub fn display_name(self, t: &impl Translate) -> String {
        t.translate(&format!("generalMuscles.{self}"), &[])
    }
}

/// Translate the muscle keys of an exercise for display.
///
/// With `detailed`, every key is shown as its specific muscle. Otherwise the keys are
/// collapsed into their general groups in first-seen order. Keys unknown to the taxonomy are
/// shown as they are.
pub fn display_muscle_names(keys: &[String], detailed: bool, t: &impl Translate) -> Vec<String> {
    if detailed {
        return keys
            .iter()
            .map(|key| t.translate(&format!("muscles.{key}"), &[]))
            .collect();
    }

    let mut seen = BTreeSet::new();
    keys.iter()
        .map(|key| {
            SpecificMuscle::from_key(key)
                .map_or_else(|| key.clone(), |m| m.group().to_string())
        })
        .filter(|group| seen.insert(group.clone()))
        .map(|group| t.translate(&format!("generalMuscles.{group}"), &[]))
        .collect()
}
