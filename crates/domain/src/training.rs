use derive_more::{Display, Into};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<u32> for Reps {
    type Error = RepsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Reps::new(value)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Weight in kilograms, the unit all sets are stored in.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<f32> for Weight {
    type Error = WeightError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Weight::new(value)
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Reps in reserve.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RIR(u32);

impl RIR {
    pub fn new(value: u32) -> Result<Self, RIRError> {
        if !(0..100).contains(&value) {
            return Err(RIRError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<u32> for RIR {
    type Error = RIRError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        RIR::new(value)
    }
}

impl TryFrom<&str> for RIR {
    type Error = RIRError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => RIR::new(parsed_value),
            Err(_) => Err(RIRError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RIRError {
    #[error("RIR must be in the range 0 to 99")]
    OutOfRange,
    #[error("RIR must be an integer")]
    ParseError,
}

pub const KG_TO_LBS: f32 = 2.20462;

#[derive(Debug, Default, Display, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    #[display("kg")]
    Kg,
    #[display("lbs")]
    Lbs,
}

impl WeightUnit {
    /// Convert a stored weight into this unit.
    ///
    /// Pounds are rounded to the nearest 0.5 lbs, the smallest step a lifter can load.
    #[must_use]
    pub fn convert_from_kg(self, kg: f32) -> f32 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => (kg * KG_TO_LBS * 2.0).round() / 2.0,
        }
    }

    #[must_use]
    pub fn to_kg(self, value: f32) -> f32 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value / KG_TO_LBS,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetStatus {
    #[default]
    Todo,
    Completed,
    Skipped,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Set {
    pub order: u32,
    pub status: SetStatus,
    pub reps: Option<Reps>,
    pub weight: Option<Weight>,
    /// Seconds.
    pub duration: Option<u32>,
    pub distance: Option<f32>,
    pub rir: Option<RIR>,
    pub side: Side,
}

impl Set {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SetStatus::Completed
    }

    /// A completed set with positive weight and reps, the only kind of set that enters
    /// strength and volume calculations.
    #[must_use]
    pub fn weighted(&self) -> Option<WeightedSet> {
        if !self.is_completed() {
            return None;
        }
        let weight = f32::from(self.weight?);
        let reps = u32::from(self.reps?);
        if weight <= 0.0 || reps == 0 {
            return None;
        }
        Some(WeightedSet {
            order: self.order,
            weight,
            reps,
            rir: self.rir.map(u32::from),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSet {
    pub order: u32,
    /// Kilograms.
    pub weight: f32,
    pub reps: u32,
    pub rir: Option<u32>,
}

impl WeightedSet {
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let reps = self.reps as f32;
        self.weight * reps
    }
}
