use crate::{DayID, PlanID, Reps, Side, TemplateID};

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Plan {
    pub id: PlanID,
    pub name: String,
    pub days: Vec<PlanDay>,
}

impl Plan {
    /// Number of days after which the plan repeats.
    ///
    /// A plan without days is treated as a one-day cycle.
    #[must_use]
    pub fn cycle_length(&self) -> usize {
        self.days.len().max(1)
    }

    #[must_use]
    pub fn day(&self, id: DayID) -> Option<(usize, &PlanDay)> {
        self.days.iter().enumerate().find(|(_, d)| d.id == id)
    }
}

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlanDay {
    pub id: DayID,
    pub name: String,
    pub exercises: Vec<PlanExercise>,
}

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlanExercise {
    /// Free-text exercises without a library entry have no template.
    pub template_id: Option<TemplateID>,
    pub target_sets: u32,
    pub target_reps: Option<Reps>,
    /// Seconds. Falls back to the global rest timer.
    pub rest_between_sets: Option<u32>,
    pub side_type: SideType,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideType {
    #[default]
    Bilateral,
    UnilateralLeft,
    UnilateralRight,
    UnilateralAlternating,
}

impl SideType {
    #[must_use]
    pub fn side(self, set_index: usize) -> Side {
        match self {
            SideType::Bilateral => Side::None,
            SideType::UnilateralLeft => Side::Left,
            SideType::UnilateralRight => Side::Right,
            SideType::UnilateralAlternating => {
                if set_index % 2 == 0 {
                    Side::Left
                } else {
                    Side::Right
                }
            }
        }
    }
}
