use crate::model::{ShiftId, VehicleId, Weekday};
use thiserror::Error;

/// Conflit : deux créneaux du même véhicule se chevauchent un jour donné.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub vehicle: VehicleId,
    pub shift_a: ShiftId,
    pub shift_b: ShiftId,
    pub weekday: Weekday,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid shift definition: {0}")]
    InvalidShift(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
