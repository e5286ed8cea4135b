mod activation;
mod mutate;
mod overlaps;
mod types;
mod util;

pub use activation::{active_shifts_at, is_active_at};
pub use types::{Conflict, PlanError};

use crate::model::{Planning, Shift, ShiftId, TimeOfDay, VehicleId, WeekInstant, WeekdaySet, ZoneId};

/// Planner : encapsule un Planning en cours d'édition
#[derive(Debug, Default)]
pub struct Planner {
    planning: Planning,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            planning: Planning::default(),
        }
    }

    pub fn planning(&self) -> &Planning {
        &self.planning
    }
    pub fn planning_mut(&mut self) -> &mut Planning {
        &mut self.planning
    }

    /// Crée un créneau validé (jamais de définition invalide dans le modèle).
    pub fn create_shift(
        &mut self,
        vehicle: VehicleId,
        name: &str,
        start: TimeOfDay,
        end: TimeOfDay,
        weekdays: WeekdaySet,
        zones: Vec<ZoneId>,
    ) -> Result<ShiftId, PlanError> {
        mutate::create_shift(self, vehicle, name, start, end, weekdays, zones)
    }

    pub fn update_shift(
        &mut self,
        id: &ShiftId,
        start: TimeOfDay,
        end: TimeOfDay,
        weekdays: WeekdaySet,
        zones: Vec<ZoneId>,
    ) -> Result<(), PlanError> {
        mutate::update_shift(self, id, start, end, weekdays, zones)
    }

    pub fn remove_shift(&mut self, id: &ShiftId) -> Result<Shift, PlanError> {
        mutate::remove_shift(self, id)
    }

    /// Interrupteur logiciel, indépendant du calendrier.
    pub fn set_enabled(&mut self, id: &ShiftId, enabled: bool) -> Result<(), PlanError> {
        mutate::set_enabled(self, id, enabled)
    }

    pub fn detect_overlaps(&self) -> Vec<Conflict> {
        overlaps::detect_overlaps(&self.planning.shifts)
    }

    pub fn active_at(&self, at: WeekInstant) -> Vec<&Shift> {
        activation::active_shifts_at(&self.planning.shifts, at)
    }
}

/// Chevauchements sur une liste brute, sans passer par un Planner.
pub fn find_overlaps(shifts: &[Shift]) -> Vec<Conflict> {
    overlaps::detect_overlaps(shifts)
}
