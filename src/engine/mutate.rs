use super::{types::PlanError, Planner};
use crate::model::{Shift, ShiftId, TimeOfDay, VehicleId, WeekdaySet, ZoneId};

pub(super) fn create_shift(
    planner: &mut Planner,
    vehicle: VehicleId,
    name: &str,
    start: TimeOfDay,
    end: TimeOfDay,
    weekdays: WeekdaySet,
    zones: Vec<ZoneId>,
) -> Result<ShiftId, PlanError> {
    let mut shift = Shift::new(vehicle, name.to_string(), start, end, weekdays)
        .map_err(PlanError::InvalidShift)?;
    shift.zones = zones;
    let id = shift.id.clone();
    planner.planning.shifts.push(shift);
    Ok(id)
}

pub(super) fn update_shift(
    planner: &mut Planner,
    id: &ShiftId,
    start: TimeOfDay,
    end: TimeOfDay,
    weekdays: WeekdaySet,
    zones: Vec<ZoneId>,
) -> Result<(), PlanError> {
    if start == end {
        return Err(PlanError::InvalidShift(
            "start and end must differ by at least one minute".to_string(),
        ));
    }
    let shift = planner
        .planning
        .find_shift_mut(id)
        .ok_or_else(|| PlanError::UnknownShift(id.as_str().to_string()))?;
    shift.start = start;
    shift.end = end;
    shift.weekdays = weekdays;
    shift.zones = zones;
    Ok(())
}

pub(super) fn remove_shift(planner: &mut Planner, id: &ShiftId) -> Result<Shift, PlanError> {
    let pos = planner
        .planning
        .shifts
        .iter()
        .position(|s| &s.id == id)
        .ok_or_else(|| PlanError::UnknownShift(id.as_str().to_string()))?;
    Ok(planner.planning.shifts.remove(pos))
}

pub(super) fn set_enabled(
    planner: &mut Planner,
    id: &ShiftId,
    enabled: bool,
) -> Result<(), PlanError> {
    let shift = planner
        .planning
        .find_shift_mut(id)
        .ok_or_else(|| PlanError::UnknownShift(id.as_str().to_string()))?;
    shift.enabled = enabled;
    Ok(())
}
