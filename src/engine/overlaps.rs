use super::types::Conflict;
use super::util::{self, DaySpan};
use crate::model::{Shift, ShiftId, VehicleId};
use std::collections::BTreeSet;

/// Détecte les chevauchements entre shifts d'un même véhicule.
///
/// Chaque shift est éclaté en intervalles minute `[start, end)` par jour
/// (un créneau passant minuit donne deux segments), puis comparé paire à
/// paire au sein de chaque jour. Les bornes qui se touchent ne comptent
/// pas comme chevauchement.
pub(super) fn detect_overlaps(shifts: &[Shift]) -> Vec<Conflict> {
    let mut vehicles: Vec<&VehicleId> = Vec::new();
    for shift in shifts {
        if !vehicles.contains(&&shift.vehicle) {
            vehicles.push(&shift.vehicle);
        }
    }

    let mut out = Vec::new();
    for vehicle in vehicles {
        let of_vehicle: Vec<&Shift> = shifts.iter().filter(|s| &s.vehicle == vehicle).collect();
        conflicts_for_vehicle(vehicle, &of_vehicle, &mut out);
    }
    out
}

fn conflicts_for_vehicle(vehicle: &VehicleId, shifts: &[&Shift], out: &mut Vec<Conflict>) {
    let mut by_day: [Vec<(ShiftId, DaySpan)>; 7] = Default::default();
    for shift in shifts.iter().copied() {
        for (id, span) in util::expand_spans(shift) {
            by_day[usize::from(span.weekday.index())].push((id, span));
        }
    }

    let mut seen: BTreeSet<(ShiftId, ShiftId, u8)> = BTreeSet::new();
    for day in &mut by_day {
        day.sort_by_key(|(_, span)| span.start);
        for (idx, (id_a, span_a)) in day.iter().enumerate() {
            for (id_b, span_b) in day.iter().skip(idx + 1) {
                if id_a == id_b || !util::overlaps(span_a, span_b) {
                    continue;
                }
                let (first, second) = if id_a <= id_b {
                    (id_a.clone(), id_b.clone())
                } else {
                    (id_b.clone(), id_a.clone())
                };
                let key = (first.clone(), second.clone(), span_a.weekday.index());
                if seen.insert(key) {
                    out.push(Conflict {
                        vehicle: vehicle.clone(),
                        shift_a: first,
                        shift_b: second,
                        weekday: span_a.weekday,
                    });
                }
            }
        }
    }
}
