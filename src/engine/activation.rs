use crate::model::{Shift, WeekInstant};

/// Un shift est-il actif à l'instant donné ?
///
/// Fenêtre demi-ouverte `[start, end)`. Pour un créneau qui passe minuit,
/// deux branches : la fenêtre du jour a commencé, ou celle de la veille
/// déborde encore sur aujourd'hui.
pub fn is_active_at(shift: &Shift, at: WeekInstant) -> bool {
    if !shift.enabled {
        return false;
    }

    let today = shift.weekdays.contains(at.weekday);

    if !shift.crosses_midnight() {
        return today && shift.start <= at.time && at.time < shift.end;
    }

    let started_today = today && at.time >= shift.start;
    let spills_from_yesterday =
        shift.weekdays.contains(at.weekday.prev()) && at.time < shift.end;
    started_today || spills_from_yesterday
}

/// Filtre les shifts actifs à l'instant donné, ordre d'entrée conservé.
pub fn active_shifts_at<'a>(shifts: &'a [Shift], at: WeekInstant) -> Vec<&'a Shift> {
    shifts.iter().filter(|s| is_active_at(s, at)).collect()
}
