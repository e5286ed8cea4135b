use crate::model::{Shift, ShiftId, TimeOfDay, VehicleId, WeekInstant, Weekday, MINUTES_PER_DAY};

/// Palette fixe ; l'indice boucle quand il y a plus de véhicules que de couleurs.
pub const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Options de rendu de la grille 7 jours × 24 h
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    pub pixels_per_hour: f32,
    /// Plancher de hauteur pour garder les créneaux très courts cliquables.
    pub min_block_height: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            pixels_per_hour: 48.0,
            min_block_height: 6.0,
        }
    }
}

/// Rectangle positionné dans la colonne d'un jour.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub shift: ShiftId,
    pub vehicle: VehicleId,
    pub name: String,
    pub weekday: Weekday,
    pub top: f32,
    pub height: f32,
    pub color: &'static str,
    /// Second segment d'un créneau qui passe minuit (haut de la colonne suivante).
    pub continuation: bool,
}

/// Couleur stable par véhicule, ordre de première apparition.
#[derive(Debug, Clone, Default)]
pub struct ColorAssigner {
    seen: Vec<VehicleId>,
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&mut self, vehicle: &VehicleId) -> &'static str {
        let index = match self.seen.iter().position(|v| v == vehicle) {
            Some(i) => i,
            None => {
                self.seen.push(vehicle.clone());
                self.seen.len() - 1
            }
        };
        PALETTE[index % PALETTE.len()]
    }
}

/// Ordonnée en pixels d'une heure locale.
pub fn time_to_y(time: TimeOfDay, pixels_per_hour: f32) -> f32 {
    f32::from(time.minutes()) / 60.0 * pixels_per_hour
}

/// Ligne « maintenant » dans la colonne du jour courant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NowMarker {
    pub weekday: Weekday,
    pub y: f32,
}

pub fn now_marker(at: WeekInstant, opts: &LayoutOptions) -> NowMarker {
    NowMarker {
        weekday: at.weekday,
        y: time_to_y(at.time, opts.pixels_per_hour),
    }
}

/// Convertit les shifts en rectangles positionnés sur la grille.
///
/// Un bloc par (shift, jour actif) ; un créneau qui passe minuit produit
/// deux blocs, le second marqué `continuation` en haut de la colonne du
/// lendemain. Couleur déterministe par véhicule.
pub fn layout(shifts: &[Shift], opts: &LayoutOptions) -> Vec<Block> {
    let mut colors = ColorAssigner::new();
    let mut out = Vec::new();

    for shift in shifts {
        let color = colors.color_for(&shift.vehicle);
        for day in shift.weekdays.iter() {
            if shift.crosses_midnight() {
                let until_midnight =
                    f32::from(MINUTES_PER_DAY - shift.start.minutes()) / 60.0 * opts.pixels_per_hour;
                out.push(Block {
                    shift: shift.id.clone(),
                    vehicle: shift.vehicle.clone(),
                    name: shift.name.clone(),
                    weekday: day,
                    top: time_to_y(shift.start, opts.pixels_per_hour),
                    height: until_midnight.max(opts.min_block_height),
                    color,
                    continuation: false,
                });
                let after_midnight =
                    f32::from(shift.end.minutes()) / 60.0 * opts.pixels_per_hour;
                out.push(Block {
                    shift: shift.id.clone(),
                    vehicle: shift.vehicle.clone(),
                    name: shift.name.clone(),
                    weekday: day.next(),
                    top: 0.0,
                    height: after_midnight.max(opts.min_block_height),
                    color,
                    continuation: true,
                });
            } else {
                let height =
                    shift.duration_minutes() as f32 / 60.0 * opts.pixels_per_hour;
                out.push(Block {
                    shift: shift.id.clone(),
                    vehicle: shift.vehicle.clone(),
                    name: shift.name.clone(),
                    weekday: day,
                    top: time_to_y(shift.start, opts.pixels_per_hour),
                    height: height.max(opts.min_block_height),
                    color,
                    continuation: false,
                });
            }
        }
    }

    out
}
