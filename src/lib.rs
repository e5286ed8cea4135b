#![forbid(unsafe_code)]
//! Tournee — bibliothèque de créneaux hebdomadaires de véhicules (sans BD).
//!
//! - Fenêtres récurrentes (jour + minute locale), minuit inclus.
//! - Moteur d'activation et détection de chevauchements par véhicule.
//! - Horloge virtuelle pour prévisualiser « qui est actif à l'instant X ».
//! - Grille 7 j × 24 h en blocs positionnés, couleur stable par véhicule.
//! - Zones géographiques normalisées (CIRCLE/POLYGON/GeoJSON) et feed
//!   des zones actives pour la carte.
//! - Stockage fichiers (JSON/CSV) ; tout en heure locale récurrente, la
//!   conversion depuis un timestamp absolu reste à la charge de l'appelant.

pub mod engine;
pub mod feed;
pub mod geometry;
pub mod io;
pub mod model;
pub mod simulator;
pub mod storage;
pub mod timeline;

pub use engine::{active_shifts_at, find_overlaps, is_active_at, Conflict, PlanError, Planner};
pub use feed::{ActiveZone, ActiveZoneFeed, PollOutcome, PollTicket, ShiftSource, POLL_INTERVAL};
pub use geometry::{parse_zone_geometry, Shape, ZoneShapeCache};
pub use model::{
    Planning, Shift, ShiftId, TimeOfDay, VehicleId, WeekInstant, Weekday, WeekdaySet, Zone, ZoneId,
};
pub use simulator::Simulator;
pub use storage::{JsonStorage, Storage};
pub use timeline::{layout, now_marker, Block, ColorAssigner, LayoutOptions, NowMarker, PALETTE};
