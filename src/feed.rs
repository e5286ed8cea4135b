use crate::engine;
use crate::geometry::{Shape, ZoneShapeCache};
use crate::model::{Planning, Shift, ShiftId, VehicleId, WeekInstant, Zone};
use crate::timeline::ColorAssigner;
use std::time::Duration;
use tracing::{debug, warn};

/// Cadence de rafraîchissement visée par le timer appelant.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Source externe de créneaux (le transport reste hors périmètre).
pub trait ShiftSource {
    fn shifts_for_vehicles(&self, vehicles: &[VehicleId]) -> anyhow::Result<Vec<Shift>>;

    /// Liste active déjà calculée en amont ; `Ok(None)` = non fournie,
    /// le feed recalcule alors localement via le moteur d'activation.
    fn active_shifts_at(
        &self,
        _vehicles: &[VehicleId],
        _at: WeekInstant,
    ) -> anyhow::Result<Option<Vec<Shift>>> {
        Ok(None)
    }

    fn zone_catalog(&self) -> anyhow::Result<Vec<Zone>>;
}

/// Rôle local : un Planning en mémoire joue la source externe.
impl ShiftSource for Planning {
    fn shifts_for_vehicles(&self, vehicles: &[VehicleId]) -> anyhow::Result<Vec<Shift>> {
        Ok(Planning::shifts_for_vehicles(self, vehicles)
            .into_iter()
            .cloned()
            .collect())
    }

    fn zone_catalog(&self) -> anyhow::Result<Vec<Zone>> {
        Ok(self.zones.clone())
    }
}

/// Zone résolue et colorée d'un shift actif, prête pour la carte.
#[derive(Debug, Clone)]
pub struct ActiveZone {
    pub zone: Zone,
    pub shape: Shape,
    pub color: &'static str,
    pub shift: ShiftId,
    pub vehicle: VehicleId,
}

/// Jeton d'un poll en cours ; invalidé par tout redémarrage du feed.
#[derive(Debug, Clone, Copy)]
pub struct PollTicket {
    generation: u64,
}

#[derive(Debug)]
pub enum PollOutcome {
    /// Liste appliquée et transmise à l'abonné.
    Applied(Vec<ActiveZone>),
    /// Résultat arrivé trop tard (feed arrêté ou véhicules changés).
    Discarded,
    /// Échec amont, non fatal : le prochain intervalle réessaiera.
    Failed(anyhow::Error),
}

/// Feed des zones actives : machine à états coopérative pilotée par un
/// timer externe. Un seul poll en vol à la fois ; un résultat dont le
/// jeton ne correspond plus à la génération courante est jeté.
pub struct ActiveZoneFeed {
    vehicles: Vec<VehicleId>,
    visible: bool,
    generation: u64,
    in_flight: Option<u64>,
    cache: ZoneShapeCache,
    colors: ColorAssigner,
    on_update: Option<Box<dyn FnMut(&[ActiveZone])>>,
}

impl Default for ActiveZoneFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveZoneFeed {
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            visible: false,
            generation: 0,
            in_flight: None,
            cache: ZoneShapeCache::new(),
            colors: ColorAssigner::new(),
            on_update: None,
        }
    }

    /// Active le feed pour un ensemble de véhicules observés.
    pub fn start(&mut self, vehicles: Vec<VehicleId>) {
        self.vehicles = vehicles;
        self.visible = true;
        self.generation += 1;
        self.in_flight = None;
    }

    /// Coupe le feed ; un poll en vol sera jeté à son retour.
    pub fn stop(&mut self) {
        self.visible = false;
        self.generation += 1;
        self.in_flight = None;
    }

    /// Changement de l'ensemble observé = redémarrage (nouvelle génération).
    pub fn set_vehicles(&mut self, vehicles: Vec<VehicleId>) {
        if vehicles == self.vehicles {
            return;
        }
        self.vehicles = vehicles;
        self.generation += 1;
        self.in_flight = None;
    }

    pub fn is_running(&self) -> bool {
        self.visible
    }

    pub fn vehicles(&self) -> &[VehicleId] {
        &self.vehicles
    }

    /// Abonne le consommateur (couche carte) aux listes appliquées.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&[ActiveZone]) + 'static,
    {
        self.on_update = Some(Box::new(callback));
    }

    /// Ouvre un poll si le feed est actif et qu'aucun n'est en vol.
    pub fn begin_poll(&mut self) -> Option<PollTicket> {
        if !self.visible || self.in_flight.is_some() {
            return None;
        }
        self.in_flight = Some(self.generation);
        debug!(generation = self.generation, "zone feed poll started");
        Some(PollTicket {
            generation: self.generation,
        })
    }

    /// Applique le résultat d'un poll, ou le jette s'il est périmé.
    pub fn complete_poll(
        &mut self,
        ticket: PollTicket,
        active: anyhow::Result<Vec<Shift>>,
        catalog: &[Zone],
    ) -> PollOutcome {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }
        if !self.visible || ticket.generation != self.generation {
            warn!(
                generation = ticket.generation,
                "stale zone feed result discarded"
            );
            return PollOutcome::Discarded;
        }
        match active {
            Err(err) => {
                warn!(error = %err, "zone feed poll failed");
                PollOutcome::Failed(err)
            }
            Ok(active) => {
                let zones = self.collect_zones(&active, catalog);
                if let Some(callback) = self.on_update.as_mut() {
                    callback(&zones);
                }
                PollOutcome::Applied(zones)
            }
        }
    }

    /// Poll synchrone complet : requête, repli sur le calcul local
    /// d'activation si la source ne fournit pas la liste active.
    pub fn poll<S: ShiftSource>(&mut self, source: &S, now: WeekInstant) -> PollOutcome {
        let Some(ticket) = self.begin_poll() else {
            return PollOutcome::Discarded;
        };
        let fetched = fetch(source, &self.vehicles, now);
        match fetched {
            Ok((active, catalog)) => self.complete_poll(ticket, Ok(active), &catalog),
            Err(err) => self.complete_poll(ticket, Err(err), &[]),
        }
    }

    fn collect_zones(&mut self, active: &[Shift], catalog: &[Zone]) -> Vec<ActiveZone> {
        let mut out = Vec::new();
        for shift in active {
            let color = self.colors.color_for(&shift.vehicle);
            for zone_id in &shift.zones {
                let Some(zone) = catalog.iter().find(|z| &z.id == zone_id) else {
                    warn!(zone = zone_id.as_str(), "zone missing from catalog");
                    continue;
                };
                // zone illisible : warn dans le cache, rendu simplement omis
                let Some(shape) = self.cache.resolve(zone) else {
                    continue;
                };
                out.push(ActiveZone {
                    zone: zone.clone(),
                    shape,
                    color,
                    shift: shift.id.clone(),
                    vehicle: shift.vehicle.clone(),
                });
            }
        }
        out
    }
}

fn fetch<S: ShiftSource>(
    source: &S,
    vehicles: &[VehicleId],
    now: WeekInstant,
) -> anyhow::Result<(Vec<Shift>, Vec<Zone>)> {
    let active = match source.active_shifts_at(vehicles, now)? {
        Some(list) => list,
        None => {
            let all = source.shifts_for_vehicles(vehicles)?;
            engine::active_shifts_at(&all, now)
                .into_iter()
                .cloned()
                .collect()
        }
    };
    let catalog = source.zone_catalog()?;
    Ok((active, catalog))
}

impl std::fmt::Debug for ActiveZoneFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveZoneFeed")
            .field("vehicles", &self.vehicles)
            .field("visible", &self.visible)
            .field("generation", &self.generation)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
