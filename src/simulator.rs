use crate::model::{TimeOfDay, WeekInstant, Weekday};

type Observer = Box<dyn FnMut(WeekInstant)>;

/// Horloge virtuelle : pointeur jour/minute sur la semaine récurrente,
/// pilotée par un timer externe (un appel `tick` par intervalle réel).
///
/// Deux états : à l'arrêt ou en lecture. Chaque changement (lecture,
/// pause, seek, tick) notifie les abonnés de façon synchrone avec
/// l'instant courant. À la fermeture, l'appelant invoque `reset_to_now`
/// pour ramener les abonnés sur l'instant réel.
pub struct Simulator {
    instant: WeekInstant,
    speed_multiplier: u32,
    running: bool,
    observers: Vec<Observer>,
}

impl Simulator {
    /// Démarre à l'arrêt, sur l'instant donné, vitesse 1 min/tick.
    pub fn new(instant: WeekInstant) -> Self {
        Self {
            instant,
            speed_multiplier: 1,
            running: false,
            observers: Vec::new(),
        }
    }

    /// Démarre à l'arrêt sur l'instant local réel.
    pub fn from_local_now() -> Self {
        Self::new(WeekInstant::now_local())
    }

    pub fn instant(&self) -> WeekInstant {
        self.instant
    }

    pub fn speed_multiplier(&self) -> u32 {
        self.speed_multiplier
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Abonne un observateur, notifié immédiatement avec l'instant courant.
    pub fn subscribe<F>(&mut self, mut observer: F)
    where
        F: FnMut(WeekInstant) + 'static,
    {
        observer(self.instant);
        self.observers.push(Box::new(observer));
    }

    pub fn play(&mut self) {
        if !self.running {
            self.running = true;
            self.notify();
        }
    }

    /// Gèle l'horloge, l'instant courant est conservé.
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            self.notify();
        }
    }

    /// Minutes simulées par tick ; pris en compte au tick suivant.
    pub fn set_speed(&mut self, multiplier: u32) {
        self.speed_multiplier = multiplier;
    }

    /// Seek explicite, permis à l'arrêt comme en lecture.
    pub fn set_instant(&mut self, weekday: Weekday, time: TimeOfDay) {
        self.instant = WeekInstant::new(weekday, time);
        self.notify();
    }

    /// Revient à l'instant réel et s'arrête.
    pub fn reset_to_now(&mut self) {
        self.instant = WeekInstant::now_local();
        self.running = false;
        self.notify();
    }

    /// Un pas d'horloge : avance de `speed_multiplier` minutes, boucle
    /// sur minuit et sur samedi→dimanche. Sans effet à l'arrêt.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.instant = self.instant.advance_minutes(self.speed_multiplier);
        self.notify();
    }

    fn notify(&mut self) {
        for observer in self.observers.iter_mut() {
            observer(self.instant);
        }
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("instant", &self.instant)
            .field("speed_multiplier", &self.speed_multiplier)
            .field("running", &self.running)
            .field("observers", &self.observers.len())
            .finish()
    }
}
