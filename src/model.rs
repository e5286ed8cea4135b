use chrono::{Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Vehicle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Zone
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Jour de semaine, 0 = dimanche … 6 = samedi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    pub const SUNDAY: Weekday = Weekday(0);
    pub const MONDAY: Weekday = Weekday(1);
    pub const TUESDAY: Weekday = Weekday(2);
    pub const WEDNESDAY: Weekday = Weekday(3);
    pub const THURSDAY: Weekday = Weekday(4);
    pub const FRIDAY: Weekday = Weekday(5);
    pub const SATURDAY: Weekday = Weekday(6);

    pub fn from_index(index: u8) -> Result<Self, String> {
        if index > 6 {
            return Err(format!("weekday index out of range: {index}"));
        }
        Ok(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Jour précédent (samedi avant dimanche).
    pub fn prev(self) -> Weekday {
        Weekday((self.0 + 6) % 7)
    }

    /// Jour suivant (dimanche après samedi).
    pub fn next(self) -> Weekday {
        Weekday((self.0 + 1) % 7)
    }

    pub fn short_name(self) -> &'static str {
        ["sun", "mon", "tue", "wed", "thu", "fri", "sat"][usize::from(self.0)]
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Weekday::from_index(value)
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> u8 {
        day.0
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Weekday::from_index(n);
        }
        match s.to_ascii_lowercase().as_str() {
            "sun" | "sunday" | "dim" => Ok(Weekday::SUNDAY),
            "mon" | "monday" | "lun" => Ok(Weekday::MONDAY),
            "tue" | "tuesday" | "mar" => Ok(Weekday::TUESDAY),
            "wed" | "wednesday" | "mer" => Ok(Weekday::WEDNESDAY),
            "thu" | "thursday" | "jeu" => Ok(Weekday::THURSDAY),
            "fri" | "friday" | "ven" => Ok(Weekday::FRIDAY),
            "sat" | "saturday" | "sam" => Ok(Weekday::SATURDAY),
            _ => Err(format!("unknown weekday: {s}")),
        }
    }
}

/// Ensemble de jours actifs, jamais vide (bitmask interne).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn from_days(days: &[Weekday]) -> Result<Self, String> {
        if days.is_empty() {
            return Err("weekday set cannot be empty".to_string());
        }
        let mut mask = 0u8;
        for day in days {
            mask |= 1 << day.index();
        }
        Ok(Self(mask))
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Jours en ordre croissant (dimanche d'abord).
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        (0u8..7).filter_map(move |i| (self.0 & (1 << i) != 0).then_some(Weekday(i)))
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = String;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let days = value
            .into_iter()
            .map(Weekday::from_index)
            .collect::<Result<Vec<_>, _>>()?;
        WeekdaySet::from_days(&days)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Vec<u8> {
        set.iter().map(Weekday::index).collect()
    }
}

pub const MINUTES_PER_DAY: u16 = 1440;

/// Minutes depuis minuit local, 0..=1439.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub fn from_minutes(minutes: u16) -> Result<Self, String> {
        if minutes >= MINUTES_PER_DAY {
            return Err(format!("time of day out of range: {minutes}"));
        }
        Ok(Self(minutes))
    }

    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, String> {
        if hour > 23 || minute > 59 {
            return Err(format!("invalid time: {hour:02}:{minute:02}"));
        }
        Ok(Self(hour * 60 + minute))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl TryFrom<u16> for TimeOfDay {
    type Error = String;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        TimeOfDay::from_minutes(value)
    }
}

impl From<TimeOfDay> for u16 {
    fn from(t: TimeOfDay) -> u16 {
        t.0
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got: {s}"))?;
        let hour = h.parse::<u16>().map_err(|_| format!("invalid hour: {h}"))?;
        let minute = m
            .parse::<u16>()
            .map_err(|_| format!("invalid minute: {m}"))?;
        TimeOfDay::from_hm(hour, minute)
    }
}

/// Point de la semaine récurrente (jour + minute), pas un timestamp absolu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekInstant {
    pub weekday: Weekday,
    pub time: TimeOfDay,
}

impl WeekInstant {
    pub fn new(weekday: Weekday, time: TimeOfDay) -> Self {
        Self { weekday, time }
    }

    /// Instant local réel projeté sur la semaine récurrente.
    pub fn now_local() -> Self {
        let now = Local::now();
        let weekday = Weekday(now.weekday().num_days_from_sunday() as u8);
        let time = TimeOfDay((now.hour() * 60 + now.minute()) as u16);
        Self { weekday, time }
    }

    /// Avance de `minutes` en bouclant sur minuit et sur samedi→dimanche.
    pub fn advance_minutes(self, minutes: u32) -> Self {
        let total = u32::from(self.time.0) + minutes;
        let day_steps = (total / u32::from(MINUTES_PER_DAY)) % 7;
        let mut weekday = self.weekday;
        for _ in 0..day_steps {
            weekday = weekday.next();
        }
        Self {
            weekday,
            time: TimeOfDay((total % u32::from(MINUTES_PER_DAY)) as u16),
        }
    }
}

impl std::fmt::Display for WeekInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.weekday, self.time)
    }
}

/// Créneau hebdomadaire récurrent d'un véhicule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub vehicle: VehicleId,
    pub name: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub weekdays: WeekdaySet,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<ZoneId>,
}

fn default_enabled() -> bool {
    true
}

impl Shift {
    /// Crée un shift en validant `start != end` (durée minimale : 1 minute).
    pub fn new(
        vehicle: VehicleId,
        name: String,
        start: TimeOfDay,
        end: TimeOfDay,
        weekdays: WeekdaySet,
    ) -> Result<Self, String> {
        if start == end {
            return Err("start and end must differ by at least one minute".to_string());
        }
        Ok(Self {
            id: ShiftId::random(),
            vehicle,
            name,
            start,
            end,
            weekdays,
            enabled: true,
            zones: Vec::new(),
        })
    }

    /// Vrai si la fenêtre passe minuit (`end <= start`).
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> u32 {
        if self.crosses_midnight() {
            u32::from(MINUTES_PER_DAY - self.start.0) + u32::from(self.end.0)
        } else {
            u32::from(self.end.0 - self.start.0)
        }
    }
}

/// Zone géographique externe, consommée telle quelle (géométrie brute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub label: String,
    pub geometry: String,
}

/// Planning complet : créneaux + catalogue local de zones.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Planning {
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl Planning {
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }
    pub fn find_shift_mut(&mut self, id: &ShiftId) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|s| &s.id == id)
    }
    pub fn find_zone<'a>(&'a self, id: &ZoneId) -> Option<&'a Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }
    pub fn shifts_for_vehicles<'a>(&'a self, vehicles: &[VehicleId]) -> Vec<&'a Shift> {
        self.shifts
            .iter()
            .filter(|s| vehicles.contains(&s.vehicle))
            .collect()
    }
}
