#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tournee::{
    feed::ActiveZoneFeed,
    io,
    model::{ShiftId, VehicleId, WeekInstant},
    simulator::Simulator,
    storage::{JsonStorage, Storage},
    timeline::{layout, LayoutOptions},
    PollOutcome, Shape,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de créneaux véhicules (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de planning
    #[arg(long, global = true, default_value = "planning.json")]
    planning: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un shift
    CreateShift {
        #[arg(long)]
        vehicle: String,
        #[arg(long)]
        name: String,
        /// liste `mon;tue` ou `1;2` (0 = dimanche)
        #[arg(long)]
        weekdays: String,
        /// HH:MM local
        #[arg(long)]
        start: String,
        /// HH:MM local (<= start : passe minuit)
        #[arg(long)]
        end: String,
        /// liste d'ids de zones liées
        #[arg(long)]
        zones: Option<String>,
    },

    /// Importer des shifts depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Importer des zones depuis un CSV
    ImportZones {
        #[arg(long)]
        csv: String,
    },

    /// (Dés)activer un shift sans toucher à son calendrier
    Enable {
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        off: bool,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier les chevauchements par véhicule
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Shifts actifs à un instant de la semaine
    ActiveAt {
        /// `mon` ou 1 (0 = dimanche)
        #[arg(long)]
        day: String,
        /// HH:MM local
        #[arg(long)]
        time: String,
    },

    /// Faire tourner l'horloge virtuelle et tracer les activations
    Simulate {
        #[arg(long)]
        day: String,
        #[arg(long)]
        time: String,
        /// minutes simulées par tick
        #[arg(long, default_value_t = 1)]
        speed: u32,
        #[arg(long, default_value_t = 10)]
        ticks: u32,
    },

    /// Exporter la grille hebdomadaire en blocs positionnés
    Layout {
        #[arg(long, default_value_t = 48.0)]
        pixels_per_hour: f32,
        #[arg(long)]
        out_csv: String,
    },

    /// Un poll du feed des zones actives
    Zones {
        /// liste `v1;v2` (défaut : tous les véhicules du planning)
        #[arg(long)]
        vehicles: Option<String>,
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.planning)?;
    let mut planner = match storage.load() {
        Ok(p) => {
            let mut planner = tournee::Planner::new();
            *planner.planning_mut() = p;
            planner
        }
        Err(_) => tournee::Planner::new(),
    };

    let code = match cli.cmd {
        Commands::CreateShift {
            vehicle,
            name,
            weekdays,
            start,
            end,
            zones,
        } => {
            let weekdays = io::parse_weekdays(&weekdays)?;
            let start = io::parse_time(&start)?;
            let end = io::parse_time(&end)?;
            let zones = zones
                .map(|list| {
                    list.split([';', ','])
                        .map(str::trim)
                        .filter(|z| !z.is_empty())
                        .map(tournee::ZoneId::new)
                        .collect()
                })
                .unwrap_or_default();
            let id =
                planner.create_shift(VehicleId::new(&vehicle), &name, start, end, weekdays, zones)?;
            storage.save(planner.planning())?;
            println!("{}", id.as_str());
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(csv)?;
            planner.planning_mut().shifts.extend(shifts);
            storage.save(planner.planning())?;
            0
        }
        Commands::ImportZones { csv } => {
            let zones = io::import_zones_csv(csv)?;
            planner.planning_mut().zones.extend(zones);
            storage.save(planner.planning())?;
            0
        }
        Commands::Enable { shift_id, off } => {
            planner.set_enabled(&ShiftId::new(shift_id), !off)?;
            storage.save(planner.planning())?;
            0
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_planning_json(path, planner.planning())?;
            }
            if let Some(path) = out_csv {
                io::export_shifts_csv(path, planner.planning())?;
            }
            // impression compacte
            for s in &planner.planning().shifts {
                let days = s
                    .weekdays
                    .iter()
                    .map(|d| d.short_name())
                    .collect::<Vec<_>>()
                    .join(";");
                println!(
                    "{} | {} | {} | {} {} → {}{}",
                    s.id.as_str(),
                    s.vehicle.as_str(),
                    s.name,
                    days,
                    s.start,
                    s.end,
                    if s.enabled { "" } else { " (off)" }
                );
            }
            0
        }
        Commands::Check { report } => {
            let conflicts = planner.detect_overlaps();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["vehicle", "shift_a", "shift_b", "weekday"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.vehicle.as_str(),
                            c.shift_a.as_str(),
                            c.shift_b.as_str(),
                            c.weekday.short_name(),
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::ActiveAt { day, time } => {
            let at = WeekInstant::new(day.parse().map_err(anyhow::Error::msg)?, io::parse_time(&time)?);
            for s in planner.active_at(at) {
                println!("{} | {} | {}", s.id.as_str(), s.vehicle.as_str(), s.name);
            }
            0
        }
        Commands::Simulate {
            day,
            time,
            speed,
            ticks,
        } => {
            let start = WeekInstant::new(day.parse().map_err(anyhow::Error::msg)?, io::parse_time(&time)?);
            let shifts = planner.planning().shifts.clone();
            let mut sim = Simulator::new(start);
            sim.set_speed(speed);
            sim.subscribe(move |at| {
                let active = tournee::active_shifts_at(&shifts, at)
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{at} | {}",
                    if active.is_empty() { "-" } else { active.as_str() }
                );
            });
            sim.play();
            for _ in 0..ticks {
                sim.tick();
            }
            0
        }
        Commands::Layout {
            pixels_per_hour,
            out_csv,
        } => {
            let opts = LayoutOptions {
                pixels_per_hour,
                ..LayoutOptions::default()
            };
            let blocks = layout(&planner.planning().shifts, &opts);
            io::export_blocks_csv(out_csv, &blocks)?;
            println!("{} block(s)", blocks.len());
            0
        }
        Commands::Zones {
            vehicles,
            day,
            time,
        } => {
            let vehicles: Vec<VehicleId> = match vehicles {
                Some(list) => list
                    .split([';', ','])
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(VehicleId::new)
                    .collect(),
                None => {
                    let mut all: Vec<VehicleId> = Vec::new();
                    for s in &planner.planning().shifts {
                        if !all.contains(&s.vehicle) {
                            all.push(s.vehicle.clone());
                        }
                    }
                    all
                }
            };
            if vehicles.is_empty() {
                bail!("no vehicle to watch (empty planning)");
            }
            let at = match (day, time) {
                (Some(d), Some(t)) => {
                    WeekInstant::new(d.parse().map_err(anyhow::Error::msg)?, io::parse_time(&t)?)
                }
                _ => WeekInstant::now_local(),
            };
            let mut feed = ActiveZoneFeed::new();
            feed.start(vehicles);
            match feed.poll(planner.planning(), at) {
                PollOutcome::Applied(zones) => {
                    for z in &zones {
                        let kind = match &z.shape {
                            Shape::Circle { .. } => "circle",
                            Shape::Polygon(_) => "polygon",
                        };
                        println!(
                            "{} | {} | {} | {} | shift {}",
                            z.zone.id.as_str(),
                            z.zone.label,
                            kind,
                            z.color,
                            z.shift.as_str()
                        );
                    }
                    0
                }
                PollOutcome::Discarded => 0,
                PollOutcome::Failed(err) => return Err(err),
            }
        }
    };

    std::process::exit(code);
}
