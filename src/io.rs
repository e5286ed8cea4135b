use crate::model::{
    Planning, Shift, TimeOfDay, VehicleId, Weekday, WeekdaySet, Zone, ZoneId,
};
use crate::timeline::Block;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de shifts depuis CSV: header `vehicle,name,weekdays,start,end[,enabled][,zones]`
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Shift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let vehicle = rec.get(0).context("missing vehicle")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if vehicle.is_empty() || name.is_empty() {
            bail!("invalid shift row (empty)");
        }
        let weekdays = parse_weekdays(rec.get(2).context("missing weekdays")?)
            .with_context(|| format!("invalid weekdays for shift {name}"))?;
        let start = parse_time(rec.get(3).context("missing start")?)
            .with_context(|| format!("invalid start for shift {name}"))?;
        let end = parse_time(rec.get(4).context("missing end")?)
            .with_context(|| format!("invalid end for shift {name}"))?;
        let mut shift = Shift::new(
            VehicleId::new(vehicle),
            name.to_string(),
            start,
            end,
            weekdays,
        )
        .map_err(anyhow::Error::msg)?;
        if let Some(flag) = rec.get(5) {
            let flag = flag.trim();
            if !flag.is_empty() {
                shift.enabled = parse_bool(flag)
                    .with_context(|| format!("invalid enabled value for shift {name}"))?;
            }
        }
        if let Some(zones) = rec.get(6) {
            shift.zones = parse_zone_list(zones);
        }
        out.push(shift);
    }
    Ok(out)
}

/// Import de zones depuis CSV: header `id,label,geometry`
pub fn import_zones_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Zone>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let label = rec.get(1).context("missing label")?.trim();
        let geometry = rec.get(2).context("missing geometry")?.trim();
        if id.is_empty() || geometry.is_empty() {
            bail!("invalid zone row (empty)");
        }
        out.push(Zone {
            id: ZoneId::new(id),
            label: label.to_string(),
            geometry: geometry.to_string(),
        });
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Liste de jours `mon;tue` ou `1;2` (`,` accepté hors CSV).
pub fn parse_weekdays(raw: &str) -> anyhow::Result<WeekdaySet> {
    let days = raw
        .split([';', ','])
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| chunk.trim().parse::<Weekday>().map_err(anyhow::Error::msg))
        .collect::<anyhow::Result<Vec<_>>>()?;
    WeekdaySet::from_days(&days).map_err(anyhow::Error::msg)
}

/// Heure `HH:MM`.
pub fn parse_time(raw: &str) -> anyhow::Result<TimeOfDay> {
    raw.trim().parse::<TimeOfDay>().map_err(anyhow::Error::msg)
}

fn parse_zone_list(raw: &str) -> Vec<ZoneId> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(ZoneId::new)
        .collect()
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_planning_json<P: AsRef<Path>>(path: P, planning: &Planning) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(planning)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des shifts: header `id,vehicle,name,weekdays,start,end,enabled,zones`
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, planning: &Planning) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id", "vehicle", "name", "weekdays", "start", "end", "enabled", "zones",
    ])?;
    for s in &planning.shifts {
        let weekdays = s
            .weekdays
            .iter()
            .map(|d| d.short_name())
            .collect::<Vec<_>>()
            .join(";");
        let zones = s
            .zones
            .iter()
            .map(ZoneId::as_str)
            .collect::<Vec<_>>()
            .join(";");
        let start = s.start.to_string();
        let end = s.end.to_string();
        w.write_record([
            s.id.as_str(),
            s.vehicle.as_str(),
            s.name.as_str(),
            weekdays.as_str(),
            start.as_str(),
            end.as_str(),
            if s.enabled { "true" } else { "false" },
            zones.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des blocs de la grille: header `shift,vehicle,weekday,top,height,color,continuation`
pub fn export_blocks_csv<P: AsRef<Path>>(path: P, blocks: &[Block]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "shift",
        "vehicle",
        "weekday",
        "top",
        "height",
        "color",
        "continuation",
    ])?;
    for b in blocks {
        let top = format!("{:.1}", b.top);
        let height = format!("{:.1}", b.height);
        w.write_record([
            b.shift.as_str(),
            b.vehicle.as_str(),
            b.weekday.short_name(),
            top.as_str(),
            height.as_str(),
            b.color,
            if b.continuation { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}
