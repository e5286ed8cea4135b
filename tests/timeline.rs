#![forbid(unsafe_code)]
use tournee::{
    layout, now_marker, ColorAssigner, LayoutOptions, Shift, TimeOfDay, VehicleId, WeekInstant,
    Weekday, WeekdaySet, PALETTE,
};

fn t(minutes: u16) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes).unwrap()
}

fn days(indices: &[u8]) -> WeekdaySet {
    let days: Vec<Weekday> = indices
        .iter()
        .map(|i| Weekday::from_index(*i).unwrap())
        .collect();
    WeekdaySet::from_days(&days).unwrap()
}

fn shift(vehicle: &str, name: &str, start: u16, end: u16, weekdays: &[u8]) -> Shift {
    Shift::new(
        VehicleId::new(vehicle),
        name.to_string(),
        t(start),
        t(end),
        days(weekdays),
    )
    .unwrap()
}

#[test]
fn crossing_shift_splits_into_two_blocks() {
    // vendredi 20:00 → samedi 06:00
    let s = shift("v1", "nuit", 1200, 360, &[5]);
    let opts = LayoutOptions {
        pixels_per_hour: 10.0,
        min_block_height: 2.0,
    };
    let blocks = layout(std::slice::from_ref(&s), &opts);

    assert_eq!(blocks.len(), 2);
    let first = &blocks[0];
    assert_eq!(first.weekday, Weekday::FRIDAY);
    assert!(!first.continuation);
    assert!((first.top - 200.0).abs() < f32::EPSILON);
    assert!((first.height - 40.0).abs() < f32::EPSILON);

    let second = &blocks[1];
    assert_eq!(second.weekday, Weekday::SATURDAY);
    assert!(second.continuation);
    assert!((second.top - 0.0).abs() < f32::EPSILON);
    assert!((second.height - 60.0).abs() < f32::EPSILON);

    assert_eq!(first.color, second.color);
}

#[test]
fn full_week_shift_gives_seven_identical_blocks() {
    let s = shift("v1", "continu", 480, 1080, &[0, 1, 2, 3, 4, 5, 6]);
    let opts = LayoutOptions::default();
    let blocks = layout(std::slice::from_ref(&s), &opts);

    assert_eq!(blocks.len(), 7);
    for (i, b) in blocks.iter().enumerate() {
        assert_eq!(b.weekday.index(), i as u8);
        assert!(!b.continuation);
        assert!((b.top - blocks[0].top).abs() < f32::EPSILON);
        assert!((b.height - blocks[0].height).abs() < f32::EPSILON);
    }
}

#[test]
fn very_short_shift_keeps_minimum_height() {
    // 5 minutes : bien en dessous du plancher
    let s = shift("v1", "flash", 600, 605, &[1]);
    let opts = LayoutOptions {
        pixels_per_hour: 12.0,
        min_block_height: 6.0,
    };
    let blocks = layout(std::slice::from_ref(&s), &opts);

    assert_eq!(blocks.len(), 1);
    assert!((blocks[0].height - 6.0).abs() < f32::EPSILON);
}

#[test]
fn colors_are_stable_per_vehicle_first_seen_order() {
    let shifts = vec![
        shift("v1", "a", 480, 720, &[1]),
        shift("v2", "b", 480, 720, &[2]),
        shift("v1", "c", 780, 900, &[3]),
    ];
    let blocks = layout(&shifts, &LayoutOptions::default());

    assert_eq!(blocks[0].color, PALETTE[0]);
    assert_eq!(blocks[1].color, PALETTE[1]);
    // même véhicule, même couleur, quel que soit le shift
    assert_eq!(blocks[2].color, PALETTE[0]);
}

#[test]
fn palette_cycles_when_vehicles_exceed_it() {
    let mut colors = ColorAssigner::new();
    for i in 0..PALETTE.len() {
        let _ = colors.color_for(&VehicleId::new(format!("v{i}")));
    }
    let wrapped = colors.color_for(&VehicleId::new("encore"));
    assert_eq!(wrapped, PALETTE[0]);
}

#[test]
fn now_marker_tracks_instant() {
    let opts = LayoutOptions {
        pixels_per_hour: 10.0,
        min_block_height: 2.0,
    };
    let marker = now_marker(
        WeekInstant::new(Weekday::WEDNESDAY, t(90)),
        &opts,
    );
    assert_eq!(marker.weekday, Weekday::WEDNESDAY);
    assert!((marker.y - 15.0).abs() < f32::EPSILON);
}
