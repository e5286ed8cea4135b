#![forbid(unsafe_code)]
use std::cell::RefCell;
use std::rc::Rc;
use tournee::{Simulator, TimeOfDay, WeekInstant, Weekday};

fn at(day: Weekday, minutes: u16) -> WeekInstant {
    WeekInstant::new(day, TimeOfDay::from_minutes(minutes).unwrap())
}

#[test]
fn tick_advances_by_speed_and_wraps_week() {
    // samedi 23:59, 2 minutes par tick : retour à dimanche 00:01
    let mut sim = Simulator::new(at(Weekday::SATURDAY, 1439));
    sim.set_speed(2);
    sim.play();
    sim.tick();
    assert_eq!(sim.instant(), at(Weekday::SUNDAY, 1));
}

#[test]
fn tick_wraps_midnight_within_week() {
    let mut sim = Simulator::new(at(Weekday::MONDAY, 1430));
    sim.set_speed(30);
    sim.play();
    sim.tick();
    assert_eq!(sim.instant(), at(Weekday::TUESDAY, 20));
}

#[test]
fn tick_is_noop_while_stopped() {
    let mut sim = Simulator::new(at(Weekday::MONDAY, 600));
    sim.tick();
    assert_eq!(sim.instant(), at(Weekday::MONDAY, 600));
    assert!(!sim.is_running());
}

#[test]
fn pause_freezes_current_instant() {
    let mut sim = Simulator::new(at(Weekday::MONDAY, 600));
    sim.play();
    sim.tick();
    sim.pause();
    let frozen = sim.instant();
    sim.tick();
    sim.tick();
    assert_eq!(sim.instant(), frozen);
    assert!(!sim.is_running());
}

#[test]
fn speed_change_applies_to_next_tick() {
    let mut sim = Simulator::new(at(Weekday::MONDAY, 0));
    sim.play();
    sim.tick();
    assert_eq!(sim.instant(), at(Weekday::MONDAY, 1));
    sim.set_speed(60);
    sim.tick();
    assert_eq!(sim.instant(), at(Weekday::MONDAY, 61));
}

#[test]
fn seek_allowed_in_both_states() {
    let mut sim = Simulator::new(at(Weekday::MONDAY, 0));
    sim.set_instant(Weekday::FRIDAY, TimeOfDay::from_minutes(1200).unwrap());
    assert_eq!(sim.instant(), at(Weekday::FRIDAY, 1200));

    sim.play();
    sim.set_instant(Weekday::SUNDAY, TimeOfDay::MIDNIGHT);
    assert_eq!(sim.instant(), at(Weekday::SUNDAY, 0));
    assert!(sim.is_running());
}

#[test]
fn observers_see_every_change() {
    let seen: Rc<RefCell<Vec<WeekInstant>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut sim = Simulator::new(at(Weekday::MONDAY, 100));
    sim.subscribe(move |instant| sink.borrow_mut().push(instant));
    // notification immédiate à l'abonnement
    assert_eq!(seen.borrow().as_slice(), &[at(Weekday::MONDAY, 100)]);

    sim.play();
    sim.tick();
    sim.set_instant(Weekday::WEDNESDAY, TimeOfDay::from_minutes(30).unwrap());
    sim.pause();

    let log = seen.borrow();
    assert_eq!(
        log.as_slice(),
        &[
            at(Weekday::MONDAY, 100),
            at(Weekday::MONDAY, 100), // play
            at(Weekday::MONDAY, 101), // tick
            at(Weekday::WEDNESDAY, 30),
            at(Weekday::WEDNESDAY, 30), // pause
        ]
    );
}

#[test]
fn reset_to_now_stops_the_clock() {
    let mut sim = Simulator::new(at(Weekday::MONDAY, 0));
    sim.play();
    sim.tick();
    sim.reset_to_now();
    assert!(!sim.is_running());
    // l'instant revient dans la semaine réelle, bornes incluses
    assert!(sim.instant().time.minutes() < 1440);
}
