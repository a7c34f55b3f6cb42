// Walks the intersection through fixed input scripts and checks the lights.

mod common;

use common::{Event, traffic_light};
use table_traffic_light::{InputSample, StateId, StateTable, Transition};

const NONE: u8 = 0b000;
const EAST_WEST: u8 = 0b001;
const NORTH_SOUTH: u8 = 0b010;
const PEDESTRIAN: u8 = 0b100;

fn sample(bits: u8) -> InputSample {
    InputSample::from_bits(bits)
}

fn visited(transitions: &[Transition]) -> Vec<StateId> {
    transitions.iter().map(|t| t.to).collect()
}

#[test]
fn idle_intersection_stays_all_red() {
    let table = StateTable::standard().unwrap();
    let (mut light, _) = traffic_light(&table, &[], NONE);

    for _ in 0..20 {
        assert_eq!(light.step().to, StateId::AllRed);
    }
    assert!(
        light
            .ports()
            .outputs()
            .iter()
            .all(|&outputs| outputs == (0x24, 0x02))
    );
}

#[test]
fn north_south_car_gets_green() {
    let table = StateTable::standard().unwrap();
    let (mut light, _) = traffic_light(&table, &[NORTH_SOUTH], NONE);

    assert_eq!(light.step().to, StateId::SouthGreen);
    light.step();
    assert_eq!(light.ports().outputs()[1], (0x21, 0x02));
}

#[test]
fn east_west_car_gets_green() {
    let table = StateTable::standard().unwrap();
    let (mut light, _) = traffic_light(&table, &[EAST_WEST], NONE);

    assert_eq!(light.step().to, StateId::WestGreen);
    light.step();
    assert_eq!(light.ports().outputs()[1], (0x0C, 0x02));
}

#[test]
fn green_holds_without_competing_requests() {
    let table = StateTable::standard().unwrap();

    let (mut light, _) = traffic_light(&table, &[NORTH_SOUTH], NONE);
    light.step();
    for _ in 0..50 {
        assert_eq!(light.step().to, StateId::SouthGreen);
    }
    light.ports_mut().set_fallback(NORTH_SOUTH);
    for _ in 0..50 {
        assert_eq!(light.step().to, StateId::SouthGreen);
    }

    let (mut light, _) = traffic_light(&table, &[EAST_WEST], NONE);
    light.step();
    for _ in 0..50 {
        assert_eq!(light.step().to, StateId::WestGreen);
    }
    light.ports_mut().set_fallback(EAST_WEST);
    for _ in 0..50 {
        assert_eq!(light.step().to, StateId::WestGreen);
    }
}

#[test]
fn opposing_car_hands_over_through_yellow_and_all_red() {
    let table = StateTable::standard().unwrap();
    let (mut light, _) = traffic_light(
        &table,
        &[NORTH_SOUTH, EAST_WEST, EAST_WEST, EAST_WEST, NORTH_SOUTH],
        NONE,
    );

    let path: Vec<_> = (0..5).map(|_| light.step()).collect();
    assert_eq!(
        visited(&path),
        [
            StateId::SouthGreen,
            StateId::SouthStopYellow,
            StateId::AllRedWest,
            StateId::WestGreen,
            StateId::WestStopYellow,
        ]
    );

    let outputs = light.ports().outputs();
    assert_eq!(outputs[2], (0x22, 0x02));
    assert_eq!(outputs[3], (0x24, 0x02));
    assert_eq!(outputs[4], (0x0C, 0x02));
}

#[test]
fn pedestrian_request_interrupts_green() {
    let table = StateTable::standard().unwrap();
    let (mut light, _) = traffic_light(&table, &[EAST_WEST], PEDESTRIAN);

    let path: Vec<_> = (0..4).map(|_| light.step()).collect();
    assert_eq!(
        visited(&path),
        [
            StateId::WestGreen,
            StateId::WestStopYellow,
            StateId::AllRed,
            StateId::Walk,
        ]
    );
}

#[test]
fn pedestrian_wins_over_cars_only_at_the_start_buffer() {
    let table = StateTable::standard().unwrap();
    for input in [PEDESTRIAN, 0b101, 0b110, 0b111] {
        assert_eq!(table.next(StateId::AllRed, sample(input)), StateId::Walk);
    }

    // The direction buffers serve waiting cars first.
    for buffer in [StateId::AllRedWest, StateId::AllRedSouth] {
        assert_eq!(table.next(buffer, sample(PEDESTRIAN)), StateId::Walk);
        for input in [0b101, 0b110, 0b111] {
            assert_ne!(table.next(buffer, sample(input)), StateId::Walk);
        }
    }
    assert_eq!(
        table.next(StateId::AllRedWest, sample(0b111)),
        StateId::WestGreen
    );
    assert_eq!(
        table.next(StateId::AllRedSouth, sample(0b111)),
        StateId::SouthGreen
    );
}

#[test]
fn walk_is_held_until_a_car_arrives() {
    let table = StateTable::standard().unwrap();
    for input in [NONE, PEDESTRIAN] {
        assert_eq!(table.next(StateId::Walk, sample(input)), StateId::Walk);
    }
    for input in [EAST_WEST, NORTH_SOUTH, 0b011, 0b101, 0b110, 0b111] {
        assert_eq!(
            table.next(StateId::Walk, sample(input)),
            StateId::WalkFlash1a
        );
    }
}

#[test]
fn clearing_sequence_ignores_inputs() {
    let table = StateTable::standard().unwrap();
    let (mut light, _) = traffic_light(
        &table,
        &[PEDESTRIAN, EAST_WEST, 0b111, NORTH_SOUTH, 0b101, NONE],
        NONE,
    );

    let path: Vec<_> = (0..6).map(|_| light.step()).collect();
    assert_eq!(
        visited(&path),
        [
            StateId::Walk,
            StateId::WalkFlash1a,
            StateId::WalkFlash1b,
            StateId::WalkFlash2a,
            StateId::WalkFlash2b,
            StateId::AllRed,
        ]
    );

    let pedestrian: Vec<u8> = light.ports().outputs()[1..]
        .iter()
        .map(|&(_, pedestrian)| pedestrian)
        .collect();
    assert_eq!(pedestrian, [0x08, 0x00, 0x08, 0x00, 0x08]);

    for flash in [
        StateId::WalkFlash1a,
        StateId::WalkFlash1b,
        StateId::WalkFlash2a,
    ] {
        let row = table.get(flash);
        assert!(row.next.iter().all(|&next| next == row.next[0]));
    }
}

#[test]
fn clearing_sequence_dispatches_to_waiting_cars() {
    let table = StateTable::standard().unwrap();
    assert_eq!(
        table.next(StateId::WalkFlash2b, sample(0b101)),
        StateId::AllRedWest
    );
    assert_eq!(
        table.next(StateId::WalkFlash2b, sample(0b110)),
        StateId::AllRedSouth
    );
    assert_eq!(
        table.next(StateId::WalkFlash2b, sample(0b111)),
        StateId::AllRedSouth
    );
    assert_eq!(
        table.next(StateId::WalkFlash2b, sample(EAST_WEST)),
        StateId::AllRed
    );
}

#[test]
fn pedestrian_cycle_takes_the_sum_of_its_holds() {
    let table = StateTable::standard().unwrap();
    let (mut light, clock) = traffic_light(
        &table,
        &[PEDESTRIAN, EAST_WEST, NONE, NONE, NONE, NONE],
        NONE,
    );

    for _ in 0..6 {
        light.step();
    }

    // all-red 50, walk 70, four flashes of 50.
    assert_eq!(clock.quanta(), 320);
    assert_eq!(clock.millis(), 3_200);
}

#[test]
fn outputs_are_written_before_the_hold_and_inputs_read_after() {
    let table = StateTable::standard().unwrap();
    let (mut light, _) = traffic_light(&table, &[NORTH_SOUTH, NONE], NONE);

    light.step();
    light.step();

    assert_eq!(
        light.ports().events,
        [
            Event::Vehicle { at: 0, bits: 0x24 },
            Event::Pedestrian { at: 0, bits: 0x02 },
            Event::Read { at: 50, bits: NORTH_SOUTH },
            Event::Vehicle { at: 50, bits: 0x21 },
            Event::Pedestrian { at: 50, bits: 0x02 },
            Event::Read { at: 120, bits: NONE },
        ]
    );
}

#[test]
fn start_yellows_only_lead_to_their_green() {
    // Nothing enters these two states; their rows are kept as wired.
    let table = StateTable::standard().unwrap();
    for input in 0..8u8 {
        assert_eq!(
            table.next(StateId::SouthStartYellow, sample(input)),
            StateId::SouthGreen
        );
        assert_eq!(
            table.next(StateId::WestStartYellow, sample(input)),
            StateId::WestGreen
        );
    }
}
