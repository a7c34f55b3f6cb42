/*
 * The traffic policy, written down as data.
 *
 * Green is handed out round robin between east/west, north/south and the
 * pedestrian crossing, with an all-red buffer between any two of them. At
 * the start buffer `AllRed` a pedestrian request wins over waiting cars. The
 * direction buffers `AllRedWest` and `AllRedSouth` only start the walk when
 * no car is waiting at all. The walk sequence is steady walk, two flashes,
 * and back to an all-red buffer that dispatches to whichever cars are
 * waiting.
 *
 * A green stays green for as long as nobody else is asking for the crossing.
 * As soon as the other direction or a pedestrian is waiting, it goes through
 * yellow to all-red.
 */

use core::array;

use enum_ordinalize::Ordinalize;

use super::{State, StateId};
use StateId::*;
use crate::config::{BUFFER_HOLD, FLASH_HOLD, GREEN_HOLD, WALK_HOLD, YELLOW_HOLD};
use crate::error::TableError;
use crate::lights::{InputSample, PedestrianLights, VehicleLights};

const STATE_COUNT: usize = StateId::VARIANT_COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTable {
    states: [State; STATE_COUNT],
}

impl StateTable {
    /*
     * Check a table before it is allowed anywhere near the lights. Rows must
     * be listed in `StateId` order so lookups can index straight in.
     */
    pub fn new(states: [State; STATE_COUNT]) -> Result<Self, TableError> {
        for (position, state) in states.iter().enumerate() {
            if state.id.ordinal() != position {
                return Err(TableError::OutOfOrder {
                    position,
                    found: state.id,
                });
            }
            validate(state)?;
        }
        Ok(StateTable { states })
    }

    pub fn standard() -> Result<Self, TableError> {
        Self::new(STANDARD)
    }

    /*
     * Build a table from rows that refer to each other by plain index, the
     * way a table is laid out in flash on the board. Row `i` describes the
     * state whose ordinal is `i`.
     */
    pub fn from_raw(rows: &[RawState<'_>]) -> Result<Self, TableError> {
        if rows.len() != STATE_COUNT {
            return Err(TableError::WrongStateCount {
                expected: STATE_COUNT,
                found: rows.len(),
            });
        }
        for (state, row) in rows.iter().enumerate() {
            if row.next.len() != InputSample::COUNT {
                return Err(TableError::MissingTransitions {
                    state,
                    found: row.next.len(),
                });
            }
            if let Some((input, &target)) =
                row.next.iter().enumerate().find(|(_, t)| **t >= STATE_COUNT)
            {
                return Err(TableError::DanglingTransition {
                    state,
                    input,
                    target,
                });
            }
        }

        // Every index has been checked above.
        let states = array::from_fn(|i| {
            let row = &rows[i];
            State {
                id: StateId::VARIANTS[i],
                vehicle: VehicleLights::from_bits(row.vehicle),
                pedestrian: PedestrianLights::from_bits(row.pedestrian),
                hold: row.hold,
                next: array::from_fn(|input| StateId::VARIANTS[row.next[input]]),
            }
        });
        Self::new(states)
    }

    pub fn get(&self, id: StateId) -> &State {
        &self.states[id.ordinal()]
    }

    pub fn next(&self, id: StateId, input: InputSample) -> StateId {
        self.get(id).next_for(input)
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    /*
     * Every state that some sequence of inputs can lead to from `start`,
     * indexed by ordinal. `start` itself is always included.
     */
    pub fn reachable_from(&self, start: StateId) -> [bool; STATE_COUNT] {
        let mut seen = [false; STATE_COUNT];
        let mut stack = [start; STATE_COUNT];
        let mut depth = 1;
        seen[start.ordinal()] = true;

        while depth > 0 {
            depth -= 1;
            let state = self.get(stack[depth]);
            for &next in &state.next {
                if !seen[next.ordinal()] {
                    seen[next.ordinal()] = true;
                    stack[depth] = next;
                    depth += 1;
                }
            }
        }
        seen
    }
}

fn validate(state: &State) -> Result<(), TableError> {
    let id = state.id;
    if state.hold == 0 {
        return Err(TableError::ZeroHold { state: id });
    }
    if !state.vehicle.is_valid() {
        return Err(TableError::VehicleMaskOutOfRange {
            state: id,
            bits: state.vehicle.bits(),
        });
    }
    if !state.pedestrian.is_valid() {
        return Err(TableError::PedestrianMaskOutOfRange {
            state: id,
            bits: state.pedestrian.bits(),
        });
    }
    let vehicle = state.vehicle.bits();
    if vehicle & VehicleLights::NS_GREEN != 0 && vehicle & VehicleLights::EW_GREEN != 0 {
        return Err(TableError::ConflictingGreens { state: id });
    }
    if state.vehicle.any_green() && state.pedestrian.walk() {
        return Err(TableError::GreenWithWalk { state: id });
    }
    Ok(())
}

/// A table row with its transitions given as state ordinals.
#[derive(Debug, Clone, Copy)]
pub struct RawState<'a> {
    pub vehicle: u8,
    pub pedestrian: u8,
    pub hold: u32,
    pub next: &'a [usize],
}

const RED_RED: VehicleLights =
    VehicleLights::from_bits(VehicleLights::NS_RED | VehicleLights::EW_RED);
const SOUTH_GREEN: VehicleLights =
    VehicleLights::from_bits(VehicleLights::NS_GREEN | VehicleLights::EW_RED);
const SOUTH_YELLOW: VehicleLights =
    VehicleLights::from_bits(VehicleLights::NS_YELLOW | VehicleLights::EW_RED);
const WEST_GREEN: VehicleLights =
    VehicleLights::from_bits(VehicleLights::EW_GREEN | VehicleLights::NS_RED);
const WEST_YELLOW: VehicleLights =
    VehicleLights::from_bits(VehicleLights::EW_YELLOW | VehicleLights::NS_RED);

const DONT_WALK: PedestrianLights = PedestrianLights::from_bits(PedestrianLights::DONT_WALK);
const WALK: PedestrianLights = PedestrianLights::from_bits(PedestrianLights::WALK);
const DARK: PedestrianLights = PedestrianLights::from_bits(0);

const fn state(
    id: StateId,
    vehicle: VehicleLights,
    pedestrian: PedestrianLights,
    hold: u32,
    next: [StateId; InputSample::COUNT],
) -> State {
    State {
        id,
        vehicle,
        pedestrian,
        hold,
        next,
    }
}

// Columns are indexed by the input sample: bit0 E/W car, bit1 N/S car,
// bit2 pedestrian.
#[rustfmt::skip]
pub const STANDARD: [State; STATE_COUNT] = [
    state(AllRed, RED_RED, DONT_WALK, BUFFER_HOLD,
        [AllRed, WestGreen, SouthGreen, SouthGreen, Walk, Walk, Walk, Walk]),
    state(Walk, RED_RED, WALK, WALK_HOLD,
        [Walk, WalkFlash1a, WalkFlash1a, WalkFlash1a, Walk, WalkFlash1a, WalkFlash1a, WalkFlash1a]),
    state(WalkFlash1a, RED_RED, DARK, FLASH_HOLD, [WalkFlash1b; 8]),
    state(WalkFlash1b, RED_RED, WALK, FLASH_HOLD, [WalkFlash2a; 8]),
    state(WalkFlash2a, RED_RED, DARK, FLASH_HOLD, [WalkFlash2b; 8]),
    state(WalkFlash2b, RED_RED, WALK, FLASH_HOLD,
        [AllRed, AllRed, AllRed, AllRed, AllRed, AllRedWest, AllRedSouth, AllRedSouth]),
    state(SouthStartYellow, SOUTH_YELLOW, DONT_WALK, YELLOW_HOLD, [SouthGreen; 8]),
    state(SouthGreen, SOUTH_GREEN, DONT_WALK, GREEN_HOLD,
        [SouthGreen, SouthStopYellow, SouthGreen, SouthStopYellow,
         SouthStopYellow, SouthStopYellow, SouthStopYellow, SouthStopYellow]),
    state(SouthStopYellow, SOUTH_YELLOW, DONT_WALK, YELLOW_HOLD,
        [AllRed, AllRedWest, AllRedSouth, AllRedWest, AllRed, AllRed, AllRed, AllRedWest]),
    state(WestStartYellow, WEST_YELLOW, DONT_WALK, YELLOW_HOLD, [WestGreen; 8]),
    state(WestGreen, WEST_GREEN, DONT_WALK, GREEN_HOLD,
        [WestGreen, WestGreen, WestStopYellow, WestStopYellow,
         WestStopYellow, WestStopYellow, WestStopYellow, WestStopYellow]),
    state(WestStopYellow, WEST_YELLOW, DONT_WALK, YELLOW_HOLD,
        [AllRed, AllRedWest, AllRedSouth, AllRedSouth, AllRed, AllRed, AllRed, AllRed]),
    state(AllRedWest, RED_RED, DONT_WALK, BUFFER_HOLD,
        [AllRedWest, WestGreen, SouthGreen, WestGreen, Walk, WestGreen, WestGreen, WestGreen]),
    state(AllRedSouth, RED_RED, DONT_WALK, BUFFER_HOLD,
        [AllRedSouth, WestGreen, SouthGreen, SouthGreen, Walk, SouthGreen, SouthGreen, SouthGreen]),
];
