pub mod table;

use enum_ordinalize::Ordinalize;
use log::{debug, info, trace};

use crate::io::LightPorts;
use crate::lights::{InputSample, PedestrianLights, VehicleLights};
use crate::timing::QuantumTimer;
use table::StateTable;

/*
 * Every state the intersection can be in. "South" names the north/south
 * direction and "West" the east/west direction.
 *
 * The three all-red states differ only in where they send the lights next:
 * `AllRed` is the start state and hands out the first green, `AllRedWest` and
 * `AllRedSouth` are the buffers entered on the way back from a green or from
 * the pedestrian phase and favour the named direction.
 */
#[derive(Ordinalize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum StateId {
    AllRed,
    Walk,
    WalkFlash1a,
    WalkFlash1b,
    WalkFlash2a,
    WalkFlash2b,
    // Nothing ever transitions into the two start-yellow states. They are
    // kept so the table stays the same shape as the one wired on the board.
    SouthStartYellow,
    SouthGreen,
    SouthStopYellow,
    WestStartYellow,
    WestGreen,
    WestStopYellow,
    AllRedWest,
    AllRedSouth,
}

impl StateId {
    pub const START: StateId = StateId::AllRed;

    pub fn name(self) -> &'static str {
        match self {
            StateId::AllRed => "all-red",
            StateId::Walk => "walk",
            StateId::WalkFlash1a => "walk-flash-1a",
            StateId::WalkFlash1b => "walk-flash-1b",
            StateId::WalkFlash2a => "walk-flash-2a",
            StateId::WalkFlash2b => "walk-flash-2b",
            StateId::SouthStartYellow => "south-start-yellow",
            StateId::SouthGreen => "south-green",
            StateId::SouthStopYellow => "south-stop-yellow",
            StateId::WestStartYellow => "west-start-yellow",
            StateId::WestGreen => "west-green",
            StateId::WestStopYellow => "west-stop-yellow",
            StateId::AllRedWest => "all-red-west",
            StateId::AllRedSouth => "all-red-south",
        }
    }
}

/*
 * One row of the state table. The outputs belong to the state alone, which is
 * what makes this a Moore machine: the input only picks the next row.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub id: StateId,
    pub vehicle: VehicleLights,
    pub pedestrian: PedestrianLights,
    /// Hold time in quanta.
    pub hold: u32,
    pub next: [StateId; InputSample::COUNT],
}

impl State {
    pub fn next_for(&self, input: InputSample) -> StateId {
        self.next[input.index()]
    }

    // Widened so no `u32` hold can overflow.
    pub const fn hold_ms(&self) -> u64 {
        self.hold as u64 * crate::config::QUANTUM_MS as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub input: InputSample,
    pub to: StateId,
}

/*
 * The control loop. It owns the port and the timer and is the only thing
 * that ever changes the current state; the table is only borrowed.
 */
pub struct TrafficLight<'t, P, T> {
    table: &'t StateTable,
    ports: P,
    timer: T,
    state: StateId,
}

impl<'t, P: LightPorts, T: QuantumTimer> TrafficLight<'t, P, T> {
    pub fn new(table: &'t StateTable, ports: P, timer: T) -> Self {
        TrafficLight {
            table,
            ports,
            timer,
            state: StateId::START,
        }
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn ports(&self) -> &P {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut P {
        &mut self.ports
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /*
     * One full cycle: show the outputs, hold them, then sample and move on.
     * The inputs are read only after the hold has elapsed, so the lights can
     * never change before their time is up.
     */
    pub fn step(&mut self) -> Transition {
        let state = self.table.get(self.state);

        trace!(
            "{}: vehicle {:#04x} pedestrian {:#04x}",
            state.id.name(),
            state.vehicle.bits(),
            state.pedestrian.bits()
        );
        self.ports.write_vehicle_lights(state.vehicle);
        self.ports.write_pedestrian_lights(state.pedestrian);

        self.timer.wait(state.hold);

        let input = self.ports.read_inputs();
        let next = state.next_for(input);
        debug!(
            "{} --{:#05b}--> {}",
            state.id.name(),
            input.bits(),
            next.name()
        );

        self.state = next;
        Transition {
            from: state.id,
            input,
            to: next,
        }
    }

    pub fn run(mut self) -> ! {
        info!(
            "traffic light starting in {} ({} states)",
            self.state.name(),
            StateId::VARIANT_COUNT
        );
        loop {
            self.step();
        }
    }
}
