// Shared fakes for driving the state machine on the host.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use table_traffic_light::{
    InputSample, LightPorts, PedestrianLights, QuantumTimer, StateTable, TrafficLight,
    VehicleLights,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Vehicle { at: u64, bits: u8 },
    Pedestrian { at: u64, bits: u8 },
    Read { at: u64, bits: u8 },
}

/// A clock that only moves when the state machine waits.
#[derive(Clone, Default)]
pub struct SimClock {
    quanta: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn quanta(&self) -> u64 {
        self.quanta.get()
    }

    pub fn millis(&self) -> u64 {
        self.quanta() * u64::from(table_traffic_light::config::QUANTUM_MS)
    }
}

impl QuantumTimer for SimClock {
    fn wait_quantum(&mut self) {
        self.quanta.set(self.quanta.get() + 1);
    }
}

/// Records every write and answers reads from a script, then from `fallback`.
pub struct FakePorts {
    clock: SimClock,
    script: VecDeque<u8>,
    fallback: u8,
    pub events: Vec<Event>,
}

impl FakePorts {
    pub fn new(clock: SimClock, script: &[u8], fallback: u8) -> Self {
        FakePorts {
            clock,
            script: script.iter().copied().collect(),
            fallback,
            events: Vec::new(),
        }
    }

    pub fn push_inputs(&mut self, inputs: &[u8]) {
        self.script.extend(inputs);
    }

    pub fn set_fallback(&mut self, fallback: u8) {
        self.fallback = fallback;
    }

    /// Pairs of (vehicle, pedestrian) masks in the order they were written.
    pub fn outputs(&self) -> Vec<(u8, u8)> {
        let mut outputs = Vec::new();
        let mut vehicle = None;
        for event in &self.events {
            match *event {
                Event::Vehicle { bits, .. } => vehicle = Some(bits),
                Event::Pedestrian { bits, .. } => {
                    outputs.push((vehicle.take().expect("vehicle written first"), bits))
                }
                Event::Read { .. } => {}
            }
        }
        outputs
    }
}

impl LightPorts for FakePorts {
    fn write_vehicle_lights(&mut self, lights: VehicleLights) {
        self.events.push(Event::Vehicle {
            at: self.clock.quanta(),
            bits: lights.bits(),
        });
    }

    fn write_pedestrian_lights(&mut self, lights: PedestrianLights) {
        self.events.push(Event::Pedestrian {
            at: self.clock.quanta(),
            bits: lights.bits(),
        });
    }

    fn read_inputs(&mut self) -> InputSample {
        let bits = self.script.pop_front().unwrap_or(self.fallback);
        self.events.push(Event::Read {
            at: self.clock.quanta(),
            bits,
        });
        InputSample::from_bits(bits)
    }
}

pub fn traffic_light<'t>(
    table: &'t StateTable,
    script: &[u8],
    fallback: u8,
) -> (TrafficLight<'t, FakePorts, SimClock>, SimClock) {
    let clock = SimClock::default();
    let ports = FakePorts::new(clock.clone(), script, fallback);
    (TrafficLight::new(table, ports, clock.clone()), clock)
}
