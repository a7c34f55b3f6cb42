/*
 * A traffic light with a pedestrian crossing, run as a table-driven Moore
 * machine.
 *
 * Everything here is free of hardware: the firmware in `main.rs` binds the
 * ports and the timer to real pins and a real delay, the tests bind them to
 * fakes. This keeps the state machine testable on the host.
 */

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod io;
pub mod lights;
pub mod serial_log;
pub mod timing;
pub mod trafficlight;

pub use error::TableError;
pub use io::{GpioPorts, LightPorts};
pub use lights::{InputSample, Leg, PedestrianLights, VehicleLights};
pub use serial_log::SerialLogger;
pub use timing::{DelayTimer, QuantumTimer};
pub use trafficlight::table::{RawState, StateTable};
pub use trafficlight::{State, StateId, TrafficLight, Transition};
