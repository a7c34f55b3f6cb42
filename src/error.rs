/*
 * Configuration defects in a state table.
 *
 * These are the only errors the controller knows about. They are found while
 * the table is built, before any light is driven; once the loop runs there is
 * nothing left that can fail.
 */

use core::fmt;

use crate::trafficlight::StateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A raw table did not have exactly one row per state.
    WrongStateCount { expected: usize, found: usize },
    /// A typed table listed its rows in a different order than `StateId`.
    OutOfOrder { position: usize, found: StateId },
    /// A row does not have one transition for every input sample.
    MissingTransitions { state: usize, found: usize },
    /// A transition names a state that does not exist.
    DanglingTransition { state: usize, input: usize, target: usize },
    ZeroHold { state: StateId },
    VehicleMaskOutOfRange { state: StateId, bits: u8 },
    PedestrianMaskOutOfRange { state: StateId, bits: u8 },
    /// Both directions would be green at the same time.
    ConflictingGreens { state: StateId },
    /// A vehicle green is lit together with the walk light.
    GreenWithWalk { state: StateId },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongStateCount { expected, found } => {
                write!(f, "expected {expected} states, found {found}")
            }
            Self::OutOfOrder { position, found } => {
                write!(f, "row {position} holds state {}", found.name())
            }
            Self::MissingTransitions { state, found } => {
                write!(f, "state {state} has {found} transitions")
            }
            Self::DanglingTransition {
                state,
                input,
                target,
            } => write!(f, "state {state} input {input:#05b} goes to unknown state {target}"),
            Self::ZeroHold { state } => write!(f, "{} has zero hold time", state.name()),
            Self::VehicleMaskOutOfRange { state, bits } => {
                write!(f, "{} drives vehicle bits {bits:#04x}", state.name())
            }
            Self::PedestrianMaskOutOfRange { state, bits } => {
                write!(f, "{} drives pedestrian bits {bits:#04x}", state.name())
            }
            Self::ConflictingGreens { state } => {
                write!(f, "{} shows green in both directions", state.name())
            }
            Self::GreenWithWalk { state } => {
                write!(f, "{} shows a vehicle green during walk", state.name())
            }
        }
    }
}

impl core::error::Error for TableError {}
