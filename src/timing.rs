/*
 * Holding a state for a number of quanta.
 *
 * A wait is nothing more than the one-quantum delay repeated. It cannot be
 * cut short: once the lights are set, they stay that way for the full hold
 * time. Keeping the actual delay behind a trait lets the state machine be
 * driven by a simulated clock on the host.
 */

use embedded_hal::delay::DelayNs;

use crate::config::QUANTUM_MS;

pub trait QuantumTimer {
    /// Block for exactly one quantum.
    fn wait_quantum(&mut self);

    fn wait(&mut self, quanta: u32) {
        for _ in 0..quanta {
            self.wait_quantum();
        }
    }
}

/// A quantum timer on top of any blocking HAL delay.
pub struct DelayTimer<D> {
    delay: D,
}

impl<D: DelayNs> DelayTimer<D> {
    pub fn new(delay: D) -> Self {
        DelayTimer { delay }
    }
}

impl<D: DelayNs> QuantumTimer for DelayTimer<D> {
    fn wait_quantum(&mut self) {
        self.delay.delay_ms(QUANTUM_MS);
    }
}
