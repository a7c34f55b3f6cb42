/*
 * The I/O boundary for the traffic lights.
 *
 * `LightPorts` is everything the state machine needs from the hardware: set
 * the vehicle lamps, set the pedestrian lamps, read the sensors. The
 * intention is for this module to be the only part of the program that
 * touches pins. `GpioPorts` implements it on top of `embedded-hal` pins that
 * the HAL has already configured; the tests implement it in memory.
 *
 * Writes take effect before they return and a read is a plain snapshot of
 * the sensor pins. Nothing is debounced or queued.
 */

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::trace;

use crate::lights::{InputSample, PedestrianLights, VehicleLights};

pub trait LightPorts {
    fn write_vehicle_lights(&mut self, lights: VehicleLights);
    fn write_pedestrian_lights(&mut self, lights: PedestrianLights);
    fn read_inputs(&mut self) -> InputSample;
}

/*
 * Pins are listed in bit order: `vehicle[n]` drives bit n of the vehicle mask
 * and `sensors[n]` feeds bit n of the input sample. The two pedestrian pins
 * are don't walk (bit 1) and walk (bit 3).
 *
 * Only infallible pins are accepted. A write to a lamp has no way to report
 * failure to the state machine, so the types make sure there is none.
 */
pub struct GpioPorts<O, I> {
    vehicle: [O; 6],
    pedestrian: [O; 2],
    sensors: [I; 3],
    sensor_active_lows: [bool; 3],
}

impl<O, I> GpioPorts<O, I>
where
    O: OutputPin<Error = Infallible>,
    I: InputPin<Error = Infallible>,
{
    pub fn new(
        vehicle: [O; 6],
        pedestrian: [O; 2],
        sensors: [I; 3],
        sensor_active_lows: [bool; 3],
    ) -> Self {
        GpioPorts {
            vehicle,
            pedestrian,
            sensors,
            sensor_active_lows,
        }
    }
}

fn light<O: OutputPin<Error = Infallible>>(output: &mut O, on: bool) {
    match output.set_state(PinState::from(on)) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

impl<O, I> LightPorts for GpioPorts<O, I>
where
    O: OutputPin<Error = Infallible>,
    I: InputPin<Error = Infallible>,
{
    fn write_vehicle_lights(&mut self, lights: VehicleLights) {
        trace!("vehicle lights {:#04x}", lights.bits());
        for (bit, output) in self.vehicle.iter_mut().enumerate() {
            light(output, lights.bits() & (1 << bit) != 0);
        }
    }

    fn write_pedestrian_lights(&mut self, lights: PedestrianLights) {
        trace!("pedestrian lights {:#04x}", lights.bits());
        let [dont_walk, walk] = &mut self.pedestrian;
        light(dont_walk, lights.dont_walk());
        light(walk, lights.walk());
    }

    fn read_inputs(&mut self) -> InputSample {
        let mut bits = 0;
        for (bit, (sensor, active_low)) in self
            .sensors
            .iter_mut()
            .zip(self.sensor_active_lows)
            .enumerate()
        {
            let high = match sensor.is_high() {
                Ok(high) => high,
                Err(never) => match never {},
            };
            if high != active_low {
                bits |= 1 << bit;
            }
        }
        InputSample::from_bits(bits)
    }
}
