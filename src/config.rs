/*
 * Compile-time tuning for the intersection. There is deliberately no way to
 * change any of this at run time.
 */

use log::LevelFilter;

/// Length of one timing quantum. Every hold time is a whole number of these.
pub const QUANTUM_MS: u32 = 10;

// Hold times, in quanta.
pub const BUFFER_HOLD: u32 = 50;
pub const FLASH_HOLD: u32 = 50;
pub const YELLOW_HOLD: u32 = 50;
pub const GREEN_HOLD: u32 = 70;
pub const WALK_HOLD: u32 = 70;

/*
 * Sensor polarity, in `InputSample` bit order (E/W car, N/S car, pedestrian).
 * The pedestrian request is the on-board push button, which pulls its pin low
 * when pressed.
 */
pub const SENSOR_ACTIVE_LOWS: [bool; 3] = [false, false, true];

// Transitions are logged at debug, lamp writes at trace.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;
