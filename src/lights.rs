/*
 * Bit encodings for everything that crosses the boundary between the state
 * machine and the hardware.
 *
 * The layouts are fixed by the wiring of the intersection, so they are kept
 * exactly as they appear on the port pins:
 *
 *   vehicle lights:    bit0 N/S green, bit1 N/S yellow, bit2 N/S red,
 *                      bit3 E/W green, bit4 E/W yellow, bit5 E/W red
 *   pedestrian lights: bit1 don't walk, bit3 walk
 *   sensor inputs:     bit0 E/W car, bit1 N/S car, bit2 pedestrian
 */

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Leg {
    NorthSouth,
    EastWest,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct VehicleLights(u8);

impl VehicleLights {
    pub const NS_GREEN: u8 = 1 << 0;
    pub const NS_YELLOW: u8 = 1 << 1;
    pub const NS_RED: u8 = 1 << 2;
    pub const EW_GREEN: u8 = 1 << 3;
    pub const EW_YELLOW: u8 = 1 << 4;
    pub const EW_RED: u8 = 1 << 5;

    pub const MASK: u8 = 0x3F;

    pub const fn from_bits(bits: u8) -> Self {
        VehicleLights(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 & !Self::MASK == 0
    }

    // Each leg occupies three adjacent bits: green, yellow, red.
    const fn shift(leg: Leg) -> u8 {
        match leg {
            Leg::NorthSouth => 0,
            Leg::EastWest => 3,
        }
    }

    pub const fn green(self, leg: Leg) -> bool {
        (self.0 >> Self::shift(leg)) & 0b001 != 0
    }

    pub const fn yellow(self, leg: Leg) -> bool {
        (self.0 >> Self::shift(leg)) & 0b010 != 0
    }

    pub const fn red(self, leg: Leg) -> bool {
        (self.0 >> Self::shift(leg)) & 0b100 != 0
    }

    pub const fn any_green(self) -> bool {
        self.green(Leg::NorthSouth) || self.green(Leg::EastWest)
    }

    /*
     * An all-red buffer: both legs show red and nothing else, so neither
     * direction has right of way.
     */
    pub const fn is_all_red(self) -> bool {
        self.0 == Self::NS_RED | Self::EW_RED
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct PedestrianLights(u8);

impl PedestrianLights {
    pub const DONT_WALK: u8 = 1 << 1;
    pub const WALK: u8 = 1 << 3;

    // Bits 0 and 2 sit between the two lamps on the port and stay low.
    pub const MASK: u8 = Self::DONT_WALK | Self::WALK;

    pub const fn from_bits(bits: u8) -> Self {
        PedestrianLights(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 & !Self::MASK == 0
    }

    pub const fn walk(self) -> bool {
        self.0 & Self::WALK != 0
    }

    pub const fn dont_walk(self) -> bool {
        self.0 & Self::DONT_WALK != 0
    }
}

/// One snapshot of the three sensors. Only the low three bits are ever kept.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct InputSample(u8);

impl InputSample {
    pub const EAST_WEST_CAR: u8 = 1 << 0;
    pub const NORTH_SOUTH_CAR: u8 = 1 << 1;
    pub const PEDESTRIAN: u8 = 1 << 2;

    /// Number of distinct samples, and so the width of every transition row.
    pub const COUNT: usize = 8;

    pub const NONE: InputSample = InputSample(0);

    pub const fn from_bits(bits: u8) -> Self {
        InputSample(bits & 0b111)
    }

    pub const fn from_sensors(east_west_car: bool, north_south_car: bool, pedestrian: bool) -> Self {
        InputSample(
            (east_west_car as u8) | (north_south_car as u8) << 1 | (pedestrian as u8) << 2,
        )
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn east_west_car(self) -> bool {
        self.0 & Self::EAST_WEST_CAR != 0
    }

    pub const fn north_south_car(self) -> bool {
        self.0 & Self::NORTH_SOUTH_CAR != 0
    }

    pub const fn pedestrian(self) -> bool {
        self.0 & Self::PEDESTRIAN != 0
    }

    pub fn all() -> impl Iterator<Item = InputSample> {
        (0..Self::COUNT as u8).map(InputSample)
    }
}
