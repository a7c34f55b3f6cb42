#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

/*
 * Firmware entry point for the DESPI-M02 (STM32F103VE).
 *
 * Wiring, in the bit order the state machine uses:
 *
 *   N/S green PE0, N/S amber PB8, N/S red PB6
 *   E/W green PB7, E/W amber PB9, E/W red PE1
 *   don't walk PC6, walk PC7
 *   E/W car PA4, N/S car PA5, pedestrian button PE11 (on-board, active low)
 *
 * Log lines go out on USART1 TX (PA9) at 115200 baud.
 */

#[cfg(target_os = "none")]
mod firmware {
    use embassy_executor::Spawner;
    use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
    use embassy_stm32::mode::Blocking;
    use embassy_stm32::usart::{Config, UartTx};
    use embassy_time::Delay;
    use panic_halt as _;

    use table_traffic_light::config::{LOG_LEVEL, SENSOR_ACTIVE_LOWS};
    use table_traffic_light::{DelayTimer, GpioPorts, SerialLogger, StateTable, TrafficLight};

    struct Console(UartTx<'static, Blocking>);

    impl core::fmt::Write for Console {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            self.0
                .blocking_write(s.as_bytes())
                .map_err(|_| core::fmt::Error)
        }
    }

    static LOGGER: SerialLogger<Console> = SerialLogger::new(LOG_LEVEL);

    #[embassy_executor::main]
    async fn main(_spawner: Spawner) {
        let peripherals = embassy_stm32::init(Default::default());

        let console = UartTx::new_blocking(peripherals.USART1, peripherals.PA9, Config::default())
            .unwrap();
        LOGGER.attach(Console(console));
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LOGGER.level());

        // A broken table halts here, before any lamp is switched on.
        let table = StateTable::standard().unwrap();

        let vehicle: [Output; 6] = [
            Output::new(peripherals.PE0, Level::Low, Speed::Low),
            Output::new(peripherals.PB8, Level::Low, Speed::Low),
            Output::new(peripherals.PB6, Level::High, Speed::Low),
            Output::new(peripherals.PB7, Level::Low, Speed::Low),
            Output::new(peripherals.PB9, Level::Low, Speed::Low),
            Output::new(peripherals.PE1, Level::High, Speed::Low),
        ];
        let pedestrian: [Output; 2] = [
            Output::new(peripherals.PC6, Level::High, Speed::Low),
            Output::new(peripherals.PC7, Level::Low, Speed::Low),
        ];
        let sensors: [Input; 3] = [
            Input::new(peripherals.PA4, Pull::Down),
            Input::new(peripherals.PA5, Pull::Down),
            Input::new(peripherals.PE11, Pull::Up),
        ];

        let ports = GpioPorts::new(vehicle, pedestrian, sensors, SENSOR_ACTIVE_LOWS);
        TrafficLight::new(&table, ports, DelayTimer::new(Delay)).run()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("table-traffic-light is firmware; build it for a thumbv7m-none-eabi target.");
}
