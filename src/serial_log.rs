/*
 * A `log` backend that writes one line per record to a serial port.
 *
 * The port is anything that implements `core::fmt::Write`; on the board
 * that is a thin wrapper around the USART transmitter. The logger is built
 * empty in a `static` and the port is attached once the peripherals exist.
 * Records logged before that, or after the port is taken back, are dropped.
 *
 * Writes happen inside a critical section, so a line is never interleaved
 * with another one.
 */

use core::cell::RefCell;
use core::fmt::Write;

use critical_section::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

pub struct SerialLogger<W> {
    port: Mutex<RefCell<Option<W>>>,
    level: LevelFilter,
}

impl<W: Write + Send> SerialLogger<W> {
    pub const fn new(level: LevelFilter) -> Self {
        SerialLogger {
            port: Mutex::new(RefCell::new(None)),
            level,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn attach(&self, port: W) {
        critical_section::with(|cs| *self.port.borrow_ref_mut(cs) = Some(port));
    }

    pub fn detach(&self) -> Option<W> {
        critical_section::with(|cs| self.port.borrow_ref_mut(cs).take())
    }
}

impl<W: Write + Send> Log for SerialLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        critical_section::with(|cs| {
            if let Some(port) = self.port.borrow_ref_mut(cs).as_mut() {
                // Nowhere to report a failed log write.
                let _ = write!(
                    port,
                    "[{}] {}: {}\r\n",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        });
    }

    fn flush(&self) {}
}
