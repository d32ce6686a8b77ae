#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use approx::assert_relative_eq;
use footprint::footprint::SkyPosition;
use footprint::header::ObservationHeader;
use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger recording every message on the thread that emitted it, so parallel tests
/// never see each other's output.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| {
            c.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Install the capture logger (once per process) and clear this thread's buffer.
pub fn start_capture() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

/// Messages logged by this thread since the last [`start_capture`].
pub fn captured(level: Level) -> Vec<String> {
    CAPTURED.with(|c| {
        c.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    })
}

/// 60″ × 60″ map centred on the Crab nebula, J2000, no offset or rotation.
pub fn crab_header() -> ObservationHeader {
    ObservationHeader::new()
        .with("BASEC1", 83.63)
        .with("BASEC2", 22.01)
        .with("MAP_X", 0.0)
        .with("MAP_Y", 0.0)
        .with("MAP_PA", 0.0)
        .with("MAP_HGHT", 60.0)
        .with("MAP_WDTH", 60.0)
        .with("TRACKSYS", "J2000")
}

pub fn assert_position_close(actual: &SkyPosition, expected: (f64, f64), epsilon: f64) {
    assert_relative_eq!(actual.ra, expected.0, epsilon = epsilon);
    assert_relative_eq!(actual.dec, expected.1, epsilon = epsilon);
}
