//! Process-wide `log` sink for asserting on emitted records in unit tests.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};

#[derive(Debug, Clone)]
pub struct CapturedRecord {
    pub level: Level,
    pub message: String,
}

struct CaptureLogger {
    records: Mutex<Vec<CapturedRecord>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push(CapturedRecord {
                level: record.level(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {}
}

pub fn init() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("logger already installed");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Records whose message contains `needle`. Tests share the sink, so pick a unique needle.
pub fn records_containing(needle: &str) -> Vec<CapturedRecord> {
    LOGGER
        .records
        .lock()
        .map(|records| {
            records
                .iter()
                .filter(|r| r.message.contains(needle))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
