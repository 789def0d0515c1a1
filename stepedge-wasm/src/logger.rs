use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&msg),
            Level::Warn => console::warn_1(&msg),
            Level::Info => console::info_1(&msg),
            Level::Debug => console::debug_1(&msg),
            Level::Trace => console::log_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Routes `log` records to the browser console. `level` is one of
/// off/error/warn/info/debug/trace; anything else means info. Returns false
/// when the level was not recognised.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> bool {
    let parsed = level.parse::<LevelFilter>().ok();
    // a logger may already be installed by an earlier call
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(parsed.unwrap_or(LevelFilter::Info));
    parsed.is_some()
}
