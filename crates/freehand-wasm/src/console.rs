//! Browser console sinks: a `log` backend and a panic hook.

use log::{Level, LevelFilter};
use std::str::FromStr;

/// Parse a level name, defaulting to `Info` on anything unrecognized.
pub(crate) fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Route `log` records to the browser console at `level`. Later calls only
/// adjust the level; `Off` silences without installing anything.
pub(crate) fn init_logging(level: LevelFilter) {
    if let Some(max) = level.to_level() {
        let _ = console_log::init_with_level(max);
    }
    log::set_max_level(level);
}

/// Install the console logger at `Info` unless one is already in place.
/// An existing level is left alone.
pub(crate) fn ensure_logging() {
    let _ = console_log::init_with_level(Level::Info);
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

pub(crate) fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("freehand WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
