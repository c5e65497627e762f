use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static VERBOSE: AtomicBool = AtomicBool::new(false);

// Crate-visible through `#[macro_use] mod verbose;` in main.rs, so that module
// has to be declared before every module that logs.
macro_rules! vprintln {
    ($($arg:tt)*) => {{
        if crate::verbose::enabled() {
            eprintln!($($arg)*);
        }
    }}
}

pub fn set(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn enabled() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Runs one pipeline stage and logs its wall time under `label`.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    vprintln!("{}: start", label);
    let t0 = Instant::now();
    let out = f();
    vprintln!("{}: done in {:.3}s", label, t0.elapsed().as_secs_f64());
    out
}
