/// Runs given function; with the `metrics` feature enabled, also logs how
/// long it took.
#[cfg(feature = "metrics")]
pub fn measure<T>(label: &str, f: impl FnOnce() -> T) -> T {
    use std::time::Instant;

    let tt = Instant::now();
    let result = f();
    let tt = humantime::format_duration(tt.elapsed());

    log::debug!("{label}: {tt}");

    result
}

#[cfg(not(feature = "metrics"))]
pub fn measure<T>(_: &str, f: impl FnOnce() -> T) -> T {
    f()
}
