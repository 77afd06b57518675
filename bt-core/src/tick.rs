/// Simulation clock handed to every evaluation.
///
/// `time_seconds` is simulation-relative, advanced by the host update loop.
/// Timed leaves must read this clock, never the wall clock, so paused or
/// time-scaled simulations behave correctly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub time_seconds: f64,
    pub dt_seconds: f32,
}
