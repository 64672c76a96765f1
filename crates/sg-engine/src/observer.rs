//! Run observer trait for progress reporting.

use sg_core::Tick;

use crate::RunStats;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl RunObserver for Progress {
///     fn on_tick_end(&mut self, tick: Tick, revealed: usize) {
///         if tick.0 % 100 == 0 {
///             println!("{tick}: +{revealed} cells");
///         }
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called after each executed tick with the number of cells newly
    /// revealed during it.
    fn on_tick_end(&mut self, _tick: Tick, _revealed: usize) {}

    /// Called once with the finalized metrics.
    fn on_run_end(&mut self, _stats: &RunStats) {}
}

/// A [`RunObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
