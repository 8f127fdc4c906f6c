//! logging — structured diagnostics for model initialization.
//!
//! The crate logs through `slog`. Library code never creates global state:
//! every component that logs receives a [`slog::Logger`] from its caller.
//! [`build_logger`] is the convenience used when the caller only has a
//! `verbose` flag (as in [`ModelSettings`](crate::model_cache::ModelSettings)).
//!
//! Evaluation methods (`cost`, approximations, time derivatives) do not log.
use slog::{Drain, Logger, o};

/// Terminal logger when `verbose`, a discarding logger otherwise.
///
/// The terminal logger formats with `slog-term` and writes from a background
/// thread via `slog-async`; pending records are flushed when the last clone
/// of the logger is dropped.
pub fn build_logger(verbose: bool) -> Logger {
    if !verbose {
        return discard();
    }
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => env!("CARGO_PKG_NAME")))
}

/// Logger that drops every record.
pub fn discard() -> Logger {
    Logger::root(slog::Discard, o!())
}
