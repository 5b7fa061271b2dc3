//! Diagnostics channel for batch operations.
//!
//! Failing operations return an [`Error`] and also report it once through the
//! [`DebugContext`] the batch was created with. The context holds an optional
//! caller-supplied callback; every report is additionally emitted as a
//! `tracing` event. Independent contexts never observe each other's reports.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, ErrorCode, Result};

/// Severity of a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Warn,
    Error,
}

impl LogLevel {
    /// Severity used when reporting `error`: `Warn` for out-of-bounds writes,
    /// `Error` otherwise.
    #[must_use]
    pub fn for_error(error: &Error) -> Self {
        match error.code() {
            ErrorCode::TileOutOfBounds => Self::Warn,
            _ => Self::Error,
        }
    }
}

type DebugCallback = Arc<dyn Fn(LogLevel, &Error, &'static str) + Send + Sync + 'static>;

/// Caller-supplied error sink shared by the batches created from it.
///
/// Cloning is cheap; clones share the callback.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use tuic_batch::{Batch, BatchOptions, DebugContext};
/// use tuic_batch::detail::{ColorFlag, DetailMode, GlyphFlag, LayoutFlag};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let ctx = DebugContext::with_callback(move |_level, err, origin| {
///     sink.lock().unwrap().push((err.code(), origin));
/// });
///
/// let mode = DetailMode::new(GlyphFlag::G8, ColorFlag::C0, LayoutFlag::Full).unwrap();
/// assert!(Batch::full(&ctx, mode, 0, 4, BatchOptions::default()).is_err());
/// assert_eq!(seen.lock().unwrap().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct DebugContext {
    callback: Option<DebugCallback>,
}

impl DebugContext {
    /// A context that only emits `tracing` events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context forwarding every report to `callback`.
    #[must_use]
    pub fn with_callback<F>(callback: F) -> Self
    where
        F: Fn(LogLevel, &Error, &'static str) + Send + Sync + 'static,
    {
        Self {
            callback: Some(Arc::new(callback)),
        }
    }

    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Report `error` raised by the operation named `origin`.
    pub fn report(&self, error: &Error, origin: &'static str) {
        let level = LogLevel::for_error(error);
        match level {
            LogLevel::Warn => tracing::warn!(origin, code = ?error.code(), "{error}"),
            LogLevel::Error => tracing::error!(origin, code = ?error.code(), "{error}"),
        }
        if let Some(callback) = self.callback.as_ref() {
            callback(level, error, origin);
        }
    }

    /// Report the error of a failed result, passing it through unchanged.
    pub(crate) fn check<T>(&self, result: Result<T>, origin: &'static str) -> Result<T> {
        if let Err(error) = &result {
            self.report(error, origin);
        }
        result
    }
}

impl fmt::Debug for DebugContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugContext")
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_callback_receives_report() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let ctx = DebugContext::with_callback(move |level, err, origin| {
            sink.lock().unwrap().push((level, err.clone(), origin));
        });

        let err = Error::InvalidMaxTileCount(0);
        ctx.report(&err, "free");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], (LogLevel::Error, err, "free"));
    }

    #[test]
    fn test_contexts_are_independent() {
        let a_count = Arc::new(AtomicUsize::new(0));
        let b_count = Arc::new(AtomicUsize::new(0));
        let a = {
            let count = Arc::clone(&a_count);
            DebugContext::with_callback(move |_, _, _| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };
        let b = {
            let count = Arc::clone(&b_count);
            DebugContext::with_callback(move |_, _, _| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };

        let result: Result<()> = a.check(Err(Error::InvalidDetailMode(0)), "test");
        assert!(result.is_err());
        assert_eq!(a_count.load(Ordering::SeqCst), 1);
        assert_eq!(b_count.load(Ordering::SeqCst), 0);

        let ok: Result<u8> = b.check(Ok(3), "test");
        assert_eq!(ok, Ok(3));
        assert_eq!(b_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_out_of_bounds_is_warning() {
        let err = Error::OutOfBounds {
            x: 9,
            y: 0,
            width: 4,
            height: 4,
        };
        assert_eq!(LogLevel::for_error(&err), LogLevel::Warn);
        assert_eq!(
            LogLevel::for_error(&Error::TileOverflow { max_tile_count: 1 }),
            LogLevel::Error
        );
    }

    #[test]
    fn test_silent_context_has_no_callback() {
        let ctx = DebugContext::new();
        assert!(!ctx.has_callback());
        ctx.report(&Error::InvalidDetailMode(7), "test");
        assert_eq!(format!("{ctx:?}"), "DebugContext { callback: false }");
    }
}
