// ABOUTME: Fault barrier wrapped around every entry point the host calls into
// ABOUTME: Errors and panics are logged and replaced by a fallback so the host never sees them

use smallbraces_core::SyncError;
use smallbraces_logging::{error, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Run `operation`, returning `fallback` if it fails or panics.
///
/// The host's layout pass aborts on any failure escaping a callback, so
/// nothing is propagated past this point. Recoverable geometry failures are
/// logged as warnings, everything else as errors.
pub fn guard<T, F>(entry_point: &'static str, fallback: T, operation: F) -> T
where
    F: FnOnce() -> Result<T, SyncError>,
{
    match panic::catch_unwind(AssertUnwindSafe(operation)) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            report(entry_point, &err);
            fallback
        }
        Err(payload) => {
            let err = SyncError::Panicked {
                entry_point,
                message: panic_message(payload.as_ref()),
            };
            report(entry_point, &err);
            fallback
        }
    }
}

fn report(entry_point: &'static str, err: &SyncError) {
    if err.is_recoverable() {
        warn!(entry_point, error = %err, "Entry point abandoned");
    } else {
        error!(entry_point, error = %err, "Entry point failed");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
