//! Faults raised by controllers. The simulation logs them and skips the boat for the tick.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlFault {
    /// A computed command came out NaN or infinite.
    #[error("{what} is not finite ({value})")]
    NonFinite { what: &'static str, value: f64 },
}

/// Passes `value` through if it is finite.
pub fn ensure_finite(what: &'static str, value: f64) -> Result<f64, ControlFault> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ControlFault::NonFinite { what, value })
    }
}
