//! Conversion faults raised at the dispatch boundary

use thiserror::Error;

/// A structured payload could not be converted into the host's native
/// representation.
///
/// Dispatch never surfaces this to its caller; it is recovered locally and
/// rerouted to the error channel as a diagnostic message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Non-finite floats have no native number form
    #[error("non-finite number {0} cannot be represented")]
    NonFiniteNumber(f64),
}
