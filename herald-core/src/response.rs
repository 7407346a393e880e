//! Conversion of handler return values.

use crate::error::BoxError;

/// Trait for converting a handler's return value into a delivery outcome.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<(), E>` → success or the boxed error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a handler",
    label = "missing `IntoOutcome` implementation",
    note = "Handlers return `()` or `Result<(), E>` where `E: Into<BoxError>`."
)]
pub trait IntoOutcome {
    /// Convert the return value into success or a listener error.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
