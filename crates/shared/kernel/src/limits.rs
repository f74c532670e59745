//! Limit conventions shared by broker facades: `-1` means unlimited.

use crate::error::FacadeError;
use std::fmt::Display;

/// Accepts `-1` (unlimited) and any non-negative value.
///
/// # Errors
/// Returns [`FacadeError::Rejected`] for values below `-1`.
pub fn ensure_neg_one_and_up<N>(attribute: &str, value: N) -> Result<N, FacadeError>
where
    N: Copy + Display + PartialOrd + From<i8>,
{
    if value < N::from(-1) {
        return Err(FacadeError::Rejected {
            message: format!("{value} is not a valid value. Please use a positive number or -1")
                .into(),
            context: Some(attribute.to_owned().into()),
        });
    }
    Ok(value)
}

/// Reports a stored `0` ("no limit") as `-1`.
#[must_use]
pub fn unlimited_from_zero<N>(value: N) -> N
where
    N: PartialEq + From<i8>,
{
    if value == N::from(0) { N::from(-1) } else { value }
}
