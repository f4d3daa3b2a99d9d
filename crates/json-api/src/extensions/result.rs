//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Map any error to a logged internal server error.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_500_hides_the_error() {
        let result: Result<(), &str> = Err("connection reset");

        let error = result.or_500("failed to set header").err();

        assert_eq!(error.as_ref().map(|error| error.code.as_u16()), Some(500));
        assert!(error.is_some_and(|error| error.detail.is_none()));
    }
}
