//! Error types for identifier parsing, SPDX expressions and the curation service.

/// Errors from parsing `Type:Namespace:Name:Version` coordinates.
#[derive(Debug, thiserror::Error)]
pub enum IdentifierError {
    #[error("invalid coordinates `{coordinates}`: expected 4 colon-separated parts, found {found}")]
    WrongPartCount { coordinates: String, found: usize },

    #[error("invalid coordinates `{coordinates}`: {field} must not be empty")]
    EmptyField {
        coordinates: String,
        field: &'static str,
    },
}

/// Errors from parsing or validating an SPDX license expression.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpdxError {
    #[error("empty license expression")]
    Empty,

    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("unknown license identifier `{0}`")]
    UnknownLicense(String),

    #[error("deprecated license identifier `{0}`")]
    DeprecatedLicense(String),

    #[error("unknown license exception `{0}`")]
    UnknownException(String),

    #[error("deprecated license exception `{0}`")]
    DeprecatedException(String),

    #[error("invalid license reference `{0}`")]
    InvalidReference(String),
}

/// Errors returned by a [`CurationService`](crate::clearlydefined::CurationService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("HTTP status {status}")]
    Status { status: u16, body: Option<String> },

    /// The request never produced a response (connect error, timeout, broken body).
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("cannot build curation URL from base `{0}`")]
    InvalidUrl(String),

    /// A coordinate that would be read as a `.` or `..` path segment.
    #[error("invalid curation coordinate `{0}`")]
    InvalidCoordinate(String),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Status { status: 404, .. })
    }
}
