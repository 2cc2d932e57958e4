use serde::{Deserialize, Serialize};

/// Unified error type for all record store operations.
///
/// Variants carry enough context to log the failure, and all of them are
/// serializable for structured error reporting to a frontend.
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) are transient; reads retry them with
/// backoff, writes never do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum StoreError {
    /// The store could not be reached, or a gateway answered 502-504.
    NetworkError {
        detail: String,
    },

    /// The API key or access token was rejected.
    InvalidCredentials {
        /// Original error message from the store, if available.
        raw_message: Option<String>,
    },

    /// The authenticated role is not allowed to perform the operation
    /// (for example a row-level security policy rejected the write).
    PermissionDenied {
        /// Original error message from the store, if available.
        raw_message: Option<String>,
    },

    /// A unique constraint was violated (typically a duplicate slug).
    RecordExists {
        /// Name of the violated constraint, when the store reports one.
        constraint: Option<String>,
        /// Original error message from the store, if available.
        raw_message: Option<String>,
    },

    /// No row matched the given identifier.
    RecordNotFound {
        /// Table that was queried.
        table: String,
        /// Identifier that was not found.
        id: String,
    },

    /// The table does not exist or is not exposed by the API.
    TableNotFound {
        /// Table that was addressed.
        table: String,
        /// Original error message from the store, if available.
        raw_message: Option<String>,
    },

    /// A column value was rejected (not-null, check constraint, bad type).
    InvalidParameter {
        /// Column or parameter at fault, or `general` when unknown.
        param: String,
        /// Rejection reason as reported by the store.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided.
        retry_after: Option<u64>,
        /// Original error message from the store, if available.
        raw_message: Option<String>,
    },

    /// Connect or request timeout elapsed.
    Timeout {
        detail: String,
    },

    /// Failed to parse the store's response.
    ParseError {
        detail: String,
    },

    /// Failed to build or serialize a request.
    SerializationError {
        detail: String,
    },

    /// An unrecognized error from the store.
    Unknown {
        /// Raw error code, if available.
        raw_code: Option<String>,
        /// Raw error message.
        raw_message: String,
    },
}

impl StoreError {
    /// Whether this is expected behaviour (bad input, missing row, rejected
    /// credentials) rather than a fault; used to pick the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether the same request may succeed if sent again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::PermissionDenied { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Permission denied: {msg}")
                } else {
                    write!(f, "Permission denied")
                }
            }
            Self::RecordExists { constraint, .. } => {
                if let Some(name) = constraint {
                    write!(f, "Record already exists (violates '{name}')")
                } else {
                    write!(f, "Record already exists")
                }
            }
            Self::RecordNotFound { table, id } => {
                write!(f, "Record '{id}' not found in '{table}'")
            }
            Self::TableNotFound { table, .. } => write!(f, "Table '{table}' not found"),
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::Unknown {
                raw_code,
                raw_message,
            } => {
                if let Some(code) = raw_code {
                    write!(f, "[{code}] {raw_message}")
                } else {
                    write!(f, "{raw_message}")
                }
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
