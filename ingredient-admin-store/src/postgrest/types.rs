//! PostgREST wire types

use serde::Deserialize;

/// Error body returned by PostgREST for failed requests.
///
/// Database errors carry the Postgres SQLSTATE in `code`; PostgREST's own errors
/// use `PGRST…` codes.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgrestErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}
