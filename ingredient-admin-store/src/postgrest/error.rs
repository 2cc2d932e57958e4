//! PostgREST error mapping

use crate::error::StoreError;
use crate::traits::{ErrorContext, RawApiError, StoreErrorMapper};

use super::PostgrestStore;

/// Text between the first pair of double quotes following `marker`.
fn quoted_after<'a>(message: &'a str, marker: &str) -> Option<&'a str> {
    let rest = &message[message.find(marker)? + marker.len()..];
    let start = rest.find('"')? + 1;
    let len = rest[start..].find('"')?;
    Some(&rest[start..start + len])
}

/// Message with the `details` line appended, when present.
fn with_details(raw: &RawApiError) -> String {
    match &raw.details {
        Some(details) => format!("{} ({details})", raw.message),
        None => raw.message.clone(),
    }
}

/// PostgREST / Postgres error code mapping
/// Reference: <https://docs.postgrest.org/en/stable/references/errors.html>
impl StoreErrorMapper for PostgrestStore {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> StoreError {
        match raw.code.as_deref() {
            // 23505: unique_violation
            Some("23505") => StoreError::RecordExists {
                constraint: quoted_after(&raw.message, "constraint").map(str::to_string),
                raw_message: Some(with_details(&raw)),
            },

            // 23502: not_null_violation
            // 23514: check_violation
            // 22P02: invalid_text_representation
            Some(code @ ("23502" | "23514" | "22P02")) => {
                let param = match code {
                    "23502" => quoted_after(&raw.message, "column"),
                    _ => None,
                }
                .unwrap_or("general");
                StoreError::InvalidParameter {
                    param: param.to_string(),
                    detail: with_details(&raw),
                }
            }

            // 42501: insufficient_privilege (row-level security)
            Some("42501") => StoreError::PermissionDenied {
                raw_message: Some(raw.message),
            },

            // PGRST301: JWT could not be decoded / expired
            // PGRST302: anonymous access disabled
            Some("PGRST301" | "PGRST302") => StoreError::InvalidCredentials {
                raw_message: Some(raw.message),
            },

            // 42P01: undefined_table
            // PGRST205: table not found in the schema cache
            Some("42P01" | "PGRST205") => StoreError::TableNotFound {
                table: context.table.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // PGRST116: singular response requested, zero rows returned
            Some("PGRST116") => StoreError::RecordNotFound {
                table: context.table.unwrap_or_else(|| "<unknown>".to_string()),
                id: context.id.unwrap_or_else(|| "<unknown>".to_string()),
            },

            // No recognised code: fall back to the HTTP status
            _ => match raw.status {
                401 => StoreError::InvalidCredentials {
                    raw_message: Some(raw.message),
                },
                403 => StoreError::PermissionDenied {
                    raw_message: Some(raw.message),
                },
                _ => self.unknown_error(raw),
            },
        }
    }
}
