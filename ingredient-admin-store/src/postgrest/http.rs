//! PostgREST HTTP request methods

use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, RawApiError, StoreErrorMapper};
use crate::types::{IngredientFields, IngredientId};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{PostgrestErrorBody, PostgrestStore, STORE_NAME};

/// Ask PostgREST to echo the affected rows back.
const RETURN_REPRESENTATION: &str = "return=representation";

impl PostgrestStore {
    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}",
            self.config.rest_base(),
            urlencoding::encode(table)
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.bearer_token()),
            )
    }

    fn id_filter(id: &IngredientId) -> String {
        format!("eq.{id}")
    }

    fn serialize_body<B: Serialize + ?Sized>(body: &B) -> StoreResult<String> {
        let json = serde_json::to_string(body).map_err(|e| StoreError::SerializationError {
            detail: e.to_string(),
        })?;
        log::debug!("[{STORE_NAME}] Request Body: {}", truncate_for_log(&json));
        Ok(json)
    }

    /// `POST {table}` with the record wrapped in a one-row array
    pub(crate) fn insert_request(
        &self,
        table: &str,
        record: &IngredientFields,
    ) -> StoreResult<RequestBuilder> {
        let body = Self::serialize_body(&[record])?;
        Ok(self
            .authorized(self.client.post(self.table_url(table)))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", RETURN_REPRESENTATION)
            .body(body))
    }

    /// `PATCH {table}?id=eq.{id}`
    pub(crate) fn update_request(
        &self,
        table: &str,
        id: &IngredientId,
        record: &IngredientFields,
    ) -> StoreResult<RequestBuilder> {
        let body = Self::serialize_body(record)?;
        Ok(self
            .authorized(self.client.patch(self.table_url(table)))
            .query(&[("id", Self::id_filter(id))])
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", RETURN_REPRESENTATION)
            .body(body))
    }

    /// `GET {table}?id=eq.{id}&select=*`
    pub(crate) fn select_request(&self, table: &str, id: &IngredientId) -> RequestBuilder {
        self.authorized(self.client.get(self.table_url(table)))
            .query(&[("id", Self::id_filter(id).as_str()), ("select", "*")])
    }

    /// Insert one row and return the inserted representation
    pub(crate) async fn post_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        record: &IngredientFields,
    ) -> StoreResult<Vec<T>> {
        let request = self.insert_request(table, record)?;

        // Sent once: a retried insert could create a duplicate row
        let url = self.table_url(table);
        let (status, text) = HttpUtils::execute_request(request, STORE_NAME, "POST", &url).await?;
        self.handle_response(status, &text, ErrorContext::table(table))
    }

    /// Update the row matching `id` and return the updated representation
    pub(crate) async fn patch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &IngredientId,
        record: &IngredientFields,
    ) -> StoreResult<Vec<T>> {
        let request = self.update_request(table, id, record)?;

        let url = format!("{}?id={}", self.table_url(table), Self::id_filter(id));
        let (status, text) = HttpUtils::execute_request(request, STORE_NAME, "PATCH", &url).await?;
        self.handle_response(status, &text, ErrorContext::row(table, id))
    }

    /// Fetch the rows matching `id`
    pub(crate) async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &IngredientId,
    ) -> StoreResult<Vec<T>> {
        let request = self.select_request(table, id);

        let url = format!("{}?id={}&select=*", self.table_url(table), Self::id_filter(id));
        let (status, text) = HttpUtils::execute_request_with_retry(
            request,
            STORE_NAME,
            "GET",
            &url,
            self.config.read_retries,
        )
        .await?;
        self.handle_response(status, &text, ErrorContext::row(table, id))
    }

    /// Parse a 2xx body, or map the PostgREST error body to a `StoreError`
    fn handle_response<T: DeserializeOwned>(
        &self,
        status: u16,
        text: &str,
        context: ErrorContext,
    ) -> StoreResult<T> {
        if (200..300).contains(&status) {
            return HttpUtils::parse_json(text, STORE_NAME);
        }

        let raw = match serde_json::from_str::<PostgrestErrorBody>(text) {
            Ok(body) => {
                if let Some(hint) = &body.hint {
                    log::debug!("[{STORE_NAME}] Hint: {hint}");
                }
                let message = body.message.unwrap_or_else(|| format!("HTTP {status}"));
                let raw = match body.code {
                    Some(code) => RawApiError::with_code(status, code, message),
                    None => RawApiError::new(status, message),
                };
                RawApiError {
                    details: body.details,
                    ..raw
                }
            }
            Err(_) => RawApiError::new(status, truncate_for_log(text)),
        };

        log::error!(
            "[{STORE_NAME}] API error (HTTP {status}, code {:?}): {}",
            raw.code,
            raw.message
        );
        Err(self.map_error(raw, context))
    }
}
