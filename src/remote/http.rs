//! HTTP implementation of the record source and mutation sink.
//!
//! One shared `reqwest::Client` with connection pooling and conservative
//! timeouts talks to the admin API under a single configured base URL.
//! Moderation mutations go through the `adminreq` endpoint family; reads go
//! through the per-resource collection endpoints.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::domain::coordinator::PaymentDetails;
use crate::domain::error::{Result, RosterError};
use crate::domain::record::RosterRecord;
use crate::remote::api::{FetchPayload, MutationSink, PageQuery, RecordSource};
use crate::remote::decode::{decode_collection, decode_next_cursor};
use crate::session::Session;
use crate::Config;

/// Connect timeout, separate from the overall request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the admin API.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Builds the client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] if the underlying client cannot be
    /// constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(format!("rosterdeck/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RosterError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/api/admin/{path}", self.base_url)
    }

    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
        session: &Session,
    ) -> reqwest::RequestBuilder {
        match session.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Extracts a human-readable message from an API error payload.
    fn error_message(payload: &Value, fallback: &str) -> String {
        payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    }

    /// POSTs a moderation request and applies the `{status: ok|error}`
    /// convention of the admin API.
    async fn post_adminreq(
        &self,
        session: &Session,
        resource: &str,
        body: Value,
    ) -> Result<Value> {
        if session.bearer().is_none() {
            return Err(RosterError::MissingCredential);
        }

        let url = self.admin_url(&format!("adminreq/{resource}"));
        tracing::debug!(url = %url, "dispatching mutation request");

        let response = self
            .authorized(self.client.post(&url).json(&body), session)
            .send()
            .await
            .map_err(|e| RosterError::Mutation(e.to_string()))?;

        let status = response.status();
        let payload: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(RosterError::Mutation(Self::error_message(
                &payload,
                &format!("request failed with status {status}"),
            )));
        }
        if payload.get("status").and_then(Value::as_str) == Some("error") {
            return Err(RosterError::Mutation(Self::error_message(
                &payload,
                "rejected by server",
            )));
        }

        Ok(payload)
    }
}

impl<R: RosterRecord> RecordSource<R> for HttpRemote {
    async fn fetch(&self, session: &Session, query: &PageQuery) -> Result<FetchPayload<R>> {
        let url = self.admin_url(R::RESOURCE);
        tracing::debug!(
            url = %url,
            limit = ?query.limit,
            cursor = ?query.cursor,
            "fetching records"
        );

        let mut request = self.client.get(&url);
        if let Some(limit) = query.limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        if let Some(cursor) = &query.cursor {
            request = request.query(&[("startAfter", cursor.as_str())]);
        }

        let payload: Value = self
            .authorized(request, session)
            .send()
            .await
            .map_err(|e| RosterError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| RosterError::Fetch(e.to_string()))?
            .json()
            .await
            .map_err(|e| RosterError::Fetch(e.to_string()))?;

        let items = decode_collection::<R>(&payload);
        let next_cursor = decode_next_cursor(&payload);

        tracing::debug!(
            resource = R::RESOURCE,
            count = items.len(),
            next_cursor = ?next_cursor,
            "fetch complete"
        );
        Ok(FetchPayload { items, next_cursor })
    }
}

impl MutationSink for HttpRemote {
    async fn approve(&self, session: &Session, resource: &str, uid: &str) -> Result<()> {
        self.post_adminreq(
            session,
            resource,
            serde_json::json!({ "uid": uid, "approve": true }),
        )
        .await
        .map(|_| ())
    }

    async fn delete(&self, session: &Session, resource: &str, uid: &str) -> Result<()> {
        self.post_adminreq(
            session,
            resource,
            serde_json::json!({ "uid": uid, "deleteAccount": true }),
        )
        .await
        .map(|_| ())
    }

    async fn update_fields<R: RosterRecord>(
        &self,
        session: &Session,
        uid: &str,
        patch: &Map<String, Value>,
    ) -> Result<R> {
        let mut body = patch.clone();
        body.insert("uid".to_string(), Value::String(uid.to_string()));

        let payload = self
            .post_adminreq(session, R::RESOURCE, Value::Object(body))
            .await?;

        // The server echoes the authoritative record under `user`.
        let record = payload
            .get("user")
            .cloned()
            .ok_or_else(|| RosterError::Shape("update response missing `user`".to_string()))?;
        serde_json::from_value(record)
            .map_err(|e| RosterError::Shape(format!("update response record: {e}")))
    }

    async fn payment_details(&self, session: &Session, uid: &str) -> Result<PaymentDetails> {
        if session.bearer().is_none() {
            return Err(RosterError::MissingCredential);
        }

        let url = self.admin_url(&format!("coordinator/{uid}/payment-details"));
        let payload: Value = self
            .authorized(self.client.get(&url), session)
            .send()
            .await
            .map_err(|e| RosterError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| RosterError::Fetch(e.to_string()))?
            .json()
            .await
            .map_err(|e| RosterError::Fetch(e.to_string()))?;

        let details = payload
            .get("paymentDetails")
            .cloned()
            .unwrap_or(payload);
        serde_json::from_value(details)
            .map_err(|e| RosterError::Shape(format!("payment details: {e}")))
    }
}
