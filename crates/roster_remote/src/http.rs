//! HTTP adapter for the remote service.
//!
//! The actual HTTP client is abstracted via a trait so any library
//! (reqwest, ureq, a platform webview bridge, ...) can be plugged in
//! without this crate depending on one.

use crate::error::{RemoteError, RemoteResult};
use crate::raw::RawRecord;
use crate::service::RemoteService;
use roster_store::{RecordFields, RecordId};
use serde_json::Value;

/// A received HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// A transport-level failure (no response at all) is reported as the
/// error string; a response with any status, success or not, is `Ok`.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    fn get(&self, url: &str) -> Result<HttpResponse, String>;

    /// Sends a POST request with a JSON body.
    fn post(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, String>;

    /// Sends a PUT request with a JSON body.
    fn put(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, String>;

    /// Sends a DELETE request.
    fn delete(&self, url: &str) -> Result<HttpResponse, String>;
}

/// A [`RemoteService`] speaking JSON over an [`HttpClient`].
///
/// Transport failures map to [`RemoteError::Unreachable`], non-2xx
/// statuses to [`RemoteError::Rejected`]. Response bodies are decoded
/// leniently: anything that is not the expected JSON shape degrades to
/// empty field bags rather than failing the decode.
pub struct HttpRemoteService<C: HttpClient> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> HttpRemoteService<C> {
    /// Creates a new adapter rooted at `base_url`
    /// (e.g. `https://api.example.com/v1`).
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn records_url(&self) -> String {
        format!("{}/records", self.base_url)
    }

    fn record_url(&self, id: RecordId) -> String {
        format!("{}/records/{}", self.base_url, id)
    }

    fn check(response: Result<HttpResponse, String>) -> RemoteResult<HttpResponse> {
        let response = response.map_err(RemoteError::unreachable)?;
        if !response.is_success() {
            let message = String::from_utf8_lossy(&response.body).into_owned();
            return Err(RemoteError::rejected_status(response.status, message));
        }
        Ok(response)
    }

    fn parse_body(body: &[u8]) -> RemoteResult<Value> {
        serde_json::from_slice(body)
            .map_err(|e| RemoteError::rejected(format!("malformed response body: {e}")))
    }

    fn encode_fields(fields: &RecordFields) -> Vec<u8> {
        RawRecord::from_fields(fields).into_value().to_string().into_bytes()
    }
}

impl<C: HttpClient> RemoteService for HttpRemoteService<C> {
    fn fetch_all(&self) -> RemoteResult<Vec<RawRecord>> {
        let response = Self::check(self.client.get(&self.records_url()))?;
        let value = Self::parse_body(&response.body)?;
        match value {
            Value::Array(items) => Ok(items.into_iter().map(RawRecord::from_value).collect()),
            other => Err(RemoteError::rejected(format!(
                "expected a JSON array of records, got {other}"
            ))),
        }
    }

    fn create(&self, fields: &RecordFields) -> RemoteResult<RawRecord> {
        let response = Self::check(
            self.client
                .post(&self.records_url(), Self::encode_fields(fields)),
        )?;
        let value = Self::parse_body(&response.body)?;
        Ok(RawRecord::from_value(value))
    }

    fn update(&self, id: RecordId, fields: &RecordFields) -> RemoteResult<()> {
        Self::check(
            self.client
                .put(&self.record_url(id), Self::encode_fields(fields)),
        )?;
        Ok(())
    }

    fn delete(&self, id: RecordId) -> RemoteResult<()> {
        Self::check(self.client.delete(&self.record_url(id)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Answers every request with a canned response or transport error.
    struct StubClient {
        response: Mutex<Result<HttpResponse, String>>,
        last_url: Mutex<Option<String>>,
    }

    impl StubClient {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                response: Mutex::new(Ok(HttpResponse {
                    status,
                    body: body.as_bytes().to_vec(),
                })),
                last_url: Mutex::new(None),
            }
        }

        fn down(message: &str) -> Self {
            Self {
                response: Mutex::new(Err(message.to_string())),
                last_url: Mutex::new(None),
            }
        }

        fn answer(&self, url: &str) -> Result<HttpResponse, String> {
            *self.last_url.lock().unwrap() = Some(url.to_string());
            self.response.lock().unwrap().clone()
        }
    }

    impl HttpClient for StubClient {
        fn get(&self, url: &str) -> Result<HttpResponse, String> {
            self.answer(url)
        }
        fn post(&self, url: &str, _body: Vec<u8>) -> Result<HttpResponse, String> {
            self.answer(url)
        }
        fn put(&self, url: &str, _body: Vec<u8>) -> Result<HttpResponse, String> {
            self.answer(url)
        }
        fn delete(&self, url: &str) -> Result<HttpResponse, String> {
            self.answer(url)
        }
    }

    #[test]
    fn fetch_all_decodes_array() {
        let client = StubClient::ok(200, r#"[{"id": 1, "name": "Ann"}, {"id": 2}]"#);
        let service = HttpRemoteService::new("https://api.test", client);

        let raws = service.fetch_all().unwrap();
        assert_eq!(raws.len(), 2);
        assert_eq!(raws[0].get("name"), Some(&Value::from("Ann")));
    }

    #[test]
    fn fetch_all_rejects_non_array() {
        let client = StubClient::ok(200, r#"{"error": "nope"}"#);
        let service = HttpRemoteService::new("https://api.test", client);

        assert!(matches!(
            service.fetch_all(),
            Err(RemoteError::Rejected { .. })
        ));
    }

    #[test]
    fn transport_failure_maps_to_unreachable() {
        let client = StubClient::down("connection refused");
        let service = HttpRemoteService::new("https://api.test", client);

        let err = service.delete(3).unwrap_err();
        assert!(err.is_connectivity());
    }

    #[test]
    fn non_success_status_maps_to_rejected() {
        let client = StubClient::ok(422, "salary out of range");
        let service = HttpRemoteService::new("https://api.test", client);

        let err = service
            .update(3, &RecordFields::new("Ann", 30, 50_000))
            .unwrap_err();
        assert_eq!(
            err,
            RemoteError::rejected_status(422, "salary out of range")
        );
    }

    #[test]
    fn urls_are_routed_per_operation() {
        let client = StubClient::ok(200, "{}");
        let service = HttpRemoteService::new("https://api.test", client);

        service
            .create(&RecordFields::new("Ann", 30, 50_000))
            .unwrap();
        assert_eq!(
            service.client.last_url.lock().unwrap().as_deref(),
            Some("https://api.test/records")
        );

        service.delete(7).unwrap();
        assert_eq!(
            service.client.last_url.lock().unwrap().as_deref(),
            Some("https://api.test/records/7")
        );
    }
}
