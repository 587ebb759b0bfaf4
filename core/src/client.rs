//! Request core and the client facade.
//!
//! # Design
//! `ClientCore` owns the configuration and the transport and exposes one
//! generic `request` operation: build an `HttpRequest`, execute it, decode the
//! body and tag the result as an `Envelope`. Building and decoding are pure
//! functions so they can be tested without a network.
//!
//! `RobloxApiClient` composes the resource clients over a shared
//! `Arc<ClientCore>`. It holds no mutable state; clones are cheap and can be
//! used from concurrent tasks.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::experiences::Experiences;
use crate::groups::Groups;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Payload, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
use crate::transport::{ReqwestTransport, Transport};
use crate::users::Users;

/// Outcome of one request: the decoded body, or the upstream `error` payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure(Value),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    /// Unwrap the success branch; a failure becomes `GenericRequest`.
    pub fn into_result(self) -> Result<T, ClientError> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Failure(_) => Err(ClientError::GenericRequest),
        }
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Read the body as `R`. A text body only matches string-like shapes.
    pub fn deserialize<R: DeserializeOwned>(self) -> Result<R, ClientError> {
        let value = match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
        };
        serde_json::from_value(value)
            .map_err(|e| ClientError::web_request(format!("unexpected response shape: {e}")))
    }
}

/// Configuration plus transport, shared by every resource client.
#[derive(Debug)]
pub struct ClientCore<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> ClientCore<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config: config.normalized(),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve `path` against the apis host unless it is already absolute.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}/{}", self.config.apis_base_url, path.trim_start_matches('/'))
        }
    }

    /// Build the request for one call. Caller headers override the defaults.
    pub fn build_request(
        &self,
        path: &str,
        method: HttpMethod,
        payload: Option<Payload>,
        headers: &[(String, String)],
    ) -> Result<HttpRequest, ClientError> {
        let content_type = payload
            .as_ref()
            .map_or(CONTENT_TYPE_TEXT, Payload::content_type);
        let mut all_headers = vec![
            ("accept".to_string(), CONTENT_TYPE_JSON.to_string()),
            ("content-type".to_string(), content_type.to_string()),
        ];
        for (name, value) in headers {
            all_headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            all_headers.push((name.clone(), value.clone()));
        }

        let body = payload.map(Payload::into_body).transpose()?;
        Ok(HttpRequest {
            method,
            url: self.resolve_url(path),
            headers: all_headers,
            body,
        })
    }

    /// Decode a response body and tag it as success or failure.
    ///
    /// The status code is not consulted: only an `error` field in a JSON
    /// object marks a failure.
    pub fn decode_response(response: HttpResponse) -> Result<Envelope<ResponseBody>, ClientError> {
        if !response.is_json() {
            return Ok(Envelope::Success(ResponseBody::Text(response.body)));
        }
        let value: Value = serde_json::from_str(&response.body)?;
        match value {
            Value::Object(mut object) if object.contains_key("error") => {
                Ok(Envelope::Failure(object.remove("error").unwrap_or(Value::Null)))
            }
            value => Ok(Envelope::Success(ResponseBody::Json(value))),
        }
    }

    /// Perform exactly one HTTP request and normalize the result.
    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        payload: Option<Payload>,
        headers: &[(String, String)],
    ) -> Result<Envelope<ResponseBody>, ClientError> {
        let request = self.build_request(path, method, payload, headers)?;
        let url = request.url.clone();
        debug!(%method, %url, "sending request");

        let response = self.transport.execute(request).await?;
        let status = response.status;
        let envelope = Self::decode_response(response).inspect_err(|e| {
            warn!(%url, status, error = %e, "response body could not be decoded");
        })?;
        if let Envelope::Failure(detail) = &envelope {
            warn!(%url, status, %detail, "upstream returned an error payload");
        }
        Ok(envelope)
    }

    /// Request `url` and read the success body as `R`.
    pub(crate) async fn call<R: DeserializeOwned>(
        &self,
        url: &str,
        method: HttpMethod,
        payload: Option<Payload>,
    ) -> Result<R, ClientError> {
        self.request(url, method, payload, &[])
            .await?
            .into_result()?
            .deserialize()
    }
}

/// Entry point composing the users, groups and experiences clients.
///
/// ```no_run
/// # async fn example() -> Result<(), roblox_api::ClientError> {
/// let client = roblox_api::RobloxApiClient::new();
/// let groups = client.groups().get(&[7u64.into()]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RobloxApiClient<T = ReqwestTransport> {
    core: Arc<ClientCore<T>>,
    users: Users<T>,
    groups: Groups<T>,
    experiences: Experiences<T>,
}

impl RobloxApiClient<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl Default for RobloxApiClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> RobloxApiClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let core = Arc::new(ClientCore::new(config, transport));
        Self {
            users: Users::new(Arc::clone(&core)),
            groups: Groups::new(Arc::clone(&core)),
            experiences: Experiences::new(Arc::clone(&core)),
            core,
        }
    }

    pub fn users(&self) -> &Users<T> {
        &self.users
    }

    pub fn groups(&self) -> &Groups<T> {
        &self.groups
    }

    pub fn experiences(&self) -> &Experiences<T> {
        &self.experiences
    }

    pub fn config(&self) -> &ClientConfig {
        self.core.config()
    }

    /// Send an arbitrary request through the shared transport.
    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        payload: Option<Payload>,
        headers: &[(String, String)],
    ) -> Result<Envelope<ResponseBody>, ClientError> {
        self.core.request(path, method, payload, headers).await
    }
}

impl<T> Clone for RobloxApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            users: self.users.clone(),
            groups: self.groups.clone(),
            experiences: self.experiences.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{json_response, text_response, RecordingTransport};
    use serde_json::json;

    fn core() -> ClientCore<RecordingTransport> {
        ClientCore::new(ClientConfig::single_host("http://mock"), RecordingTransport::default())
    }

    #[test]
    fn relative_paths_resolve_against_apis_host() {
        let core = core();
        assert_eq!(core.resolve_url("v1/thing"), "http://mock/v1/thing");
        assert_eq!(core.resolve_url("/v1/thing"), "http://mock/v1/thing");
        assert_eq!(core.resolve_url("https://games.roblox.com/v1/games"), "https://games.roblox.com/v1/games");
    }

    #[test]
    fn json_payload_sets_json_content_type() {
        let request = core()
            .build_request("p", HttpMethod::Post, Payload::from_value(json!({"a": 1})), &[])
            .unwrap();
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn text_payload_sets_text_content_type() {
        let request = core()
            .build_request("p", HttpMethod::Put, Some("raw".into()), &[])
            .unwrap();
        assert_eq!(request.header("content-type"), Some("text/plain"));
        assert_eq!(request.body.as_deref(), Some("raw"));
    }

    #[test]
    fn no_payload_means_no_body() {
        let request = core().build_request("p", HttpMethod::Get, None, &[]).unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_none());
        assert_eq!(request.header("content-type"), Some("text/plain"));
    }

    #[test]
    fn null_value_sends_no_body() {
        let request = core()
            .build_request("p", HttpMethod::Post, Payload::from_value(Value::Null), &[])
            .unwrap();
        assert!(request.body.is_none());
        assert_eq!(request.header("content-type"), Some("text/plain"));
    }

    #[test]
    fn caller_headers_override_defaults() {
        let headers = vec![
            ("Accept".to_string(), "text/html".to_string()),
            ("x-extra".to_string(), "1".to_string()),
        ];
        let request = core().build_request("p", HttpMethod::Get, None, &headers).unwrap();
        assert_eq!(request.header("accept"), Some("text/html"));
        assert_eq!(request.header("x-extra"), Some("1"));
        assert_eq!(request.headers.len(), 3);
    }

    #[test]
    fn error_field_marks_failure() {
        let envelope =
            ClientCore::<RecordingTransport>::decode_response(json_response(r#"{"error":{"code":5}}"#)).unwrap();
        assert_eq!(envelope, Envelope::Failure(json!({"code": 5})));
    }

    #[test]
    fn json_without_error_is_success() {
        let envelope =
            ClientCore::<RecordingTransport>::decode_response(json_response(r#"{"data":[]}"#)).unwrap();
        assert_eq!(envelope, Envelope::Success(ResponseBody::Json(json!({"data": []}))));
    }

    #[test]
    fn json_array_is_success() {
        let envelope = ClientCore::<RecordingTransport>::decode_response(json_response("[1,2]")).unwrap();
        assert!(envelope.is_success());
    }

    #[test]
    fn malformed_json_is_web_request_error() {
        let err = ClientCore::<RecordingTransport>::decode_response(json_response("{oops")).unwrap_err();
        assert!(matches!(err, ClientError::WebRequest { .. }));
    }

    #[test]
    fn non_json_body_is_read_as_text() {
        let envelope =
            ClientCore::<RecordingTransport>::decode_response(text_response(r#"{"error":"x"}"#)).unwrap();
        assert_eq!(envelope, Envelope::Success(ResponseBody::Text(r#"{"error":"x"}"#.to_string())));
    }

    #[test]
    fn text_body_deserializes_only_into_strings() {
        let text = ResponseBody::Text("hello".to_string());
        assert_eq!(text.clone().deserialize::<String>().unwrap(), "hello");
        let err = text.deserialize::<Vec<u64>>().unwrap_err();
        assert!(matches!(err, ClientError::WebRequest { .. }));
    }

    #[tokio::test]
    async fn request_issues_exactly_one_call() {
        let core = core();
        core.transport.push(json_response(r#"{"ok":true}"#));
        let envelope = core.request("v1/ping", HttpMethod::Get, None, &[]).await.unwrap();
        assert_eq!(envelope, Envelope::Success(ResponseBody::Json(json!({"ok": true}))));
        let requests = core.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://mock/v1/ping");
    }

    #[tokio::test]
    async fn facade_request_shares_the_transport() {
        let transport = RecordingTransport::default();
        transport.push(text_response("pong"));
        let client = RobloxApiClient::with_transport(ClientConfig::single_host("http://mock/"), transport);
        let envelope = client.request("ping", HttpMethod::Get, None, &[]).await.unwrap();
        assert_eq!(envelope, Envelope::Success(ResponseBody::Text("pong".to_string())));
        assert_eq!(client.config().apis_base_url, "http://mock");
    }

    fn assert_send_sync_clone<T: Send + Sync + Clone>() {}

    #[test]
    fn facade_and_resource_clients_are_shareable() {
        assert_send_sync_clone::<RobloxApiClient>();
        assert_send_sync_clone::<Users<ReqwestTransport>>();
        assert_send_sync_clone::<Groups<ReqwestTransport>>();
        assert_send_sync_clone::<Experiences<ReqwestTransport>>();
        assert_send_sync_clone::<RobloxApiClient<Arc<RecordingTransport>>>();
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_client() {
        let transport = Arc::new(RecordingTransport::default());
        transport.push(json_response(r#"{"data":[]}"#));
        transport.push(json_response(r#"{"data":[]}"#));
        let client = RobloxApiClient::with_transport(ClientConfig::single_host("http://mock"), Arc::clone(&transport));
        let other = client.clone();

        let group_ids: [crate::types::Id; 1] = [7u64.into()];
        let icon_ids: [crate::types::Id; 1] = [8u64.into()];
        let (groups, icons) = tokio::join!(
            client.groups().get(&group_ids),
            other.groups().get_icons(&icon_ids, crate::types::GroupIconSize::S150),
        );
        assert!(groups.unwrap().is_empty());
        assert!(icons.unwrap().is_empty());
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn default_client_uses_roblox_hosts() {
        let client = RobloxApiClient::default();
        assert_eq!(client.config(), &ClientConfig::default());
        let _clone = client.clone();
    }
}
