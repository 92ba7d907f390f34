//! JSON-RPC 2.0 wire types.
//!
//! `params` and `result` are carried as [`RawValue`] so the client never
//! inspects or re-encodes them: whatever bytes the caller supplied go out
//! unchanged, and whatever bytes the node returned come back unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// Protocol version tag carried by every outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "2.0")]
    V2,
}

/// A call that expects a reply correlated by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: Version,
    pub method: String,
    #[serde(default, serialize_with = "serialize_params")]
    pub params: Option<Box<RawValue>>,
    pub id: u64,
}

impl Request {
    pub fn new(id: u64, method: impl Into<String>, params: Option<&RawValue>) -> Self {
        Self {
            jsonrpc: Version::V2,
            method: method.into(),
            params: params.map(ToOwned::to_owned),
            id,
        }
    }
}

/// A fire-and-forget call: no `id`, no reply expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub jsonrpc: Version,
    pub method: String,
    #[serde(default, serialize_with = "serialize_params")]
    pub params: Option<Box<RawValue>>,
}

impl Notification {
    pub fn new(method: impl Into<String>, params: Option<&RawValue>) -> Self {
        Self {
            jsonrpc: Version::V2,
            method: method.into(),
            params: params.map(ToOwned::to_owned),
        }
    }
}

/// Reply envelope as returned by the node.
///
/// Bitcoin-family nodes answer legacy-style without a `jsonrpc` member, so
/// the version is optional here. `error` stays raw until the protocol layer
/// decides whether it is a well-formed error object.
///
/// `result` and `error` are `None` when the member is absent and
/// `Some(None)` when it is present as `null`.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Option<Box<RawValue>>>,
    #[serde(default, deserialize_with = "present")]
    pub error: Option<Option<Box<RawValue>>>,
    #[serde(default)]
    pub id: serde_json::Value,
}

impl Response {
    /// A JSON-RPC reply carries at least one of `result` or `error`.
    pub fn is_envelope(&self) -> bool {
        self.result.is_some() || self.error.is_some()
    }

    pub fn result(&self) -> Option<&RawValue> {
        self.result.as_ref()?.as_deref()
    }

    pub fn error(&self) -> Option<&RawValue> {
        self.error.as_ref()?.as_deref()
    }
}

/// Standard JSON-RPC error object: `{"code": <int>, "message": <string>, "data": <any>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<RawValue>>,
}

impl ErrorObject {
    /// `data` as text: the bare string when the server sent a JSON string,
    /// otherwise the raw JSON.
    pub fn data_text(&self) -> Option<String> {
        let raw = self.data.as_ref()?;
        match serde_json::from_str::<String>(raw.get()) {
            Ok(text) => Some(text),
            Err(_) => Some(raw.get().to_owned()),
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Servers count positional arguments, so a missing payload goes out as `[]`
/// rather than `null`.
fn serialize_params<S>(params: &Option<Box<RawValue>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match params {
        Some(raw) => raw.serialize(serializer),
        None => serializer.collect_seq(std::iter::empty::<()>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(text: &str) -> Box<RawValue> {
        RawValue::from_string(text.to_owned()).expect("test payload must be valid JSON")
    }

    #[test]
    fn request_without_params_serializes_empty_array() {
        let req = Request::new(7, "getblockcount", None);
        let encoded = serde_json::to_value(&req).expect("request must encode");
        assert_eq!(
            encoded,
            json!({"jsonrpc": "2.0", "method": "getblockcount", "params": [], "id": 7})
        );
    }

    #[test]
    fn request_round_trips_method_and_params() {
        let params = raw(r#"["00aa",{"verbose":true},123456789012345678901234567890]"#);
        let req = Request::new(3, "getblock", Some(&*params));

        let encoded = serde_json::to_string(&req).expect("request must encode");
        let decoded: Request = serde_json::from_str(&encoded).expect("request must decode");

        assert_eq!(decoded.method, "getblock");
        assert_eq!(decoded.id, 3);
        assert_eq!(
            decoded.params.as_deref().map(RawValue::get),
            Some(params.get())
        );
    }

    #[test]
    fn notification_has_no_id() {
        let note = Notification::new("ping", None);
        let encoded = serde_json::to_value(&note).expect("notification must encode");
        assert_eq!(encoded, json!({"jsonrpc": "2.0", "method": "ping", "params": []}));
    }

    #[test]
    fn request_rejects_unknown_version() {
        let err = serde_json::from_str::<Request>(
            r#"{"jsonrpc":"1.0","method":"getblockcount","params":[],"id":1}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn response_keeps_result_bytes_verbatim() {
        let body = r#"{"jsonrpc":"2.0","result":{"supply":123456789012345678901234567890,"fee":0.00000001},"error":null,"id":0}"#;
        let response: Response = serde_json::from_str(body).expect("response must decode");
        assert_eq!(
            response.result().map(RawValue::get),
            Some(r#"{"supply":123456789012345678901234567890,"fee":0.00000001}"#)
        );
        assert!(response.error().is_none());
        assert_eq!(response.id, json!(0));
    }

    #[test]
    fn null_members_differ_from_absent_ones() {
        let response: Response =
            serde_json::from_str(r#"{"result":null,"id":1}"#).expect("must decode");
        assert!(response.is_envelope());
        assert_eq!(response.result.as_ref().map(Option::is_none), Some(true));
        assert!(response.error.is_none());

        let response: Response =
            serde_json::from_str(r#"{"message":"Bad Gateway"}"#).expect("must decode");
        assert!(!response.is_envelope());
    }

    #[test]
    fn legacy_response_without_version_decodes() {
        let response: Response =
            serde_json::from_str(r#"{"result":5,"error":null,"id":"9"}"#).expect("must decode");
        assert!(response.jsonrpc.is_none());
        assert_eq!(response.id, json!("9"));
    }

    #[test]
    fn error_data_text_unwraps_json_strings() {
        let err: ErrorObject =
            serde_json::from_str(r#"{"code":-8,"message":"bad","data":"detail"}"#)
                .expect("error must decode");
        assert_eq!(err.data_text().as_deref(), Some("detail"));

        let err: ErrorObject =
            serde_json::from_str(r#"{"code":-8,"message":"bad","data":{"k":1}}"#)
                .expect("error must decode");
        assert_eq!(err.data_text().as_deref(), Some(r#"{"k":1}"#));

        let err: ErrorObject = serde_json::from_str(r#"{"code":-8,"message":"bad"}"#)
            .expect("error must decode");
        assert!(err.data_text().is_none());
    }
}
