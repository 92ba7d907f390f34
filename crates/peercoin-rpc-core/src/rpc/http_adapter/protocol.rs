use reqwest::StatusCode;
use serde_json::value::RawValue;

use crate::error::{CoreError, RpcError};
use crate::rpc::message::{ErrorObject, Response};

/// Decode a reply body into the JSON-RPC envelope.
///
/// Nodes report RPC failures with a non-2xx status *and* a JSON body, so the
/// status only matters when the body is not an envelope at all: the empty
/// `401` sent on bad credentials, or a proxy's JSON error page carrying
/// neither `result` nor `error`.
pub(super) fn decode_response(status: StatusCode, body: &str) -> Result<Response, CoreError> {
    let decoded = serde_json::from_str::<Response>(body)
        .map_err(|e| e.to_string())
        .and_then(|response| {
            if response.is_envelope() {
                Ok(response)
            } else {
                Err("neither `result` nor `error` present".to_owned())
            }
        });

    match decoded {
        Ok(response) => Ok(response),
        Err(_) if !status.is_success() => Err(RpcError::HttpStatus {
            status: status.as_u16(),
            body: body.to_owned(),
        }
        .into()),
        Err(reason) => Err(RpcError::InvalidResponse(format!(
            "decode JSON-RPC response: {reason}; body={body}"
        ))
        .into()),
    }
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// JSON-RPC 2.0 defines errors as `{"code": <int>, "message": <string>}`.
/// If the error value matches that shape, we produce a `Server` error;
/// otherwise we fall back to `InvalidResponse` with the raw JSON.
pub(super) fn parse_jsonrpc_error(err: &RawValue) -> CoreError {
    match serde_json::from_str::<ErrorObject>(err.get()) {
        Ok(parsed) => {
            let data = parsed.data_text();
            CoreError::Rpc(RpcError::Server {
                code: parsed.code,
                message: parsed.message,
                data,
            })
        }
        Err(_) => CoreError::Rpc(RpcError::InvalidResponse(format!(
            "non-standard JSON-RPC error: {}",
            err.get()
        ))),
    }
}

/// Response ids are echoed as numbers, but some proxies stringify them.
/// `null` is legal when the server could not read the request id.
pub(super) fn parse_response_id(id: &serde_json::Value) -> Result<Option<u64>, CoreError> {
    if id.is_null() {
        return Ok(None);
    }

    if let Some(n) = id.as_u64() {
        return Ok(Some(n));
    }

    if let Some(s) = id.as_str() {
        return s.parse::<u64>().map(Some).map_err(|e| {
            RpcError::InvalidResponse(format!("invalid response id string: {e}")).into()
        });
    }

    Err(RpcError::InvalidResponse(format!("invalid response id: {id}")).into())
}

/// Turn a decoded envelope into the call outcome: the raw `result`, the
/// server's error, or a correlation failure.
///
/// An error object is reported as a server error when its id matches or is
/// `null`; any other reply must carry exactly the request id.
pub(super) fn into_result(expected_id: u64, response: Response) -> Result<Box<RawValue>, CoreError> {
    let id = parse_response_id(&response.id)?;

    if let Some(err) = response.error() {
        if id.is_none() || id == Some(expected_id) {
            return Err(parse_jsonrpc_error(err));
        }
    }

    if id != Some(expected_id) {
        return Err(RpcError::IdMismatch {
            expected: expected_id,
            actual: response.id.to_string(),
        }
        .into());
    }

    match response.result.flatten() {
        Some(result) => Ok(result),
        None => serde_json::value::to_raw_value(&serde_json::Value::Null)
            .map_err(|e| RpcError::Encode(e).into()),
    }
}
