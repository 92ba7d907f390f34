use base64::Engine;
use reqwest::Url;

use crate::error::CoreError;

/// `Authorization` header value for HTTP Basic auth.
pub(super) fn basic_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{username}:{password}");
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(credentials)
    )
}

/// Build and validate the `http://<host>:<port>/` endpoint.
pub(super) fn parse_endpoint(host: &str, port: u16) -> Result<String, CoreError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(CoreError::InvalidConfig("rpc host must not be empty".to_owned()));
    }
    if port == 0 {
        return Err(CoreError::InvalidConfig("rpc port must not be 0".to_owned()));
    }

    // Bare IPv6 literals need brackets inside a URL authority.
    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    };
    let endpoint = format!("http://{authority}/");

    let parsed = Url::parse(&endpoint).map_err(|e| {
        CoreError::InvalidConfig(format!("invalid rpc host `{host}`: {e}"))
    })?;
    if parsed.host_str().is_none()
        || parsed.path() != "/"
        || parsed.port_or_known_default() != Some(port)
    {
        return Err(CoreError::InvalidConfig(format!(
            "invalid rpc host `{host}`: expected a bare hostname or IP address"
        )));
    }

    Ok(endpoint)
}
