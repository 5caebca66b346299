//! Decoding of the backend's JSON response envelopes.
//!
//! Successful calls answer `{"message": <payload>}`. Failed calls answer with a
//! non-2xx status and a body carrying `exc_type`, `exception` and
//! `_server_messages`, the latter being a JSON string that itself encodes a
//! list of JSON strings, each an object with a `message` field.

use super::error::RpcError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

const BODY_SNIPPET_CHARS: usize = 200;

#[derive(Deserialize)]
struct Envelope<T> {
    message: Option<T>,
}

/// Extract the `message` payload of a successful response.
pub(crate) fn decode_message<T: DeserializeOwned>(body: &[u8]) -> Result<T, RpcError> {
    let env: Envelope<T> = serde_json::from_slice(body)?;
    env.message.ok_or(RpcError::MissingMessage)
}

/// Build the error for a non-2xx response.
pub(crate) fn decode_error(status: u16, body: &[u8]) -> RpcError {
    let Ok(v) = serde_json::from_slice::<Value>(body) else {
        return RpcError::Status {
            status,
            body: snippet(&String::from_utf8_lossy(body)),
        };
    };

    let exc_type = v
        .get("exc_type")
        .and_then(Value::as_str)
        .map(str::to_string);
    let message = server_messages(&v)
        .or_else(|| v.get("exception").and_then(Value::as_str).map(str::to_string))
        .or_else(|| v.get("message").and_then(Value::as_str).map(str::to_string));

    match (exc_type, message) {
        (Some(exc_type), Some(message)) => RpcError::Server {
            status,
            exc_type,
            message,
        },
        (Some(exc_type), None) => RpcError::Server {
            status,
            message: exc_type.clone(),
            exc_type,
        },
        (None, Some(message)) => RpcError::Server {
            status,
            exc_type: "ServerError".into(),
            message,
        },
        (None, None) => RpcError::Status {
            status,
            body: snippet(&v.to_string()),
        },
    }
}

/// Join the human-readable parts of `_server_messages`.
fn server_messages(v: &Value) -> Option<String> {
    let raw = v.get("_server_messages")?.as_str()?;
    let list: Vec<String> = serde_json::from_str(raw).ok()?;
    let parts: Vec<String> = list
        .iter()
        .filter_map(|item| match serde_json::from_str::<Value>(item) {
            Ok(Value::Object(obj)) => obj
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            Ok(Value::String(s)) => Some(s),
            _ => Some(item.clone()),
        })
        .filter(|s| !s.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn snippet(s: &str) -> String {
    let s = s.trim();
    if s.chars().count() <= BODY_SNIPPET_CHARS {
        s.to_string()
    } else {
        let head: String = s.chars().take(BODY_SNIPPET_CHARS).collect();
        format!("{head}…")
    }
}
