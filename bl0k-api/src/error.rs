use anyhow::{anyhow, Context};
use serde_json::json;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Comment text is empty")]
    EmptyComment,

    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::EmptyComment => StatusCode::BAD_REQUEST,
            Error::Network(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::PermissionDenied => json!({
                "message": "permission denied",
                "type": "permission-denied",
            }),
            Error::NotFound(what) => json!({
                "message": "not found",
                "type": "not-found",
                "what": what,
            }),
            Error::EmptyComment => json!({
                "message": "comment text is empty",
                "type": "empty-comment",
            }),
            Error::Network(msg) => json!({
                "message": msg,
                "type": "network",
            }),
        })
        .expect("serializing error contents")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let message = || {
            String::from(
                data.get("message")
                    .and_then(|msg| msg.as_str())
                    .unwrap_or(""),
            )
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(message()),
                "permission-denied" => Error::PermissionDenied,
                "not-found" => Error::NotFound(String::from(
                    data.get("what").and_then(|w| w.as_str()).unwrap_or(""),
                )),
                "empty-comment" => Error::EmptyComment,
                "network" => Error::Network(message()),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }

    /// Builds the error for a non-success HTTP response, whatever its body looks like
    pub fn from_response(status: http::StatusCode, body: &[u8]) -> Error {
        match Error::parse(body) {
            Ok(e) => e,
            Err(_) => match status {
                http::StatusCode::FORBIDDEN | http::StatusCode::UNAUTHORIZED => {
                    Error::PermissionDenied
                }
                http::StatusCode::NOT_FOUND => Error::NotFound(String::new()),
                s => Error::Unknown(format!("server answered {s}")),
            },
        }
    }
}
