//! Text websocket protocol: `PREFIX` or `PREFIX:{json}` per message.

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::controller::{CanvasSize, PointerEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    /// `POINTER:{"kind":"press","button":"left","x":10,"y":20}`
    Pointer(PointerEvent),
    /// `RESIZE:{"width":640,"height":480}`
    Resize(CanvasSize),
    /// `VERIFY`, compare incremental intersections against a full pass.
    Verify,
    /// `FRAME`, resend the current frame to this client.
    Frame,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Malformed {command} payload: {source}")]
    Malformed {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ProtocolError {
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::UnknownCommand(_) => "UNKNOWN_COMMAND",
            ProtocolError::Malformed { .. } => "MALFORMED_PAYLOAD",
        }
    }
}

impl ClientCommand {
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let text = text.trim();
        if let Some(json_str) = text.strip_prefix("POINTER:") {
            serde_json::from_str(json_str)
                .map(ClientCommand::Pointer)
                .map_err(|source| ProtocolError::Malformed { command: "POINTER", source })
        } else if let Some(json_str) = text.strip_prefix("RESIZE:") {
            serde_json::from_str(json_str)
                .map(ClientCommand::Resize)
                .map_err(|source| ProtocolError::Malformed { command: "RESIZE", source })
        } else if text == "VERIFY" {
            Ok(ClientCommand::Verify)
        } else if text == "FRAME" {
            Ok(ClientCommand::Frame)
        } else {
            Err(ProtocolError::UnknownCommand(text.to_string()))
        }
    }
}

/// `PREFIX:{json}` for an outbound update.
pub fn format_update<T: Serialize>(prefix: &str, payload: &T) -> String {
    let json = serde_json::to_string(payload).unwrap_or("{}".to_string());
    format!("{}:{}", prefix, json)
}

/// Format an error as a JSON message for the frontend
pub fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!("ERROR_UPDATE:{}", json!({
        "code": code,
        "message": message,
        "severity": severity
    }))
}
