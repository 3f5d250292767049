use serde::{Deserialize, Serialize};

use crate::models::presence::PresencePayload;

/// Opcodes for relay messages.
pub mod opcode {
    pub const EVENT: u8 = 0;
    pub const HELLO: u8 = 1;
    pub const INITIALIZE: u8 = 2;
    pub const HEARTBEAT: u8 = 3;
}

/// Event types that carry a full presence payload.
pub mod event_type {
    pub const INIT_STATE: &str = "INIT_STATE";
    pub const PRESENCE_UPDATE: &str = "PRESENCE_UPDATE";
}

/// Relay message envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelayFrame {
    #[serde(default)]
    pub op: u8,
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "d", skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// HELLO payload data.
#[derive(Debug, Deserialize)]
pub struct HelloData {
    pub heartbeat_interval: u64,
}

/// What one inbound frame means to the client.
#[derive(Debug)]
pub enum Inbound {
    Presence(Box<PresencePayload>),
    Hello(HelloData),
    Ignored,
}

pub fn subscribe_frame(user_id: &str) -> String {
    serde_json::json!({
        "op": opcode::INITIALIZE,
        "d": { "subscribe_to_id": user_id }
    })
    .to_string()
}

pub fn heartbeat_frame() -> String {
    serde_json::json!({ "op": opcode::HEARTBEAT }).to_string()
}

/// Decode an inbound text frame. Frames that fail to decode, unknown event
/// types and malformed payloads are all `Ignored`.
pub fn decode(text: &str) -> Inbound {
    let frame = match serde_json::from_str::<RelayFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!("undecodable relay frame: {e}");
            return Inbound::Ignored;
        }
    };

    match frame.op {
        opcode::HELLO => frame
            .data
            .and_then(|d| serde_json::from_value::<HelloData>(d).ok())
            .map(Inbound::Hello)
            .unwrap_or(Inbound::Ignored),
        opcode::EVENT => {
            let is_presence = matches!(
                frame.event_type.as_deref(),
                Some(event_type::INIT_STATE) | Some(event_type::PRESENCE_UPDATE)
            );
            if !is_presence {
                return Inbound::Ignored;
            }
            match frame.data.map(serde_json::from_value::<PresencePayload>) {
                Some(Ok(payload)) => Inbound::Presence(Box::new(payload)),
                Some(Err(e)) => {
                    tracing::debug!("malformed presence payload: {e}");
                    Inbound::Ignored
                }
                None => Inbound::Ignored,
            }
        }
        _ => Inbound::Ignored,
    }
}
