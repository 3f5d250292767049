use std::fmt;

use tokio_tungstenite::tungstenite;

#[derive(Debug)]
pub enum CardError {
    Http(reqwest::Error),
    WebSocket(tungstenite::Error),
    Decode(serde_json::Error),
    RelayStatus { status: u16, body: String },
    Unsuccessful,
    Clipboard(String),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::Http(e) => write!(f, "HTTP error: {e}"),
            CardError::WebSocket(e) => write!(f, "websocket error: {e}"),
            CardError::Decode(e) => write!(f, "decode error: {e}"),
            CardError::RelayStatus { status, body } => {
                write!(f, "relay returned {status}: {body}")
            }
            CardError::Unsuccessful => write!(f, "relay reported an unsuccessful lookup"),
            CardError::Clipboard(e) => write!(f, "clipboard error: {e}"),
        }
    }
}

impl std::error::Error for CardError {}

impl From<reqwest::Error> for CardError {
    fn from(e: reqwest::Error) -> Self {
        CardError::Http(e)
    }
}

impl From<tungstenite::Error> for CardError {
    fn from(e: tungstenite::Error) -> Self {
        CardError::WebSocket(e)
    }
}

impl From<serde_json::Error> for CardError {
    fn from(e: serde_json::Error) -> Self {
        CardError::Decode(e)
    }
}
