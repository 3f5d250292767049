use crate::error::CardError;

pub const COPIED_MESSAGE: &str = "User ID copied to clipboard!";

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CardError>;
}

/// System clipboard via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn open() -> Result<Self, CardError> {
        let inner = arboard::Clipboard::new().map_err(|e| CardError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CardError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| CardError::Clipboard(e.to_string()))
    }
}

/// The card's user-facing controls.
pub struct CardActions {
    user_id: String,
    source_url: String,
}

impl CardActions {
    pub fn new(user_id: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            source_url: source_url.into(),
        }
    }

    /// Copy the tracked user id. Returns the confirmation text to show; a
    /// failed write shows nothing and is only logged.
    pub fn copy_user_id<C: Clipboard + ?Sized>(&self, clipboard: &mut C) -> Result<&'static str, CardError> {
        match clipboard.write_text(&self.user_id) {
            Ok(()) => Ok(COPIED_MESSAGE),
            Err(e) => {
                tracing::warn!("failed to copy user id: {e}");
                Err(e)
            }
        }
    }

    pub fn view_source_url(&self) -> &str {
        &self.source_url
    }
}
