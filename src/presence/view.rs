use super::assets::ImageRef;

pub const GAME_HEADER: &str = "PLAYING A GAME";
pub const TRACK_HEADER: &str = "LISTENING TO SPOTIFY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomStatusDisplay {
    pub text: String,
    /// `None` hides the emoji slot.
    pub emoji_url: Option<String>,
}

/// Every field of the rich-activity section. Building a fresh value for
/// each snapshot resets whatever the previous kind had populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDisplay {
    pub header: String,
    pub name: String,
    pub details: String,
    pub state: String,
    pub large_image: ImageRef,
    /// `None` hides the small overlay image.
    pub small_image: Option<String>,
}

/// The display surface the presence card writes into.
///
/// Methods take `&self` because countdown tasks write the timestamp field
/// concurrently with the owning component; implementations provide their
/// own interior mutability.
pub trait PresenceView: Send + Sync + 'static {
    fn set_user(&self, display_name: &str, username: &str);

    fn set_status(&self, icon: &str, label: &str);

    /// `None` hides the custom status row.
    fn set_custom_status(&self, custom: Option<&CustomStatusDisplay>);

    /// `None` hides the rich-activity section.
    fn set_activity(&self, activity: Option<&ActivityDisplay>);

    /// `None` clears and hides the timestamp line.
    fn set_timestamp(&self, text: Option<&str>);
}
