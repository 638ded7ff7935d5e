use crate::media::ImageRepresentation;
use crate::peer::PeerId;
use serde::{Deserialize, Serialize};

/// Credential for addressing a peer directly
///
/// `Personal` hashes come from full projections and are tied to the current
/// account. `GenericPublic` hashes come from min projections and only carry
/// group-mediated visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "hash", rename_all = "snake_case")]
pub enum AccessHash {
    Personal(i64),
    GenericPublic(i64),
}

impl AccessHash {
    pub fn value(&self) -> i64 {
        match self {
            AccessHash::Personal(hash) | AccessHash::GenericPublic(hash) => *hash,
        }
    }

    pub fn is_personal(&self) -> bool {
        matches!(self, AccessHash::Personal(_))
    }

    pub fn is_generic_public(&self) -> bool {
        matches!(self, AccessHash::GenericPublic(_))
    }
}

/// Boolean account attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFlags {
    pub is_verified: bool,
    pub is_support: bool,
    pub is_scam: bool,
    pub is_fake: bool,
    pub is_premium: bool,
    pub is_close_friend: bool,
}

impl UserFlags {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Capabilities of an automated account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BotFlags {
    pub has_access_to_chat_history: bool,
    pub works_with_groups: bool,
    pub requires_geolocation_for_inline_requests: bool,
    pub can_be_added_to_attach_menu: bool,
    pub can_edit: bool,
}

/// Present only on bot accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    pub flags: BotFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_placeholder: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct UsernameFlags {
    pub is_editable: bool,
    pub is_active: bool,
}

/// One entry of a user's username list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerUsername {
    pub flags: UsernameFlags,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionRule {
    pub platform: String,
    pub reason: String,
    pub text: String,
}

/// Content restriction metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionInfo {
    pub rules: Vec<RestrictionRule>,
}

/// Decorative status shown next to the name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiStatus {
    pub file_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<i32>,
}

/// Canonical local record of a Telegram user
///
/// Records are values: every change goes through one of the merge functions
/// or a `with_updated_*` builder and produces a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: PeerId,
    #[serde(default)]
    pub access_hash: Option<AccessHash>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo: Vec<ImageRepresentation>,
    #[serde(default)]
    pub bot_info: Option<BotInfo>,
    #[serde(default)]
    pub restriction_info: Option<RestrictionInfo>,
    #[serde(default)]
    pub flags: UserFlags,
    #[serde(default)]
    pub emoji_status: Option<EmojiStatus>,
    #[serde(default)]
    pub usernames: Vec<PeerUsername>,
    /// `None` means unknown, which is not the same as `Some(false)`
    #[serde(default)]
    pub stories_hidden: Option<bool>,
    #[serde(default)]
    pub name_color: Option<i32>,
    #[serde(default)]
    pub background_emoji_id: Option<i64>,
    #[serde(default)]
    pub profile_color: Option<i32>,
    #[serde(default)]
    pub profile_background_emoji_id: Option<i64>,
}

impl TelegramUser {
    /// Record with nothing but an identifier
    pub fn empty(id: PeerId) -> Self {
        Self {
            id,
            access_hash: None,
            first_name: None,
            last_name: None,
            username: None,
            phone: None,
            photo: Vec::new(),
            bot_info: None,
            restriction_info: None,
            flags: UserFlags::default(),
            emoji_status: None,
            usernames: Vec::new(),
            stories_hidden: None,
            name_color: None,
            background_emoji_id: None,
            profile_color: None,
            profile_background_emoji_id: None,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.bot_info.is_some()
    }

    /// Name for display: first and last name, then username, then a placeholder
    pub fn display_title(&self) -> String {
        match (non_empty(&self.first_name), non_empty(&self.last_name)) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => self
                .address_name()
                .map(str::to_string)
                .unwrap_or_else(|| "Deleted Account".to_string()),
        }
    }

    /// Public handle: first active username, else the legacy username
    pub fn address_name(&self) -> Option<&str> {
        self.usernames
            .iter()
            .find(|u| u.flags.is_active)
            .map(|u| u.username.as_str())
            .or(self.username.as_deref())
    }

    pub fn with_updated_names(&self, first_name: Option<String>, last_name: Option<String>) -> Self {
        Self {
            first_name,
            last_name,
            ..self.clone()
        }
    }

    pub fn with_updated_username(&self, username: Option<String>) -> Self {
        Self {
            username,
            ..self.clone()
        }
    }

    pub fn with_updated_usernames(&self, usernames: Vec<PeerUsername>) -> Self {
        Self {
            usernames,
            ..self.clone()
        }
    }

    pub fn with_updated_phone(&self, phone: Option<String>) -> Self {
        Self {
            phone,
            ..self.clone()
        }
    }

    pub fn with_updated_photo(&self, photo: Vec<ImageRepresentation>) -> Self {
        Self {
            photo,
            ..self.clone()
        }
    }

    pub fn with_updated_emoji_status(&self, emoji_status: Option<EmojiStatus>) -> Self {
        Self {
            emoji_status,
            ..self.clone()
        }
    }

    pub fn with_updated_flags(&self, flags: UserFlags) -> Self {
        Self {
            flags,
            ..self.clone()
        }
    }

    pub fn with_updated_stories_hidden(&self, stories_hidden: Option<bool>) -> Self {
        Self {
            stories_hidden,
            ..self.clone()
        }
    }

    pub fn with_updated_name_color(
        &self,
        name_color: Option<i32>,
        background_emoji_id: Option<i64>,
    ) -> Self {
        Self {
            name_color,
            background_emoji_id,
            ..self.clone()
        }
    }

    pub fn with_updated_profile_color(
        &self,
        profile_color: Option<i32>,
        profile_background_emoji_id: Option<i64>,
    ) -> Self {
        Self {
            profile_color,
            profile_background_emoji_id,
            ..self.clone()
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn username(name: &str, active: bool) -> PeerUsername {
        PeerUsername {
            flags: UsernameFlags {
                is_editable: false,
                is_active: active,
            },
            username: name.to_string(),
        }
    }

    #[test]
    fn test_display_title_prefers_names() {
        let user = TelegramUser::empty(PeerId::user(1))
            .with_updated_names(Some("Ada".into()), Some("Lovelace".into()));
        assert_eq!(user.display_title(), "Ada Lovelace");

        let user = user.with_updated_names(None, Some("Lovelace".into()));
        assert_eq!(user.display_title(), "Lovelace");
    }

    #[test]
    fn test_display_title_falls_back_to_username() {
        let user = TelegramUser::empty(PeerId::user(1))
            .with_updated_names(Some(String::new()), None)
            .with_updated_username(Some("ada".into()));
        assert_eq!(user.display_title(), "ada");

        let user = TelegramUser::empty(PeerId::user(1));
        assert_eq!(user.display_title(), "Deleted Account");
    }

    #[test]
    fn test_address_name_uses_first_active_username() {
        let user = TelegramUser::empty(PeerId::user(1))
            .with_updated_username(Some("legacy".into()))
            .with_updated_usernames(vec![username("inactive", false), username("primary", true)]);
        assert_eq!(user.address_name(), Some("primary"));

        let user = user.with_updated_usernames(vec![username("inactive", false)]);
        assert_eq!(user.address_name(), Some("legacy"));
    }

    #[test]
    fn test_builders_leave_source_untouched() {
        let user = TelegramUser::empty(PeerId::user(1));
        let updated = user.with_updated_stories_hidden(Some(true));
        assert_eq!(user.stories_hidden, None);
        assert_eq!(updated.stories_hidden, Some(true));
        assert_eq!(updated.id, user.id);
    }

    #[test]
    fn test_access_hash_serde_shape() {
        let json = serde_json::to_value(AccessHash::GenericPublic(9)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "generic_public", "hash": 9}));
        let back: AccessHash = serde_json::from_value(json).unwrap();
        assert!(back.is_generic_public());
        assert_eq!(back.value(), 9);
    }

    #[test]
    fn test_record_deserializes_with_missing_optionals() {
        let user: TelegramUser =
            serde_json::from_str(r#"{"id": {"namespace": "user", "id": 3}}"#).unwrap();
        assert_eq!(user, TelegramUser::empty(PeerId::user(3)));
    }
}
