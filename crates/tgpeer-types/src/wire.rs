//! Wire-format user objects
//!
//! These mirror the RPC schema one to one. Flag words are kept as raw
//! integers here and are only interpreted by the decoders in `tgpeer-users`.
//! JSON uses the schema constructor name in a `_` field, e.g.
//! `{"_": "userEmpty", "id": 42}`.

use crate::peer::PeerId;
use serde::{Deserialize, Serialize};

/// A user object as received from the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_")]
pub enum WireUser {
    #[serde(rename = "user")]
    User(WireUserFields),
    #[serde(rename = "userEmpty")]
    Empty { id: i64 },
}

impl WireUser {
    pub fn id(&self) -> i64 {
        match self {
            WireUser::User(fields) => fields.id,
            WireUser::Empty { id } => *id,
        }
    }

    pub fn peer_id(&self) -> PeerId {
        PeerId::user(self.id())
    }
}

/// Payload of the populated `user` constructor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireUserFields {
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub flags2: u32,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_hash: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<UserProfilePhoto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_inline_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction_reason: Option<Vec<RestrictionReason>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_status: Option<WireEmojiStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usernames: Option<Vec<Username>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<PeerColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_color: Option<PeerColor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_")]
pub enum UserProfilePhoto {
    #[serde(rename = "userProfilePhotoEmpty")]
    Empty,
    #[serde(rename = "userProfilePhoto")]
    Photo {
        #[serde(default)]
        flags: u32,
        photo_id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stripped_thumb: Option<Vec<u8>>,
        dc_id: i32,
    },
}

/// `peerColor` constructor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerColor {
    #[serde(default)]
    pub flags: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_emoji_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_")]
pub enum WireEmojiStatus {
    #[serde(rename = "emojiStatusEmpty")]
    Empty,
    #[serde(rename = "emojiStatus")]
    Status { document_id: i64 },
    #[serde(rename = "emojiStatusUntil")]
    Until { document_id: i64, until: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username {
    #[serde(default)]
    pub flags: u32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionReason {
    pub platform: String,
    pub reason: String,
    pub text: String,
}
