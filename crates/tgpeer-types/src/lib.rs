//! tgpeer Types - Core types shared across the tgpeer workspace
//!
//! Two families of types live here: the wire-format objects exactly as the
//! server sends them (`wire`), and the canonical records the rest of the
//! workspace stores and merges (`user`, `media`, `peer`).

pub mod media;
pub mod peer;
pub mod user;
pub mod wire;

pub use media::{CloudPeerPhotoResource, ImageRepresentation, PhotoSizeSpec};
pub use peer::{ParsePeerIdError, PeerId, PeerNamespace};
pub use user::{
    AccessHash, BotFlags, BotInfo, EmojiStatus, PeerUsername, RestrictionInfo, RestrictionRule,
    TelegramUser, UserFlags, UsernameFlags,
};
pub use wire::{
    PeerColor, RestrictionReason, UserProfilePhoto, Username, WireEmojiStatus, WireUser,
    WireUserFields,
};
