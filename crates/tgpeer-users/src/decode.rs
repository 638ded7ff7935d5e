//! Field decoders for wire-format user objects
//!
//! Stateless translation of flag words and descriptor variants into the
//! canonical types. Absent or empty variants decode to empty output, never an
//! error. Raw flag integers do not leave this module.

use tgpeer_types::{
    AccessHash, BotFlags, BotInfo, CloudPeerPhotoResource, EmojiStatus, ImageRepresentation,
    PeerColor, PeerUsername, PhotoSizeSpec, RestrictionInfo, RestrictionReason, RestrictionRule,
    UserFlags, UserProfilePhoto, Username, UsernameFlags, WireEmojiStatus, WireUserFields,
};

/// Bit positions of the `user` constructor's `flags` word
mod user_bits {
    pub const BOT: u32 = 1 << 14;
    pub const BOT_CHAT_HISTORY: u32 = 1 << 15;
    pub const BOT_NOCHATS: u32 = 1 << 16;
    pub const VERIFIED: u32 = 1 << 17;
    pub const MIN: u32 = 1 << 20;
    pub const BOT_INLINE_GEO: u32 = 1 << 21;
    pub const SUPPORT: u32 = 1 << 23;
    pub const SCAM: u32 = 1 << 24;
    pub const APPLY_MIN_PHOTO: u32 = 1 << 25;
    pub const FAKE: u32 = 1 << 26;
    pub const BOT_ATTACH_MENU: u32 = 1 << 27;
    pub const PREMIUM: u32 = 1 << 28;
}

/// Bit positions of the `user` constructor's `flags2` word
mod user_bits2 {
    pub const BOT_CAN_EDIT: u32 = 1 << 1;
    pub const CLOSE_FRIEND: u32 = 1 << 2;
    pub const STORIES_HIDDEN: u32 = 1 << 3;
}

/// Bit positions of the `userProfilePhoto` constructor
mod photo_flags {
    pub const HAS_VIDEO: u32 = 1 << 0;
    pub const PERSONAL: u32 = 1 << 2;
}

/// Bit positions of the `username` constructor
mod username_flags {
    pub const EDITABLE: u32 = 1 << 0;
    pub const ACTIVE: u32 = 1 << 1;
}

fn has(word: u32, mask: u32) -> bool {
    word & mask != 0
}

/// Whether the server sent a redacted min projection
pub fn is_min(user: &WireUserFields) -> bool {
    has(user.flags, user_bits::MIN)
}

/// Whether a min projection asks for its photo to replace the cached one
pub fn applies_min_photo(user: &WireUserFields) -> bool {
    has(user.flags, user_bits::APPLY_MIN_PHOTO)
}

/// Account attributes carried in the two flag words
pub fn user_flags(flags: u32, flags2: u32) -> UserFlags {
    UserFlags {
        is_verified: has(flags, user_bits::VERIFIED),
        is_support: has(flags, user_bits::SUPPORT),
        is_scam: has(flags, user_bits::SCAM),
        is_fake: has(flags, user_bits::FAKE),
        is_premium: has(flags, user_bits::PREMIUM),
        is_close_friend: has(flags2, user_bits2::CLOSE_FRIEND),
    }
}

/// Bot capabilities, or `None` for ordinary accounts
pub fn bot_info(flags: u32, flags2: u32, inline_placeholder: Option<&str>) -> Option<BotInfo> {
    if !has(flags, user_bits::BOT) {
        return None;
    }

    Some(BotInfo {
        flags: BotFlags {
            has_access_to_chat_history: has(flags, user_bits::BOT_CHAT_HISTORY),
            // the wire bit says "no chats", so groups work when it is clear
            works_with_groups: !has(flags, user_bits::BOT_NOCHATS),
            requires_geolocation_for_inline_requests: has(flags, user_bits::BOT_INLINE_GEO),
            can_be_added_to_attach_menu: has(flags, user_bits::BOT_ATTACH_MENU),
            can_edit: has(flags2, user_bits2::BOT_CAN_EDIT),
        },
        inline_placeholder: inline_placeholder.map(str::to_string),
    })
}

/// Classify an access hash by the projection it arrived in
pub fn access_hash(access_hash: Option<i64>, flags: u32) -> Option<AccessHash> {
    access_hash.map(|hash| {
        if has(flags, user_bits::MIN) {
            AccessHash::GenericPublic(hash)
        } else {
            AccessHash::Personal(hash)
        }
    })
}

/// Stories visibility, known only for full projections
pub fn stories_hidden(flags: u32, flags2: u32) -> Option<bool> {
    if has(flags, user_bits::MIN) {
        None
    } else {
        Some(has(flags2, user_bits2::STORIES_HIDDEN))
    }
}

/// Small and full-size renditions of a profile photo, in that order
pub fn profile_photo(photo: Option<&UserProfilePhoto>) -> Vec<ImageRepresentation> {
    match photo {
        None | Some(UserProfilePhoto::Empty) => Vec::new(),
        Some(UserProfilePhoto::Photo {
            flags,
            photo_id,
            stripped_thumb,
            dc_id,
        }) => {
            let has_video = has(*flags, photo_flags::HAS_VIDEO);
            let is_personal = has(*flags, photo_flags::PERSONAL);

            [PhotoSizeSpec::Small, PhotoSizeSpec::Full]
                .into_iter()
                .map(|size_spec| {
                    ImageRepresentation::square(
                        CloudPeerPhotoResource {
                            datacenter_id: *dc_id,
                            photo_id: *photo_id,
                            size_spec,
                        },
                        stripped_thumb.clone(),
                        has_video,
                        is_personal,
                    )
                })
                .collect()
        }
    }
}

/// `(color index, background emoji id)` of a colour descriptor
pub fn peer_color(color: Option<&PeerColor>) -> (Option<i32>, Option<i64>) {
    match color {
        Some(color) => (color.color, color.background_emoji_id),
        None => (None, None),
    }
}

/// Decorative emoji status; the empty constructor means no status
pub fn emoji_status(status: Option<&WireEmojiStatus>) -> Option<EmojiStatus> {
    match status? {
        WireEmojiStatus::Empty => None,
        WireEmojiStatus::Status { document_id } => Some(EmojiStatus {
            file_id: *document_id,
            expiration_date: None,
        }),
        WireEmojiStatus::Until { document_id, until } => Some(EmojiStatus {
            file_id: *document_id,
            expiration_date: Some(*until),
        }),
    }
}

/// Ordered username list
pub fn usernames(usernames: Option<&[Username]>) -> Vec<PeerUsername> {
    usernames
        .unwrap_or_default()
        .iter()
        .map(|entry| PeerUsername {
            flags: UsernameFlags {
                is_editable: has(entry.flags, username_flags::EDITABLE),
                is_active: has(entry.flags, username_flags::ACTIVE),
            },
            username: entry.username.clone(),
        })
        .collect()
}

/// Restriction rules; present whenever the wire carries a reason list
pub fn restriction_info(reasons: Option<&[RestrictionReason]>) -> Option<RestrictionInfo> {
    reasons.map(|reasons| RestrictionInfo {
        rules: reasons
            .iter()
            .map(|r| RestrictionRule {
                platform: r.platform.clone(),
                reason: r.reason.clone(),
                text: r.text.clone(),
            })
            .collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_flags_bits() {
        let decoded = user_flags((1 << 17) | (1 << 28), 1 << 2);
        assert!(decoded.is_verified);
        assert!(decoded.is_premium);
        assert!(decoded.is_close_friend);
        assert!(!decoded.is_support);
        assert!(!decoded.is_scam);
        assert!(!decoded.is_fake);

        let decoded = user_flags((1 << 23) | (1 << 24) | (1 << 26), 0);
        assert!(decoded.is_support && decoded.is_scam && decoded.is_fake);
        assert!(!decoded.is_close_friend);
    }

    #[test]
    fn test_bot_info_absent_without_bot_bit() {
        assert_eq!(bot_info(1 << 15, 1 << 1, Some("search")), None);
    }

    #[test]
    fn test_bot_info_capabilities() {
        let info = bot_info((1 << 14) | (1 << 15) | (1 << 21) | (1 << 27), 1 << 1, Some("gif"))
            .unwrap();
        assert!(info.flags.has_access_to_chat_history);
        assert!(info.flags.works_with_groups);
        assert!(info.flags.requires_geolocation_for_inline_requests);
        assert!(info.flags.can_be_added_to_attach_menu);
        assert!(info.flags.can_edit);
        assert_eq!(info.inline_placeholder.as_deref(), Some("gif"));
    }

    #[test]
    fn test_bot_nochats_clears_works_with_groups() {
        let info = bot_info((1 << 14) | (1 << 16), 0, None).unwrap();
        assert!(!info.flags.works_with_groups);
        assert!(!info.flags.can_edit);
        assert_eq!(info.inline_placeholder, None);
    }

    #[test]
    fn test_access_hash_classification() {
        assert_eq!(access_hash(Some(5), 0), Some(AccessHash::Personal(5)));
        assert_eq!(access_hash(Some(5), 1 << 20), Some(AccessHash::GenericPublic(5)));
        assert_eq!(access_hash(None, 1 << 20), None);
    }

    #[test]
    fn test_stories_hidden_only_for_full_projections() {
        assert_eq!(stories_hidden(0, 1 << 3), Some(true));
        assert_eq!(stories_hidden(0, 0), Some(false));
        assert_eq!(stories_hidden(1 << 20, 1 << 3), None);
    }

    #[test]
    fn test_profile_photo_renditions() {
        let photo = UserProfilePhoto::Photo {
            flags: (1 << 0) | (1 << 2),
            photo_id: 11,
            stripped_thumb: Some(vec![1, 2, 3]),
            dc_id: 4,
        };
        let reps = profile_photo(Some(&photo));
        assert_eq!(reps.len(), 2);
        assert_eq!(reps[0].resource.size_spec, PhotoSizeSpec::Small);
        assert_eq!((reps[0].width, reps[0].height), (80, 80));
        assert_eq!(reps[1].resource.size_spec, PhotoSizeSpec::Full);
        assert_eq!((reps[1].width, reps[1].height), (640, 640));
        for rep in &reps {
            assert!(rep.has_video);
            assert!(rep.is_personal);
            assert_eq!(rep.resource.photo_id, 11);
            assert_eq!(rep.resource.datacenter_id, 4);
            assert_eq!(rep.immediate_thumbnail_data.as_deref(), Some(&[1u8, 2, 3][..]));
        }
    }

    #[test]
    fn test_profile_photo_empty_variants() {
        assert!(profile_photo(None).is_empty());
        assert!(profile_photo(Some(&UserProfilePhoto::Empty)).is_empty());
    }

    #[test]
    fn test_peer_color() {
        let color = PeerColor {
            flags: 0b11,
            color: Some(5),
            background_emoji_id: Some(900),
        };
        assert_eq!(peer_color(Some(&color)), (Some(5), Some(900)));
        assert_eq!(peer_color(None), (None, None));
    }

    #[test]
    fn test_emoji_status_variants() {
        assert_eq!(emoji_status(None), None);
        assert_eq!(emoji_status(Some(&WireEmojiStatus::Empty)), None);
        assert_eq!(
            emoji_status(Some(&WireEmojiStatus::Status { document_id: 8 })),
            Some(EmojiStatus {
                file_id: 8,
                expiration_date: None,
            })
        );
        assert_eq!(
            emoji_status(Some(&WireEmojiStatus::Until {
                document_id: 8,
                until: 100,
            })),
            Some(EmojiStatus {
                file_id: 8,
                expiration_date: Some(100),
            })
        );
    }

    #[test]
    fn test_usernames_keep_order_and_flags() {
        let wire = vec![
            Username {
                flags: 0b11,
                username: "main".into(),
            },
            Username {
                flags: 0,
                username: "old".into(),
            },
        ];
        let decoded = usernames(Some(&wire));
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].username, "main");
        assert!(decoded[0].flags.is_editable && decoded[0].flags.is_active);
        assert_eq!(decoded[1].username, "old");
        assert!(!decoded[1].flags.is_editable && !decoded[1].flags.is_active);
        assert!(usernames(None).is_empty());
    }

    #[test]
    fn test_restriction_info_presence() {
        assert_eq!(restriction_info(None), None);
        assert_eq!(
            restriction_info(Some(&[])),
            Some(RestrictionInfo { rules: Vec::new() })
        );

        let reasons = [RestrictionReason {
            platform: "ios".into(),
            reason: "porn".into(),
            text: "unavailable".into(),
        }];
        let info = restriction_info(Some(&reasons)).unwrap();
        assert_eq!(info.rules.len(), 1);
        assert_eq!(info.rules[0].platform, "ios");
    }
}
