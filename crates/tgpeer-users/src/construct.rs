//! Building canonical records from wire objects

use crate::decode;
use tgpeer_types::{PeerId, TelegramUser, WireUser, WireUserFields};
use tracing::trace;

/// Build a canonical record from a freshly received wire object
///
/// The empty constructor yields a record with nothing but its id. A
/// populated object is decoded field by field; its access hash is classified
/// `GenericPublic` for min projections and `Personal` otherwise.
pub fn construct_user(user: &WireUser) -> TelegramUser {
    match user {
        WireUser::Empty { id } => {
            trace!(user_id = id, "constructing empty user");
            TelegramUser::empty(PeerId::user(*id))
        }
        WireUser::User(fields) => construct_populated(fields),
    }
}

fn construct_populated(user: &WireUserFields) -> TelegramUser {
    let (name_color, background_emoji_id) = decode::peer_color(user.color.as_ref());
    let (profile_color, profile_background_emoji_id) =
        decode::peer_color(user.profile_color.as_ref());

    trace!(user_id = user.id, min = decode::is_min(user), "constructing user");

    TelegramUser {
        id: PeerId::user(user.id),
        access_hash: decode::access_hash(user.access_hash, user.flags),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
        phone: user.phone.clone(),
        photo: decode::profile_photo(user.photo.as_ref()),
        bot_info: decode::bot_info(
            user.flags,
            user.flags2,
            user.bot_inline_placeholder.as_deref(),
        ),
        restriction_info: decode::restriction_info(user.restriction_reason.as_deref()),
        flags: decode::user_flags(user.flags, user.flags2),
        emoji_status: decode::emoji_status(user.emoji_status.as_ref()),
        usernames: decode::usernames(user.usernames.as_deref()),
        stories_hidden: decode::stories_hidden(user.flags, user.flags2),
        name_color,
        background_emoji_id,
        profile_color,
        profile_background_emoji_id,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tgpeer_types::{AccessHash, PeerColor, UserProfilePhoto, WireEmojiStatus};

    const MIN: u32 = 1 << 20;

    fn full_user() -> WireUserFields {
        WireUserFields {
            flags: (1 << 14) | (1 << 17),
            flags2: (1 << 1) | (1 << 3),
            id: 100,
            access_hash: Some(555),
            first_name: Some("Linus".into()),
            last_name: Some("T".into()),
            username: Some("linus".into()),
            phone: Some("15550100".into()),
            photo: Some(UserProfilePhoto::Photo {
                flags: 0,
                photo_id: 9,
                stripped_thumb: None,
                dc_id: 1,
            }),
            bot_inline_placeholder: Some("search".into()),
            emoji_status: Some(WireEmojiStatus::Status { document_id: 77 }),
            color: Some(PeerColor {
                flags: 0b11,
                color: Some(3),
                background_emoji_id: Some(31),
            }),
            profile_color: Some(PeerColor {
                flags: 0b01,
                color: Some(6),
                background_emoji_id: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_user_has_only_id() {
        let user = construct_user(&WireUser::Empty { id: 12 });
        assert_eq!(user, TelegramUser::empty(PeerId::user(12)));
        assert_eq!(user.access_hash, None);
        assert!(user.photo.is_empty());
    }

    #[test]
    fn test_full_projection_decodes_everything() {
        let user = construct_user(&WireUser::User(full_user()));

        assert_eq!(user.id, PeerId::user(100));
        assert_eq!(user.access_hash, Some(AccessHash::Personal(555)));
        assert_eq!(user.first_name.as_deref(), Some("Linus"));
        assert_eq!(user.phone.as_deref(), Some("15550100"));
        assert_eq!(user.photo.len(), 2);
        assert!(user.flags.is_verified);
        assert!(!user.flags.is_premium);

        let bot = user.bot_info.as_ref().unwrap();
        assert!(bot.flags.can_edit);
        assert_eq!(bot.inline_placeholder.as_deref(), Some("search"));

        assert_eq!(user.emoji_status.map(|s| s.file_id), Some(77));
        assert_eq!(user.stories_hidden, Some(true));
        assert_eq!(user.name_color, Some(3));
        assert_eq!(user.background_emoji_id, Some(31));
        assert_eq!(user.profile_color, Some(6));
        assert_eq!(user.profile_background_emoji_id, None);
        assert_eq!(user.restriction_info, None);
    }

    #[test]
    fn test_min_projection_is_generic_public_without_stories() {
        let mut fields = full_user();
        fields.flags |= MIN;
        let user = construct_user(&WireUser::User(fields));

        assert_eq!(user.access_hash, Some(AccessHash::GenericPublic(555)));
        assert_eq!(user.stories_hidden, None);
    }

    #[test]
    fn test_no_access_hash_means_no_scope() {
        let mut fields = full_user();
        fields.access_hash = None;
        let user = construct_user(&WireUser::User(fields));
        assert_eq!(user.access_hash, None);
    }
}
