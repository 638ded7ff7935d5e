//! Reconciling new observations with cached records
//!
//! Two entry points:
//!
//! - [`merge_wire_user`] folds a wire object into an optional cached record
//! - [`merge_users`] reconciles two canonical records of the same user
//!
//! In both, a lower-trust observation may refresh the fields it reliably
//! carries but never replaces a `Personal` access hash.

use crate::construct::construct_user;
use crate::decode;
use tgpeer_types::{AccessHash, TelegramUser, UserFlags, WireUser, WireUserFields};
use tracing::debug;

/// Fold a wire object into whatever is cached for the same user
///
/// Full projections and the empty constructor replace the cached record
/// outright. A min projection merged over a cached record keeps the cached
/// identity and contact fields and only refreshes what min objects carry.
pub fn merge_wire_user(cached: Option<&TelegramUser>, user: &WireUser) -> TelegramUser {
    let fields = match user {
        // An empty constructor erases any cached record for this id.
        WireUser::Empty { .. } => return construct_user(user),
        WireUser::User(fields) => fields,
    };

    if !decode::is_min(fields) {
        return construct_user(user);
    }

    match cached {
        Some(cached) => merge_min_into_cached(cached, fields),
        None => construct_user(user),
    }
}

fn merge_min_into_cached(cached: &TelegramUser, user: &WireUserFields) -> TelegramUser {
    // min projections never carry close-friend status
    let flags = UserFlags {
        is_close_friend: cached.flags.is_close_friend,
        ..decode::user_flags(user.flags, user.flags2)
    };

    let photo = match &user.photo {
        Some(photo) if decode::applies_min_photo(user) => decode::profile_photo(Some(photo)),
        _ => cached.photo.clone(),
    };

    let mut bot_info = decode::bot_info(
        user.flags,
        user.flags2,
        user.bot_inline_placeholder.as_deref(),
    );
    if let (Some(bot_info), Some(cached_bot)) = (bot_info.as_mut(), cached.bot_info.as_ref()) {
        if cached_bot.flags.can_edit {
            bot_info.flags.can_edit = true;
        }
    }

    let access_hash = match cached.access_hash {
        Some(AccessHash::Personal(_)) => cached.access_hash,
        _ => decode::access_hash(user.access_hash, user.flags).or(cached.access_hash),
    };

    let (name_color, background_emoji_id) = decode::peer_color(user.color.as_ref());
    let (profile_color, profile_background_emoji_id) =
        decode::peer_color(user.profile_color.as_ref());

    debug!(
        user_id = %cached.id,
        kept_personal_hash = cached.access_hash.is_some_and(|h| h.is_personal()),
        "merged min user into cached record"
    );

    TelegramUser {
        id: cached.id,
        access_hash,
        first_name: cached.first_name.clone(),
        last_name: cached.last_name.clone(),
        username: cached.username.clone(),
        phone: cached.phone.clone(),
        photo,
        bot_info,
        restriction_info: decode::restriction_info(user.restriction_reason.as_deref()),
        flags,
        emoji_status: decode::emoji_status(user.emoji_status.as_ref()),
        usernames: cached.usernames.clone(),
        stories_hidden: cached.stories_hidden,
        name_color,
        background_emoji_id,
        profile_color,
        profile_background_emoji_id,
    }
}

/// Reconcile a cached record with a fresher canonical record of the same user
///
/// With no base the fresher record is returned as is. A fresher record that
/// holds a `Personal` access hash supersedes the base entirely; otherwise the
/// base keeps its identity fields and credential.
pub fn merge_users(base: Option<&TelegramUser>, fresh: &TelegramUser) -> TelegramUser {
    let Some(base) = base else {
        return fresh.clone();
    };

    if fresh.access_hash.is_some_and(|h| h.is_personal()) {
        return fresh.clone();
    }

    let flags = UserFlags {
        is_close_friend: base.flags.is_close_friend,
        ..fresh.flags
    };

    let access_hash = base.access_hash.or(fresh.access_hash);

    let photo = if fresh.access_hash.is_some_and(|h| h.is_generic_public()) {
        fresh.photo.clone()
    } else {
        base.photo.clone()
    };

    debug!(user_id = %base.id, "merged cached user records");

    TelegramUser {
        id: base.id,
        access_hash,
        first_name: base.first_name.clone(),
        last_name: base.last_name.clone(),
        username: base.username.clone(),
        phone: base.phone.clone(),
        photo,
        bot_info: fresh.bot_info.clone(),
        restriction_info: fresh.restriction_info.clone(),
        flags,
        emoji_status: fresh.emoji_status,
        usernames: base.usernames.clone(),
        stories_hidden: fresh.stories_hidden.or(base.stories_hidden),
        name_color: fresh.name_color,
        background_emoji_id: fresh.background_emoji_id,
        profile_color: fresh.profile_color,
        profile_background_emoji_id: fresh.profile_background_emoji_id,
    }
}
