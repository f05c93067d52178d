//! Resolve the profile assigned to a game.

use playhook_domain::document::Document;
use playhook_domain::id::GameId;
use playhook_domain::profile::Profile;

/// The profile mapped to `game`, if any.
///
/// A mapping that points at a deleted profile resolves to nothing.
#[must_use]
pub fn resolve(document: &Document, game: GameId) -> Option<&Profile> {
    let profile_id = document.mappings.get(&game)?;
    let profile = document.profile(*profile_id);
    if profile.is_none() {
        tracing::warn!(%game, profile = %profile_id, "game mapped to a missing profile");
    }
    profile
}
