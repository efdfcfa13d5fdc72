//! Recording a successful primary-identity sign-in.

use chrono::Duration;
use league_portal_core::Result;
use league_portal_platform_access::{
    AuthenticationError, PrimaryIdentity, RoleSet, Session, SessionId, SessionStore,
};
use league_portal_roster::{Player, PlayerStore};
use rootcause::prelude::ResultExt;

/// The outcome of a sign-in.
#[derive(Debug, Clone)]
pub struct SignIn {
    /// The player profile, created on first sign-in.
    pub player: Player,
    /// The stored session. Its id goes into the `session` cookie.
    pub session: Session,
}

/// Upserts the player for a verified primary identity and stores a session.
///
/// The session's admin flag comes from the player's stored role flag, so
/// promoting or demoting a player takes effect at their next sign-in.
///
/// # Errors
///
/// Fails on blank claims or when either store write fails.
pub async fn record_sign_in(
    players: &dyn PlayerStore,
    sessions: &dyn SessionStore,
    identity: &PrimaryIdentity,
    duration: Duration,
) -> Result<SignIn, AuthenticationError> {
    identity.validate()?;

    let candidate = Player::register(
        identity.account_id.trim(),
        identity.username.trim(),
        identity.avatar_url.clone(),
    );
    let player = players
        .upsert_by_account(&candidate)
        .await
        .context(AuthenticationError::StoreFailed {
            reason: "player upsert failed".to_string(),
        })?;

    let session = Session::new(
        SessionId::generate(),
        player.platform_account_id.clone(),
        RoleSet::for_player(player.is_admin),
        duration,
    )
    .with_player(player.id, player.team_id);
    sessions.create(&session).await?;

    tracing::info!(
        player_id = %player.id,
        is_admin = player.is_admin,
        "player signed in"
    );

    Ok(SignIn { player, session })
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_portal_platform_access::MemorySessionStore;
    use league_portal_roster::MemoryRosterStore;

    #[tokio::test]
    async fn first_sign_in_creates_player_and_session() {
        let players = MemoryRosterStore::new();
        let sessions = MemorySessionStore::new();
        let identity = PrimaryIdentity::new("76561198000000001", "skater");

        let signed_in = record_sign_in(&players, &sessions, &identity, Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(signed_in.player.display_name, "skater");
        assert_eq!(signed_in.session.player_id(), Some(signed_in.player.id));
        assert!(!signed_in.session.is_admin());
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn repeat_sign_in_reuses_player() {
        let players = MemoryRosterStore::new();
        let sessions = MemorySessionStore::new();
        let identity = PrimaryIdentity::new("7656", "skater");

        let first = record_sign_in(&players, &sessions, &identity, Duration::hours(1))
            .await
            .unwrap();
        let renamed = PrimaryIdentity::new("7656", "goalie");
        let second = record_sign_in(&players, &sessions, &renamed, Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(first.player.id, second.player.id);
        assert_eq!(second.player.platform_username, "goalie");
        assert_ne!(first.session.id(), second.session.id());
    }

    #[tokio::test]
    async fn admin_flag_follows_player_row() {
        let players = MemoryRosterStore::new();
        let sessions = MemorySessionStore::new();
        let mut admin = Player::register("1", "commish", None);
        admin.is_admin = true;
        players.upsert_by_account(&admin).await.unwrap();

        let signed_in = record_sign_in(
            &players,
            &sessions,
            &PrimaryIdentity::new("1", "commish"),
            Duration::hours(1),
        )
        .await
        .unwrap();

        assert!(signed_in.session.is_admin());
        assert!(signed_in.session.context().is_admin());
    }

    #[tokio::test]
    async fn blank_claims_write_nothing() {
        let players = MemoryRosterStore::new();
        let sessions = MemorySessionStore::new();

        let result = record_sign_in(
            &players,
            &sessions,
            &PrimaryIdentity::new(" ", "skater"),
            Duration::hours(1),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(players.write_count(), 0);
        assert!(sessions.is_empty().await);
    }
}
