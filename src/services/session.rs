//! Session check run when the dashboard mounts with a signed-in user.

use reqwest::Url;
use serde::Serialize;

use crate::domain::session::{SessionUser, UserType};
use crate::repository::{Navigator, SessionGateway};
use crate::services::{ServiceError, ServiceResult};

pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

/// Where the guard left the user.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Customer stays on the dashboard with a refreshed access token.
    Refreshed,
    /// Agent was sent to the agent portal.
    Handoff(String),
    RedirectLogin,
}

/// Builds the agent portal URL carrying the fresh token and the user id.
pub fn handoff_url(base: &str, token: &str, user_id: &str) -> ServiceResult<Url> {
    Url::parse_with_params(base, &[("token", token), ("user_id", user_id)])
        .map_err(|e| ServiceError::Internal(format!("invalid handoff url {base}: {e}")))
}

async fn check<R>(repo: &R, user: &SessionUser, handoff_base: &str) -> ServiceResult<SessionOutcome>
where
    R: SessionGateway + ?Sized,
{
    if !repo.verify_token().await? {
        return Err(ServiceError::Unauthorized);
    }

    match &user.user_type {
        UserType::Customer => {
            repo.get_access_token().await?;
            Ok(SessionOutcome::Refreshed)
        }
        UserType::Agent => {
            let token = repo.get_access_token().await?;
            let url = handoff_url(handoff_base, &token, &user.user_id)?;
            Ok(SessionOutcome::Handoff(url.into()))
        }
        UserType::Other(kind) => {
            log::warn!("Unsupported user type {kind} for user {}", user.user_id);
            Err(ServiceError::Unauthorized)
        }
    }
}

/// Verifies the session and routes the user according to their type.
///
/// Returns `None` when there is no user yet. Every failure ends on the login
/// page; nothing is retried.
pub async fn guard_session<R, N>(
    repo: &R,
    navigator: &N,
    user: Option<&SessionUser>,
    handoff_base: &str,
    login_path: &str,
) -> Option<SessionOutcome>
where
    R: SessionGateway + ?Sized,
    N: Navigator + ?Sized,
{
    let user = user?;

    let outcome = match check(repo, user, handoff_base).await {
        Ok(outcome) => outcome,
        Err(ServiceError::Unauthorized) => SessionOutcome::RedirectLogin,
        Err(err) => {
            log::error!("Token verification failed: {err}");
            SessionOutcome::RedirectLogin
        }
    };

    match &outcome {
        SessionOutcome::Refreshed => {
            log::debug!("Refreshed access token for user {}", user.user_id);
        }
        SessionOutcome::Handoff(url) => match Url::parse(url) {
            Ok(url) => navigator.navigate_to(&url),
            Err(err) => log::error!("Handoff url became invalid: {err}"),
        },
        SessionOutcome::RedirectLogin => navigator.redirect(login_path),
    }

    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::{MockNavigator, MockRepository};

    const HANDOFF: &str = "http://localhost:3001/";

    fn user(user_type: UserType) -> SessionUser {
        SessionUser {
            user_id: "77".into(),
            user_type,
        }
    }

    fn login_navigator() -> MockNavigator {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_redirect()
            .withf(|path| path.to_string() == DEFAULT_LOGIN_PATH)
            .times(1)
            .return_const(());
        navigator.expect_navigate_to().never();
        navigator
    }

    #[tokio::test]
    async fn no_user_does_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_verify_token().never();
        let mut navigator = MockNavigator::new();
        navigator.expect_redirect().never();

        let outcome = guard_session(&repo, &navigator, None, HANDOFF, DEFAULT_LOGIN_PATH).await;
        assert_eq!(outcome, None);
    }

    #[tokio::test]
    async fn failed_verification_redirects_to_login() {
        let mut repo = MockRepository::new();
        repo.expect_verify_token().times(1).returning(|| Ok(false));
        repo.expect_get_access_token().never();

        let outcome = guard_session(
            &repo,
            &login_navigator(),
            Some(&user(UserType::Customer)),
            HANDOFF,
            DEFAULT_LOGIN_PATH,
        )
        .await;
        assert_eq!(outcome, Some(SessionOutcome::RedirectLogin));
    }

    #[tokio::test]
    async fn customer_token_is_refreshed_silently() {
        let mut repo = MockRepository::new();
        repo.expect_verify_token().times(1).returning(|| Ok(true));
        repo.expect_get_access_token()
            .times(1)
            .returning(|| Ok("fresh".into()));
        let mut navigator = MockNavigator::new();
        navigator.expect_redirect().never();
        navigator.expect_navigate_to().never();

        let outcome = guard_session(
            &repo,
            &navigator,
            Some(&user(UserType::Customer)),
            HANDOFF,
            DEFAULT_LOGIN_PATH,
        )
        .await;
        assert_eq!(outcome, Some(SessionOutcome::Refreshed));
    }

    #[tokio::test]
    async fn agent_is_handed_off_with_token_and_id() {
        let mut repo = MockRepository::new();
        repo.expect_verify_token().times(1).returning(|| Ok(true));
        repo.expect_get_access_token()
            .times(1)
            .returning(|| Ok("a b&c".into()));
        let mut navigator = MockNavigator::new();
        navigator.expect_redirect().never();
        navigator
            .expect_navigate_to()
            .withf(|url| url.as_str() == "http://localhost:3001/?token=a+b%26c&user_id=77")
            .times(1)
            .return_const(());

        let outcome = guard_session(
            &repo,
            &navigator,
            Some(&user(UserType::Agent)),
            HANDOFF,
            DEFAULT_LOGIN_PATH,
        )
        .await;
        assert_eq!(
            outcome,
            Some(SessionOutcome::Handoff(
                "http://localhost:3001/?token=a+b%26c&user_id=77".into()
            ))
        );
    }

    #[tokio::test]
    async fn unknown_user_type_redirects_to_login() {
        let mut repo = MockRepository::new();
        repo.expect_verify_token().times(1).returning(|| Ok(true));
        repo.expect_get_access_token().never();

        let outcome = guard_session(
            &repo,
            &login_navigator(),
            Some(&user(UserType::Other("Supplier".into()))),
            HANDOFF,
            DEFAULT_LOGIN_PATH,
        )
        .await;
        assert_eq!(outcome, Some(SessionOutcome::RedirectLogin));
    }

    #[tokio::test]
    async fn errors_redirect_to_login() {
        let mut repo = MockRepository::new();
        repo.expect_verify_token().times(1).returning(|| Ok(true));
        repo.expect_get_access_token()
            .times(1)
            .returning(|| Err(RepositoryError::Network("timeout".into())));

        let outcome = guard_session(
            &repo,
            &login_navigator(),
            Some(&user(UserType::Agent)),
            HANDOFF,
            DEFAULT_LOGIN_PATH,
        )
        .await;
        assert_eq!(outcome, Some(SessionOutcome::RedirectLogin));
    }

    #[test]
    fn invalid_handoff_base_is_an_error() {
        assert!(matches!(
            handoff_url("/agent/portal", "t", "1"),
            Err(ServiceError::Internal(_))
        ));
    }
}
