// lib/src/session/login.rs
use log::{info, warn};
use models::errors::{HospitalError, HospitalResult};
use models::session::{Credentials, Session};

use crate::api::HospitalApi;
use crate::session::SessionResolver;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check credentials.";

/// Exchanges credentials for a token and profile, then starts the session.
///
/// On failure the error is returned unchanged; callers show
/// [`login_failure_message`] to the user.
pub async fn authenticate<B>(
    resolver: &SessionResolver,
    backend: &B,
    email: &str,
    password: &str,
) -> HospitalResult<Session>
where
    B: HospitalApi + ?Sized,
{
    let credentials = Credentials { email: email.trim().to_string(), password: password.to_string() };
    let response = match backend.login(&credentials).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Login for {} failed: {}", credentials.email, e);
            return Err(e);
        }
    };
    info!("Backend accepted credentials for {}", credentials.email);
    resolver.login(&response.token, response.profile)
}

pub fn login_failure_message(error: &HospitalError) -> String {
    error.user_message(LOGIN_FAILED_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::endpoints::LOGIN;
    use crate::api::testing::FakeBackend;
    use crate::api::HttpMethod;
    use crate::router::{HistoryNavigator, Route};
    use crate::session::MemorySessionStore;
    use chrono::Duration;
    use models::session::Role;
    use serde_json::json;

    fn resolver(nav: Arc<HistoryNavigator>) -> SessionResolver {
        SessionResolver::new(Arc::new(MemorySessionStore::new()), nav, Duration::days(7))
    }

    #[tokio::test]
    async fn successful_login_starts_a_session() {
        let nav = Arc::new(HistoryNavigator::new());
        let resolver = resolver(nav.clone());
        let backend = FakeBackend::new().with_response(
            HttpMethod::Post,
            LOGIN,
            json!({ "_id": "d1", "name": "Meredith Grey", "role": "doctor", "token": "t" }),
        );

        let session = authenticate(&resolver, &backend, " grey@sgmw.org ", "pw").await.unwrap();
        assert_eq!(session.role, Role::Doctor);
        assert_eq!(nav.current(), Some(Route::Dashboard));
        assert_eq!(backend.calls()[0].body.as_ref().unwrap()["email"], "grey@sgmw.org");
    }

    #[tokio::test]
    async fn rejected_login_keeps_the_backend_message() {
        let nav = Arc::new(HistoryNavigator::new());
        let resolver = resolver(nav.clone());
        let backend = FakeBackend::new().with_error(
            HttpMethod::Post,
            LOGIN,
            HospitalError::Unauthorized("Invalid email or password".into()),
        );

        let err = authenticate(&resolver, &backend, "x@y.z", "bad").await.unwrap_err();
        assert_eq!(login_failure_message(&err), "Invalid email or password");
        assert!(resolver.current_session().is_none());
        assert_eq!(nav.current(), None);
    }

    #[tokio::test]
    async fn network_failure_uses_the_fallback_message() {
        let resolver = resolver(Arc::new(HistoryNavigator::new()));
        let backend =
            FakeBackend::new().with_error(HttpMethod::Post, LOGIN, HospitalError::Network("refused".into()));
        let err = authenticate(&resolver, &backend, "x@y.z", "pw").await.unwrap_err();
        assert_eq!(login_failure_message(&err), LOGIN_FAILED_MESSAGE);
    }
}
