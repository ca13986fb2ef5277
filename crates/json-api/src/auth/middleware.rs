//! Auth middleware.

use std::sync::Arc;

use hilo_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{error, info};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);

            return;
        }
    };

    let actor = match state.app.auth.authenticate_bearer(token).await {
        Ok(actor) => actor,
        Err(AuthServiceError::InvalidToken) => {
            res.render(StatusError::unauthorized().brief("Invalid access token"));

            return;
        }
        Err(AuthServiceError::ExpiredToken) => {
            res.render(StatusError::unauthorized().brief("Access token has expired"));

            return;
        }
        Err(AuthServiceError::UnknownUser) => {
            info!("rejected token for unknown or inactive user");

            res.render(StatusError::unauthorized().brief("Invalid access token"));

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to load token subject: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
        Err(AuthServiceError::Token(source)) => {
            error!("failed to process access token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_actor(actor);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use hilo_app::{
        access::{Actor, Role},
        auth::MockAuthService,
        domain::users::records::UserUuid,
    };
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    #[salvo::handler]
    async fn echo_actor(depot: &mut Depot, res: &mut Response) {
        let actor = depot.actor_or_401().ok().map_or_else(
            || "missing".to_string(),
            |actor| format!("{} {}", actor.user, actor.role),
        );

        res.render(actor);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = TestApp {
            auth,
            ..TestApp::default()
        }
        .state();

        let router = Router::new()
            .hoop(inject(state))
            .hoop(handler)
            .push(Router::new().get(echo_actor));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::InvalidToken));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::ExpiredToken));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_user_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::UnknownUser));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_error_returns_500() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_actor() -> TestResult {
        let actor = Actor::new(UserUuid::new(), Role::Seller);

        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(move |_| Ok(actor));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, format!("{} seller", actor.user));

        Ok(())
    }
}
