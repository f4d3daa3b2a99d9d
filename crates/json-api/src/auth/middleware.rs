//! Bearer token authentication hoop.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use storefront_app::{auth::AuthServiceError, domain::users::records::UserUuid};
use tracing::error;

use crate::{extensions::*, state::State};

/// Resolve the bearer token to a user and record it in the depot.
///
/// Requests without a usable token never reach the wrapped routes.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(user) => {
            depot.insert_user_uuid(user);

            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<UserUuid, StatusError> {
    let token = bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Missing or invalid Authorization header"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(rejection)
}

fn rejection(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound | AuthServiceError::UnknownUser => {
            StatusError::unauthorized().brief("Invalid API token")
        }
        AuthServiceError::Sql(_) | AuthServiceError::Token(_) => {
            error!("bearer authentication failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Token from an `Authorization: Bearer <token>` header, scheme matched case-insensitively.
fn bearer_token(req: &Request) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use storefront_app::auth::MockAuthService;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, state_with_auth};

    use super::*;

    #[salvo::handler]
    async fn whoami(depot: &mut Depot) -> String {
        depot
            .user_uuid_or_401()
            .map_or_else(|_| "anonymous".to_string(), |user| user.to_string())
    }

    fn service(auth: MockAuthService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .hoop(handler)
                .get(whoami),
        )
    }

    fn rejecting_auth() -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        auth
    }

    #[tokio::test]
    async fn requests_without_a_bearer_token_are_unauthorized() -> TestResult {
        for header in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer   "), Some("Bearer")] {
            let mut request = TestClient::get("http://localhost/");

            if let Some(value) = header {
                request = request.add_header(AUTHORIZATION, value, true);
            }

            let res = request.send(&service(rejecting_auth())).await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "header {header:?} should be rejected"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn unknown_tokens_are_unauthorized() -> TestResult {
        for error in [AuthServiceError::NotFound, AuthServiceError::UnknownUser] {
            let mut auth = MockAuthService::new();

            auth.expect_authenticate_bearer()
                .once()
                .withf(|token| token == "sf_v1_stale.token")
                .return_once(|_| Err(error));

            let res = TestClient::get("http://localhost/")
                .bearer_auth("sf_v1_stale.token")
                .send(&service(auth))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        }

        Ok(())
    }

    #[tokio::test]
    async fn storage_failures_are_internal_errors() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://localhost/")
            .bearer_auth("sf_v1_any.token")
            .send(&service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn authenticated_user_is_visible_to_routes() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "sf_v1_good.token")
            .return_once(|_| Ok(TEST_USER_UUID));

        let mut res = TestClient::get("http://localhost/")
            .add_header(AUTHORIZATION, "bEaReR sf_v1_good.token ", true)
            .send(&service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, TEST_USER_UUID.to_string());

        Ok(())
    }
}
