//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

/// Staff/user identity injected by the gateway via `x-domus-user-id` and
/// `x-domus-user-role` headers.
///
/// Returns 401 if either header is absent, the id is not a positive
/// integer, or the role is blank. Role enforcement (403) is done by
/// handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: i64,
    pub role: String,
}

impl IdentityHeaders {
    /// Whether this identity belongs to a back-office actor.
    pub fn is_staff(&self) -> bool {
        domus_domain::role::is_staff(&self.role)
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get("x-domus-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|id| *id > 0);

        let role = parts
            .headers
            .get("x-domus-user-role")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .filter(|r| !r.is_empty());

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let role = role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id, role })
        }
    }
}
