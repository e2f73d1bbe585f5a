//! Authentication: registering users, exchanging credentials for a session,
//! and ending one.
//!
//! There is no ambient signed-in state in the core. [AuthService::log_in]
//! returns an explicit [Session] value that the caller owns and passes to
//! whatever transport it builds; attaching the token to requests is the
//! transport's concern.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    models::{RegisterRequest, UserProfile},
    transport::{Transport, TransportError, endpoints},
};

/// An authenticated session: the bearer token and the user it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The JWT issued by the backend.
    pub token: String,
    /// The signed-in user.
    pub user: UserProfile,
}

/// The claims carried in the token payload that the client cares about.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
}

/// Decode the payload of a JWT without verifying it.
///
/// Verification is the backend's job; the client only wants the subject for
/// display. Returns `None` for anything that does not look like a JWT.
fn decode_subject(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;

    claims.sub
}

/// Registers users and exchanges credentials for a [Session].
#[derive(Debug, Clone)]
pub struct AuthService<C> {
    client: C,
}

impl<C: Transport> AuthService<C> {
    /// Create a facade that dispatches through `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Register a new user. Nothing is persisted client-side on success.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), Error> {
        request.validate()?;

        self.client
            .post(
                endpoints::REGISTER,
                json!({
                    "firstName": request.first_name,
                    "lastName": request.last_name,
                    "email": request.email,
                    "password": request.password,
                }),
            )
            .await?;

        Ok(())
    }

    /// Exchange credentials for a session.
    ///
    /// The user's email comes from the token's subject claim when the token
    /// decodes, falling back to the email used to log in.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::Validation("email and password are required".to_owned()));
        }

        let response = self
            .client
            .post(endpoints::LOG_IN, json!({"email": email, "password": password}))
            .await
            .map_err(invalid_credentials_on_rejection)?;

        let token = response
            .get("token")
            .and_then(|token| token.as_str())
            .ok_or(Error::MissingToken)?
            .to_owned();

        let email = decode_subject(&token).unwrap_or_else(|| email.to_owned());

        tracing::debug!("logged in as {email}");

        Ok(Session {
            token,
            user: UserProfile { email },
        })
    }

    /// End a session.
    ///
    /// The backend is stateless, so this only notifies it for bookkeeping; a
    /// transport failure here is logged and otherwise ignored.
    pub async fn log_out(&self, session: Session) {
        if let Err(error) = self.client.post(endpoints::LOG_OUT, json!({})).await {
            tracing::debug!("ignoring logout notification failure: {error}");
        }

        drop(session);
    }
}

/// A rejected login reads as bad credentials; transport-level failures
/// propagate unchanged.
fn invalid_credentials_on_rejection(error: TransportError) -> Error {
    match error.status {
        Some(400) | Some(401) => Error::InvalidCredentials,
        _ => Error::Transport(error),
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use serde_json::json;

    use super::AuthService;
    use crate::{
        Error,
        models::RegisterRequest,
        test_utils::FakeTransport,
        transport::TransportError,
    };

    /// Build an unsigned token whose payload carries `claims`.
    fn token_with_claims(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());

        format!("{header}.{payload}.signature")
    }

    #[tokio::test]
    async fn log_in_builds_the_session_from_the_token_subject() {
        let token = token_with_claims(json!({"sub": "ada@example.com", "exp": 4102444800u64}));
        let transport = FakeTransport::with_responses(vec![Ok(json!({"token": token}))]);
        let service = AuthService::new(transport);

        let session = service.log_in("typed@example.com", "hunter2").await.unwrap();

        assert_eq!(session.token, token);
        assert_eq!(session.user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn log_in_falls_back_to_the_typed_email_for_opaque_tokens() {
        let transport =
            FakeTransport::with_responses(vec![Ok(json!({"token": "not-a-jwt"}))]);
        let service = AuthService::new(transport);

        let session = service.log_in("ada@example.com", "hunter2").await.unwrap();

        assert_eq!(session.user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn log_in_without_a_token_in_the_response_fails() {
        let transport = FakeTransport::with_responses(vec![Ok(json!({"message": "welcome"}))]);
        let service = AuthService::new(transport);

        let got = service.log_in("ada@example.com", "hunter2").await;

        assert_eq!(got, Err(Error::MissingToken));
    }

    #[tokio::test]
    async fn a_rejected_log_in_reads_as_bad_credentials() {
        let rejection = TransportError {
            status: Some(401),
            message: "unauthorized".to_owned(),
        };
        let transport = FakeTransport::with_responses(vec![Err(rejection)]);
        let service = AuthService::new(transport);

        let got = service.log_in("ada@example.com", "wrong").await;

        assert_eq!(got, Err(Error::InvalidCredentials));
    }

    #[tokio::test]
    async fn blank_credentials_never_reach_the_wire() {
        let service = AuthService::new(FakeTransport::default());

        let got = service.log_in("  ", "").await;

        assert!(matches!(got, Err(Error::Validation(_))));
        assert!(service.client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn register_forwards_the_backend_field_names() {
        let transport = FakeTransport::with_responses(vec![Ok(json!("registered"))]);
        let service = AuthService::new(transport);

        service
            .register(RegisterRequest {
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
                email: "ada@example.com".to_owned(),
                password: "correct horse battery staple".to_owned(),
            })
            .await
            .unwrap();

        let requests = service.client.requests.borrow();
        let (_, path, body) = &requests[0];
        let body = body.as_ref().unwrap();

        assert_eq!(path, "/api/auth/register");
        assert_eq!(body["firstName"], json!("Ada"));
        assert_eq!(body["lastName"], json!("Lovelace"));
    }
}
