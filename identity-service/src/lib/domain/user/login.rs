use std::sync::Arc;

use auth::Claims;
use auth::IssuedToken;
use auth::TokenIssuer;
use auth::TokenSubject;
use auth::TokenVerifier;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::LoginName;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserDirectoryPort;

/// What a client receives after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub user_name: String,
    pub access_token: String,
    /// Delimited role string as stored on the record
    pub roles: String,
    pub expires_at: DateTime<Utc>,
    /// Seconds until `expires_at`
    pub expires_in: i64,
}

/// Ties directory authentication to token issuance and validation.
pub struct LoginService<D>
where
    D: UserDirectoryPort,
{
    directory: Arc<D>,
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
}

impl<D> LoginService<D>
where
    D: UserDirectoryPort,
{
    pub fn new(directory: Arc<D>, issuer: Arc<TokenIssuer>, verifier: Arc<TokenVerifier>) -> Self {
        Self {
            directory,
            issuer,
            verifier,
        }
    }

    /// Authenticate and mint an access token.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown login name or wrong password
    /// * `Token(Misconfigured)` - No signing secret configured
    /// * `Store` - Store operation failed
    pub async fn login(&self, login_name: &str, password: &str) -> Result<LoginResponse, UserError> {
        let user = self
            .directory
            .authenticate(login_name, password)
            .await?
            .ok_or(UserError::AuthenticationFailed)?;

        let issued = self.issue_for(&user)?;

        tracing::info!(user_id = %user.id, token_id = %issued.token_id, "Login succeeded");

        Ok(LoginResponse {
            user_name: user.login_name.to_string(),
            access_token: issued.token.clone(),
            roles: user.roles.to_delimited(),
            expires_at: issued.expires_at,
            expires_in: issued.expires_in(),
        })
    }

    /// Issue a token for an already authenticated record.
    ///
    /// # Errors
    /// * `Token(Misconfigured)` - No signing secret configured
    pub fn issue_for(&self, user: &User) -> Result<IssuedToken, UserError> {
        let id = user.id.to_string();
        let roles = user.roles.to_delimited();

        let subject = TokenSubject {
            id: Some(&id),
            login_name: user.login_name.as_str(),
            email: Some(user.email.as_str()),
            roles: &roles,
        };

        Ok(self.issuer.issue(&subject)?)
    }

    /// Validate a bearer token and return its claims.
    ///
    /// # Errors
    /// * `Token(Invalid)` - Token fails any check
    /// * `Token(Misconfigured)` - No signing secret configured
    pub fn validate(&self, token: &str) -> Result<Claims, UserError> {
        Ok(self.verifier.validate(token)?)
    }

    /// Resolve validated claims back to the current record.
    ///
    /// # Errors
    /// * `NotFound` - The named user no longer exists
    /// * `Store` - Store operation failed
    pub async fn profile(&self, claims: &Claims) -> Result<User, UserError> {
        let login_name = LoginName::new(claims.name.clone())
            .map_err(|_| UserError::NotFound(claims.name.clone()))?;

        self.directory
            .get_by_login_name(&login_name)
            .await?
            .ok_or_else(|| UserError::NotFound(claims.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenError;
    use auth::TokenSettings;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::RegisterUserCommand;
    use crate::domain::user::models::Roles;
    use crate::domain::user::models::UserId;

    const SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestDirectory {}

        #[async_trait]
        impl UserDirectoryPort for TestDirectory {
            async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;
            async fn authenticate(&self, login_name: &str, password: &str) -> Result<Option<User>, UserError>;
            async fn get_by_login_name(&self, login_name: &LoginName) -> Result<Option<User>, UserError>;
            async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
        }
    }

    fn alice(roles: &str) -> User {
        User {
            id: UserId::new(),
            login_name: LoginName::new("alice".to_string()).unwrap(),
            password_hash: String::new(),
            roles: Roles::parse(roles).unwrap(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn service(directory: MockTestDirectory, secret: &str) -> LoginService<MockTestDirectory> {
        let settings = TokenSettings::new(secret, "games-api", "games-clients");
        LoginService::new(
            Arc::new(directory),
            Arc::new(TokenIssuer::new(settings.clone())),
            Arc::new(TokenVerifier::new(settings)),
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut directory = MockTestDirectory::new();
        let user = alice("Admin, Moderator");
        let user_id = user.id;

        directory
            .expect_authenticate()
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        let service = service(directory, SECRET);

        let response = service.login("alice", "pw1").await.unwrap();
        assert_eq!(response.user_name, "alice");
        assert_eq!(response.roles, "Admin,Moderator");
        assert_eq!(response.expires_in, 3600);

        let claims = service.validate(&response.access_token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.roles, vec!["Admin", "Moderator"]);
        assert_eq!(claims.exp, response.expires_at.timestamp());
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let mut directory = MockTestDirectory::new();
        directory
            .expect_authenticate()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(directory, SECRET);

        let result = service.login("alice", "wrong").await;
        assert_eq!(result, Err(UserError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_login_without_secret_is_misconfigured() {
        let mut directory = MockTestDirectory::new();
        let user = alice("User");
        directory
            .expect_authenticate()
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        let service = service(directory, "");

        let result = service.login("alice", "pw1").await;
        assert_eq!(result, Err(UserError::Token(TokenError::Misconfigured)));
    }

    #[tokio::test]
    async fn test_validate_rejects_garbage() {
        let service = service(MockTestDirectory::new(), SECRET);

        assert_eq!(
            service.validate("not.a.token"),
            Err(UserError::Token(TokenError::Invalid))
        );
        assert_eq!(service.validate(""), Err(UserError::Token(TokenError::Invalid)));
    }

    #[tokio::test]
    async fn test_profile_resolves_claims() {
        let mut directory = MockTestDirectory::new();
        let user = alice("Readonly");
        let stored = user.clone();

        directory
            .expect_get_by_login_name()
            .withf(|name| name.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = service(directory, SECRET);
        let issued = service.issue_for(&user).unwrap();
        let claims = service.validate(&issued.token).unwrap();

        let profile = service.profile(&claims).await.unwrap();
        assert_eq!(profile.id, user.id);
    }

    #[tokio::test]
    async fn test_profile_of_vanished_user() {
        let mut directory = MockTestDirectory::new();
        directory
            .expect_get_by_login_name()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(directory, SECRET);
        let issued = service.issue_for(&alice("User")).unwrap();
        let claims = service.validate(&issued.token).unwrap();

        let result = service.profile(&claims).await;
        assert_eq!(result, Err(UserError::NotFound("alice".to_string())));
    }
}
