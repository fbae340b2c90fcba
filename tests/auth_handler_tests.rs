use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use portfolio_site::{
    auth::{jwt::JwtService, password::hash_password},
    entities::user::{LoginForm, User, UserInsert},
    errors::{AppError, AuthError},
    repositories::user::UserRepository,
    settings::AppConfig,
    use_cases::auth::AuthHandler,
};

const PASSWORD: &str = "Vq7#mLp2!xRz9Tw";

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
        async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError>;
        async fn record_login(&self, id: &Uuid) -> Result<(), AppError>;
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        session_secret: "super_test_secret_key_for_session_signing_1234".into(),
        session_expiration_minutes: 30,
        ..AppConfig::default()
    }
}

fn stored_admin() -> User {
    User {
        id: Uuid::new_v4(),
        username: "admin".into(),
        password_hash: hash_password(PASSWORD).expect("hashing works"),
        last_login_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn login_form(username: &str, password: &str) -> LoginForm {
    LoginForm {
        username: username.into(),
        password: password.into(),
        next: None,
    }
}

#[actix_web::test]
async fn login_issues_a_verifiable_session() {
    let admin = stored_admin();
    let admin_id = admin.id;

    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_username()
        .withf(|username| username == "admin")
        .times(1)
        .returning(move |_| Ok(Some(admin.clone())));
    repo.expect_record_login()
        .withf(move |id| *id == admin_id)
        .times(1)
        .returning(|_| Ok(()));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));
    let session = handler.login(&login_form(" admin ", PASSWORD)).await.unwrap();

    assert_eq!(session.token_type, "Bearer");
    assert_eq!(session.expires_in, 30 * 60);

    let claims = handler.verify_session(&session.access_token).unwrap();
    assert_eq!(claims.sub, admin_id.to_string());
    assert_eq!(claims.username, "admin");
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let admin = stored_admin();
    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_username()
        .returning(move |_| Ok(Some(admin.clone())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));
    let err = handler.login(&login_form("admin", "not-the-password")).await.unwrap_err();

    assert!(matches!(err, AuthError::WrongCredentials));
}

#[actix_web::test]
async fn unknown_user_looks_like_wrong_credentials() {
    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_username().returning(|_| Ok(None));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));
    let err = handler.login(&login_form("ghost", PASSWORD)).await.unwrap_err();

    assert!(matches!(err, AuthError::WrongCredentials));
}

#[actix_web::test]
async fn empty_credentials_never_reach_the_repository() {
    let handler = AuthHandler::new(MockUserRepo::new(), JwtService::new(&test_config()));
    let err = handler.login(&login_form("", "")).await.unwrap_err();

    assert!(matches!(err, AuthError::MissingCredentials));
}

#[actix_web::test]
async fn failing_login_bookkeeping_does_not_block_sign_in() {
    let admin = stored_admin();
    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_username()
        .returning(move |_| Ok(Some(admin.clone())));
    repo.expect_record_login()
        .returning(|_| Err(AppError::InternalError("connection reset".into())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    assert!(handler.login(&login_form("admin", PASSWORD)).await.is_ok());
}

#[actix_web::test]
async fn database_outage_is_reported_as_unavailable() {
    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_username()
        .returning(|_| Err(AppError::InternalError("pool timed out".into())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));
    let err = handler.login(&login_form("admin", PASSWORD)).await.unwrap_err();

    assert!(matches!(err, AuthError::ServiceUnavailable));
}

#[actix_web::test]
async fn tampered_session_is_invalid() {
    let handler = AuthHandler::new(MockUserRepo::new(), JwtService::new(&test_config()));

    let err = handler.verify_session("not.a.token").unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

#[actix_web::test]
async fn ensure_admin_skips_existing_account() {
    let admin = stored_admin();
    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_username()
        .returning(move |_| Ok(Some(admin.clone())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    assert!(!handler.ensure_admin("admin", PASSWORD).await.unwrap());
}

#[actix_web::test]
async fn ensure_admin_creates_account_with_hashed_password() {
    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_username().returning(|_| Ok(None));
    repo.expect_create_user()
        .withf(|user| user.username == "admin" && user.password_hash.starts_with("$argon2id$"))
        .times(1)
        .returning(|_| Ok(Uuid::new_v4()));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    assert!(handler.ensure_admin("admin", PASSWORD).await.unwrap());
}

#[actix_web::test]
async fn ensure_admin_refuses_weak_passwords() {
    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_username().returning(|_| Ok(None));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));
    let err = handler.ensure_admin("admin", "password").await.unwrap_err();

    assert_eq!(err.invalid_fields(), vec!["password"]);
}
