use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde::Deserialize;
use tracing::instrument;

use crate::constants::SESSION_COOKIE;
use crate::entities::user::LoginForm;
use crate::errors::AuthError;
use crate::handlers::submission::{self, ReplyWith, Submission};
use crate::utils::markdown::escape_text;
use crate::AppState;

const DEFAULT_AFTER_LOGIN: &str = "/admin";
const LOGIN_FAILED: &str = "invalid_credentials";

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub error: Option<String>,
    pub next: Option<String>,
}

/// Only admin paths on this site are accepted as post-login targets.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if (path == "/admin" || path.starts_with("/admin/") || path.starts_with("/admin?"))
                && !path.contains("//")
                && !path.contains('\\') =>
        {
            path
        }
        _ => DEFAULT_AFTER_LOGIN,
    }
}

fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

fn login_page_html(error: Option<&str>, next: Option<&str>) -> String {
    let banner = match error {
        Some(LOGIN_FAILED) => r#"<p class="error" role="alert">Invalid username or password.</p>"#.to_string(),
        Some(other) => format!(r#"<p class="error" role="alert">{}</p>"#, escape_text(other)),
        None => String::new(),
    };
    let next_field = next
        .map(|path| format!(r#"<input type="hidden" name="next" value="{}">"#, escape_text(safe_next(Some(path)))))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<main>
<h1>Sign in</h1>
{banner}
<form method="post" action="/login">
{next_field}
<label>Username <input type="text" name="username" autocomplete="username" required></label>
<label>Password <input type="password" name="password" autocomplete="current-password" required></label>
<button type="submit">Sign in</button>
</form>
</main>
</body>
</html>"#
    )
}

#[instrument(skip(query))]
pub async fn login_page(query: web::Query<LoginPageQuery>) -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(login_page_html(query.error.as_deref(), query.next.as_deref()))
}

#[instrument(skip(state, data))]
pub async fn login(
    state: web::Data<AppState>,
    data: Submission<LoginForm>,
) -> HttpResponse {
    let (form, reply) = submission::unpack(data);

    match (state.auth_handler.login(&form).await, reply) {
        (Ok(session), ReplyWith::Json) => {
            let cookie = session_cookie(session.access_token.clone(), session.expires_in, state.config.is_production());
            HttpResponse::Ok().cookie(cookie).json(session)
        }
        (Ok(session), ReplyWith::Redirect) => {
            let cookie = session_cookie(session.access_token, session.expires_in, state.config.is_production());
            let mut response = submission::see_other(safe_next(form.next.as_deref()));
            if let Err(e) = response.add_cookie(&cookie) {
                tracing::error!("Failed to set session cookie: {}", e);
                return AuthError::TokenCreation.error_response();
            }
            response
        }
        (Err(AuthError::WrongCredentials | AuthError::MissingCredentials), ReplyWith::Redirect) => {
            let mut location = format!("{}?error={}", state.config.login_path, LOGIN_FAILED);
            if let Some(next) = form.next.as_deref() {
                location.push_str("&next=");
                location.push_str(&urlencoding::encode(safe_next(Some(next))));
            }
            submission::see_other(&location)
        }
        (Err(e), _) => e.error_response(),
    }
}

#[instrument(skip(state))]
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();

    let mut response = submission::see_other(&state.config.login_path);
    if let Err(e) = response.add_cookie(&removal) {
        tracing::warn!("Failed to clear session cookie: {}", e);
    }
    response
}
