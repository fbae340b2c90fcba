use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, Method},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{constants::SESSION_COOKIE, errors::AuthError, AppState};

/// Sends every unauthenticated request for `/admin` or `/admin/...` to the login page,
/// remembering where it was headed. Everything else passes through untouched.
pub struct AdminGate;

impl<S> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminGateService {
            service: Rc::new(service),
        })
    }
}

pub struct AdminGateService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AdminGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !is_protected(req.path(), req.method()) {
                return service.call(req).await;
            }

            let state = req.app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    tracing::error!("AppState missing in admin gate");
                    AuthError::ServiceUnavailable
                })?;

            let verified = extract_token(&req)
                .ok_or(AuthError::MissingCredentials)
                .and_then(|token| state.auth_handler.verify_session(&token));

            match verified {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    service.call(req).await
                }
                Err(e) => {
                    let target = req
                        .uri()
                        .path_and_query()
                        .map(|pq| pq.as_str())
                        .unwrap_or_else(|| req.path());
                    tracing::info!(path = %target, reason = %e, "Redirecting unauthenticated admin request");

                    let location = login_redirect(&state.config.login_path, target);
                    Ok(req.into_response(
                        HttpResponse::SeeOther()
                            .insert_header((header::LOCATION, location))
                            .finish(),
                    ))
                }
            }
        })
    }
}

pub fn is_protected(path: &str, method: &Method) -> bool {
    if method == Method::OPTIONS {
        return false;
    }
    path == "/admin" || path.starts_with("/admin/")
}

pub fn login_redirect(login_path: &str, next: &str) -> String {
    format!("{}?next={}", login_path, urlencoding::encode(next))
}

/// The session cookie wins; a bearer header serves API clients.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let value = cookie.value();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_tree_is_protected() {
        assert!(is_protected("/admin", &Method::GET));
        assert!(is_protected("/admin/skills/3/delete", &Method::POST));
        assert!(!is_protected("/administrator", &Method::GET));
        assert!(!is_protected("/", &Method::GET));
        assert!(!is_protected("/login", &Method::POST));
        assert!(!is_protected("/admin", &Method::OPTIONS));
    }

    #[test]
    fn redirect_keeps_encoded_target() {
        assert_eq!(
            login_redirect("/login", "/admin/skills?page=2"),
            "/login?next=%2Fadmin%2Fskills%3Fpage%3D2"
        );
    }
}
