use actix_web::{dev::Payload, http::header, web, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use serde::{de::DeserializeOwned, Serialize};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How the client submitted a write, which decides how it is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyWith {
    /// JSON API call: answer with the record and a status code.
    Json,
    /// HTML form post: answer `303 See Other` to the admin list page.
    Redirect,
}

/// A request body accepted either as JSON or as an urlencoded form.
///
/// The `Content-Type` picks the extractor, so a broken form reports the form parser's error
/// (through the `FormConfig` handler) and a broken JSON body reports the JSON one.
#[derive(Debug)]
pub enum Submission<T> {
    Json(T),
    Form(T),
}

impl<T> FromRequest for Submission<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if req.content_type() == FORM_CONTENT_TYPE {
            let form = web::Form::<T>::from_request(req, payload);
            Box::pin(async move { Ok(Submission::Form(form.await?.into_inner())) })
        } else {
            let json = web::Json::<T>::from_request(req, payload);
            Box::pin(async move { Ok(Submission::Json(json.await?.into_inner())) })
        }
    }
}

pub fn unpack<T>(submission: Submission<T>) -> (T, ReplyWith) {
    match submission {
        Submission::Json(body) => (body, ReplyWith::Json),
        Submission::Form(body) => (body, ReplyWith::Redirect),
    }
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn created<T: Serialize>(reply: ReplyWith, record: &T, list_path: &str) -> HttpResponse {
    match reply {
        ReplyWith::Json => HttpResponse::Created().json(record),
        ReplyWith::Redirect => see_other(list_path),
    }
}

pub fn updated<T: Serialize>(reply: ReplyWith, record: &T, list_path: &str) -> HttpResponse {
    match reply {
        ReplyWith::Json => HttpResponse::Ok().json(record),
        ReplyWith::Redirect => see_other(list_path),
    }
}

pub fn deleted(reply: ReplyWith, list_path: &str) -> HttpResponse {
    match reply {
        ReplyWith::Json => HttpResponse::NoContent().finish(),
        ReplyWith::Redirect => see_other(list_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Note {
        title: String,
    }

    #[actix_web::test]
    async fn content_type_picks_the_extractor() {
        let (req, mut payload) = test::TestRequest::post()
            .insert_header((header::CONTENT_TYPE, FORM_CONTENT_TYPE))
            .set_payload("title=Hello")
            .to_http_parts();
        let (note, reply) = unpack(Submission::<Note>::from_request(&req, &mut payload).await.unwrap());
        assert_eq!(note.title, "Hello");
        assert_eq!(reply, ReplyWith::Redirect);

        let (req, mut payload) = test::TestRequest::post()
            .set_json(serde_json::json!({"title": "Hi"}))
            .to_http_parts();
        let (note, reply) = unpack(Submission::<Note>::from_request(&req, &mut payload).await.unwrap());
        assert_eq!(note.title, "Hi");
        assert_eq!(reply, ReplyWith::Json);
    }

    #[actix_web::test]
    async fn broken_form_reports_the_form_error() {
        let (req, mut payload) = test::TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8"))
            .set_payload("title=a&title=b")
            .to_http_parts();
        let err = Submission::<Note>::from_request(&req, &mut payload).await.unwrap_err();
        assert!(err.as_error::<actix_web::error::UrlencodedError>().is_some());
    }

    #[::core::prelude::v1::test]
    fn form_submissions_redirect_to_list_page() {
        let response = created(ReplyWith::Redirect, &serde_json::json!({}), "/admin/skills");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/admin/skills");
    }

    #[::core::prelude::v1::test]
    fn json_submissions_get_status_codes() {
        let record = serde_json::json!({"id": 1});
        assert_eq!(created(ReplyWith::Json, &record, "/x").status(), StatusCode::CREATED);
        assert_eq!(updated(ReplyWith::Json, &record, "/x").status(), StatusCode::OK);
        assert_eq!(deleted(ReplyWith::Json, "/x").status(), StatusCode::NO_CONTENT);
    }
}
