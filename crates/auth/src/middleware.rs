use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::web;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio_postgres::Client;

/// Canonical session cookie name.
pub const JWT_COOKIE: &str = "jwt";

/// Rejection issued by the authorization gate: browsers are bounced to the
/// login page rather than shown a bare 401.
#[derive(Debug)]
pub struct LoginRedirect;

impl std::fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "authentication required")
    }
}

impl ResponseError for LoginRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }
    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, "/login"))
            .finish()
    }
}

/// Authorization gate for protected routes.
///
/// Validates the cookie-borne JWT and hands the decoded claims to the
/// handler. Deliberately trusts the token payload without re-checking the
/// store: the gate guarantees a valid token, not a still-existing user.
/// Missing or invalid tokens redirect to `/login` before the handler runs.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn user(&self) -> gp_core::ID<Member> {
        self.0.user()
    }
    pub fn username(&self) -> &str {
        self.0.username()
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let tokens = req.app_data::<web::Data<Crypto>>().cloned();
        let cookie = req.cookie(JWT_COOKIE).map(|c| c.value().to_owned());
        Box::pin(async move {
            let token = cookie.ok_or(LoginRedirect)?;
            let tokens = tokens.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("token service not configured")
            })?;
            let claims = tokens.decode(&token).map_err(|_| LoginRedirect)?;
            if claims.expired() {
                return Err(LoginRedirect.into());
            }
            Ok(Auth(claims))
        })
    }
}

/// Best-effort session resolution for public routes.
///
/// Unlike [`Auth`], this extractor resolves the full member record from the
/// store so pages can show profile details, and it never rejects a request:
/// a missing, invalid, or orphaned token just degrades to an anonymous
/// visitor.
pub struct Visitor(pub User);

impl Visitor {
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequest for Visitor {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let tokens = req.app_data::<web::Data<Crypto>>().cloned();
        let db = req.app_data::<web::Data<Arc<Client>>>().cloned();
        let cookie = req.cookie(JWT_COOKIE).map(|c| c.value().to_owned());
        Box::pin(async move {
            let Some(token) = cookie else {
                return Ok(Visitor(User::Anon));
            };
            let (Some(tokens), Some(db)) = (tokens, db) else {
                return Ok(Visitor(User::Anon));
            };
            let claims = match tokens.decode(&token) {
                Ok(claims) if !claims.expired() => claims,
                _ => {
                    log::debug!("session cookie failed verification");
                    return Ok(Visitor(User::Anon));
                }
            };
            match db.find(claims.user()).await {
                Ok(Some(member)) => Ok(Visitor(User::Auth(member))),
                Ok(None) => {
                    log::debug!("session token references unknown user {}", claims.user());
                    Ok(Visitor(User::Anon))
                }
                Err(e) => {
                    log::error!("session resolution failed: {}", e);
                    Ok(Visitor(User::Anon))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::Responder;
    use actix_web::cookie::Cookie;
    use actix_web::test;
    use gp_core::ID;

    async fn protected(auth: Auth) -> impl Responder {
        HttpResponse::Ok().body(auth.username().to_owned())
    }

    fn crypto() -> web::Data<Crypto> {
        web::Data::new(Crypto::new(b"test-secret"))
    }

    #[actix_web::test]
    async fn missing_cookie_redirects_without_invoking_handler() {
        let app = test::init_service(
            App::new()
                .app_data(crypto())
                .route("/profile", web::get().to(protected)),
        )
        .await;
        let req = test::TestRequest::get().uri("/profile").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[actix_web::test]
    async fn garbage_cookie_redirects() {
        let app = test::init_service(
            App::new()
                .app_data(crypto())
                .route("/profile", web::get().to(protected)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/profile")
            .cookie(Cookie::new(JWT_COOKIE, "not.a.jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[actix_web::test]
    async fn expired_cookie_redirects() {
        let tokens = crypto();
        let mut claims = Claims::new(ID::default(), "ada".into(), Crypto::ttl(false));
        claims.iat -= 2 * 24 * 60 * 60;
        claims.exp -= 2 * 24 * 60 * 60;
        let token = tokens.encode(&claims).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(tokens)
                .route("/profile", web::get().to(protected)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/profile")
            .cookie(Cookie::new(JWT_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[actix_web::test]
    async fn valid_cookie_reaches_handler_with_claims() {
        let tokens = crypto();
        let claims = Claims::new(ID::default(), "ada".into(), Crypto::ttl(false));
        let token = tokens.encode(&claims).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(tokens)
                .route("/profile", web::get().to(protected)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/profile")
            .cookie(Cookie::new(JWT_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "ada".as_bytes());
    }

    #[actix_web::test]
    async fn gate_does_not_consult_the_store() {
        // No database is configured at all; a valid token is still enough.
        let tokens = crypto();
        let claims = Claims::new(ID::default(), "ghost".into(), Crypto::ttl(false));
        let token = tokens.encode(&claims).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(tokens)
                .route("/profile", web::get().to(protected)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/profile")
            .cookie(Cookie::new(JWT_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
