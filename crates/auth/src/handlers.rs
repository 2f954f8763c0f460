use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::web;
use gp_core::ID;
use gp_core::Unique;
use std::sync::Arc;
use tokio_postgres::Client;

/// One message for both "no such user" and "wrong password", so the response
/// leaks nothing about which half failed.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

pub async fn signup(
    db: web::Data<Arc<Client>>,
    hasher: web::Data<password::Hasher>,
    req: web::Form<SignupRequest>,
) -> impl Responder {
    if req.password != req.c_password {
        return HttpResponse::BadRequest().body("passwords do not match");
    }
    if !Member::valid_email(&req.email) {
        return HttpResponse::BadRequest().body("invalid email address");
    }
    if req.username.len() < 3 || req.username.len() > 32 {
        return HttpResponse::BadRequest().body("username must be 3-32 characters");
    }
    if req.password.len() < 8 {
        return HttpResponse::BadRequest().body("password must be at least 8 characters");
    }
    match db.exists(&req.username, &req.email).await {
        Ok(false) => {}
        Ok(true) => return HttpResponse::Conflict().body("username or email already exists"),
        Err(e) => {
            log::error!("signup uniqueness check failed: {}", e);
            return HttpResponse::InternalServerError().body("error signing up");
        }
    }
    let hashword = match hasher.hash(&req.password) {
        Ok(h) => h,
        Err(e) => {
            log::error!("password hashing failed: {}", e);
            return HttpResponse::InternalServerError().body("error signing up");
        }
    };
    let member = Member::new(
        ID::default(),
        req.username.clone(),
        req.email.clone(),
        String::default(),
    );
    if let Err(e) = db.create(&member, &hashword).await {
        log::error!("signup insert failed: {}", e);
        return HttpResponse::InternalServerError().body("error signing up");
    }
    log::info!("new member {} signed up", member.username());
    // No auto-login: the client re-enters through the login form.
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/login"))
        .finish()
}

pub async fn login(
    db: web::Data<Arc<Client>>,
    tokens: web::Data<Crypto>,
    req: web::Form<LoginRequest>,
) -> impl Responder {
    let (member, hashword) = match db.lookup(&req.email).await {
        Ok(Some(row)) => row,
        Ok(None) => return HttpResponse::BadRequest().body(INVALID_CREDENTIALS),
        Err(e) => {
            log::error!("login lookup failed: {}", e);
            return HttpResponse::InternalServerError().body("error with login");
        }
    };
    if !password::verify(&req.password, &hashword) {
        return HttpResponse::BadRequest().body(INVALID_CREDENTIALS);
    }
    let ttl = Crypto::ttl(req.remember());
    let claims = Claims::new(member.id(), member.username().to_string(), ttl);
    let token = match tokens.encode(&claims) {
        Ok(t) => t,
        Err(e) => {
            log::error!("token issuance failed: {}", e);
            return HttpResponse::InternalServerError().body("error with login");
        }
    };
    let mut cookie = Cookie::build(JWT_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish();
    // Remembered sessions get a persistent cookie; otherwise it dies with
    // the browser session while the token itself still expires server-side.
    if req.remember() {
        cookie.set_max_age(actix_web::cookie::time::Duration::seconds(
            ttl.as_secs() as i64
        ));
    }
    log::info!("member {} logged in", member.username());
    HttpResponse::Found()
        .cookie(cookie)
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Client-side logout only: stateless tokens cannot be revoked, so a copy of
/// the cookie kept elsewhere stays valid until natural expiry.
pub async fn logout() -> impl Responder {
    let mut cookie = Cookie::build(JWT_COOKIE, "").path("/").finish();
    cookie.make_removal();
    HttpResponse::Found()
        .cookie(cookie)
        .insert_header((header::LOCATION, "/login"))
        .finish()
}

/// Current member's public profile details for the landing page.
pub async fn whoami(visitor: Visitor) -> impl Responder {
    match visitor.user().member() {
        Some(member) => HttpResponse::Ok().json(serde_json::json!({ "user": UserInfo::from(member) })),
        None => HttpResponse::Ok().json(serde_json::json!({ "user": null })),
    }
}

/// Avatar path update; the upload transport that produced the path is
/// outside this service.
pub async fn avatar(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    req: web::Json<AvatarRequest>,
) -> impl Responder {
    match db.avatar(auth.user(), &req.avatar).await {
        Ok(()) => HttpResponse::Found()
            .insert_header((header::LOCATION, "/profile"))
            .finish(),
        Err(e) => {
            log::error!("avatar update failed: {}", e);
            HttpResponse::InternalServerError().body("error updating profile")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test;

    fn unique(tag: &str) -> String {
        format!("{}{}", tag, &uuid::Uuid::now_v7().simple().to_string()[..10])
    }

    fn register(email: &str, username: &str) -> test::TestRequest {
        test::TestRequest::post().uri("/signup").set_form([
            ("email", email),
            ("username", username),
            ("password", "hunter2222"),
            ("cPassword", "hunter2222"),
        ])
    }

    #[actix_web::test]
    #[ignore = "requires DB_URL pointing at a live database"]
    async fn login_failures_share_one_message() {
        let db = gp_pg::db().await;
        gp_pg::migrate::<Member>(&db).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(Crypto::new(b"test-secret")))
                .app_data(web::Data::new(password::Hasher::new(2)))
                .route("/signup", web::post().to(signup))
                .route("/login", web::post().to(login)),
        )
        .await;
        let name = unique("ada");
        let email = format!("{}@example.com", name);
        let signed_up = test::call_service(&app, register(&email, &name).to_request()).await;
        assert_eq!(signed_up.status(), StatusCode::FOUND);
        let wrong_password = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", email.as_str()), ("password", "not-hunter2222")])
            .to_request();
        let res = test::call_service(&app, wrong_password).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let wrong_password = test::read_body(res).await;
        let no_such_email = format!("{}@example.com", unique("nobody"));
        let unknown_email = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", no_such_email.as_str()), ("password", "hunter2222")])
            .to_request();
        let res = test::call_service(&app, unknown_email).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let unknown_email = test::read_body(res).await;
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password, INVALID_CREDENTIALS.as_bytes());
    }

    #[actix_web::test]
    #[ignore = "requires DB_URL pointing at a live database"]
    async fn duplicate_signup_conflicts_without_touching_the_store() {
        let db = gp_pg::db().await;
        gp_pg::migrate::<Member>(&db).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.clone()))
                .app_data(web::Data::new(password::Hasher::new(2)))
                .route("/signup", web::post().to(signup)),
        )
        .await;
        let name = unique("ada");
        let email = format!("{}@example.com", name);
        let signed_up = test::call_service(&app, register(&email, &name).to_request()).await;
        assert_eq!(signed_up.status(), StatusCode::FOUND);
        let imposter = unique("eve");
        let rejected = test::call_service(&app, register(&email, &imposter).to_request()).await;
        assert_eq!(rejected.status(), StatusCode::CONFLICT);
        let (member, _) = db.lookup(&email).await.unwrap().unwrap();
        assert_eq!(member.username(), name);
        assert!(db.named(&imposter).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn logout_clears_cookie_and_redirects() {
        let res = logout().await.respond_to(&test::TestRequest::get().to_http_request());
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
        let setcookie = res.headers().get(header::SET_COOKIE).unwrap();
        let setcookie = setcookie.to_str().unwrap();
        assert!(setcookie.starts_with("jwt="));
        assert!(setcookie.contains("Max-Age=0"));
    }
}
