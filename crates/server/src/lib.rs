//! Guidepost backend server.
//!
//! Wires the authentication and guide routes into a single actix-web
//! server. Configuration is injected once at startup from the environment:
//! `JWT_SECRET`, `DB_URL`, `BIND_ADDR`, `HASH_COST`, `OWNERSHIP`.

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use gp_auth::Member;
use gp_guides::Guide;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let client = gp_pg::db().await;
    gp_pg::migrate::<Member>(&client).await.expect("migrate users table");
    gp_pg::migrate::<Guide>(&client).await.expect("migrate guides table");
    let crypto = web::Data::new(gp_auth::Crypto::from_env());
    let hasher = web::Data::new(gp_auth::password::Hasher::from_env());
    let policy = web::Data::new(gp_guides::Ownership::from_env());
    let client = web::Data::new(client);
    log::info!("starting guidepost server with ownership policy {:?}", **policy);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(crypto.clone())
            .app_data(hasher.clone())
            .app_data(policy.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .route("/", web::get().to(gp_auth::whoami))
            .route("/login", web::post().to(gp_auth::login))
            .route("/signup", web::post().to(gp_auth::signup))
            .route("/logout", web::get().to(gp_auth::logout))
            .route("/profile", web::get().to(gp_guides::profile))
            .route("/profile/avatar", web::post().to(gp_auth::avatar))
            .route("/guide/{id}", web::get().to(gp_guides::view))
            .service(
                web::scope("/guides")
                    .route("", web::get().to(gp_guides::all))
                    .route("", web::post().to(gp_guides::create))
                    .route("/tag/{tag}", web::get().to(gp_guides::by_tag))
                    .route("/edit/{id}", web::post().to(gp_guides::edit))
                    .route("/delete/{id}", web::post().to(gp_guides::delete)),
            )
    })
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
