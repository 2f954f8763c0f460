use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::http::header;
use actix_web::web;
use gp_auth::Auth;
use gp_auth::UserInfo;
use gp_core::ID;
use gp_core::Unique;
use std::sync::Arc;
use tokio_postgres::Client;

/// The session user's own guides, newest first.
pub async fn profile(db: web::Data<Arc<Client>>, auth: Auth) -> impl Responder {
    match db.by_author(auth.username()).await {
        Ok(guides) => HttpResponse::Ok().json(serde_json::json!({
            "username": auth.username(),
            "guides": guides.iter().map(GuideView::from).collect::<Vec<_>>(),
        })),
        Err(e) => {
            log::error!("profile listing failed: {}", e);
            HttpResponse::InternalServerError().body("server error")
        }
    }
}

pub async fn create(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    req: web::Json<GuideRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let images = pad(req.images, req.headings.len());
    let Some(sections) = Section::zip(req.headings, req.bodies, images) else {
        return HttpResponse::BadRequest().body("section arrays must be equal length");
    };
    let guide = Guide::new(
        ID::default(),
        auth.username().to_string(),
        req.title,
        req.tag,
        sections,
    );
    match db.create(&guide).await {
        Ok(()) => HttpResponse::Created().json(serde_json::json!({
            "message": "guide created",
            "guide": GuideView::from(&guide),
        })),
        Err(e) => {
            log::error!("guide insert failed: {}", e);
            HttpResponse::InternalServerError().body("failed to create guide")
        }
    }
}

pub async fn edit(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    policy: web::Data<Ownership>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<GuideRequest>,
) -> impl Responder {
    let id: ID<Guide> = ID::from(path.into_inner());
    let existing = match db.find(id).await {
        Ok(Some(guide)) => guide,
        Ok(None) => return HttpResponse::NotFound().body("guide not found"),
        Err(e) => {
            log::error!("guide lookup failed: {}", e);
            return HttpResponse::InternalServerError().body("server error");
        }
    };
    if !policy.permits(auth.username(), existing.author()) {
        return HttpResponse::Forbidden().body("not the author of this guide");
    }
    let req = req.into_inner();
    let images = pad(req.images, req.headings.len());
    // Absent image slots keep whatever the stored section referenced.
    let images = images
        .into_iter()
        .enumerate()
        .map(|(i, img)| img.or_else(|| existing.sections().get(i).and_then(|s| s.image.clone())))
        .collect();
    let Some(sections) = Section::zip(req.headings, req.bodies, images) else {
        return HttpResponse::BadRequest().body("section arrays must be equal length");
    };
    let guide = Guide::new(
        id,
        existing.author().to_string(),
        req.title,
        req.tag,
        sections,
    );
    match db.update(&guide).await {
        Ok(()) => HttpResponse::Found()
            .insert_header((header::LOCATION, "/profile"))
            .finish(),
        Err(e) => {
            log::error!("guide update failed: {}", e);
            HttpResponse::InternalServerError().body("error updating guide")
        }
    }
}

pub async fn delete(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    policy: web::Data<Ownership>,
    path: web::Path<uuid::Uuid>,
) -> impl Responder {
    let id: ID<Guide> = ID::from(path.into_inner());
    let existing = match db.find(id).await {
        Ok(Some(guide)) => guide,
        Ok(None) => return HttpResponse::NotFound().body("guide not found"),
        Err(e) => {
            log::error!("guide lookup failed: {}", e);
            return HttpResponse::InternalServerError().body("server error");
        }
    };
    if !policy.permits(auth.username(), existing.author()) {
        return HttpResponse::Forbidden().body("not the author of this guide");
    }
    match db.delete(id).await {
        Ok(()) => HttpResponse::Found()
            .insert_header((header::LOCATION, "/profile"))
            .finish(),
        Err(e) => {
            log::error!("guide delete failed: {}", e);
            HttpResponse::InternalServerError().body("error deleting guide")
        }
    }
}

/// Full catalog; behind the gate like the rest of the authored views.
pub async fn all(db: web::Data<Arc<Client>>, _auth: Auth) -> impl Responder {
    match db.all().await {
        Ok(guides) => HttpResponse::Ok().json(serde_json::json!({
            "guides": guides.iter().map(GuideView::from).collect::<Vec<_>>(),
        })),
        Err(e) => {
            log::error!("guide catalog failed: {}", e);
            HttpResponse::InternalServerError().body("server error")
        }
    }
}

/// Public field-equality browse by tag.
pub async fn by_tag(db: web::Data<Arc<Client>>, path: web::Path<String>) -> impl Responder {
    let tag = path.into_inner();
    match db.by_tag(&tag).await {
        Ok(guides) => HttpResponse::Ok().json(serde_json::json!({
            "tag": tag,
            "guides": guides.iter().map(GuideView::from).collect::<Vec<_>>(),
        })),
        Err(e) => {
            log::error!("tag browse failed: {}", e);
            HttpResponse::InternalServerError().body("server error")
        }
    }
}

/// Public single-guide view with the author's public profile attached.
pub async fn view(db: web::Data<Arc<Client>>, path: web::Path<uuid::Uuid>) -> impl Responder {
    let id: ID<Guide> = ID::from(path.into_inner());
    let guide = match db.find(id).await {
        Ok(Some(guide)) => guide,
        Ok(None) => return HttpResponse::NotFound().body("guide not found"),
        Err(e) => {
            log::error!("guide lookup failed: {}", e);
            return HttpResponse::InternalServerError().body("server error");
        }
    };
    // AuthRepository stays unimported; its `find`/`create` collide with GuideRepository's.
    let author = match gp_auth::AuthRepository::named(&**db, guide.author()).await {
        Ok(author) => author,
        Err(e) => {
            log::error!("author lookup failed: {}", e);
            return HttpResponse::InternalServerError().body("server error");
        }
    };
    HttpResponse::Ok().json(serde_json::json!({
        "guide": GuideView::from(&guide),
        "user": author.as_ref().map(UserInfo::from),
    }))
}

/// Guide creation and edits arrive with however many image slots the client
/// filled; trailing sections without uploads are padded with `None`.
fn pad(images: Vec<Option<String>>, len: usize) -> Vec<Option<String>> {
    let mut images = images;
    images.resize(len.max(images.len()), None);
    images
}
