use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};

use crate::config::ServerConfig;
use crate::repository::InMemoryRepository;
use crate::routes::session_draft_key;
use crate::services::ServiceError;
use crate::services::drafts::{self, DraftPageData};

#[get("/api/v1/products/draft")]
/// Return the draft open in this session as JSON.
///
/// Answers `404 Not Found` when the session has no open draft.
pub async fn api_v1_draft(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Some(key) = session_draft_key(&session) else {
        return HttpResponse::NotFound().finish();
    };

    match drafts::load_draft(repo.get_ref(), &key) {
        Ok(draft_session) => HttpResponse::Ok().json(DraftPageData::from_session(
            &draft_session,
            &server_config.navigation,
        )),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load product draft {key}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
