use std::time::Duration;

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::config::ServerConfig;
use crate::domain::category::{category_options, shipping_category_options};
use crate::domain::draft_session::DraftKey;
use crate::domain::media::{UploadTarget, document_slots};
use crate::domain::navigation::PendingNavigation;
use crate::domain::notification::Notification;
use crate::domain::variant::VariantId;
use crate::forms::drafts::DraftForm;
use crate::repository::InMemoryRepository;
use crate::routes::{
    base_context, forget_draft_key, redirect, remember_draft_key, render_template,
    send_notification, session_draft_key,
};
use crate::services::drafts::{self, DraftPageData};
use crate::services::{ServiceError, ServiceResult};

/// Route of the "Add New Product" page.
pub const DRAFT_PAGE: &str = "/products/new";

#[get("/products/new")]
pub async fn show_draft(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let key = session_draft_key(&session);

    if let Some(key) = key {
        match drafts::follow_navigation(repo.get_ref(), &key) {
            Ok(Some(destination)) => {
                forget_draft_key(&session);
                return redirect(server_config.navigation.url(destination));
            }
            Ok(None) => {}
            Err(err) => {
                log::error!("Failed to follow navigation of product draft {key}: {err}");
                return HttpResponse::InternalServerError().finish();
            }
        }
    }

    match drafts::open_draft(repo.get_ref(), key) {
        Ok(draft_session) => {
            remember_draft_key(&session, draft_session.key);

            let data = DraftPageData::from_session(&draft_session, &server_config.navigation);
            let mut context = base_context(&flash_messages, "new_product");
            context.insert("page", &data);
            context.insert(
                "categories",
                &category_options(draft_session.draft.info.category),
            );
            context.insert(
                "shipping_categories",
                &shipping_category_options(draft_session.draft.shipping.shipping_category),
            );
            context.insert("documents", &document_slots());
            render_template(&tera, "products/new.html", &context)
        }
        Err(err) => {
            log::error!("Failed to open product draft: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/new")]
pub async fn update_draft(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    body: web::Bytes,
) -> impl Responder {
    let result = parse_form(&body).and_then(|form| {
        let key = current_draft_key(&session, repo.get_ref())?;
        drafts::update_draft(repo.get_ref(), &key, form)
    });

    match result {
        Ok(_) => redirect(DRAFT_PAGE),
        Err(err) => error_response(err, "update the product"),
    }
}

#[post("/products/new/variants")]
pub async fn add_variant(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    body: web::Bytes,
) -> impl Responder {
    let result = parse_form(&body).and_then(|form| {
        let key = current_draft_key(&session, repo.get_ref())?;
        drafts::add_variant(repo.get_ref(), &key, form)
    });

    match result {
        Ok(_) => redirect(DRAFT_PAGE),
        Err(err) => error_response(err, "add a variant"),
    }
}

#[post("/products/new/variants/{variant_id}/delete")]
pub async fn remove_variant(
    path: web::Path<u64>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    body: web::Bytes,
) -> impl Responder {
    let variant_id = VariantId::new(path.into_inner());

    let result = parse_form(&body).and_then(|form| {
        let key = current_draft_key(&session, repo.get_ref())?;
        drafts::remove_variant(repo.get_ref(), &key, form, variant_id)
    });

    match result {
        Ok(_) => redirect(DRAFT_PAGE),
        Err(err) => error_response(err, "remove the variant"),
    }
}

#[post("/products/new/publish")]
pub async fn publish_draft(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
    body: web::Bytes,
) -> impl Responder {
    let result = parse_form(&body).and_then(|form| {
        let key = current_draft_key(&session, repo.get_ref())?;
        drafts::publish_draft(repo.get_ref(), &key, form, server_config.navigation.delay)
            .map(|outcome| (key, outcome))
    });

    match result {
        Ok((key, outcome)) => {
            send_notification(&outcome.notification);
            spawn_navigation(
                repo.get_ref().clone(),
                key,
                outcome.navigation,
                server_config.navigation.handoff_grace,
            );
            redirect(DRAFT_PAGE)
        }
        Err(err) => error_response(err, "publish the product"),
    }
}

#[post("/products/new/draft")]
pub async fn save_draft(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
    body: web::Bytes,
) -> impl Responder {
    let result = parse_form(&body).and_then(|form| {
        let key = current_draft_key(&session, repo.get_ref())?;
        drafts::save_draft(repo.get_ref(), &key, form, server_config.navigation.delay)
            .map(|outcome| (key, outcome))
    });

    match result {
        Ok((key, outcome)) => {
            send_notification(&outcome.notification);
            spawn_navigation(
                repo.get_ref().clone(),
                key,
                outcome.navigation,
                server_config.navigation.handoff_grace,
            );
            redirect(DRAFT_PAGE)
        }
        Err(err) => error_response(err, "save the draft"),
    }
}

#[post("/products/new/images")]
pub async fn upload_image(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    body: web::Bytes,
) -> impl Responder {
    let result = parse_form(&body).and_then(|form| {
        let key = current_draft_key(&session, repo.get_ref())?;
        drafts::request_upload(repo.get_ref(), &key, form, UploadTarget::Image)
    });

    match result {
        Ok(notification) => {
            send_notification(&notification);
            redirect(DRAFT_PAGE)
        }
        Err(err) => error_response(err, "upload the image"),
    }
}

#[post("/products/new/documents/{document}")]
pub async fn upload_document(
    path: web::Path<String>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    body: web::Bytes,
) -> impl Responder {
    let result = UploadTarget::document(&path)
        .map_err(ServiceError::from)
        .and_then(|target| {
            let form = parse_form(&body)?;
            let key = current_draft_key(&session, repo.get_ref())?;
            drafts::request_upload(repo.get_ref(), &key, form, target)
        });

    match result {
        Ok(notification) => {
            send_notification(&notification);
            redirect(DRAFT_PAGE)
        }
        Err(err) => error_response(err, "upload the document"),
    }
}

#[post("/products/new/leave")]
pub async fn leave_draft(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match drafts::leave_draft(repo.get_ref(), session_draft_key(&session)) {
        Ok(destination) => {
            forget_draft_key(&session);
            redirect(server_config.navigation.url(destination))
        }
        Err(err) => {
            log::error!("Failed to leave product draft: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn parse_form(body: &[u8]) -> ServiceResult<DraftForm> {
    DraftForm::from_body(body).map_err(|err| ServiceError::Form(err.to_string()))
}

/// Key of the session's draft, opening a new draft when there is none.
fn current_draft_key(session: &Session, repo: &InMemoryRepository) -> ServiceResult<DraftKey> {
    let draft_session = drafts::open_draft(repo, session_draft_key(session))?;
    remember_draft_key(session, draft_session.key);
    Ok(draft_session.key)
}

fn spawn_navigation(
    repo: InMemoryRepository,
    key: DraftKey,
    navigation: PendingNavigation,
    grace: Duration,
) {
    actix_web::rt::spawn(async move {
        if let Err(err) = drafts::complete_navigation(&repo, key, navigation, grace).await {
            log::error!("Failed to close product draft {key}: {err}");
        }
    });
}

fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    let notification = match err {
        ServiceError::Form(message) => Notification::error(message),
        ServiceError::Conflict => Notification::error("This product has already been submitted."),
        ServiceError::NotFound => Notification::error("This draft is no longer available."),
        ServiceError::Repository(err) => {
            log::error!("Failed to {action}: {err}");
            Notification::error(format!("Could not {action}. Please try again."))
        }
    };
    send_notification(&notification);
    redirect(DRAFT_PAGE)
}
