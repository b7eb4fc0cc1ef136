use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::draft_session::DraftKey;
use crate::domain::notification::{Notification, NotificationLevel};

pub mod api;
pub mod drafts;

/// Session entry holding the key of the draft the browser is editing.
const DRAFT_SESSION_KEY: &str = "product_draft";

#[derive(Serialize)]
struct AlertView {
    level: &'static str,
    message: String,
}

/// Template context shared by every page: flash alerts and the active page.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts: Vec<AlertView> = flash_messages
        .iter()
        .map(|message| AlertView {
            level: alert_class(message.level()),
            message: message.content().to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

fn alert_class(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Render `template` or answer 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Hand a notification to the flash message channel.
pub fn send_notification(notification: &Notification) {
    let message = notification.message();
    let flash = match notification.level {
        NotificationLevel::Success => FlashMessage::success(message),
        NotificationLevel::Error => FlashMessage::error(message),
        NotificationLevel::Info => FlashMessage::info(message),
    };
    flash.send();
}

/// Key of the draft remembered in the session, if it is still parseable.
pub fn session_draft_key(session: &Session) -> Option<DraftKey> {
    match session.get::<String>(DRAFT_SESSION_KEY) {
        Ok(value) => value.and_then(|value| value.parse().ok()),
        Err(err) => {
            log::warn!("Failed to read draft key from session: {err}");
            None
        }
    }
}

pub fn remember_draft_key(session: &Session, key: DraftKey) {
    if let Err(err) = session.insert(DRAFT_SESSION_KEY, key.to_string()) {
        log::error!("Failed to store draft key {key} in session: {err}");
    }
}

pub fn forget_draft_key(session: &Session) {
    session.remove(DRAFT_SESSION_KEY);
}
