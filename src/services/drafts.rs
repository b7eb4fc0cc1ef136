use std::time::Duration;

use serde::Serialize;

use crate::config::NavigationConfig;
use crate::domain::draft_session::{DraftKey, DraftSession};
use crate::domain::media::{MAX_IMAGES, UploadTarget};
use crate::domain::navigation::{Destination, PendingNavigation};
use crate::domain::notification::Notification;
use crate::domain::product_draft::{DraftError, ProductDraft};
use crate::domain::variant::VariantId;
use crate::forms::drafts::DraftForm;
use crate::repository::{DraftReader, DraftWriter};
use crate::services::{ServiceError, ServiceResult};

/// Result of a successful publish or save-draft submission.
#[derive(Debug)]
pub struct SubmissionOutcome {
    /// Toast announcing the result.
    pub notification: Notification,
    /// Navigation that follows the toast.
    pub navigation: PendingNavigation,
}

/// Countdown rendered while a submission is waiting to navigate away.
#[derive(Debug, Serialize)]
pub struct NavigationView {
    pub url: String,
    pub remaining_ms: u64,
}

/// Data required to render the "Add New Product" page.
#[derive(Debug, Serialize)]
pub struct DraftPageData {
    pub key: String,
    pub status: &'static str,
    pub draft: ProductDraft,
    pub opened_at: String,
    pub max_images: usize,
    pub pending_navigation: Option<NavigationView>,
}

impl DraftPageData {
    pub fn from_session(session: &DraftSession, navigation: &NavigationConfig) -> Self {
        let pending_navigation = session.pending_navigation().map(|pending| NavigationView {
            url: navigation.url(pending.destination()).to_string(),
            remaining_ms: u64::try_from(pending.remaining().as_millis()).unwrap_or(u64::MAX),
        });

        Self {
            key: session.key.to_string(),
            status: session.state.label(),
            draft: session.draft.clone(),
            opened_at: session.opened_at.format("%Y-%m-%d %H:%M").to_string(),
            max_images: MAX_IMAGES,
            pending_navigation,
        }
    }
}

/// Resume the draft referenced by `key`, or open a new empty one.
pub fn open_draft<R>(repo: &R, key: Option<DraftKey>) -> ServiceResult<DraftSession>
where
    R: DraftReader + DraftWriter + ?Sized,
{
    if let Some(key) = key
        && let Some(session) = repo.get_draft(&key)?
    {
        return Ok(session);
    }

    let session = DraftSession::new();
    repo.store_draft(&session)?;
    log::debug!("Opened product draft {}", session.key);
    Ok(session)
}

/// Load the draft referenced by `key`.
pub fn load_draft<R>(repo: &R, key: &DraftKey) -> ServiceResult<DraftSession>
where
    R: DraftReader + ?Sized,
{
    repo.get_draft(key)?.ok_or(ServiceError::NotFound)
}

/// Apply the submitted form to the draft and store the result.
pub fn update_draft<R>(repo: &R, key: &DraftKey, form: DraftForm) -> ServiceResult<DraftSession>
where
    R: DraftReader + DraftWriter + ?Sized,
{
    let update = form
        .into_update()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut session = load_draft(repo, key)?;
    session.edit()?.apply(update)?;
    repo.store_draft(&session)?;

    log::debug!("Updated product draft {key}");
    Ok(session)
}

/// Apply the form, then append an empty variant.
pub fn add_variant<R>(repo: &R, key: &DraftKey, form: DraftForm) -> ServiceResult<VariantId>
where
    R: DraftReader + DraftWriter + ?Sized,
{
    let mut session = update_draft(repo, key, form)?;
    let variant_id = session.edit()?.add_variant();
    repo.store_draft(&session)?;

    log::debug!("Added variant {variant_id} to product draft {key}");
    Ok(variant_id)
}

/// Apply the form, then drop the variant with `variant_id`.
///
/// Returns `false` when no such variant exists.
pub fn remove_variant<R>(
    repo: &R,
    key: &DraftKey,
    form: DraftForm,
    variant_id: VariantId,
) -> ServiceResult<bool>
where
    R: DraftReader + DraftWriter + ?Sized,
{
    let mut session = update_draft(repo, key, form)?;
    let removed = session.edit()?.remove_variant(variant_id);
    if removed {
        repo.store_draft(&session)?;
        log::debug!("Removed variant {variant_id} from product draft {key}");
    }
    Ok(removed)
}

/// Apply the form, then publish the draft.
///
/// The applied form is kept even when publishing is refused because required
/// fields are empty.
pub fn publish_draft<R>(
    repo: &R,
    key: &DraftKey,
    form: DraftForm,
    delay: Duration,
) -> ServiceResult<SubmissionOutcome>
where
    R: DraftReader + DraftWriter + ?Sized,
{
    let mut session = update_draft(repo, key, form)?;

    let navigation = match session.publish(delay) {
        Ok(navigation) => navigation,
        Err(DraftError::MissingRequiredFields(missing)) => {
            let names: Vec<&str> = missing.iter().map(|field| field.as_str()).collect();
            log::warn!(
                "Refused to publish product draft {key}: missing {}",
                names.join(", ")
            );
            return Err(DraftError::MissingRequiredFields(missing).into());
        }
        Err(err) => return Err(err.into()),
    };
    repo.store_draft(&session)?;

    let name = &session.draft.info.name;
    log::info!("Published product draft {key} as `{name}`");

    Ok(SubmissionOutcome {
        notification: Notification::success("Product published successfully!")
            .with_description(format!("{name} is now live in your catalog.")),
        navigation,
    })
}

/// Apply the form, then save the draft. Never checks required fields.
pub fn save_draft<R>(
    repo: &R,
    key: &DraftKey,
    form: DraftForm,
    delay: Duration,
) -> ServiceResult<SubmissionOutcome>
where
    R: DraftReader + DraftWriter + ?Sized,
{
    let mut session = update_draft(repo, key, form)?;
    let navigation = session.save_draft(delay)?;
    repo.store_draft(&session)?;

    log::info!("Saved product draft {key}");

    Ok(SubmissionOutcome {
        notification: Notification::success("Draft saved")
            .with_description("You can continue editing this product later."),
        navigation,
    })
}

/// Apply the form, then answer an upload request.
///
/// Storage for media and documents is not available, so the request only
/// produces an informational notification.
pub fn request_upload<R>(
    repo: &R,
    key: &DraftKey,
    form: DraftForm,
    target: UploadTarget,
) -> ServiceResult<Notification>
where
    R: DraftReader + DraftWriter + ?Sized,
{
    let session = update_draft(repo, key, form)?;

    let notification = match target {
        UploadTarget::Image => Notification::info("Image upload is coming soon").with_description(
            format!(
                "{} of {MAX_IMAGES} images attached.",
                session.draft.images.len()
            ),
        ),
        UploadTarget::Document(document) => {
            Notification::info(format!("{document} upload is coming soon"))
                .with_description("Compliance documents can be attached once storage is ready.")
        }
    };

    Ok(notification)
}

/// Leave the page: discard the draft and cancel any pending navigation.
pub fn leave_draft<R>(repo: &R, key: Option<DraftKey>) -> ServiceResult<Destination>
where
    R: DraftWriter + ?Sized,
{
    if let Some(key) = key
        && let Some(session) = repo.discard_draft(&key)?
    {
        session.abandon();
        log::info!("Left product draft {key}");
    }

    Ok(Destination::Dashboard)
}

/// Hand a submitted draft over to its destination once its navigation is due.
///
/// Discards the draft and returns the destination. Returns `None` and keeps
/// the draft while it is still editable or its countdown is running.
pub fn follow_navigation<R>(repo: &R, key: &DraftKey) -> ServiceResult<Option<Destination>>
where
    R: DraftReader + DraftWriter + ?Sized,
{
    let Some(session) = repo.get_draft(key)? else {
        return Ok(None);
    };
    let Some(destination) = session
        .pending_navigation()
        .filter(|navigation| navigation.is_due())
        .map(|navigation| navigation.destination())
    else {
        return Ok(None);
    };

    repo.discard_draft(key)?;
    log::info!("Product draft {key} handed over to {destination:?}");
    Ok(Some(destination))
}

/// Wait for a submission's navigation, then give the browser `grace` to
/// follow it before discarding the draft.
///
/// Returns `None` without touching the draft when the navigation was
/// cancelled.
pub async fn complete_navigation<R>(
    repo: &R,
    key: DraftKey,
    navigation: PendingNavigation,
    grace: Duration,
) -> ServiceResult<Option<Destination>>
where
    R: DraftWriter + ?Sized,
{
    let Some(destination) = navigation.fired().await else {
        log::debug!("Navigation for product draft {key} was cancelled");
        return Ok(None);
    };

    tokio::time::sleep(grace).await;
    if repo.discard_draft(&key)?.is_some() {
        log::debug!("Product draft {key} closed after navigating to {destination:?}");
    }
    Ok(Some(destination))
}
