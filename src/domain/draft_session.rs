use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::navigation::{Destination, PendingNavigation};
use crate::domain::product_draft::{DraftError, ProductDraft};

/// Opaque handle tying a browser session to its live draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftKey(Uuid);

impl DraftKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DraftKey {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(DraftKey)
    }
}

/// Where the page is in its lifecycle.
#[derive(Debug, Clone)]
pub enum DraftState {
    /// The supplier is filling in the form.
    Editing,
    /// Published; waiting to hand over to the product listing.
    Publishing(PendingNavigation),
    /// Saved as draft; waiting to hand over to the dashboard.
    SavingDraft(PendingNavigation),
}

impl DraftState {
    pub fn label(&self) -> &'static str {
        match self {
            DraftState::Editing => "editing",
            DraftState::Publishing(_) => "publishing",
            DraftState::SavingDraft(_) => "saving_draft",
        }
    }
}

/// A draft together with the state of the page editing it.
#[derive(Debug, Clone)]
pub struct DraftSession {
    pub key: DraftKey,
    pub draft: ProductDraft,
    pub state: DraftState,
    pub opened_at: NaiveDateTime,
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftSession {
    /// Open a fresh, empty draft in the editing state.
    pub fn new() -> Self {
        Self {
            key: DraftKey::generate(),
            draft: ProductDraft::new(),
            state: DraftState::Editing,
            opened_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, DraftState::Editing)
    }

    /// Mutable access to the draft, only while editing.
    pub fn edit(&mut self) -> Result<&mut ProductDraft, DraftError> {
        match self.state {
            DraftState::Editing => Ok(&mut self.draft),
            _ => Err(DraftError::NotEditing),
        }
    }

    /// Navigation scheduled by a submission, if any.
    pub fn pending_navigation(&self) -> Option<&PendingNavigation> {
        match &self.state {
            DraftState::Editing => None,
            DraftState::Publishing(navigation) | DraftState::SavingDraft(navigation) => {
                Some(navigation)
            }
        }
    }

    /// Publish the draft.
    ///
    /// Leaves the session untouched when any required field is empty;
    /// otherwise moves to [`DraftState::Publishing`] with navigation to the
    /// product listing scheduled after `delay`.
    pub fn publish(&mut self, delay: Duration) -> Result<PendingNavigation, DraftError> {
        let draft = self.edit()?;
        let missing = draft.missing_required_fields();
        if !missing.is_empty() {
            return Err(DraftError::MissingRequiredFields(missing));
        }

        let navigation = PendingNavigation::schedule(Destination::ProductListing, delay);
        self.state = DraftState::Publishing(navigation.clone());
        Ok(navigation)
    }

    /// Save the draft. Nothing is checked and nothing is stored.
    pub fn save_draft(&mut self, delay: Duration) -> Result<PendingNavigation, DraftError> {
        self.edit()?;

        let navigation = PendingNavigation::schedule(Destination::Dashboard, delay);
        self.state = DraftState::SavingDraft(navigation.clone());
        Ok(navigation)
    }

    /// Tear the session down, cancelling any navigation still pending.
    pub fn abandon(self) {
        if let Some(navigation) = self.pending_navigation() {
            navigation.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product_draft::{DraftField, DraftUpdate};

    fn steel_shelf() -> DraftUpdate {
        DraftUpdate::new()
            .field(DraftField::Name, "Steel Shelf")
            .field(DraftField::Category, "Office Equipment")
            .field(DraftField::StockQuantity, "50")
            .field(DraftField::SkuCode, "SKU-001")
            .field(DraftField::Weight, "2.5")
    }

    #[tokio::test(start_paused = true)]
    async fn publish_on_empty_draft_leaves_state_unchanged() {
        let mut session = DraftSession::new();
        let before = session.draft.clone();

        let result = session.publish(Duration::from_millis(1500));

        match result {
            Err(DraftError::MissingRequiredFields(missing)) => {
                assert_eq!(missing, DraftField::REQUIRED.to_vec());
            }
            other => panic!("expected missing fields, got {other:?}"),
        }
        assert!(session.is_editing());
        assert!(session.pending_navigation().is_none());
        assert_eq!(session.draft, before);
    }

    #[tokio::test(start_paused = true)]
    async fn publish_schedules_navigation_to_product_listing() {
        let mut session = DraftSession::new();
        session
            .edit()
            .and_then(|draft| draft.apply(steel_shelf()))
            .expect("editable");

        let navigation = session
            .publish(Duration::from_millis(1500))
            .expect("publish succeeds");

        assert_eq!(navigation.destination(), Destination::ProductListing);
        assert_eq!(session.state.label(), "publishing");
        assert_eq!(navigation.fired().await, Some(Destination::ProductListing));
    }

    #[tokio::test(start_paused = true)]
    async fn save_draft_needs_no_fields() {
        let mut session = DraftSession::new();

        let navigation = session
            .save_draft(Duration::from_millis(1500))
            .expect("save draft always succeeds");

        assert_eq!(navigation.destination(), Destination::Dashboard);
        assert_eq!(session.state.label(), "saving_draft");
    }

    #[tokio::test(start_paused = true)]
    async fn submitted_session_rejects_further_edits() {
        let mut session = DraftSession::new();
        session
            .save_draft(Duration::from_millis(1500))
            .expect("save draft");

        assert!(matches!(session.edit(), Err(DraftError::NotEditing)));
        assert!(matches!(
            session.publish(Duration::from_millis(1500)),
            Err(DraftError::NotEditing)
        ));
        assert!(matches!(
            session.save_draft(Duration::from_millis(1500)),
            Err(DraftError::NotEditing)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn abandon_cancels_pending_navigation() {
        let mut session = DraftSession::new();
        let navigation = session
            .save_draft(Duration::from_millis(1500))
            .expect("save draft");

        session.abandon();

        assert!(navigation.is_cancelled());
        assert_eq!(navigation.fired().await, None);
    }

    #[test]
    fn draft_key_parses_its_display_form() {
        let key = DraftKey::generate();

        assert_eq!(key.to_string().parse::<DraftKey>().ok(), Some(key));
        assert!("not-a-key".parse::<DraftKey>().is_err());
    }
}
