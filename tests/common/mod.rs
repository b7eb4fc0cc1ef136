//! Helpers for integration tests.
#![allow(dead_code)]

use pushkind_listings::domain::draft_session::DraftKey;
use pushkind_listings::forms::drafts::DraftForm;
use pushkind_listings::repository::InMemoryRepository;
use pushkind_listings::services::drafts;

/// Urlencoded body of a form where every required field is filled in.
pub const STEEL_SHELF_BODY: &str = "name=Steel+Shelf&category=Office+Equipment&stock_quantity=50\
&sku_code=SKU-001&weight=2.5";

/// Repository holding one freshly opened draft.
pub fn repo_with_draft() -> (InMemoryRepository, DraftKey) {
    let repo = InMemoryRepository::new();
    let session = drafts::open_draft(&repo, None).expect("open draft");
    (repo, session.key)
}

pub fn steel_shelf_form() -> DraftForm {
    DraftForm::from_body(STEEL_SHELF_BODY.as_bytes()).expect("decode form")
}
