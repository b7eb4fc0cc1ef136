pub mod category;
pub mod draft_session;
pub mod media;
pub mod navigation;
pub mod notification;
pub mod product_draft;
pub mod variant;
