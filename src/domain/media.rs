use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::product_draft::DraftError;

/// Maximum number of images a listing can carry.
pub const MAX_IMAGES: usize = 9;

/// Reference to an uploaded product image held by the media service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

/// Compliance document slots shown in the documents section.
///
/// Uploads are handled by an external document service that does not exist
/// yet, so the draft holds no data for these slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplianceDocument {
    FdaCertificate,
    DtiCompliance,
    AuthenticityDocument,
}

impl ComplianceDocument {
    pub const ALL: [ComplianceDocument; 3] = [
        ComplianceDocument::FdaCertificate,
        ComplianceDocument::DtiCompliance,
        ComplianceDocument::AuthenticityDocument,
    ];

    /// Path segment identifying the slot in upload URLs.
    pub fn slug(self) -> &'static str {
        match self {
            ComplianceDocument::FdaCertificate => "fda-certificate",
            ComplianceDocument::DtiCompliance => "dti-compliance",
            ComplianceDocument::AuthenticityDocument => "authenticity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComplianceDocument::FdaCertificate => "FDA Certificate",
            ComplianceDocument::DtiCompliance => "DTI Compliance",
            ComplianceDocument::AuthenticityDocument => "Authenticity Document",
        }
    }
}

impl fmt::Display for ComplianceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplianceDocument {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplianceDocument::ALL
            .into_iter()
            .find(|document| document.slug() == s)
            .ok_or(())
    }
}

/// Template row for one compliance document slot.
#[derive(Debug, Serialize)]
pub struct DocumentSlot {
    pub slug: &'static str,
    pub label: &'static str,
}

pub fn document_slots() -> Vec<DocumentSlot> {
    ComplianceDocument::ALL
        .into_iter()
        .map(|document| DocumentSlot {
            slug: document.slug(),
            label: document.label(),
        })
        .collect()
}

/// Target of an upload request that is not wired to storage yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Image,
    Document(ComplianceDocument),
}

impl UploadTarget {
    /// Resolve a document slot from its URL slug.
    pub fn document(slug: &str) -> Result<Self, DraftError> {
        slug.parse()
            .map(UploadTarget::Document)
            .map_err(|_| DraftError::UnknownDocument(slug.to_string()))
    }
}
