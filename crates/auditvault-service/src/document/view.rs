//! Presentation form of a document.

use serde::Serialize;

use auditvault_entity::document::Document;
use auditvault_storage::key::{self, ObjectKey};

/// A document with its display name recovered from the object key.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: Document,
    /// `stem.ext` as derived from the key.
    pub name: String,
    /// Extension without the dot, when the key has one.
    pub extension: Option<String>,
}

impl From<Document> for DocumentView {
    fn from(document: Document) -> Self {
        let (name, extension) = match ObjectKey::parse(&document.url) {
            Ok(parsed) => (parsed.display_name(), parsed.extension),
            Err(_) => (key::display_name(&document.url), None),
        };
        Self {
            document,
            name,
            extension,
        }
    }
}
