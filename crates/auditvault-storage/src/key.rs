//! Object key naming scheme.
//!
//! Every uploaded document is stored under
//! `{company}/{folder_id}/{timestamp_ms}-{stem}.{ext}`. The stem and
//! extension are sanitized to lower-case ASCII alphanumerics, so the key
//! itself is the only record of the file name. [`ObjectKey::parse`]
//! recovers the parts for display.

use std::fmt;

use uuid::Uuid;

use auditvault_core::error::AppError;
use auditvault_core::result::AppResult;

/// Stem used when sanitizing removes every character of a file name.
const FALLBACK_STEM: &str = "file";
/// Company segment used when the configured company sanitizes to nothing.
const FALLBACK_COMPANY: &str = "default";

/// The parsed components of a document object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    /// Sanitized company segment.
    pub company: String,
    /// Folder the document belongs to.
    pub folder_id: Uuid,
    /// Upload time in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// File name without extension.
    pub stem: String,
    /// Lower-cased extension without the dot, if the file had one.
    pub extension: Option<String>,
}

impl ObjectKey {
    /// Build the key for `file_name` uploaded to `folder_id` at `timestamp_ms`.
    ///
    /// Identical inputs always yield the identical key.
    pub fn generate(company: &str, folder_id: Uuid, file_name: &str, timestamp_ms: i64) -> Self {
        let (raw_stem, raw_ext) = split_extension(file_name.trim());

        let stem = sanitize(raw_stem);
        let extension = raw_ext.map(sanitize).filter(|e| !e.is_empty());

        Self {
            company: company_segment(company),
            folder_id,
            timestamp_ms,
            stem: if stem.is_empty() {
                FALLBACK_STEM.to_string()
            } else {
                stem
            },
            extension,
        }
    }

    /// Parse a key produced by [`ObjectKey::generate`].
    ///
    /// The file segment is split on the first `-` after the numeric
    /// timestamp, so stems that contain hyphens (keys written before
    /// sanitization stripped them) are kept whole.
    pub fn parse(key: &str) -> AppResult<Self> {
        let mut segments = key.split('/');
        let (Some(company), Some(folder), Some(file), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(AppError::validation(format!(
                "Object key '{key}' must have the form company/folder/file"
            )));
        };

        if company.is_empty() {
            return Err(AppError::validation(format!(
                "Object key '{key}' has an empty company segment"
            )));
        }

        let folder_id = Uuid::parse_str(folder).map_err(|_| {
            AppError::validation(format!("Object key '{key}' has an invalid folder id"))
        })?;

        let (timestamp, name) = file.split_once('-').ok_or_else(|| {
            AppError::validation(format!("Object key '{key}' is missing a timestamp prefix"))
        })?;
        if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::validation(format!(
                "Object key '{key}' has a non-numeric timestamp"
            )));
        }
        let timestamp_ms = timestamp.parse::<i64>().map_err(|_| {
            AppError::validation(format!("Object key '{key}' has an out-of-range timestamp"))
        })?;

        let (stem, extension) = match name.rsplit_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (name, None),
        };
        if stem.is_empty() {
            return Err(AppError::validation(format!(
                "Object key '{key}' has an empty file name"
            )));
        }

        Ok(Self {
            company: company.to_string(),
            folder_id,
            timestamp_ms,
            stem: stem.to_string(),
            extension: extension.filter(|e| !e.is_empty()).map(str::to_string),
        })
    }

    /// The name shown to users: `stem.ext`, or just the stem.
    pub fn display_name(&self) -> String {
        match &self.extension {
            Some(ext) => format!("{}.{ext}", self.stem),
            None => self.stem.clone(),
        }
    }

    /// Key prefix shared by every document of a folder.
    pub fn folder_prefix(company: &str, folder_id: Uuid) -> String {
        format!("{}/{folder_id}/", company_segment(company))
    }

    /// Best-effort MIME type from the extension.
    pub fn content_type(&self) -> &'static str {
        content_type_for(self.extension.as_deref())
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}-{}",
            self.company, self.folder_id, self.timestamp_ms, self.stem
        )?;
        if let Some(ext) = &self.extension {
            write!(f, ".{ext}")?;
        }
        Ok(())
    }
}

/// Display name for a stored document url.
///
/// Falls back to the last path segment when the url does not follow the
/// naming scheme.
pub fn display_name(url: &str) -> String {
    match ObjectKey::parse(url) {
        Ok(key) => key.display_name(),
        Err(_) => url.rsplit('/').next().unwrap_or(url).to_string(),
    }
}

/// Lower-case and keep only ASCII alphanumerics.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn company_segment(company: &str) -> String {
    let slug = sanitize(company);
    if slug.is_empty() {
        FALLBACK_COMPANY.to_string()
    } else {
        slug
    }
}

/// Split on the last `.`; a leading dot (".env") is part of the stem.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
