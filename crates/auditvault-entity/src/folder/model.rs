//! Folder entity model.

use auditvault_core::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A time-boxed grouping of documents covering one audit period.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// The client (or surveyor) owning the folder.
    pub owner_id: Uuid,
    /// The user who created the folder.
    pub created_by: Uuid,
    /// Whether this is the owner's top-level folder.
    pub is_root: bool,
    /// First day of the audit period.
    pub start_date: NaiveDate,
    /// Last day of the audit period. Always after `start_date`.
    pub end_date: NaiveDate,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Reject audit periods whose end is not strictly after the start.
    pub fn validate_period(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<()> {
        if end_date <= start_date {
            return Err(AppError::validation(format!(
                "End date ({end_date}) must be after start date ({start_date})"
            )));
        }
        Ok(())
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    pub name: String,
    pub owner_id: Uuid,
    pub created_by: Uuid,
    pub is_root: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Partial update of a folder. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolder {
    pub name: Option<String>,
    pub owner_id: Option<Uuid>,
    pub is_root: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_must_move_forward() {
        assert!(Folder::validate_period(date(2026, 1, 1), date(2026, 12, 31)).is_ok());
        assert!(Folder::validate_period(date(2026, 1, 1), date(2026, 1, 1)).is_err());
        assert!(Folder::validate_period(date(2026, 6, 1), date(2026, 1, 1)).is_err());
    }
}
