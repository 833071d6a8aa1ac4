//! # Domain Model: Groups, Verses, Purposes and Registrations
//!
//! This module defines the records persisted by the store: [`Group`], [`Verse`]
//! and [`Registration`]. Purposes have no struct of their own; they are plain
//! strings kept in insertion order.
//!
//! ## On-Disk Shape
//!
//! Every record is written with camelCase field names, so a registration looks
//! like:
//!
//! ```text
//! {
//!   "groupId": "6f1c…",
//!   "verseId": "0b9e…",
//!   "registeredAt": "2024-07-01T09:00:00Z",
//!   "usedAt": null,
//!   "recitedAt": null
//! }
//! ```
//!
//! ## Registration Status
//!
//! A registration carries two optional timestamps that act as mutually
//! exclusive terminal markers. [`Registration::status`] folds them into a
//! [`RegistrationStatus`]:
//!
//! ```text
//! Registered ──mark_used──▶ Used
//!     ▲  │                    │
//!     │  └──mark_recited──▶ Recited
//!     └────── reset ──────────┘
//! ```
//!
//! There is no Used → Recited edge (or back) without a reset.
//!
//! ## Legacy Verse Files
//!
//! Older verse files stored `type` as a numeric code. [`Verse`] deserializes
//! through [`EncodedPurpose`], which accepts either the numeric code or the
//! current text form and always normalizes to text. Serialization has a single
//! shape, so the first write after loading upgrades the file.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default purpose seeded into an empty purpose collection. Also the fallback
/// for legacy verse codes other than `1`.
pub const MEAL_PURPOSE: &str = "meal-use";

/// Second seeded purpose. Legacy verse code `1` maps here.
pub const SNACK_PURPOSE: &str = "snack-use";

pub fn default_purposes() -> Vec<String> {
    vec![MEAL_PURPOSE.to_string(), SNACK_PURPOSE.to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    pub id: Uuid,
    pub text: String,
    #[serde(rename = "type")]
    pub purpose: String,
}

// Custom deserializer so that verse files written before purposes became
// free text (numeric `type`) still load.
impl<'de> Deserialize<'de> for Verse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = VerseHelper::deserialize(deserializer)?;

        Ok(Verse {
            id: helper.id,
            text: helper.text,
            purpose: decode_purpose(helper.purpose),
        })
    }
}

#[derive(Deserialize)]
struct VerseHelper {
    #[serde(default)]
    id: Uuid,
    #[serde(default)]
    text: String,
    #[serde(default, rename = "type")]
    purpose: Option<EncodedPurpose>,
}

/// The shapes a persisted verse `type` field can take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EncodedPurpose {
    Legacy(serde_json::Number),
    Current(String),
    Unrecognized(IgnoredAny),
}

fn decode_purpose(encoded: Option<EncodedPurpose>) -> String {
    match encoded {
        Some(EncodedPurpose::Current(text)) => text,
        Some(EncodedPurpose::Legacy(code)) if code.as_i64() == Some(1) => {
            SNACK_PURPOSE.to_string()
        }
        Some(EncodedPurpose::Legacy(_)) | Some(EncodedPurpose::Unrecognized(_)) | None => {
            MEAL_PURPOSE.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Registered,
    Used,
    Recited,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub group_id: Uuid,
    pub verse_id: Uuid,
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub used_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recited_at: Option<DateTime<Utc>>,
}

impl Registration {
    pub fn new(group_id: Uuid, verse_id: Uuid) -> Self {
        Self {
            group_id,
            verse_id,
            registered_at: Utc::now(),
            used_at: None,
            recited_at: None,
        }
    }

    pub fn matches(&self, group_id: Uuid, verse_id: Uuid) -> bool {
        self.group_id == group_id && self.verse_id == verse_id
    }

    /// Current position in the status machine. A hand-edited record carrying
    /// both timestamps reports `Used`.
    pub fn status(&self) -> RegistrationStatus {
        if self.used_at.is_some() {
            RegistrationStatus::Used
        } else if self.recited_at.is_some() {
            RegistrationStatus::Recited
        } else {
            RegistrationStatus::Registered
        }
    }
}

/// Uniform outcome of a status-changing ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
}

impl OperationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
