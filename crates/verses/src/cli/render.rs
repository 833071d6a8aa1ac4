//! # Rendering Module
//!
//! Turns API results into the strings the CLI prints. Every function takes an
//! [`OutputMode`] and produces either aligned text lines or pretty JSON.
//!
//! Groups are rendered through [`GroupRow`] so the password hash never reaches
//! the terminal. Registrations carry their derived status alongside the raw
//! timestamps.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use versesapp::model::{Group, OperationResult, Registration, RegistrationStatus, Verse};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

#[derive(Serialize)]
struct GroupRow<'a> {
    id: &'a uuid::Uuid,
    name: &'a str,
}

impl<'a> From<&'a Group> for GroupRow<'a> {
    fn from(group: &'a Group) -> Self {
        Self {
            id: &group.id,
            name: &group.name,
        }
    }
}

#[derive(Serialize)]
struct RegistrationRow<'a> {
    #[serde(flatten)]
    registration: &'a Registration,
    status: RegistrationStatus,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn status_label(status: RegistrationStatus) -> &'static str {
    match status {
        RegistrationStatus::Registered => "registered",
        RegistrationStatus::Used => "used",
        RegistrationStatus::Recited => "recited",
    }
}

fn stamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn groups(groups: &[Group], mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(&groups.iter().map(GroupRow::from).collect::<Vec<_>>()),
        OutputMode::Text if groups.is_empty() => Ok("No groups.".to_string()),
        OutputMode::Text => Ok(groups
            .iter()
            .map(|g| format!("{}  {}", g.id, g.name))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn group_created(group: &Group, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(&GroupRow::from(group)),
        OutputMode::Text => Ok(format!("Created group {}  {}", group.id, group.name)),
    }
}

pub fn verses(verses: &[Verse], mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(verses),
        OutputMode::Text if verses.is_empty() => Ok("No verses.".to_string()),
        OutputMode::Text => Ok(verses
            .iter()
            .map(|v| format!("{}  [{}]  {}", v.id, v.purpose, v.text))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn verse_created(verse: &Verse, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(verse),
        OutputMode::Text => Ok(format!("Created verse {}  [{}]  {}", verse.id, verse.purpose, verse.text)),
    }
}

pub fn purposes(purposes: &[String], mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(purposes),
        OutputMode::Text => Ok(purposes.join("\n")),
    }
}

pub fn registrations(
    registrations: &[Registration],
    mode: OutputMode,
) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(
            &registrations
                .iter()
                .map(|r| RegistrationRow {
                    registration: r,
                    status: r.status(),
                })
                .collect::<Vec<_>>(),
        ),
        OutputMode::Text if registrations.is_empty() => Ok("No registrations.".to_string()),
        OutputMode::Text => Ok(registrations
            .iter()
            .map(|r| {
                let status = r.status();
                let changed_at = match status {
                    RegistrationStatus::Used => stamp(r.used_at),
                    RegistrationStatus::Recited => stamp(r.recited_at),
                    RegistrationStatus::Registered => stamp(Some(r.registered_at)),
                };
                format!(
                    "{}  {}  {:<10}  {}",
                    r.group_id,
                    r.verse_id,
                    status_label(status),
                    changed_at
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn outcome(result: &OperationResult, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(result),
        OutputMode::Text => Ok(result.message.clone()),
    }
}

/// A yes/no mutation (update, single delete, purpose add, password check).
pub fn applied(applied: bool, message: &str, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(&json!({ "applied": applied, "message": message })),
        OutputMode::Text => Ok(message.to_string()),
    }
}

pub fn deleted(count: usize, noun: &str, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => to_json(&json!({ "deleted": count })),
        OutputMode::Text => {
            let plural = if count == 1 { "" } else { "s" };
            Ok(format!("Deleted {} {}{}.", count, noun, plural))
        }
    }
}
