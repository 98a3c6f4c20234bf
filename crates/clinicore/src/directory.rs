//! Doctor directory
//!
//! The clinic's practitioners with their routing metadata, loaded from the
//! `DOCTORS_DATA` JSON array. [`DoctorRecord`] deliberately does not
//! implement `Serialize`: the only shape that can leave the server is
//! [`PublicDoctor`], which has no contact channels.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::ConfigError;

/// A practitioner as configured on the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Telegram chat id; configs carry it either as a string or a number
    #[serde(default, deserialize_with = "deserialize_chat_id")]
    pub telegram_chat_id: Option<String>,
    /// Subject tag ids this doctor handles
    #[serde(default)]
    pub tags: Vec<u32>,
}

impl DoctorRecord {
    /// Whether this doctor handles the given subject tag.
    pub fn handles(&self, tag_id: u32) -> bool {
        self.tags.contains(&tag_id)
    }
}

/// Browser-safe projection of a [`DoctorRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicDoctor {
    pub id: i64,
    pub name: String,
    pub tags: Vec<u32>,
}

impl From<&DoctorRecord> for PublicDoctor {
    fn from(record: &DoctorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            tags: record.tags.clone(),
        }
    }
}

/// Immutable list of doctors, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct DoctorDirectory {
    doctors: Vec<DoctorRecord>,
}

impl DoctorDirectory {
    /// Builds a directory, rejecting duplicate ids.
    pub fn new(doctors: Vec<DoctorRecord>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(doctors.len());
        for doctor in &doctors {
            if !seen.insert(doctor.id) {
                return Err(ConfigError::DuplicateDoctorId(doctor.id));
            }
        }
        Ok(Self { doctors })
    }

    /// Parses the `DOCTORS_DATA` document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let doctors: Vec<DoctorRecord> = serde_json::from_str(raw)?;
        Self::new(doctors)
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DoctorRecord> {
        self.doctors.iter()
    }

    pub fn find(&self, id: i64) -> Option<&DoctorRecord> {
        self.iter().find(|d| d.id == id)
    }

    /// Resolves the doctor id as submitted by the contact form.
    ///
    /// The id is read the way browsers read integers out of form values:
    /// leading whitespace is skipped and parsing stops at the first
    /// non-digit, so `"12"`, `" 12"` and `"12abc"` all resolve doctor 12.
    /// An id with no leading digits resolves nothing.
    pub fn find_by_form_id(&self, raw_id: &str) -> Option<&DoctorRecord> {
        parse_form_id(raw_id).and_then(|id| self.find(id))
    }

    /// Doctors handling the given subject tag, in configuration order.
    pub fn handling(&self, tag_id: u32) -> impl Iterator<Item = &DoctorRecord> {
        self.iter().filter(move |d| d.handles(tag_id))
    }

    /// The full roster stripped of contact channels.
    pub fn roster(&self) -> Vec<PublicDoctor> {
        self.iter().map(PublicDoctor::from).collect()
    }

    /// Roster limited to doctors handling `tag_id`.
    pub fn roster_for(&self, tag_id: u32) -> Vec<PublicDoctor> {
        self.handling(tag_id).map(PublicDoctor::from).collect()
    }
}

/// Leading-integer parse of a form value.
pub fn parse_form_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}

fn deserialize_chat_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChatIdRepr {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<ChatIdRepr>::deserialize(deserializer)? {
        Some(ChatIdRepr::Number(n)) => Some(n.to_string()),
        Some(ChatIdRepr::Text(s)) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        None => None,
    })
}
