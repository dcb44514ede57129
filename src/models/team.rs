use serde::{Deserialize, Serialize};

use crate::store::Record;

pub type MemberId = i64;

pub const DEFAULT_ROLE: &str = "Developer";
pub const OWNER_ROLE: &str = "CEO / Founder";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl TeamMember {
    pub fn from_record(record: &Record) -> Option<Self> {
        serde_json::from_value(serde_json::Value::Object(record.clone())).ok()
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_admin: bool,
    pub avatar_url: Option<String>,
}

/// Two-letter badge for a display name: "??" when blank, the first two
/// letters of a single word, otherwise first letters of the first and
/// last words.
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => "??".to_string(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}
