use serde::{Deserialize, Serialize};

/// Display data for the current user, kept in the local config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Avatar initials for board cards; "EU" when no name is set.
    pub fn initials(&self) -> String {
        let first = self.first_name.as_deref().and_then(|s| s.trim().chars().next());
        let last = self.last_name.as_deref().and_then(|s| s.trim().chars().next());
        let initials: String = first.into_iter().chain(last).collect::<String>().to_uppercase();
        if initials.is_empty() {
            "EU".to_string()
        } else {
            initials
        }
    }
}
