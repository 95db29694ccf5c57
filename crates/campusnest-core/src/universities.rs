use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl University {
    /// Short label for pickers: the abbreviation when present, else the name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.abbreviation
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.name)
    }
}
