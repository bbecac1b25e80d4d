use serde::{Deserialize, Serialize};

/// A service category as stored by the data-access layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The editable field set sent with an update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}
