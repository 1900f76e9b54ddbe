use crate::{Time, User};

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum HistoryAction {
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "updated")]
    Updated,
    #[serde(rename = "status:in-queue")]
    MovedToQueue,
    #[serde(rename = "status:public")]
    Published,
    #[serde(rename = "status:draft")]
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct HistoryEntry {
    pub created: Time,
    pub author: User,
    pub action: HistoryAction,

    /// Structural patch against `data`
    #[serde(default)]
    pub diff: Option<serde_json::Value>,

    /// Pre-image the diff applies to
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
