use serde::{Deserialize, Serialize};

/// File resource as returned by the remote file API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}
