use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Prompt template; `template` contains a `{transcription}` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub template: String,
    pub created_at: Timestamp,
}

/// Uploaded audio file and its transcription, once generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    /// Original client-side filename
    pub name: String,
    /// Location of the stored file on local disk
    pub path: String,
    pub transcription: Option<String>,
    pub created_at: Timestamp,
}

impl Video {
    /// Transcription text if one has been generated and is not empty
    pub fn transcript(&self) -> Option<&str> {
        self.transcription.as_deref().filter(|text| !text.is_empty())
    }
}

/// Fields required to create a prompt
#[derive(Debug, Clone, Deserialize)]
pub struct NewPrompt {
    pub title: String,
    pub template: String,
}

/// Fields required to create a video
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub name: String,
    pub path: String,
}
