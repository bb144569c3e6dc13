//! Domain DTOs for the RECAP server API.
//!
//! # Design
//! Wire names are kept through `#[serde(rename)]` where the server's field
//! names mislead (`filename` is a download URL, `timestamp` is an mm/dd/yy
//! date). Metadata records keep any fields this crate does not model in
//! `extra`, so nothing the server sends is dropped on the way into the cache.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// An identifier the server may send either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerId {
    Number(Number),
    Text(String),
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerId::Number(n) => write!(f, "{n}"),
            ServerId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ServerId {
    fn from(s: &str) -> Self {
        ServerId::Text(s.to_string())
    }
}

impl From<String> for ServerId {
    fn from(s: String) -> Self {
        ServerId::Text(s)
    }
}

impl From<i64> for ServerId {
    fn from(n: i64) -> Self {
        ServerId::Number(n.into())
    }
}

/// Where an archived docket page can be fetched, as reported by `query_cases/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocketAvailability {
    pub docket_url: String,
    /// Date of the archived copy in mm/dd/yy form, when the server sends one.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One entry of the `query/` response map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAvailability {
    #[serde(rename = "filename")]
    pub download_url: String,
    /// Date of the archived copy in mm/dd/yy form, when the server sends one.
    #[serde(rename = "timestamp", default)]
    pub date: Option<String>,
}

/// Case metadata as sent by the server under `cases`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseMetadata {
    /// Lawyer-style case number, e.g. `1:11-cv-00001`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officialcasenum: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document metadata as sent by the server under `documents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casenum: Option<ServerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docnum: Option<ServerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdocnum: Option<ServerId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The common envelope of `adddocmeta/` and `upload/` responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cases: Option<Map<String, Value>>,
    #[serde(default)]
    pub documents: Option<Map<String, Value>>,
}

impl ServerResponse {
    /// True iff `message` contains `needle`, ignoring case.
    pub fn message_matches(&self, needle: &str) -> bool {
        self.message
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(&needle.to_lowercase()))
    }
}

/// Input for `adddocmeta/`. All values are opaque server identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadataUpload {
    pub court: String,
    pub doc_id: String,
    pub case_num: String,
    pub de_seq_num: String,
    pub dm_id: String,
    pub doc_num: String,
}

/// Input for a docket page upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocketUpload {
    pub court: String,
    pub case_num: String,
    pub filename: String,
    pub mime_type: String,
    pub html: String,
}

/// Input for a document selection menu upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentMenuUpload {
    pub court: String,
    pub filename: String,
    pub mime_type: String,
    pub html: String,
}

/// Input for a PDF upload. `path` is the doc1-style path of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub court: String,
    pub path: String,
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// What the session has learned about one document, joined with its case.
/// Every field is `None` when unknown; a miss never means "does not exist".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedDocumentMetadata {
    pub case_num: Option<ServerId>,
    pub official_case_num: Option<String>,
    pub doc_num: Option<ServerId>,
    pub sub_doc_num: Option<ServerId>,
}
