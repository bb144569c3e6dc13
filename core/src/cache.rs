//! Session-lifetime metadata learned from server responses.
//!
//! # Design
//! Two flat maps: case number → `CaseMetadata` and document id →
//! `DocumentMetadata`. Entries are only inserted or overwritten
//! (last write wins), never pruned. A miss means "not seen yet".
//!
//! Locks are `std::sync::RwLock` held only for the duration of a map
//! operation, so several in-flight requests can merge through `&self`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::types::{CachedDocumentMetadata, CaseMetadata, DocumentMetadata, ServerResponse};

#[derive(Debug, Default)]
pub struct MetadataCache {
    cases: RwLock<HashMap<String, CaseMetadata>>,
    documents: RwLock<HashMap<String, DocumentMetadata>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the `cases` and `documents` maps of a server response.
    pub fn store(&self, response: &ServerResponse) {
        if let Some(cases) = &response.cases {
            let parsed = decode_entries::<CaseMetadata>(cases, "case");
            let mut map = self.cases.write().unwrap_or_else(PoisonError::into_inner);
            debug!(count = parsed.len(), "caching case metadata");
            map.extend(parsed);
        }
        if let Some(documents) = &response.documents {
            let parsed = decode_entries::<DocumentMetadata>(documents, "document");
            let mut map = self.documents.write().unwrap_or_else(PoisonError::into_inner);
            debug!(count = parsed.len(), "caching document metadata");
            map.extend(parsed);
        }
    }

    pub fn case_metadata(&self, casenum: &str) -> Option<CaseMetadata> {
        self.cases
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(casenum)
            .cloned()
    }

    pub fn raw_document_metadata(&self, doc_id: &str) -> Option<DocumentMetadata> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(doc_id)
            .cloned()
    }

    /// Look up a document and join it with its case for the official number.
    pub fn document_metadata(&self, doc_id: &str) -> CachedDocumentMetadata {
        let Some(doc) = self.raw_document_metadata(doc_id) else {
            return CachedDocumentMetadata::default();
        };
        let official_case_num = doc
            .casenum
            .as_ref()
            .and_then(|c| self.case_metadata(&c.to_string()))
            .and_then(|c| c.officialcasenum);
        CachedDocumentMetadata {
            case_num: doc.casenum,
            official_case_num,
            doc_num: doc.docnum,
            sub_doc_num: doc.subdocnum,
        }
    }

    pub fn case_count(&self) -> usize {
        self.cases.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn document_count(&self) -> usize {
        self.documents.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.case_count() == 0 && self.document_count() == 0
    }
}

/// Decode each entry on its own so one malformed record does not drop the rest.
pub(crate) fn decode_entries<T: serde::de::DeserializeOwned>(entries: &Map<String, Value>, kind: &str) -> Vec<(String, T)> {
    entries
        .iter()
        .filter_map(|(key, value)| match serde_json::from_value::<T>(value.clone()) {
            Ok(v) => Some((key.clone(), v)),
            Err(e) => {
                warn!(%key, kind, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}
