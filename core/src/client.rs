//! Request builder and response parser for the RECAP server API.
//!
//! # Design
//! `RecapClient` holds the server root and the session's `MetadataCache`.
//! Each network operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes the transport's
//! `Option<HttpResponse>`. The caller executes the round-trip in between,
//! so the client stays free of I/O.
//!
//! Parse methods never return errors. A missing response, a non-2xx status,
//! an undecodable body and a server-side rejection all produce the same
//! empty or `false` result, matching what the server's callers have always
//! seen. The underlying `ApiError` is logged before it is dropped.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cache::{decode_entries, MetadataCache};
use crate::config::RecapConfig;
use crate::error::ApiError;
use crate::form::{encode_component, json_form_body, MultipartForm, FORM_URLENCODED, OCTET_STREAM};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseKind};
use crate::types::{
    AttachmentMenuUpload, CachedDocumentMetadata, DocketAvailability, DocketUpload, DocumentAvailability,
    DocumentMetadataUpload, DocumentUpload, ServerResponse,
};

const METADATA_UPDATED: &str = "updated";
const HTML_PARSED: &str = "successfully parsed";
const PDF_UPLOADED: &str = "pdf uploaded";

#[derive(Serialize)]
struct DocketQuery<'a> {
    court: &'a str,
    casenum: &'a str,
}

#[derive(Serialize)]
struct DocumentQuery<'a> {
    court: &'a str,
    urls: &'a [String],
}

/// Client for the RECAP server endpoints plus the metadata they report.
#[derive(Debug)]
pub struct RecapClient {
    server_root: String,
    cache: MetadataCache,
}

impl Default for RecapClient {
    fn default() -> Self {
        Self::from_config(&RecapConfig::default())
    }
}

impl RecapClient {
    pub fn new(server_root: &str) -> Self {
        Self {
            server_root: server_root.trim_end_matches('/').to_string(),
            cache: MetadataCache::new(),
        }
    }

    pub fn from_config(config: &RecapConfig) -> Self {
        Self::new(&config.server_root)
    }

    pub fn server_root(&self) -> &str {
        &self.server_root
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}/", self.server_root)
    }

    /// The logging beacon lives next to the `recap` root, not under it.
    fn gen204_url(&self) -> String {
        match self.server_root.strip_suffix("recap") {
            Some(prefix) => format!("{prefix}gen204"),
            None => self.server_root.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    /// GET to `gen204` with `params` as an ordered query string.
    pub fn build_log_event(&self, params: &[(&str, &str)]) -> HttpRequest {
        let mut url = self.gen204_url();
        if !params.is_empty() {
            let query: Vec<String> = params
                .iter()
                .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
            expect: ResponseKind::Text,
        }
    }

    pub fn build_query_docket(&self, court: &str, case_num: &str) -> Result<HttpRequest, ApiError> {
        let body = json_form_body(&DocketQuery { court, casenum: case_num })?;
        Ok(self.form_post(self.endpoint("query_cases"), body))
    }

    /// `urls` must all belong to `court`; the server takes a single court.
    pub fn build_query_documents(&self, court: &str, urls: &[String]) -> Result<HttpRequest, ApiError> {
        let body = json_form_body(&DocumentQuery { court, urls })?;
        Ok(self.form_post(self.endpoint("query"), body))
    }

    pub fn build_upload_document_metadata(
        &self,
        input: &DocumentMetadataUpload,
        team_name: Option<&str>,
    ) -> HttpRequest {
        let form = MultipartForm::new()
            .text("court", &input.court)
            .text("docid", &input.doc_id)
            .text("casenum", &input.case_num)
            .text("de_seq_num", &input.de_seq_num)
            .text("dm_id", &input.dm_id)
            .text("docnum", &input.doc_num)
            .text("add_case_info", "true");
        self.multipart_post(self.endpoint("adddocmeta"), with_team(form, team_name))
    }

    pub fn build_upload_docket(&self, input: &DocketUpload, team_name: Option<&str>) -> HttpRequest {
        let form = MultipartForm::new()
            .text("court", &input.court)
            .text("casenum", &input.case_num)
            .text("mimetype", &input.mime_type)
            .file("data", &input.filename, &input.mime_type, input.html.as_bytes());
        self.multipart_post(self.endpoint("upload"), with_team(form, team_name))
    }

    pub fn build_upload_attachment_menu(&self, input: &AttachmentMenuUpload, team_name: Option<&str>) -> HttpRequest {
        let form = MultipartForm::new()
            .text("court", &input.court)
            .text("mimetype", &input.mime_type)
            .file("data", &input.filename, &input.mime_type, input.html.as_bytes());
        self.multipart_post(self.endpoint("upload"), with_team(form, team_name))
    }

    /// The PDF goes up as an untyped blob; `mimetype` carries the real type.
    pub fn build_upload_document(&self, input: &DocumentUpload, team_name: Option<&str>) -> HttpRequest {
        let form = MultipartForm::new()
            .text("court", &input.court)
            .text("url", &input.path)
            .text("mimetype", &input.mime_type)
            .file("data", &input.filename, OCTET_STREAM, input.bytes.as_slice());
        self.multipart_post(self.endpoint("upload"), with_team(form, team_name))
    }

    fn form_post(&self, url: String, body: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: vec![("content-type".to_string(), FORM_URLENCODED.to_string())],
            body: Some(body.into_bytes()),
            expect: ResponseKind::Json,
        }
    }

    fn multipart_post(&self, url: String, form: MultipartForm) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: vec![("content-type".to_string(), form.content_type())],
            body: Some(form.into_body()),
            expect: ResponseKind::Json,
        }
    }

    // -----------------------------------------------------------------------
    // Parse
    // -----------------------------------------------------------------------

    /// The beacon's body, if the request got one. Nobody is expected to use it.
    pub fn parse_log_event(&self, response: Option<HttpResponse>) -> Option<String> {
        match check_status(response) {
            Ok(resp) => Some(resp.body),
            Err(e) => {
                debug!(error = %e, "log event not delivered");
                None
            }
        }
    }

    /// `None` when the docket is not archived or the request failed.
    pub fn parse_query_docket(&self, response: Option<HttpResponse>) -> Option<DocketAvailability> {
        decode::<DocketAvailability>(response)
            .inspect_err(|e| debug!(error = %e, "no docket availability"))
            .ok()
    }

    /// Map of each archived URL to its download location. Empty on failure.
    /// Entries that fail to decode are skipped; the rest are kept.
    pub fn parse_query_documents(&self, response: Option<HttpResponse>) -> HashMap<String, DocumentAvailability> {
        match decode::<Map<String, Value>>(response) {
            Ok(entries) => decode_entries(&entries, "document availability").into_iter().collect(),
            Err(e) => {
                debug!(error = %e, "no document availability");
                HashMap::new()
            }
        }
    }

    pub fn parse_upload_document_metadata(&self, response: Option<HttpResponse>) -> bool {
        self.store_and_match(response, METADATA_UPDATED)
    }

    pub fn parse_upload_docket(&self, response: Option<HttpResponse>) -> bool {
        self.store_and_match(response, HTML_PARSED)
    }

    pub fn parse_upload_attachment_menu(&self, response: Option<HttpResponse>) -> bool {
        self.store_and_match(response, HTML_PARSED)
    }

    /// PDF upload responses carry no metadata worth caching.
    pub fn parse_upload_document(&self, response: Option<HttpResponse>) -> bool {
        match decode::<ServerResponse>(response) {
            Ok(resp) => resp.message_matches(PDF_UPLOADED),
            Err(e) => {
                debug!(error = %e, "document upload not confirmed");
                false
            }
        }
    }

    fn store_and_match(&self, response: Option<HttpResponse>, needle: &str) -> bool {
        match decode::<ServerResponse>(response) {
            Ok(resp) => {
                self.cache.store(&resp);
                resp.message_matches(needle)
            }
            Err(e) => {
                debug!(error = %e, expected = needle, "upload not confirmed");
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Cache
    // -----------------------------------------------------------------------

    /// What earlier responses reported about `doc_id`. No network access.
    pub fn document_metadata(&self, doc_id: &str) -> CachedDocumentMetadata {
        self.cache.document_metadata(doc_id)
    }
}

fn with_team(form: MultipartForm, team_name: Option<&str>) -> MultipartForm {
    match team_name {
        Some(team) if !team.is_empty() => form.text("team_name", team),
        _ => form,
    }
}

/// Reject missing responses and non-2xx statuses.
fn check_status(response: Option<HttpResponse>) -> Result<HttpResponse, ApiError> {
    let response = response.ok_or(ApiError::NoResponse)?;
    if response.is_success() {
        return Ok(response);
    }
    warn!(status = response.status, "RECAP server returned an error status");
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body,
    })
}

fn decode<T: DeserializeOwned>(response: Option<HttpResponse>) -> Result<T, ApiError> {
    let response = check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
