//! Async front end that runs each RECAP operation through a `Transport`.
//!
//! # Design
//! `RecapSession` is constructed once per browsing session and owns the
//! client (and therefore the metadata cache) as instance state. Every
//! method takes `&self`, so independent operations can be awaited together
//! with `join`; their completion order is whatever the transport delivers.
//! No method returns an error: each resolves exactly once to the same
//! empty or `false` shape for "not found" and "request failed".

use std::collections::HashMap;

use tracing::debug;

use crate::client::RecapClient;
use crate::config::RecapConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{CourtResolver, TeamNameSource, Transport};
use crate::types::{
    AttachmentMenuUpload, CachedDocumentMetadata, DocketAvailability, DocketUpload, DocumentAvailability,
    DocumentMetadataUpload, DocumentUpload,
};

pub struct RecapSession<T> {
    client: RecapClient,
    transport: T,
    team: Box<dyn TeamNameSource>,
    courts: Box<dyn CourtResolver>,
}

impl<T: Transport> RecapSession<T> {
    pub fn new(
        client: RecapClient,
        transport: T,
        team: impl TeamNameSource + 'static,
        courts: impl CourtResolver + 'static,
    ) -> Self {
        Self {
            client,
            transport,
            team: Box::new(team),
            courts: Box::new(courts),
        }
    }

    /// Session against `config.server_root`, crediting `config.team_name`.
    pub fn from_config(config: RecapConfig, transport: T, courts: impl CourtResolver + 'static) -> Self {
        Self::new(RecapClient::from_config(&config), transport, config, courts)
    }

    pub fn client(&self) -> &RecapClient {
        &self.client
    }

    fn team_name(&self) -> Option<String> {
        self.team.team_name().filter(|t| !t.is_empty())
    }

    async fn dispatch(&self, request: HttpRequest) -> Option<HttpResponse> {
        debug!(method = ?request.method, url = %request.url, "dispatching RECAP request");
        self.transport.send(request).await
    }

    /// Fire a logging beacon. The body, if any, is returned for callers that want it.
    pub async fn log_event(&self, params: &[(&str, &str)]) -> Option<String> {
        let request = self.client.build_log_event(params);
        self.client.parse_log_event(self.dispatch(request).await)
    }

    pub async fn query_docket_availability(&self, court: &str, case_num: &str) -> Option<DocketAvailability> {
        let request = match self.client.build_query_docket(court, case_num) {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "could not build docket query");
                return None;
            }
        };
        self.client.parse_query_docket(self.dispatch(request).await)
    }

    /// The court is taken from the first URL; all URLs must share it. An
    /// empty list or an unrecognised first URL yields an empty map without
    /// contacting the server.
    pub async fn query_document_availability(&self, urls: &[String]) -> HashMap<String, DocumentAvailability> {
        let Some(court) = urls.first().and_then(|u| self.courts.court_from_url(u)) else {
            debug!(count = urls.len(), "no court for document query");
            return HashMap::new();
        };
        let request = match self.client.build_query_documents(&court, urls) {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "could not build document query");
                return HashMap::new();
            }
        };
        self.client.parse_query_documents(self.dispatch(request).await)
    }

    pub async fn upload_document_metadata(&self, input: &DocumentMetadataUpload) -> bool {
        let team = self.team_name();
        let request = self.client.build_upload_document_metadata(input, team.as_deref());
        self.client.parse_upload_document_metadata(self.dispatch(request).await)
    }

    pub async fn upload_docket_html(&self, input: &DocketUpload) -> bool {
        let team = self.team_name();
        let request = self.client.build_upload_docket(input, team.as_deref());
        self.client.parse_upload_docket(self.dispatch(request).await)
    }

    pub async fn upload_attachment_menu_html(&self, input: &AttachmentMenuUpload) -> bool {
        let team = self.team_name();
        let request = self.client.build_upload_attachment_menu(input, team.as_deref());
        self.client.parse_upload_attachment_menu(self.dispatch(request).await)
    }

    pub async fn upload_document_bytes(&self, input: &DocumentUpload) -> bool {
        let team = self.team_name();
        let request = self.client.build_upload_document(input, team.as_deref());
        self.client.parse_upload_document(self.dispatch(request).await)
    }

    /// Synchronous cache lookup; never touches the transport.
    pub fn cached_document_metadata(&self, doc_id: &str) -> CachedDocumentMetadata {
        self.client.document_metadata(doc_id)
    }
}
