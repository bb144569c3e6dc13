//! Client core for the RECAP public-records mirroring server.
//!
//! # Overview
//! Formats the requests a browser extension sends to the RECAP server
//! (JSON availability queries, multipart uploads of docket HTML, attachment
//! menus and PDFs), parses the replies, and caches the case and document
//! metadata the server reports along the way.
//!
//! # Design
//! - `RecapClient` is sans-IO: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `Option<HttpResponse>`, and the host does the round-trip.
//! - `RecapSession` drives the same operations through an injected
//!   `Transport`, resolving each to a plain value exactly once.
//! - Failures never surface as errors to callers: transport failure and
//!   server rejection produce the same empty or `false` result.
//! - Diagnostics go through `tracing`; installing a subscriber is up to the
//!   host.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

pub use cache::MetadataCache;
pub use client::RecapClient;
pub use config::RecapConfig;
pub use error::{ApiError, ConfigError};
pub use form::MultipartForm;
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseKind};
pub use session::RecapSession;
pub use transport::{CourtResolver, TeamNameSource, Transport};
pub use types::{
    AttachmentMenuUpload, CachedDocumentMetadata, CaseMetadata, DocketAvailability, DocketUpload,
    DocumentAvailability, DocumentMetadata, DocumentMetadataUpload, DocumentUpload, ServerId, ServerResponse,
};
