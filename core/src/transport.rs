//! Seams for the collaborators the client does not implement itself.
//!
//! # Design
//! `Transport` performs the network round-trip for a built `HttpRequest`.
//! It resolves exactly once and never fails loudly: any network error,
//! timeout or aborted request resolves to `None`. Retry and timeout policy,
//! if any, belong to the implementation.
//!
//! `TeamNameSource` and `CourtResolver` are implemented for plain closures
//! so hosts can wire in their own preference store and PACER URL parser.

use std::future::Future;

use crate::config::RecapConfig;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Option<HttpResponse>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Option<HttpResponse>> {
        (**self).send(request)
    }
}

/// Supplies the configured upload team name, if any.
pub trait TeamNameSource {
    fn team_name(&self) -> Option<String>;
}

impl<F> TeamNameSource for F
where
    F: Fn() -> Option<String>,
{
    fn team_name(&self) -> Option<String> {
        self()
    }
}

impl TeamNameSource for RecapConfig {
    fn team_name(&self) -> Option<String> {
        self.team_name.clone()
    }
}

/// Derives a court identifier (e.g. `cand`) from a PACER document URL.
pub trait CourtResolver {
    fn court_from_url(&self, url: &str) -> Option<String>;
}

impl<F> CourtResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn court_from_url(&self, url: &str) -> Option<String> {
        self(url)
    }
}
