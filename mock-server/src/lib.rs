//! In-memory stand-in for the RECAP server.
//!
//! Implements the five endpoints the client talks to, with just enough
//! behaviour to exercise it end to end: uploads make dockets and documents
//! available to later queries, and metadata uploads echo `cases` /
//! `documents` back the way the real server does when `add_case_info` is set.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const ARCHIVE_ROOT: &str = "https://archive.org/download";

/// Date stamped on everything archived by this server, in the server's mm/dd/yy form.
pub const ARCHIVE_DATE: &str = "01/15/13";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchivedDocket {
    pub docket_url: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchivedDocument {
    pub filename: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMeta {
    pub casenum: String,
    pub docnum: String,
    pub subdocnum: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseMeta {
    pub officialcasenum: String,
}

#[derive(Debug, Default)]
pub struct Archive {
    /// Keyed by `(court, casenum)`.
    pub dockets: HashMap<(String, String), ArchivedDocket>,
    /// Keyed by document path, e.g. `/doc1/035012345678`.
    pub documents: HashMap<String, ArchivedDocument>,
    pub document_meta: HashMap<String, DocumentMeta>,
    pub cases: HashMap<String, CaseMeta>,
    pub uploads_by_team: HashMap<String, usize>,
    pub beacons: Vec<Vec<(String, String)>>,
}

impl Archive {
    pub fn insert_case(&mut self, casenum: &str, officialcasenum: &str) {
        self.cases.insert(
            casenum.to_string(),
            CaseMeta {
                officialcasenum: officialcasenum.to_string(),
            },
        );
    }

    pub fn insert_docket(&mut self, court: &str, casenum: &str) -> ArchivedDocket {
        let docket = ArchivedDocket {
            docket_url: format!("{ARCHIVE_ROOT}/gov.uscourts.{court}.{casenum}/docket.html"),
            timestamp: ARCHIVE_DATE.to_string(),
        };
        self.dockets
            .insert((court.to_string(), casenum.to_string()), docket.clone());
        docket
    }

    pub fn insert_document(&mut self, court: &str, path: &str) -> ArchivedDocument {
        let doc = ArchivedDocument {
            filename: format!("{ARCHIVE_ROOT}/gov.uscourts.{court}{path}.pdf"),
            timestamp: ARCHIVE_DATE.to_string(),
        };
        self.documents.insert(path.to_string(), doc.clone());
        doc
    }

    fn credit(&mut self, team: Option<&String>) {
        if let Some(team) = team {
            *self.uploads_by_team.entry(team.clone()).or_default() += 1;
        }
    }

    fn cases_json(&self, casenum: &str) -> Map<String, Value> {
        let mut cases = Map::new();
        if let Some(case) = self.cases.get(casenum) {
            cases.insert(casenum.to_string(), json!(case));
        }
        cases
    }
}

pub type Db = Arc<RwLock<Archive>>;

#[derive(Deserialize)]
pub struct JsonForm {
    pub json: String,
}

#[derive(Deserialize)]
struct DocketQuery {
    court: String,
    casenum: String,
}

#[derive(Deserialize)]
struct DocumentQuery {
    urls: Vec<String>,
}

pub fn app() -> Router {
    app_with_state(Db::default())
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/gen204", get(gen204))
        .route("/recap/query_cases/", post(query_cases))
        .route("/recap/query/", post(query_documents))
        .route("/recap/adddocmeta/", post(add_doc_meta))
        .route("/recap/upload/", post(upload))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_state(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(db)).await
}

async fn gen204(State(db): State<Db>, Query(params): Query<Vec<(String, String)>>) -> StatusCode {
    debug!(?params, "beacon");
    db.write().await.beacons.push(params);
    StatusCode::NO_CONTENT
}

async fn query_cases(State(db): State<Db>, Form(form): Form<JsonForm>) -> Result<Json<Value>, StatusCode> {
    let query: DocketQuery = serde_json::from_str(&form.json).map_err(|_| StatusCode::BAD_REQUEST)?;
    let archive = db.read().await;
    let found = archive.dockets.get(&(query.court, query.casenum));
    Ok(Json(found.map_or_else(|| json!({}), |d| json!(d))))
}

async fn query_documents(
    State(db): State<Db>,
    Form(form): Form<JsonForm>,
) -> Result<Json<HashMap<String, ArchivedDocument>>, StatusCode> {
    let query: DocumentQuery = serde_json::from_str(&form.json).map_err(|_| StatusCode::BAD_REQUEST)?;
    let archive = db.read().await;
    let found = query
        .urls
        .into_iter()
        .filter_map(|url| {
            let doc = archive.documents.get(url_path(&url))?.clone();
            Some((url, doc))
        })
        .collect();
    Ok(Json(found))
}

/// Text fields plus the contents of the optional `data` file of a multipart request.
#[derive(Debug, Default)]
struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<Vec<u8>>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, StatusCode> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await.map_err(|_| StatusCode::BAD_REQUEST)? {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_some() {
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            form.file = Some(bytes.to_vec());
        } else {
            let value = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            form.fields.insert(name, value);
        }
    }
    Ok(form)
}

async fn add_doc_meta(State(db): State<Db>, multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    let form = read_form(multipart).await?;
    let get = |k: &str| form.fields.get(k).cloned();
    let (Some(docid), Some(casenum), Some(docnum)) = (get("docid"), get("casenum"), get("docnum")) else {
        return Ok(Json(json!({"message": "adddocmeta: missing argument"})));
    };

    let mut archive = db.write().await;
    archive.credit(form.fields.get("team_name"));
    let meta = DocumentMeta {
        casenum: casenum.clone(),
        docnum,
        subdocnum: 0,
    };
    archive.document_meta.insert(docid.clone(), meta.clone());
    info!(%docid, %casenum, "document metadata stored");

    let mut reply = json!({"message": "adddocmeta: DB updated"});
    if form.fields.get("add_case_info").map(String::as_str) == Some("true") {
        let mut documents = Map::new();
        documents.insert(docid, json!(meta));
        reply["documents"] = Value::Object(documents);
        reply["cases"] = Value::Object(archive.cases_json(&casenum));
    }
    Ok(Json(reply))
}

async fn upload(State(db): State<Db>, multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    let form = read_form(multipart).await?;
    let Some(file) = form.file else {
        return Ok(Json(json!({"message": "upload: no data"})));
    };
    let court = form.fields.get("court").cloned().unwrap_or_default();
    let mut archive = db.write().await;
    archive.credit(form.fields.get("team_name"));

    if let Some(path) = form.fields.get("url") {
        archive.insert_document(&court, path);
        info!(%court, %path, bytes = file.len(), "pdf archived");
        return Ok(Json(json!({"message": "pdf uploaded"})));
    }

    let is_html = form.fields.get("mimetype").is_some_and(|m| m.starts_with("text/html"))
        && std::str::from_utf8(&file).is_ok_and(|s| s.contains('<'));
    if !is_html {
        return Ok(Json(json!({"message": "Could not parse."})));
    }

    match form.fields.get("casenum") {
        Some(casenum) => {
            archive.insert_docket(&court, casenum);
            info!(%court, %casenum, "docket archived");
            Ok(Json(json!({
                "message": "Successfully parsed docket.",
                "cases": archive.cases_json(casenum),
            })))
        }
        None => Ok(Json(json!({"message": "Successfully parsed document selection menu."}))),
    }
}

/// The path part of an absolute URL, or the input itself if it has none.
fn url_path(url: &str) -> &str {
    match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => url,
    }
}
