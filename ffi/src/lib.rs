//! C-ABI wrapper around `recap-core`.
//!
//! # Overview
//! Exposes every RECAP server operation through `extern "C"` functions so a
//! host written in any language with a C FFI can build requests, execute
//! them with its own HTTP stack, and hand the responses back for parsing.
//! The client handle owns the session's metadata cache.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `recap_build_*` / `recap_parse_*` mirror the core API 1:1.
//! - A null response pointer passed to `recap_parse_*` reports a transport
//!   failure and yields the same result as a rejection (null, `{}` or `false`).
//! - Structured results cross the boundary as JSON strings.
//! - The C caller owns all returned pointers and must call the matching
//!   `recap_free_*` function to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;

use recap_core::{AttachmentMenuUpload, DocketUpload, DocumentMetadataUpload, DocumentUpload};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `RecapClient` bound to `server_root`.
///
/// A null `server_root` selects the production server. Returns null if
/// `server_root` is not valid UTF-8 or if an internal panic occurs.
/// The caller must free the returned pointer with `recap_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn recap_client_new(server_root: *const c_char) -> *mut FfiRecapClient {
    catch_unwind(|| {
        let client = if server_root.is_null() {
            recap_core::RecapClient::default()
        } else {
            match unsafe { from_c_str(server_root) } {
                Some(root) => recap_core::RecapClient::new(root),
                None => return std::ptr::null_mut(),
            }
        };
        Box::into_raw(Box::new(FfiRecapClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `recap_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_client_free(client: *mut FfiRecapClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the logging beacon request from `len` key/value pairs.
///
/// Returns null if `client` is null or any key or value is null.
/// The caller must free the returned pointer with `recap_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn recap_build_log_event(
    client: *const FfiRecapClient,
    keys: *const *const c_char,
    values: *const *const c_char,
    len: usize,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(keys), Some(values)) = (unsafe { from_c_str_array(keys, len) }, unsafe {
            from_c_str_array(values, len)
        }) else {
            return std::ptr::null_mut();
        };
        let params: Vec<(&str, &str)> = keys.iter().map(String::as_str).zip(values.iter().map(String::as_str)).collect();
        FfiHttpRequest::from_core(client.inner.build_log_event(&params))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a docket availability query.
///
/// Returns null if any argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_build_query_docket(
    client: *const FfiRecapClient,
    court: *const c_char,
    case_num: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(court), Some(case_num)) = (unsafe { from_c_str(court) }, unsafe { from_c_str(case_num) }) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_query_docket(court, case_num) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a document availability query for `len` URLs from `court`.
///
/// The caller derives `court` from the first URL. Returns null if any
/// argument is null or `len` is zero; a host should then treat the result
/// as an empty availability map without sending anything.
#[unsafe(no_mangle)]
pub extern "C" fn recap_build_query_documents(
    client: *const FfiRecapClient,
    court: *const c_char,
    urls: *const *const c_char,
    len: usize,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || len == 0 {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(court), Some(urls)) = (unsafe { from_c_str(court) }, unsafe { from_c_str_array(urls, len) }) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_query_documents(court, &urls) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a document metadata upload. `team_name` may be null.
///
/// Returns null if `client` or any other argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_build_upload_document_metadata(
    client: *const FfiRecapClient,
    court: *const c_char,
    doc_id: *const c_char,
    case_num: *const c_char,
    de_seq_num: *const c_char,
    dm_id: *const c_char,
    doc_num: *const c_char,
    team_name: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let fields = [court, doc_id, case_num, de_seq_num, dm_id, doc_num].map(|p| unsafe { from_c_str(p) });
        let [Some(court), Some(doc_id), Some(case_num), Some(de_seq_num), Some(dm_id), Some(doc_num)] = fields else {
            return std::ptr::null_mut();
        };
        let input = DocumentMetadataUpload {
            court: court.to_string(),
            doc_id: doc_id.to_string(),
            case_num: case_num.to_string(),
            de_seq_num: de_seq_num.to_string(),
            dm_id: dm_id.to_string(),
            doc_num: doc_num.to_string(),
        };
        let team = unsafe { from_c_str(team_name) };
        FfiHttpRequest::from_core(client.inner.build_upload_document_metadata(&input, team))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a docket HTML upload. `team_name` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_build_upload_docket(
    client: *const FfiRecapClient,
    court: *const c_char,
    case_num: *const c_char,
    filename: *const c_char,
    mime_type: *const c_char,
    html: *const c_char,
    team_name: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let fields = [court, case_num, filename, mime_type, html].map(|p| unsafe { from_c_str(p) });
        let [Some(court), Some(case_num), Some(filename), Some(mime_type), Some(html)] = fields else {
            return std::ptr::null_mut();
        };
        let input = DocketUpload {
            court: court.to_string(),
            case_num: case_num.to_string(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            html: html.to_string(),
        };
        let team = unsafe { from_c_str(team_name) };
        FfiHttpRequest::from_core(client.inner.build_upload_docket(&input, team))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a document selection menu upload. `team_name` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_build_upload_attachment_menu(
    client: *const FfiRecapClient,
    court: *const c_char,
    filename: *const c_char,
    mime_type: *const c_char,
    html: *const c_char,
    team_name: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let fields = [court, filename, mime_type, html].map(|p| unsafe { from_c_str(p) });
        let [Some(court), Some(filename), Some(mime_type), Some(html)] = fields else {
            return std::ptr::null_mut();
        };
        let input = AttachmentMenuUpload {
            court: court.to_string(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            html: html.to_string(),
        };
        let team = unsafe { from_c_str(team_name) };
        FfiHttpRequest::from_core(client.inner.build_upload_attachment_menu(&input, team))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a PDF upload from `bytes_len` bytes. `team_name` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_build_upload_document(
    client: *const FfiRecapClient,
    court: *const c_char,
    path: *const c_char,
    filename: *const c_char,
    mime_type: *const c_char,
    bytes: *const u8,
    bytes_len: usize,
    team_name: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || (bytes.is_null() && bytes_len > 0) {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let fields = [court, path, filename, mime_type].map(|p| unsafe { from_c_str(p) });
        let [Some(court), Some(path), Some(filename), Some(mime_type)] = fields else {
            return std::ptr::null_mut();
        };
        let bytes = if bytes_len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(bytes, bytes_len) }.to_vec()
        };
        let input = DocumentUpload {
            court: court.to_string(),
            path: path.to_string(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        };
        let team = unsafe { from_c_str(team_name) };
        FfiHttpRequest::from_core(client.inner.build_upload_document(&input, team))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Parse the beacon response. Returns its body, or null on failure.
#[unsafe(no_mangle)]
pub extern "C" fn recap_parse_log_event(
    client: *const FfiRecapClient,
    response: *const FfiHttpResponse,
) -> *mut c_char {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let resp = unsafe { response_from_ffi(response) };
        client
            .inner
            .parse_log_event(resp)
            .map_or(std::ptr::null_mut(), to_c_string)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse a docket query response.
///
/// Returns `{"docket_url":…,"timestamp":…}` as JSON, or null when the docket
/// is not archived or the request failed.
#[unsafe(no_mangle)]
pub extern "C" fn recap_parse_query_docket(
    client: *const FfiRecapClient,
    response: *const FfiHttpResponse,
) -> *mut c_char {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let resp = unsafe { response_from_ffi(response) };
        client
            .inner
            .parse_query_docket(resp)
            .and_then(|found| serde_json::to_string(&found).ok())
            .map_or(std::ptr::null_mut(), to_c_string)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse a document query response into a JSON object mapping each archived
/// URL to `{"filename":…,"timestamp":…}`. Failures yield `{}`.
#[unsafe(no_mangle)]
pub extern "C" fn recap_parse_query_documents(
    client: *const FfiRecapClient,
    response: *const FfiHttpResponse,
) -> *mut c_char {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let resp = unsafe { response_from_ffi(response) };
        let found = client.inner.parse_query_documents(resp);
        to_c_string(serde_json::to_string(&found).unwrap_or_else(|_| "{}".to_string()))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse a metadata upload response, caching any reported metadata.
#[unsafe(no_mangle)]
pub extern "C" fn recap_parse_upload_document_metadata(
    client: *const FfiRecapClient,
    response: *const FfiHttpResponse,
) -> bool {
    catch_unwind(|| {
        if client.is_null() {
            return false;
        }
        let client = unsafe { &*client };
        client
            .inner
            .parse_upload_document_metadata(unsafe { response_from_ffi(response) })
    })
    .unwrap_or(false)
}

/// Parse a docket upload response, caching any reported metadata.
#[unsafe(no_mangle)]
pub extern "C" fn recap_parse_upload_docket(
    client: *const FfiRecapClient,
    response: *const FfiHttpResponse,
) -> bool {
    catch_unwind(|| {
        if client.is_null() {
            return false;
        }
        let client = unsafe { &*client };
        client.inner.parse_upload_docket(unsafe { response_from_ffi(response) })
    })
    .unwrap_or(false)
}

/// Parse an attachment menu upload response, caching any reported metadata.
#[unsafe(no_mangle)]
pub extern "C" fn recap_parse_upload_attachment_menu(
    client: *const FfiRecapClient,
    response: *const FfiHttpResponse,
) -> bool {
    catch_unwind(|| {
        if client.is_null() {
            return false;
        }
        let client = unsafe { &*client };
        client
            .inner
            .parse_upload_attachment_menu(unsafe { response_from_ffi(response) })
    })
    .unwrap_or(false)
}

/// Parse a PDF upload response.
#[unsafe(no_mangle)]
pub extern "C" fn recap_parse_upload_document(
    client: *const FfiRecapClient,
    response: *const FfiHttpResponse,
) -> bool {
    catch_unwind(|| {
        if client.is_null() {
            return false;
        }
        let client = unsafe { &*client };
        client.inner.parse_upload_document(unsafe { response_from_ffi(response) })
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Cache lookup
// ---------------------------------------------------------------------------

/// Look up cached metadata for `doc_id`. Never performs I/O.
///
/// Returns null only if `client` or `doc_id` is null; unknown documents
/// yield a struct whose fields are all null.
/// The caller must free the result with `recap_free_document_metadata`.
#[unsafe(no_mangle)]
pub extern "C" fn recap_cached_document_metadata(
    client: *const FfiRecapClient,
    doc_id: *const c_char,
) -> *mut FfiDocumentMetadata {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(doc_id) = (unsafe { from_c_str(doc_id) }) else {
            return std::ptr::null_mut();
        };
        FfiDocumentMetadata::from_core(client.inner.document_metadata(doc_id))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `recap_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        unsafe { req.free_fields() };
    });
}

/// Free an `FfiDocumentMetadata` returned by `recap_cached_document_metadata`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_free_document_metadata(meta: *mut FfiDocumentMetadata) {
    if meta.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let meta = unsafe { Box::from_raw(meta) };
        meta.free_fields();
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn recap_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    const ROOT: &str = "http://localhost:3000/recap";

    fn new_client() -> *mut FfiRecapClient {
        let url = CString::new(ROOT).unwrap();
        recap_client_new(url.as_ptr())
    }

    fn request_body(req: &FfiHttpRequest) -> String {
        let bytes = unsafe { std::slice::from_raw_parts(req.body, req.body_len) };
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn c_string(ptr: *const c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string()
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        recap_client_free(client);
    }

    #[test]
    fn client_new_null_uses_default_root() {
        let client = recap_client_new(std::ptr::null());
        assert!(!client.is_null());
        let c = unsafe { &*client };
        assert_eq!(c.inner.server_root(), "https://recapextension.org/recap");
        recap_client_free(client);
    }

    #[test]
    fn client_free_null_is_safe() {
        recap_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_log_event_encodes_pairs() {
        let client = new_client();
        let keys = [CString::new("event").unwrap(), CString::new("court").unwrap()];
        let values = [CString::new("install").unwrap(), CString::new("c a").unwrap()];
        let key_ptrs: Vec<*const c_char> = keys.iter().map(|k| k.as_ptr()).collect();
        let value_ptrs: Vec<*const c_char> = values.iter().map(|v| v.as_ptr()).collect();
        let req = recap_build_log_event(client, key_ptrs.as_ptr(), value_ptrs.as_ptr(), 2);
        assert!(!req.is_null());
        let r = unsafe { &*req };
        assert!(matches!(r.method, FfiHttpMethod::Get));
        assert_eq!(c_string(r.url), "http://localhost:3000/gen204?event=install&court=c%20a");
        assert!(r.body.is_null());
        assert_eq!(r.headers_len, 0);
        assert!(!r.expect_json);
        recap_free_request(req);
        recap_client_free(client);
    }

    #[test]
    fn build_log_event_without_pairs() {
        let client = new_client();
        let req = recap_build_log_event(client, std::ptr::null(), std::ptr::null(), 0);
        assert_eq!(c_string(unsafe { &*req }.url), "http://localhost:3000/gen204");
        recap_free_request(req);
        recap_client_free(client);
    }

    #[test]
    fn build_query_docket_produces_form_post() {
        let client = new_client();
        let court = CString::new("cand").unwrap();
        let casenum = CString::new("12345").unwrap();
        let req = recap_build_query_docket(client, court.as_ptr(), casenum.as_ptr());
        assert!(!req.is_null());
        let r = unsafe { &*req };
        assert!(matches!(r.method, FfiHttpMethod::Post));
        assert_eq!(c_string(r.url), "http://localhost:3000/recap/query_cases/");
        assert_eq!(r.headers_len, 1);
        let header = unsafe { &*r.headers };
        assert_eq!(c_string(header.key), "content-type");
        assert_eq!(c_string(header.value), "application/x-www-form-urlencoded");
        assert_eq!(
            request_body(r),
            "json=%7B%22court%22%3A%22cand%22%2C%22casenum%22%3A%2212345%22%7D"
        );
        assert!(r.expect_json);
        recap_free_request(req);
        recap_client_free(client);
    }

    #[test]
    fn build_query_docket_null_arg_returns_null() {
        let client = new_client();
        let court = CString::new("cand").unwrap();
        assert!(recap_build_query_docket(client, court.as_ptr(), std::ptr::null()).is_null());
        assert!(recap_build_query_docket(std::ptr::null(), court.as_ptr(), court.as_ptr()).is_null());
        recap_client_free(client);
    }

    #[test]
    fn build_query_documents_empty_list_returns_null() {
        let client = new_client();
        let court = CString::new("cand").unwrap();
        assert!(recap_build_query_documents(client, court.as_ptr(), std::ptr::null(), 0).is_null());
        recap_client_free(client);
    }

    #[test]
    fn build_query_documents_lists_urls() {
        let client = new_client();
        let court = CString::new("cand").unwrap();
        let url = CString::new("https://ecf.cand.uscourts.gov/doc1/1").unwrap();
        let urls = [url.as_ptr()];
        let req = recap_build_query_documents(client, court.as_ptr(), urls.as_ptr(), 1);
        let r = unsafe { &*req };
        assert_eq!(c_string(r.url), "http://localhost:3000/recap/query/");
        assert!(request_body(r).contains("doc1%2F1"));
        recap_free_request(req);
        recap_client_free(client);
    }

    #[test]
    fn build_upload_metadata_with_and_without_team() {
        let client = new_client();
        let s = |v: &str| CString::new(v).unwrap();
        let (court, docid, casenum, seq, dm, docnum, team) =
            (s("cand"), s("d1"), s("c1"), s("3"), s("4"), s("2"), s("Alpha"));

        let with_team = recap_build_upload_document_metadata(
            client,
            court.as_ptr(),
            docid.as_ptr(),
            casenum.as_ptr(),
            seq.as_ptr(),
            dm.as_ptr(),
            docnum.as_ptr(),
            team.as_ptr(),
        );
        let body = request_body(unsafe { &*with_team });
        assert!(body.contains("name=\"add_case_info\"\r\n\r\ntrue\r\n"));
        assert!(body.contains("name=\"team_name\"\r\n\r\nAlpha\r\n"));

        let without_team = recap_build_upload_document_metadata(
            client,
            court.as_ptr(),
            docid.as_ptr(),
            casenum.as_ptr(),
            seq.as_ptr(),
            dm.as_ptr(),
            docnum.as_ptr(),
            std::ptr::null(),
        );
        assert!(!request_body(unsafe { &*without_team }).contains("team_name"));

        recap_free_request(with_team);
        recap_free_request(without_team);
        recap_client_free(client);
    }

    #[test]
    fn build_upload_document_keeps_binary_body() {
        let client = new_client();
        let s = |v: &str| CString::new(v).unwrap();
        let (court, path, filename, mime) = (s("cand"), s("/doc1/1"), s("1.pdf"), s("application/pdf"));
        let bytes = [0x25u8, 0x50, 0x44, 0x46, 0x00, 0xff];
        let req = recap_build_upload_document(
            client,
            court.as_ptr(),
            path.as_ptr(),
            filename.as_ptr(),
            mime.as_ptr(),
            bytes.as_ptr(),
            bytes.len(),
            std::ptr::null(),
        );
        assert!(!req.is_null());
        let r = unsafe { &*req };
        let body = unsafe { std::slice::from_raw_parts(r.body, r.body_len) };
        assert!(body.windows(bytes.len()).any(|w| w == bytes));
        recap_free_request(req);
        recap_client_free(client);
    }

    #[test]
    fn build_docket_and_menu_uploads() {
        let client = new_client();
        let s = |v: &str| CString::new(v).unwrap();
        let (court, casenum, filename, mime, html) =
            (s("cand"), s("c1"), s("d.html"), s("text/html"), s("<html></html>"));
        let docket = recap_build_upload_docket(
            client,
            court.as_ptr(),
            casenum.as_ptr(),
            filename.as_ptr(),
            mime.as_ptr(),
            html.as_ptr(),
            std::ptr::null(),
        );
        assert!(request_body(unsafe { &*docket }).contains("name=\"casenum\"\r\n\r\nc1\r\n"));
        let menu = recap_build_upload_attachment_menu(
            client,
            court.as_ptr(),
            filename.as_ptr(),
            mime.as_ptr(),
            html.as_ptr(),
            std::ptr::null(),
        );
        assert!(!request_body(unsafe { &*menu }).contains("name=\"casenum\""));
        recap_free_request(docket);
        recap_free_request(menu);
        recap_client_free(client);
    }

    #[test]
    fn parse_query_docket_returns_json_or_null() {
        let client = new_client();
        let body = CString::new(r#"{"docket_url":"https://archive.org/d.html","timestamp":"01/02/13"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let json = recap_parse_query_docket(client, &resp);
        assert!(!json.is_null());
        let value: serde_json::Value = serde_json::from_str(&c_string(json)).unwrap();
        assert_eq!(value["timestamp"], "01/02/13");
        recap_free_string(json);

        assert!(recap_parse_query_docket(client, std::ptr::null()).is_null());
        recap_client_free(client);
    }

    #[test]
    fn parse_query_documents_failure_is_empty_object() {
        let client = new_client();
        let json = recap_parse_query_documents(client, std::ptr::null());
        assert_eq!(c_string(json), "{}");
        recap_free_string(json);
        recap_client_free(client);
    }

    #[test]
    fn parse_uploads_match_messages() {
        let client = new_client();
        let parsed = CString::new(r#"{"message":"Successfully parsed docket."}"#).unwrap();
        let rejected = CString::new(r#"{"message":"Could not parse."}"#).unwrap();
        let pdf = CString::new(r#"{"message":"PDF uploaded"}"#).unwrap();
        let resp = |b: &CString| FfiHttpResponse {
            status: 200,
            body: b.as_ptr(),
        };
        assert!(recap_parse_upload_docket(client, &resp(&parsed)));
        assert!(!recap_parse_upload_docket(client, &resp(&rejected)));
        assert!(!recap_parse_upload_docket(client, std::ptr::null()));
        assert!(recap_parse_upload_attachment_menu(client, &resp(&parsed)));
        assert!(recap_parse_upload_document(client, &resp(&pdf)));
        assert!(!recap_parse_upload_document_metadata(std::ptr::null(), &resp(&parsed)));
        recap_client_free(client);
    }

    #[test]
    fn metadata_round_trips_through_cache() {
        let client = new_client();
        let body = CString::new(
            r#"{"message":"adddocmeta: DB updated",
                "documents":{"d1":{"casenum":"c1","docnum":2,"subdocnum":0}},
                "cases":{"c1":{"officialcasenum":"1:11-cv-00001"}}}"#,
        )
        .unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        assert!(recap_parse_upload_document_metadata(client, &resp));

        let doc_id = CString::new("d1").unwrap();
        let meta = recap_cached_document_metadata(client, doc_id.as_ptr());
        let m = unsafe { &*meta };
        assert_eq!(c_string(m.case_num), "c1");
        assert_eq!(c_string(m.official_case_num), "1:11-cv-00001");
        assert_eq!(c_string(m.doc_num), "2");
        assert_eq!(c_string(m.sub_doc_num), "0");
        recap_free_document_metadata(meta);

        let unknown = CString::new("zzz").unwrap();
        let meta = recap_cached_document_metadata(client, unknown.as_ptr());
        let m = unsafe { &*meta };
        assert!(m.case_num.is_null() && m.official_case_num.is_null());
        assert!(m.doc_num.is_null() && m.sub_doc_num.is_null());
        recap_free_document_metadata(meta);
        recap_client_free(client);
    }

    #[test]
    fn free_functions_accept_null() {
        recap_free_request(std::ptr::null_mut());
        recap_free_document_metadata(std::ptr::null_mut());
        recap_free_string(std::ptr::null_mut());
    }
}
