//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. A `null` simulated response stands for a
//! transport failure. Comparing parsed JSON (not raw strings) where field
//! order is not part of the wire contract avoids false negatives.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use recap_core::{
    AttachmentMenuUpload, CachedDocumentMetadata, DocketAvailability, DocketUpload, DocumentAvailability,
    DocumentMetadataUpload, DocumentUpload, HttpMethod, HttpResponse, RecapClient, ServerId,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> RecapClient {
    RecapClient::new(&format!("{BASE_URL}/recap"))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

/// Turn a vector's `simulated_response` into what a transport would deliver.
fn simulated(sim: &serde_json::Value) -> Option<HttpResponse> {
    if sim.is_null() {
        return None;
    }
    Some(HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    })
}

fn load(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// query_cases
// ---------------------------------------------------------------------------

#[test]
fn query_docket_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/query_docket.json")) {
        let name = case["name"].as_str().unwrap();
        let court = case["input"]["court"].as_str().unwrap();
        let casenum = case["input"]["casenum"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_query_docket(court, casenum).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.header("content-type"), expected_req["content_type"].as_str(), "{name}: content type");
        assert_eq!(req.body_text(), expected_req["body"].as_str(), "{name}: body");

        // Verify parse
        let result = c.parse_query_docket(simulated(&case["simulated_response"]));
        let expected: Option<DocketAvailability> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(result, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// query
// ---------------------------------------------------------------------------

#[test]
fn query_documents_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/query_documents.json")) {
        let name = case["name"].as_str().unwrap();
        let court = case["input"]["court"].as_str().unwrap();
        let urls: Vec<String> = serde_json::from_value(case["input"]["urls"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_query_documents(court, &urls).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        let encoded = req.body_text().unwrap().strip_prefix("json=").unwrap();
        let sent: serde_json::Value = serde_json::from_str(&percent_decode_str(encoded).decode_utf8().unwrap()).unwrap();
        assert_eq!(sent, expected_req["json"], "{name}: json payload");

        // Verify parse
        let result = c.parse_query_documents(simulated(&case["simulated_response"]));
        let expected: HashMap<String, DocumentAvailability> =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(result, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// uploads
// ---------------------------------------------------------------------------

#[test]
fn upload_test_vectors() {
    for case in load(include_str!("../../test-vectors/uploads.json")) {
        let name = case["name"].as_str().unwrap();
        let response = simulated(&case["simulated_response"]);
        let expected = case["expected_result"].as_bool().unwrap();

        let c = client();
        let result = match case["operation"].as_str().unwrap() {
            "metadata" => {
                let req = c.build_upload_document_metadata(
                    &DocumentMetadataUpload {
                        court: "cand".to_string(),
                        doc_id: "d1".to_string(),
                        case_num: "c1".to_string(),
                        de_seq_num: "1".to_string(),
                        dm_id: "1".to_string(),
                        doc_num: "1".to_string(),
                    },
                    None,
                );
                assert_eq!(req.url, format!("{BASE_URL}/recap/adddocmeta/"), "{name}: url");
                c.parse_upload_document_metadata(response)
            }
            "docket" => {
                let req = c.build_upload_docket(
                    &DocketUpload {
                        court: "cand".to_string(),
                        case_num: "c1".to_string(),
                        filename: "d.html".to_string(),
                        mime_type: "text/html".to_string(),
                        html: "<html></html>".to_string(),
                    },
                    None,
                );
                assert_eq!(req.url, format!("{BASE_URL}/recap/upload/"), "{name}: url");
                c.parse_upload_docket(response)
            }
            "menu" => {
                let req = c.build_upload_attachment_menu(
                    &AttachmentMenuUpload {
                        court: "cand".to_string(),
                        filename: "m.html".to_string(),
                        mime_type: "text/html".to_string(),
                        html: "<table></table>".to_string(),
                    },
                    None,
                );
                assert_eq!(req.url, format!("{BASE_URL}/recap/upload/"), "{name}: url");
                c.parse_upload_attachment_menu(response)
            }
            "document" => {
                let req = c.build_upload_document(
                    &DocumentUpload {
                        court: "cand".to_string(),
                        path: "/doc1/1".to_string(),
                        filename: "1.pdf".to_string(),
                        mime_type: "application/pdf".to_string(),
                        bytes: b"%PDF".to_vec(),
                    },
                    None,
                );
                assert_eq!(req.url, format!("{BASE_URL}/recap/upload/"), "{name}: url");
                c.parse_upload_document(response)
            }
            other => panic!("{name}: unknown operation: {other}"),
        };
        assert_eq!(result, expected, "{name}: result");
    }
}

// ---------------------------------------------------------------------------
// metadata cache
// ---------------------------------------------------------------------------

fn expected_metadata(v: &serde_json::Value) -> CachedDocumentMetadata {
    let id = |key: &str| serde_json::from_value::<Option<ServerId>>(v[key].clone()).unwrap();
    CachedDocumentMetadata {
        case_num: id("case_num"),
        official_case_num: v["official_case_num"].as_str().map(str::to_string),
        doc_num: id("doc_num"),
        sub_doc_num: id("sub_doc_num"),
    }
}

#[test]
fn metadata_cache_test_vectors() {
    for case in load(include_str!("../../test-vectors/metadata.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client();
        for body in case["responses"].as_array().unwrap() {
            let response = body.as_str().map(HttpResponse::ok);
            c.parse_upload_document_metadata(response);
        }
        for lookup in case["lookups"].as_array().unwrap() {
            let doc_id = lookup["doc_id"].as_str().unwrap();
            assert_eq!(
                c.document_metadata(doc_id),
                expected_metadata(&lookup["expected"]),
                "{name}: lookup {doc_id}"
            );
        }
    }
}
