//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`,
//! and enums with explicit discriminants. Conversion functions live here to
//! keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use recap_core::{CachedDocumentMetadata, HttpMethod, HttpResponse, ResponseKind, ServerId};

/// Opaque handle to a `RecapClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiRecapClient {
    pub(crate) inner: recap_core::RecapClient,
}

// ---------------------------------------------------------------------------
// String helpers
// ---------------------------------------------------------------------------

/// Allocate a C string, or null if `s` contains an interior NUL.
pub(crate) fn to_c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).map_or(std::ptr::null_mut(), CString::into_raw)
}

/// Borrow a caller-owned C string. Null or non-UTF-8 input yields `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn from_c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Copy `len` caller-owned C strings. Any null or non-UTF-8 entry yields `None`.
///
/// # Safety
/// `ptr` must be null with `len == 0`, or point to `len` valid C strings.
pub(crate) unsafe fn from_c_str_array(ptr: *const *const c_char, len: usize) -> Option<Vec<String>> {
    if len == 0 {
        return Some(Vec::new());
    }
    if ptr.is_null() {
        return None;
    }
    let items = unsafe { std::slice::from_raw_parts(ptr, len) };
    items
        .iter()
        .map(|&p| unsafe { from_c_str(p) }.map(str::to_string))
        .collect()
}

/// Free a C string allocated by `to_c_string`. Null is ignored.
pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `recap_build_*` functions. The C caller executes the request
/// and passes the response back through `recap_parse_*`. `body` is raw
/// bytes (multipart bodies may contain NULs) and is null when absent.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut u8,
    pub body_len: usize,
    /// True when the response should be decoded as JSON, false for text.
    pub expect_json: bool,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: recap_core::HttpRequest) -> *mut Self {
        let url = to_c_string(req.url);
        let (body, body_len) = match req.body {
            Some(b) => {
                let len = b.len();
                (Box::into_raw(b.into_boxed_slice()) as *mut u8, len)
            }
            None => (std::ptr::null_mut(), 0),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
            body_len,
            expect_json: req.expect == ResponseKind::Json,
        }))
    }

    /// Release every allocation owned by this request.
    ///
    /// # Safety
    /// `self` must have been produced by `from_core`.
    pub(crate) unsafe fn free_fields(&self) {
        free_c_string(self.url);
        if !self.body.is_null() {
            let slice = std::ptr::slice_from_raw_parts_mut(self.body, self.body_len);
            drop(unsafe { Box::from_raw(slice) });
        }
        if !self.headers.is_null() && self.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(self.headers, self.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request and
/// passes a pointer to a `recap_parse_*` function; passing null instead
/// reports a transport failure. The FFI layer reads but does not free these
/// fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// Convert a caller's response pointer. Null means the transport failed.
///
/// # Safety
/// `resp` must be null or point to a valid `FfiHttpResponse`.
pub(crate) unsafe fn response_from_ffi(resp: *const FfiHttpResponse) -> Option<HttpResponse> {
    if resp.is_null() {
        return None;
    }
    let resp = unsafe { &*resp };
    let body = unsafe { from_c_str(resp.body) }.unwrap_or("").to_string();
    Some(HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    })
}

// ---------------------------------------------------------------------------
// Cached metadata
// ---------------------------------------------------------------------------

/// Cached metadata for one document. Each field is null when unknown.
#[repr(C)]
pub struct FfiDocumentMetadata {
    pub case_num: *mut c_char,
    pub official_case_num: *mut c_char,
    pub doc_num: *mut c_char,
    pub sub_doc_num: *mut c_char,
}

impl FfiDocumentMetadata {
    pub(crate) fn from_core(meta: CachedDocumentMetadata) -> *mut Self {
        let id = |v: Option<ServerId>| v.map_or(std::ptr::null_mut(), |v| to_c_string(v.to_string()));
        Box::into_raw(Box::new(FfiDocumentMetadata {
            case_num: id(meta.case_num),
            official_case_num: meta.official_case_num.map_or(std::ptr::null_mut(), to_c_string),
            doc_num: id(meta.doc_num),
            sub_doc_num: id(meta.sub_doc_num),
        }))
    }

    pub(crate) fn free_fields(&self) {
        free_c_string(self.case_num);
        free_c_string(self.official_case_num);
        free_c_string(self.doc_num);
        free_c_string(self.sub_doc_num);
    }
}
