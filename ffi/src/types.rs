//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String` (null for an absent value), raw
//! pointers instead of `Vec`, and tagged enums with explicit
//! discriminants. Rows and details are handed over already formatted, so
//! the host only binds strings to labels.

use std::ffi::CString;
use std::os::raw::c_char;

use movie_core::browser::parse_link;
use movie_core::http::HttpMethod;
use movie_core::{DetailsView, FetchError, MovieClient, MovieDetails, MovieRow};

/// Opaque handle to a `MovieClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiMovieClient {
    pub(crate) inner: MovieClient,
}

/// Copy `s` into a heap C string. Interior NULs cannot cross the boundary
/// and are dropped.
pub(crate) fn c_string(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

pub(crate) fn c_string_opt(s: Option<String>) -> *mut c_char {
    s.map(c_string).unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
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
/// Built by `movie_build_*` functions. The C caller executes the request
/// and passes the response back through `movie_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: movie_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a request and passes a
/// pointer to a `movie_parse_*` function. The FFI layer reads but does not
/// free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiMovieResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Decode = 3,
    Transport = 4,
    MissingIdentifier = 5,
    Panic = 6,
    NullArg = 7,
}

/// Tag that tells `movie_free_result` what `FfiMovieResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    MovieRows = 1,
    MovieDetails = 2,
}

/// One formatted list row. Null string fields are hidden in the cell.
#[repr(C)]
pub struct FfiMovieRow {
    pub id: i64,
    pub title: *mut c_char,
    pub overview: *mut c_char,
    pub rating: *mut c_char,
    pub release_date: *mut c_char,
    pub poster_url: *mut c_char,
}

impl FfiMovieRow {
    fn from_core(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: c_string(row.title),
            overview: c_string(row.overview),
            rating: c_string_opt(row.rating),
            release_date: c_string_opt(row.release_date),
            poster_url: c_string_opt(row.poster_url),
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        for field in [
            self.title,
            self.overview,
            self.rating,
            self.release_date,
            self.poster_url,
        ] {
            free_c_string(field);
        }
    }
}

/// The formatted catalog, in API order.
#[repr(C)]
pub struct FfiMovieRowList {
    pub items: *mut FfiMovieRow,
    pub len: u32,
}

/// Every details label, formatted. `homepage` is null unless it is a link
/// the host can open; `poster_url` is null when there is no poster.
#[repr(C)]
pub struct FfiDetailsView {
    pub id: i64,
    pub title: *mut c_char,
    pub tagline: *mut c_char,
    pub genres: *mut c_char,
    pub runtime: *mut c_char,
    pub release_date: *mut c_char,
    pub overview: *mut c_char,
    pub link_title: *mut c_char,
    pub homepage: *mut c_char,
    pub poster_url: *mut c_char,
}

impl FfiDetailsView {
    fn from_core(details: &MovieDetails, client: &MovieClient) -> Self {
        let view = DetailsView::new(details);
        let homepage = details
            .homepage
            .as_deref()
            .and_then(parse_link)
            .map(|url| url.to_string());
        Self {
            id: details.id,
            title: c_string(view.title),
            tagline: c_string(view.tagline),
            genres: c_string(view.genres),
            runtime: c_string(view.runtime),
            release_date: c_string(view.release_date),
            overview: c_string(view.overview),
            link_title: c_string(view.link_title.to_string()),
            homepage: c_string_opt(homepage),
            poster_url: c_string_opt(client.poster_url(details.poster_path.as_deref())),
        }
    }

    pub(crate) fn free_fields(&self) {
        for field in [
            self.title,
            self.tagline,
            self.genres,
            self.runtime,
            self.release_date,
            self.overview,
            self.link_title,
            self.homepage,
            self.poster_url,
        ] {
            free_c_string(field);
        }
    }
}

pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiMovieResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiMovieResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiMovieResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiMovieResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying the formatted rows.
    pub(crate) fn ok_rows(rows: Vec<MovieRow>) -> *mut Self {
        let len = rows.len() as u32;
        let items = if rows.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_rows: Vec<FfiMovieRow> = rows.into_iter().map(FfiMovieRow::from_core).collect();
            Box::into_raw(ffi_rows.into_boxed_slice()) as *mut FfiMovieRow
        };
        let list = Box::new(FfiMovieRowList { items, len });
        Self::ok(
            FfiDataTag::MovieRows,
            Box::into_raw(list) as *mut std::ffi::c_void,
        )
    }

    /// Build a success result carrying the formatted details view.
    pub(crate) fn ok_details(details: &MovieDetails, client: &MovieClient) -> *mut Self {
        let view = Box::new(FfiDetailsView::from_core(details, client));
        Self::ok(
            FfiDataTag::MovieDetails,
            Box::into_raw(view) as *mut std::ffi::c_void,
        )
    }

    /// Build an error result from a `FetchError`.
    pub(crate) fn from_error(err: FetchError) -> *mut Self {
        let (code, status) = match &err {
            FetchError::NotFound => (FfiErrorCode::NotFound, 404u16),
            FetchError::Http { status, .. } => (FfiErrorCode::Http, *status),
            FetchError::Decode(_) => (FfiErrorCode::Decode, 0),
            FetchError::Transport(_) => (FfiErrorCode::Transport, 0),
            FetchError::MissingIdentifier => (FfiErrorCode::MissingIdentifier, 0),
        };
        Self::err(code, status, err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
