//! C-ABI wrapper around `movie-core`.
//!
//! # Overview
//! Lets a native mobile host (Swift, Kotlin/JNI) drive the catalog API
//! while doing the HTTP itself: build a request, execute it, hand the
//! response back, and receive rows or a details view already formatted.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `build_*` / `parse_*` mirror the core API 1:1.
//! - A single `FfiMovieResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `movie_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use movie_core::{ClientConfig, HttpResponse, MovieClient, MovieRow};

use types::*;

/// Borrow a C string as `&str`, treating invalid UTF-8 as empty.
///
/// # Safety
/// `s` must be non-null and NUL-terminated.
unsafe fn str_arg<'a>(s: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(s) }.to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `MovieClient` for `api_base_url`.
///
/// `poster_base_url` may be null to use the default CDN.
/// Returns null if `api_base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `movie_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn movie_client_new(
    api_base_url: *const c_char,
    poster_base_url: *const c_char,
) -> *mut FfiMovieClient {
    catch_unwind(|| {
        if api_base_url.is_null() {
            return std::ptr::null_mut();
        }
        let mut config = ClientConfig::with_base_url(unsafe { str_arg(api_base_url) });
        if !poster_base_url.is_null() {
            config.poster_base_url = unsafe { str_arg(poster_base_url) }.to_string();
        }
        let client = MovieClient::new(&config);
        Box::into_raw(Box::new(FfiMovieClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `MovieClient` created by `movie_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movie_client_free(client: *mut FfiMovieClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the catalog request for `url`, or for the configured popular
/// endpoint when `url` is null.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `movie_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn movie_build_fetch_movies(
    client: *const FfiMovieClient,
    url: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let url = if url.is_null() {
            client.inner.popular_url().to_string()
        } else {
            unsafe { str_arg(url) }.to_string()
        };
        FfiHttpRequest::from_core(client.inner.build_fetch_movies(&url))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the details request for `movie_id`.
///
/// Returns null if `client` or `movie_id` is null, or if `movie_id` is
/// blank. No request should be issued in that case.
#[unsafe(no_mangle)]
pub extern "C" fn movie_build_fetch_details(
    client: *const FfiMovieClient,
    movie_id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || movie_id.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_fetch_movie_details(unsafe { str_arg(movie_id) }) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { str_arg(resp.body) }.to_string()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Parse a catalog response into formatted rows.
///
/// Returns a result with `data_tag = MovieRows` on success.
#[unsafe(no_mangle)]
pub extern "C" fn movie_parse_catalog(
    client: *const FfiMovieClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMovieResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMovieResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMovieResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_fetch_movies(ffi_response_to_core(resp)) {
            Ok(catalog) => FfiMovieResult::ok_rows(
                catalog
                    .results
                    .iter()
                    .map(|summary| MovieRow::new(summary, &client.inner))
                    .collect(),
            ),
            Err(e) => FfiMovieResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMovieResult::panic("panic in movie_parse_catalog"))
}

/// Parse a details response into a formatted details view.
///
/// Returns a result with `data_tag = MovieDetails` on success.
#[unsafe(no_mangle)]
pub extern "C" fn movie_parse_details(
    client: *const FfiMovieClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMovieResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMovieResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMovieResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_fetch_movie_details(ffi_response_to_core(resp)) {
            Ok(details) => FfiMovieResult::ok_details(&details, &client.inner),
            Err(e) => FfiMovieResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMovieResult::panic("panic in movie_parse_details"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `movie_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movie_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiMovieResult` returned by any `movie_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn movie_free_result(result: *mut FfiMovieResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::MovieRows => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiMovieRowList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                            list.items,
                            list.len as usize,
                        ))
                    };
                    for item in items.iter() {
                        item.free_fields();
                    }
                }
            }
            FfiDataTag::MovieDetails => {
                let view = unsafe { Box::from_raw(result.data as *mut FfiDetailsView) };
                view.free_fields();
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn movie_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_client() -> *mut FfiMovieClient {
        let url = CString::new("http://localhost:3000").unwrap();
        let posters = CString::new("http://cdn.test/w500").unwrap();
        movie_client_new(url.as_ptr(), posters.as_ptr())
    }

    fn read(s: *const c_char) -> Option<String> {
        if s.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string())
        }
    }

    #[test]
    fn client_new_and_free() {
        let url = CString::new("http://localhost:3000").unwrap();
        let client = movie_client_new(url.as_ptr(), std::ptr::null());
        assert!(!client.is_null());
        movie_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        let client = movie_client_new(std::ptr::null(), std::ptr::null());
        assert!(client.is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        movie_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_fetch_movies_defaults_to_popular() {
        let client = new_client();
        let req = movie_build_fetch_movies(client, std::ptr::null());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(read(req_ref.path).as_deref(), Some("http://localhost:3000/popular"));
        assert_eq!(req_ref.headers_len, 1);
        let header = unsafe { &*req_ref.headers };
        assert_eq!(read(header.key).as_deref(), Some("accept"));

        movie_free_request(req);
        movie_client_free(client);
    }

    #[test]
    fn build_fetch_movies_uses_given_url() {
        let client = new_client();
        let url = CString::new("http://localhost:3000/top_rated").unwrap();
        let req = movie_build_fetch_movies(client, url.as_ptr());
        let path = read(unsafe { &*req }.path);
        assert_eq!(path.as_deref(), Some("http://localhost:3000/top_rated"));

        movie_free_request(req);
        movie_client_free(client);
    }

    #[test]
    fn build_fetch_movies_null_client_returns_null() {
        let req = movie_build_fetch_movies(std::ptr::null(), std::ptr::null());
        assert!(req.is_null());
    }

    #[test]
    fn build_fetch_details_valid_id() {
        let client = new_client();
        let id = CString::new("42").unwrap();
        let req = movie_build_fetch_details(client, id.as_ptr());
        assert!(!req.is_null());
        assert_eq!(
            read(unsafe { &*req }.path).as_deref(),
            Some("http://localhost:3000/movie/42")
        );

        movie_free_request(req);
        movie_client_free(client);
    }

    #[test]
    fn build_fetch_details_blank_id_returns_null() {
        let client = new_client();
        let id = CString::new("").unwrap();
        assert!(movie_build_fetch_details(client, id.as_ptr()).is_null());
        assert!(movie_build_fetch_details(client, std::ptr::null()).is_null());
        movie_client_free(client);
    }

    #[test]
    fn parse_catalog_formats_rows() {
        let client = new_client();
        let body = CString::new(
            r#"{"results":[
                {"id":42,"title":"The Answer","overview":"A tale.","vote_average":7.5,"release_date":"2005-04-28","poster_path":"/a.jpg"},
                {"id":7,"title":"Short","overview":"","vote_average":0.0}
            ]}"#,
        )
        .unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = movie_parse_catalog(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert_eq!(r.data_tag, FfiDataTag::MovieRows);

        let list = unsafe { &*(r.data as *const FfiMovieRowList) };
        assert_eq!(list.len, 2);
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };

        assert_eq!(items[0].id, 42);
        assert_eq!(read(items[0].rating).as_deref(), Some("7.5"));
        assert_eq!(read(items[0].poster_url).as_deref(), Some("http://cdn.test/w500/a.jpg"));

        assert_eq!(read(items[1].overview).as_deref(), Some("Plot unknown"));
        assert!(items[1].rating.is_null());
        assert!(items[1].release_date.is_null());
        assert!(items[1].poster_url.is_null());

        movie_free_result(result);
        movie_client_free(client);
    }

    #[test]
    fn parse_catalog_without_results_is_empty() {
        let client = new_client();
        let body = CString::new("{}").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = movie_parse_catalog(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let list = unsafe { &*(r.data as *const FfiMovieRowList) };
        assert_eq!(list.len, 0);
        assert!(list.items.is_null());

        movie_free_result(result);
        movie_client_free(client);
    }

    #[test]
    fn parse_catalog_bad_json_is_decode_error() {
        let client = new_client();
        let body = CString::new("<html>").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = movie_parse_catalog(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);
        assert!(!r.error_message.is_null());
        assert!(r.data.is_null());

        movie_free_result(result);
        movie_client_free(client);
    }

    #[test]
    fn parse_details_formats_view() {
        let client = new_client();
        let body = CString::new(
            r#"{"id":42,"title":"The Answer","tagline":"Don't panic.","genres":[{"id":1,"name":"Comedy"}],
                "runtime":125,"release_date":"2005-04-28","homepage":"not a url","poster_path":"/a.jpg"}"#,
        )
        .unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = movie_parse_details(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::MovieDetails);

        let view = unsafe { &*(r.data as *const FfiDetailsView) };
        assert_eq!(view.id, 42);
        assert_eq!(read(view.tagline).as_deref(), Some("\"Don't panic.\""));
        assert_eq!(read(view.genres).as_deref(), Some("Comedy"));
        assert_eq!(read(view.runtime).as_deref(), Some("2h 5m"));
        assert_eq!(read(view.overview).as_deref(), Some(""));
        assert!(view.homepage.is_null());
        assert_eq!(read(view.poster_url).as_deref(), Some("http://cdn.test/w500/a.jpg"));

        movie_free_result(result);
        movie_client_free(client);
    }

    #[test]
    fn parse_details_not_found() {
        let client = new_client();
        let resp = FfiHttpResponse {
            status: 404,
            body: std::ptr::null(),
        };
        let result = movie_parse_details(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NotFound);
        assert_eq!(r.http_status, 404);

        movie_free_result(result);
        movie_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let body = CString::new("{}").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = movie_parse_catalog(std::ptr::null(), &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        movie_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = new_client();
        let result = movie_parse_details(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        movie_free_result(result);
        movie_client_free(client);
    }

    #[test]
    fn free_functions_accept_null() {
        movie_free_request(std::ptr::null_mut());
        movie_free_result(std::ptr::null_mut());
        movie_free_string(std::ptr::null_mut());
    }
}
