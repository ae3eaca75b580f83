//! Core types for Sieve
//!
//! HTTP request/response wrappers, the request parameter store used as the
//! optional input source for validation, form parsing, and the error model
//! with its HTTP status mapping.

pub mod error;
pub mod form;
pub mod http;
pub mod status;

pub use error::{Error, Result};
pub use form::{parse_form, parse_form_map, parse_query};
pub use http::{HttpRequest, HttpResponse, RequestParams};
pub use status::HttpStatus;
