//! MIME types for served documents.

/// Content-Type header values.
pub mod types {
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const XML: &str = "application/xml";
    pub const ATOM: &str = "application/atom+xml";
}
