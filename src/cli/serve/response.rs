//! HTTP response handlers.
//!
//! Rendering failures are handled per document:
//!
//! | Document | Success                     | Failure                                    |
//! |----------|-----------------------------|--------------------------------------------|
//! | Feed     | 200 `application/atom+xml`  | 200 `text/plain` "Failed to generate XML feed" |
//! | Sitemap  | 200 `application/xml`       | 404 "404 Not Found"                        |

use crate::{generator::Document, log, utils::mime::types};
use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Body written when a feed fails to render.
pub const FEED_FAILURE_MESSAGE: &str = "Failed to generate XML feed";

const NOT_FOUND_MESSAGE: &str = "404 Not Found";

/// A response ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Payload {
    pub fn not_found() -> Self {
        Self {
            status: 404,
            content_type: types::PLAIN,
            body: NOT_FOUND_MESSAGE.as_bytes().to_vec(),
        }
    }

    /// Turn a render result into a response.
    pub fn for_document(document: Document, rendered: Result<String>) -> Self {
        match (document, rendered) {
            (Document::Feed(_), Ok(xml)) => Self::ok(types::ATOM, xml),
            (Document::Sitemap, Ok(xml)) => Self::ok(types::XML, xml),
            (Document::Feed(kind), Err(e)) => {
                log!("error"; "failed to render {:?} feed: {:#}", kind, e);
                Self {
                    status: 200,
                    content_type: types::PLAIN,
                    body: FEED_FAILURE_MESSAGE.as_bytes().to_vec(),
                }
            }
            (Document::Sitemap, Err(e)) => {
                log!("error"; "failed to render sitemap: {:#}", e);
                Self::not_found()
            }
        }
    }

    fn ok(content_type: &'static str, body: String) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.into_bytes(),
        }
    }
}

/// Write `payload`, headers only for HEAD requests.
pub fn respond(request: Request, payload: Payload) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, payload.status, payload.content_type);
    }
    send_body(request, payload.status, payload.content_type, payload.body)
}

pub fn respond_not_found(request: Request) -> Result<()> {
    respond(request, Payload::not_found())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, types::PLAIN, b"503 Service Unavailable".to_vec())
}

/// Value of the request's `Host` header, if any.
pub fn request_host(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case("host"))
        .map(|h| h.value.to_string())
        .filter(|host| !host.is_empty())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header {key}: {value}"))
}
