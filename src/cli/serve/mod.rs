//! Feed and sitemap HTTP server.

mod lifecycle;
mod response;
mod route;

use response::Payload;
use crate::{
    config::SiteConfig,
    content::{ContentLoader, ContentStore, spawn_watcher},
    debug,
    generator::{Document, feed::FeedKind, render_document},
    log,
};
use anyhow::{Context, Result};
use chrono::Utc;
use crossbeam::channel;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// State shared by every request handler.
pub struct ServeContext {
    pub config: Arc<SiteConfig>,
    pub store: Arc<ContentStore>,
}

/// Bind, start the watcher if enabled, and serve until Ctrl+C.
pub fn serve(
    config: Arc<SiteConfig>,
    store: Arc<ContentStore>,
    loader: ContentLoader,
) -> Result<()> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);
    for kind in FeedKind::ALL {
        debug!("serve"; "{:?} feed at {}", kind, kind.channel(&config.feed).path);
    }
    debug!("serve"; "sitemap at {}", config.sitemap.path);

    let watcher = if config.serve.watch {
        Some(spawn_watcher(loader, Arc::clone(&store), shutdown_rx)?)
    } else {
        None
    };

    let workers = config.serve.workers;
    let ctx = Arc::new(ServeContext { config, store });
    run_request_loop(&server, &ctx, workers)?;

    lifecycle::wait_for_shutdown(watcher);
    Ok(())
}

fn run_request_loop(server: &Server, ctx: &Arc<ServeContext>, workers: usize) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("Failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let ctx = Arc::clone(ctx);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &ctx) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request against one snapshot.
fn handle_request(request: Request, ctx: &ServeContext) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let Some(document) = route::resolve(request.url(), &ctx.config) else {
        debug!("serve"; "404 {}", request.url());
        return response::respond_not_found(request);
    };

    let host = match document {
        Document::Sitemap => {
            response::request_host(&request).unwrap_or_else(|| ctx.config.site_host())
        }
        Document::Feed(_) => String::new(),
    };

    let snapshot = ctx.store.load();
    let rendered = render_document(document, &snapshot, &ctx.config, &host, Utc::now());
    response::respond(request, Payload::for_document(document, rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::{Article, ContentSnapshot};
    use chrono::TimeZone;
    use std::{
        io::{Read, Write},
        net::TcpStream,
        thread,
    };

    fn context() -> Arc<ServeContext> {
        let article = Article {
            id: "a1".into(),
            title: "Hello World".into(),
            body_html: "<p>hi</p>".into(),
            published_on: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            tags: Default::default(),
        };
        Arc::new(ServeContext {
            config: Arc::new(test_parse_config("[sitemap]\nstatic_urls = []")),
            store: Arc::new(ContentStore::new(ContentSnapshot::new(vec![article], vec![]))),
        })
    }

    /// Serve exactly one raw HTTP request and return the raw response.
    fn roundtrip(raw_request: &str) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let ctx = context();

        let handle = thread::spawn(move || {
            let request = server.recv().unwrap();
            handle_request(request, &ctx).unwrap();
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(raw_request.as_bytes()).unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        handle.join().unwrap();
        out
    }

    fn status_line(out: &str) -> &str {
        out.lines().next().unwrap_or_default()
    }

    #[test]
    fn test_serves_feed() {
        let out = roundtrip("GET /atom.xml HTTP/1.0\r\n\r\n");
        assert!(status_line(&out).contains(" 200 "));
        assert!(out.contains("application/atom+xml"));
        assert!(out.contains("https://example.com/article/a1/hello-world.html"));
    }

    #[test]
    fn test_sitemap_uses_host_header() {
        let out = roundtrip("GET /sitemap.xml?x=1 HTTP/1.0\r\nHost: blog.test:8080\r\n\r\n");
        assert!(out.contains("application/xml"));
        assert!(out.contains("<loc>https://blog.test:8080/article/a1/hello-world.html</loc>"));
    }

    #[test]
    fn test_unknown_path_is_404() {
        let out = roundtrip("GET /nope HTTP/1.0\r\n\r\n");
        assert!(status_line(&out).contains(" 404 "));
        assert!(out.ends_with("404 Not Found"));
    }

    #[test]
    fn test_head_has_no_body() {
        let out = roundtrip("HEAD /atom.xml HTTP/1.0\r\n\r\n");
        assert!(status_line(&out).contains(" 200 "));
        assert!(out.contains("application/atom+xml"));
        assert!(!out.contains("<feed"));
    }
}
