//! HTTP front end.
//!
//! A `tiny_http` listener polled from `spawn_blocking` (its `recv` blocks),
//! handling one request at a time until Ctrl-C. Body reads and socket writes
//! also run on the blocking pool.

pub mod multipart;
pub mod response;
pub mod routes;

use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use biz_core::RequestId;
use biz_core::responses::{AgentRequest, HealthResponse};
use biz_llm::Summarizer;
use tiny_http::Request;

use crate::error::ServiceError;
use crate::service::Service;
use multipart::UploadMeta;
use response::Reply;
use routes::Route;

/// How long one blocking `recv` waits before checking for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if `bind` cannot be listened on.
pub async fn serve<S: Summarizer>(service: Service<S>, bind: &str) -> anyhow::Result<()> {
    let server = tiny_http::Server::http(bind)
        .map_err(|e| anyhow::anyhow!("failed to bind {bind}: {e}"))?;
    tracing::info!(%bind, "autobiz listening");
    run(server, &service, tokio::signal::ctrl_c()).await
}

/// Answer requests on `server` until `shutdown` resolves.
///
/// A request already accepted by the poll in flight when `shutdown` fires is
/// still answered before returning.
async fn run<S, F>(server: tiny_http::Server, service: &Service<S>, shutdown: F) -> anyhow::Result<()>
where
    S: Summarizer,
    F: Future,
{
    let server = Arc::new(server);
    tokio::pin!(shutdown);

    loop {
        let listener = Arc::clone(&server);
        let mut next = tokio::task::spawn_blocking(move || listener.recv_timeout(POLL_INTERVAL));
        let received = tokio::select! {
            _ = &mut shutdown => None,
            received = &mut next => Some(received.context("accept task failed")?),
        };
        let Some(received) = received else {
            tracing::info!("shutting down");
            if let Ok(Ok(Some(request))) = next.await {
                handle(service, request).await;
            }
            break;
        };
        match received {
            Ok(Some(request)) => handle(service, request).await,
            Ok(None) => {}
            Err(error) => tracing::warn!(%error, "failed to receive request"),
        }
    }

    server.unblock();
    Ok(())
}

async fn handle<S: Summarizer>(service: &Service<S>, request: Request) {
    let started = Instant::now();
    let method = request.method().clone();
    let url = request.url().to_string();
    let (path, query) = routes::split_url(&url);
    let route = routes::route(&method, path);

    let (request, reply, id) = match RequestId::generate() {
        Ok(id) => {
            let (request, reply) = process(service, request, &route, query, &id).await;
            (request, reply, Some(id))
        }
        Err(error) => (Some(request), Reply::error(&error.into()), None),
    };

    let status = reply.status;
    if let Some(request) = request {
        let response = reply.into_response(&service.config().server.allowed_origin);
        match tokio::task::spawn_blocking(move || request.respond(response)).await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => tracing::warn!(%error, "failed to send response"),
            Err(error) => tracing::warn!(%error, "response task failed"),
        }
    }

    tracing::info!(
        %method,
        path,
        request_id = id.as_ref().map_or("-", RequestId::as_str),
        status,
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "handled request"
    );
}

/// Read the body if the route needs one, then dispatch. Hands the request
/// back so the caller can respond on it; `None` if it was lost with a
/// failed body-read task.
async fn process<S: Summarizer>(
    service: &Service<S>,
    mut request: Request,
    route: &Route,
    query: Option<&str>,
    id: &RequestId,
) -> (Option<Request>, Reply) {
    if !route.has_body() {
        let reply = dispatch(service, route, UploadMeta::default(), Vec::new(), id).await;
        return (Some(request), reply);
    }

    let meta = UploadMeta {
        content_type: header(&request, "Content-Type"),
        header_filename: header(&request, "X-Filename"),
        query_filename: query.and_then(|q| routes::query_param(q, "filename")),
    };
    let limit = service.config().server.max_upload_bytes;
    let read = tokio::task::spawn_blocking(move || {
        let body = read_body(&mut request, limit);
        (request, body)
    })
    .await;

    match read {
        Ok((request, Ok(body))) => {
            let reply = dispatch(service, route, meta, body, id).await;
            (Some(request), reply)
        }
        Ok((request, Err(error))) => (Some(request), Reply::error(&error)),
        Err(join) => {
            let error = ServiceError::join(&join);
            tracing::error!(request_id = %id, %error, "body read failed");
            (None, Reply::error(&error))
        }
    }
}

async fn dispatch<S: Summarizer>(
    service: &Service<S>,
    route: &Route,
    meta: UploadMeta,
    body: Vec<u8>,
    id: &RequestId,
) -> Reply {
    let result = match route {
        Route::Upload => match multipart::extract_upload(meta, body).await {
            Ok(upload) => service.upload(id, upload).await.map(|r| Reply::json(200, &r)),
            Err(error) => Err(error),
        },
        Route::Report => match multipart::extract_upload(meta, body).await {
            Ok(upload) => service.report(id, upload).await.map(|r| Reply::json(200, &r)),
            Err(error) => Err(error),
        },
        Route::Agent => match serde_json::from_slice::<AgentRequest>(&body) {
            Ok(request) => service.agent(request).await.map(|r| Reply::json(200, &r)),
            Err(error) => Err(ServiceError::BadRequest(format!("invalid agent request: {error}"))),
        },
        Route::Health => Ok(Reply::json(
            200,
            &HealthResponse {
                status: "ok".into(),
            },
        )),
        Route::Download(name) => download(service, name).await,
        Route::Preflight => Ok(Reply::no_content()),
        Route::NotFound => Err(ServiceError::NotFound("no such route".into())),
    };

    result.unwrap_or_else(|error| {
        if error.status() >= 500 {
            tracing::error!(request_id = %id, %error, "request failed");
        } else {
            tracing::debug!(request_id = %id, %error, "request rejected");
        }
        Reply::error(&error)
    })
}

async fn download<S: Summarizer>(service: &Service<S>, name: &str) -> Result<Reply, ServiceError> {
    let path = service.report_file(name)?;
    let bytes = tokio::fs::read(&path).await?;
    Ok(Reply::pdf(bytes))
}

fn header(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

/// Read at most `limit` bytes of body.
fn read_body(request: &mut Request, limit: u64) -> Result<Vec<u8>, ServiceError> {
    let declared = request.body_length();
    read_limited(request.as_reader(), declared, limit)
}

/// Reject a declared length over `limit` up front, then read at most one
/// byte past it to catch bodies that run over without declaring a length.
fn read_limited(
    reader: impl Read,
    declared: Option<usize>,
    limit: u64,
) -> Result<Vec<u8>, ServiceError> {
    if declared.is_some_and(|length| u64::try_from(length).unwrap_or(u64::MAX) > limit) {
        return Err(ServiceError::PayloadTooLarge { limit });
    }
    let mut body = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut body)?;
    if body.len() as u64 > limit {
        return Err(ServiceError::PayloadTooLarge { limit });
    }
    Ok(body)
}
