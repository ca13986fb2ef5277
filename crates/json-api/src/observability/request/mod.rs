//! Request-level logging and request IDs.

mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Per-request facts gathered before the handler chain runs.
#[derive(Debug)]
struct RequestSummary {
    request_id: String,
    method: String,
    route: String,
}

impl RequestSummary {
    fn log_completion(&self, status: StatusCode, elapsed: Duration) {
        let duration_ms = elapsed.as_millis();
        let code = status.as_u16();

        info!(status = code, duration_ms, "request.completed");

        match (status.is_server_error(), status.is_client_error()) {
            (true, _) => error!(
                status = code,
                method = %self.method,
                route = %self.route,
                request_id = %self.request_id,
                "server error response"
            ),
            (_, true) => warn!(
                status = code,
                method = %self.method,
                route = %self.route,
                request_id = %self.request_id,
                "client error response"
            ),
            _ => {}
        }

        if let Some(threshold) =
            settings::exceeded_threshold(elapsed, settings::slow_request_threshold())
        {
            warn!(
                method = %self.method,
                route = %self.route,
                request_id = %self.request_id,
                duration_ms,
                threshold_ms = threshold.as_millis(),
                "slow request detected"
            );
        }
    }
}

/// Tag every request with an id, wrap it in a span, and record its outcome
/// in logs and metrics. The metrics scrape itself is passed straight through.
#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let path = req.uri().path().to_owned();

    if path == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let summary = RequestSummary {
        method: req.method().to_string(),
        route: spans::normalise_route(&path),
        request_id,
    };

    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        route = %summary.route,
        request_id = %summary.request_id,
        method = %summary.method,
        path = %path,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(
        &summary.method,
        &summary.route,
        status.as_u16(),
        elapsed.as_secs_f64(),
    );

    span.record("status", status.as_u16());
    span.record("duration_ms", elapsed.as_millis());
    span.in_scope(|| summary.log_completion(status, elapsed));
}
