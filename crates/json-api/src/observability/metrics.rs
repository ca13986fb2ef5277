//! Prometheus collectors for HTTP traffic and order flow, plus the scrape
//! endpoint that exposes them.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::error;

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

#[derive(Debug)]
struct HiloMetrics {
    registry: Registry,
    http_requests: IntCounterVec,
    http_latency: HistogramVec,
    http_in_flight: IntGauge,
    orders_created: IntCounter,
    orders_cancelled: IntCounter,
    stock_rejections: IntCounterVec,
}

impl HiloMetrics {
    fn build() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests = registered(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "hilo_json_http_requests_total",
                    "HTTP requests served, by method, route and status.",
                ),
                &["method", "route", "status_class", "status_code"],
            )?,
        )?;

        let http_latency = registered(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "hilo_json_http_request_duration_seconds",
                    "Time spent serving HTTP requests, by method and route.",
                )
                .buckets(LATENCY_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let http_in_flight = registered(
            &registry,
            IntGauge::new(
                "hilo_json_http_requests_in_flight",
                "HTTP requests currently being served.",
            )?,
        )?;

        let orders_created = registered(
            &registry,
            IntCounter::new("hilo_orders_created_total", "Orders placed successfully.")?,
        )?;

        let orders_cancelled = registered(
            &registry,
            IntCounter::new(
                "hilo_orders_cancelled_total",
                "Orders cancelled with their stock returned.",
            )?,
        )?;

        let stock_rejections = registered(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "hilo_stock_rejections_total",
                    "Requests refused because stock was insufficient, by source.",
                ),
                &["source"],
            )?,
        )?;

        Ok(Self {
            registry,
            http_requests,
            http_latency,
            http_in_flight,
            orders_created,
            orders_cancelled,
            stock_rejections,
        })
    }

    fn render(&self) -> Result<(String, Vec<u8>), prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut body = Vec::new();

        encoder.encode(&self.registry.gather(), &mut body)?;

        Ok((encoder.format_type().to_owned(), body))
    }
}

fn registered<C>(registry: &Registry, collector: C) -> Result<C, prometheus::Error>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

static METRICS: OnceLock<Option<HiloMetrics>> = OnceLock::new();

/// `None` when the collectors could not be built; metrics are then skipped.
fn metrics() -> Option<&'static HiloMetrics> {
    METRICS
        .get_or_init(|| {
            HiloMetrics::build()
                .inspect_err(|source| error!("failed to build prometheus metrics: {source}"))
                .ok()
        })
        .as_ref()
}

/// Holds the in-flight gauge up for as long as a request is being served.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.http_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let code = status_code.to_string();

    metrics
        .http_requests
        .with_label_values(&[method, route, status_class(status_code), &code])
        .inc();

    metrics
        .http_latency
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a successfully placed order.
pub(crate) fn record_order_created() {
    if let Some(metrics) = metrics() {
        metrics.orders_created.inc();
    }
}

/// Count an order moved to `cancelled`.
pub(crate) fn record_order_cancelled() {
    if let Some(metrics) = metrics() {
        metrics.orders_cancelled.inc();
    }
}

/// Count a request refused for lack of stock; `source` is `order` or `adjustment`.
pub(crate) fn record_stock_rejection(source: &str) {
    if let Some(metrics) = metrics() {
        metrics.stock_rejections.with_label_values(&[source]).inc();
    }
}

/// Prometheus text exposition of every collector.
#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let rendered = metrics().map(HiloMetrics::render);

    match rendered {
        Some(Ok((content_type, body))) => {
            if res.add_header(CONTENT_TYPE, content_type, true).is_err() {
                error!("failed to set metrics content type");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                return;
            }

            res.render(String::from_utf8_lossy(&body).into_owned());
        }
        Some(Err(source)) => {
            error!("failed to encode metrics: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
        None => {
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        }
    }
}

fn status_class(status_code: u16) -> &'static str {
    const CLASSES: [&str; 5] = ["1xx", "2xx", "3xx", "4xx", "5xx"];

    CLASSES
        .get(usize::from(status_code / 100).wrapping_sub(1))
        .copied()
        .unwrap_or("other")
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };

    use super::*;

    #[tokio::test]
    async fn scrape_includes_http_and_order_collectors() {
        observe_request("GET", "/orders", 200, 0.042);
        observe_request("POST", "/orders", 400, 0.123);
        record_order_created();
        record_order_cancelled();
        record_stock_rejection("order");

        let _guard = InFlightRequestGuard::track();

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let body = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await
            .unwrap_or_default();

        for name in [
            "hilo_json_http_requests_total",
            "hilo_json_http_request_duration_seconds",
            "hilo_json_http_requests_in_flight",
            "hilo_orders_created_total",
            "hilo_orders_cancelled_total",
            "hilo_stock_rejections_total{source=\"order\"}",
        ] {
            assert!(body.contains(name), "missing {name} in scrape");
        }
    }

    #[test]
    fn status_class_buckets_by_hundreds() {
        assert_eq!(status_class(101), "1xx");
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
        assert_eq!(status_class(600), "other");
    }
}
