//! Instrumented handler wrapper.
//!
//! Decorates a route handler with a span and request metrics. The wrapper
//! only observes: status, headers and body pass through untouched.
//!
//! Completion is recorded from a drop guard, so a request whose future is
//! dropped (client gone, server stopping, handler panic) is still counted,
//! with a `cancelled` outcome.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    handler::Handler,
    middleware::{self, Next},
    response::Response,
    routing::{any, MethodRouter},
};
use tracing::Instrument;

use crate::observability::metrics::{record_request, Outcome};

/// Operation name attached to a wrapped handler.
#[derive(Debug, Clone)]
struct RouteName(Arc<str>);

/// Wrap `handler` so every invocation on `path` is traced and measured.
///
/// The handler receives requests for every method; method checks stay the
/// handler's business.
pub fn instrument_handler<H, T>(path: &str, handler: H) -> MethodRouter
where
    H: Handler<T, ()>,
    T: 'static,
{
    any(handler).layer(middleware::from_fn_with_state(
        RouteName(Arc::from(path)),
        observe,
    ))
}

async fn observe(State(route): State<RouteName>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route_name: &str = &route.0;
    let span = tracing::info_span!(
        "http.request",
        otel.name = %route_name,
        http.method = %method,
        http.route = %route_name,
        http.status_code = tracing::field::Empty,
    );

    let mut timer = RequestTimer::start(route.0.clone(), method.as_str());

    let response = async {
        tracing::debug!("request started");
        let response = next.run(request).await;
        tracing::debug!(status = response.status().as_u16(), "request completed");
        response
    }
    .instrument(span.clone())
    .await;

    let status = response.status().as_u16();
    span.record("http.status_code", status);
    timer.complete(status);

    response
}

/// Records request metrics when dropped.
struct RequestTimer {
    route: Arc<str>,
    method: String,
    started: Instant,
    outcome: Outcome,
}

impl RequestTimer {
    fn start(route: Arc<str>, method: &str) -> Self {
        Self {
            route,
            method: method.to_string(),
            started: Instant::now(),
            outcome: Outcome::Cancelled,
        }
    }

    fn complete(&mut self, status: u16) {
        self.outcome = Outcome::Completed(status);
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        record_request(&self.route, &self.method, self.outcome, self.started.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::metrics::{REQUESTS_TOTAL, REQUEST_DURATION_SECONDS};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use axum::Router;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use tower::ServiceExt;

    async fn teapot() -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
        (
            StatusCode::IM_A_TEAPOT,
            [(header::CONTENT_TYPE, "text/x-tea")],
            "short and stout",
        )
    }

    fn counter_labels(snapshotter: &Snapshotter) -> Vec<(Vec<(String, String)>, u64)> {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter(|(key, _, _, _)| key.key().name() == REQUESTS_TOTAL)
            .filter_map(|(key, _, _, value)| match value {
                DebugValue::Counter(count) => Some((
                    key.key()
                        .labels()
                        .map(|l| (l.key().to_string(), l.value().to_string()))
                        .collect(),
                    count,
                )),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_wrapper_passes_response_through() {
        let router = Router::new().route("/tea", instrument_handler("/tea", teapot));

        let response = router
            .oneshot(HttpRequest::builder().uri("/tea").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/x-tea"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"short and stout");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_requests_reach_prometheus_exposition() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        let router = Router::new()
            .route("/x", instrument_handler("/x", || async { "ok" }))
            .route(
                "/missing",
                instrument_handler("/missing", || async { StatusCode::NOT_FOUND }),
            );

        for uri in ["/x", "/missing"] {
            let response = router
                .clone()
                .oneshot(HttpRequest::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            to_bytes(response.into_body(), usize::MAX).await.unwrap();
        }

        let rendered = handle.render();
        assert!(
            rendered.contains(r#"http_server_requests_total{route="/x",method="GET",status_code="200"} 1"#),
            "{rendered}"
        );
        assert!(
            rendered.contains(
                r#"http_server_requests_total{route="/missing",method="GET",status_code="404"} 1"#
            ),
            "{rendered}"
        );
        assert!(rendered.contains(REQUEST_DURATION_SECONDS), "{rendered}");
    }

    #[test]
    fn test_timer_records_completed_request() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let mut timer = RequestTimer::start(Arc::from("/create"), "POST");
            timer.complete(200);
        });

        let counters = counter_labels(&snapshotter);
        assert_eq!(counters.len(), 1);
        let (labels, count) = &counters[0];
        assert_eq!(*count, 1);
        assert!(labels.contains(&("route".to_string(), "/create".to_string())));
        assert!(labels.contains(&("method".to_string(), "POST".to_string())));
        assert!(labels.contains(&("status_code".to_string(), "200".to_string())));
    }

    #[test]
    fn test_timer_records_cancelled_request() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let timer = RequestTimer::start(Arc::from("/"), "GET");
            drop(timer);
        });

        let counters = counter_labels(&snapshotter);
        assert_eq!(counters.len(), 1);
        assert!(counters[0]
            .0
            .contains(&("status_code".to_string(), "none".to_string())));
    }
}
