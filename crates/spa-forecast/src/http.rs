//! HTTP endpoints for projections, defaults, catalog and reference data.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assumptions::{AssumptionPatch, AssumptionRecord};
use crate::catalog::ServiceCatalog;
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::reference::ReferenceTables;
use crate::report::{ProjectionSummary, ResultPeriod};

#[derive(Debug, Default, Deserialize)]
pub struct ProjectionRequest {
    /// Missing groups, or the whole field, fall back to the engine's baseline.
    #[serde(default)]
    pub assumptions: Option<AssumptionPatch>,
    #[serde(default)]
    pub period: ResultPeriod,
}

#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub period: ResultPeriod,
    pub assumptions: AssumptionRecord,
    pub result: ProjectionResult,
    pub summary: ProjectionSummary,
}

/// Router builder exposing the projection endpoints.
pub fn projection_router(engine: Arc<ProjectionEngine>) -> Router {
    Router::new()
        .route("/api/v1/projection", post(projection_handler))
        .route("/api/v1/assumptions/baseline", get(baseline_handler))
        .route("/api/v1/catalog", get(catalog_handler))
        .route("/api/v1/reference-tables", get(reference_handler))
        .with_state(engine)
}

pub(crate) async fn projection_handler(
    State(engine): State<Arc<ProjectionEngine>>,
    Json(request): Json<ProjectionRequest>,
) -> Json<ProjectionResponse> {
    let ProjectionRequest {
        assumptions,
        period,
    } = request;
    let defaulted = assumptions.is_none();
    let assumptions = engine.resolve(assumptions.unwrap_or_default());

    let result = engine.compute(&assumptions);
    let summary = ProjectionSummary::new(&result, period);
    info!(
        defaulted,
        period = period.label(),
        mix_is_valid = result.mix_is_valid,
        "projection served"
    );

    Json(ProjectionResponse {
        period,
        assumptions,
        result,
        summary,
    })
}

pub(crate) async fn baseline_handler(
    State(engine): State<Arc<ProjectionEngine>>,
) -> Json<AssumptionRecord> {
    Json(engine.baseline())
}

pub(crate) async fn catalog_handler(
    State(engine): State<Arc<ProjectionEngine>>,
) -> Json<ServiceCatalog> {
    Json(engine.catalog().clone())
}

pub(crate) async fn reference_handler(
    State(engine): State<Arc<ProjectionEngine>>,
) -> Json<ReferenceTables> {
    Json(ReferenceTables::for_catalog(engine.catalog()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        projection_router(Arc::new(ProjectionEngine::standard()))
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn projection_handler_defaults_to_baseline() {
        let engine = Arc::new(ProjectionEngine::standard());
        let Json(body) =
            projection_handler(State(engine.clone()), Json(ProjectionRequest::default())).await;

        assert_eq!(body.period, ResultPeriod::Monthly);
        assert_eq!(body.assumptions, engine.baseline());
        assert_eq!(body.result, engine.compute(&engine.baseline()));
        assert!(body.result.mix_is_valid);
    }

    #[tokio::test]
    async fn projection_route_accepts_partial_assumptions() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/projection",
                json!({
                    "period": "annual",
                    "assumptions": {
                        "volume": { "no_show_rate": 0.0 },
                        "ticket_overrides": { "relaxante-60": 600.0 }
                    }
                }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["period"], "annual");
        assert_eq!(payload["result"]["gross_sessions"], 492.0);
        assert_eq!(payload["result"]["net_sessions"], 492.0);
        let relaxante = payload["result"]["avg_price_by_service"]
            .as_array()
            .expect("service prices")
            .iter()
            .find(|item| item["id"] == "relaxante-60")
            .expect("relaxante present")
            .clone();
        assert_eq!(relaxante["avg_price"], 600.0);
        assert_eq!(relaxante["is_override"], true);
        assert_eq!(payload["summary"]["result"]["title"], "Annual result");
    }

    #[tokio::test]
    async fn partial_assumptions_use_the_loaded_catalog_baseline() {
        let catalog = ServiceCatalog::from_reader(
            "id,name,duration,full,p5,p10,p20\nhot-stone-90,Hot Stone,90',800,720,640,600\n"
                .as_bytes(),
        )
        .expect("catalog parses");
        let router = projection_router(Arc::new(ProjectionEngine::new(catalog)));

        let response = router
            .oneshot(post_json(
                "/api/v1/projection",
                json!({ "assumptions": { "volume": { "no_show_rate": 0.0 } } }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload["assumptions"]["service_mix"],
            json!({ "hot-stone-90": 100.0 })
        );
        assert_eq!(payload["result"]["mix_is_valid"], true);
        // 0.4 * 800 + 0.3 * 720 + 0.2 * 640 + 0.1 * 600
        let overall = payload["result"]["avg_price_overall"]
            .as_f64()
            .expect("overall price");
        assert!((overall - 724.0).abs() < 1e-9);
        assert_eq!(payload["result"]["net_sessions"], 492.0);
        let revenue = payload["result"]["revenue"].as_f64().expect("revenue");
        assert!((revenue - 492.0 * 724.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn projection_route_rejects_malformed_json() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/projection")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{ not json"))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn catalog_and_reference_routes_serve_static_data() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/catalog")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let catalog = read_json_body(response).await;
        assert_eq!(catalog.as_array().map(Vec::len), Some(7));

        let response = router()
            .oneshot(
                Request::get("/api/v1/reference-tables")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let tables = read_json_body(response).await;
        assert_eq!(tables["session_cost_total"], 69.73);
    }

    #[tokio::test]
    async fn baseline_route_returns_defaults() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/assumptions/baseline")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let baseline = read_json_body(response).await;
        assert_eq!(baseline["volume"]["hot_days"], 8.0);
        assert_eq!(baseline["package_mix"]["full"], 40.0);
        assert_eq!(baseline["ticket_overrides"], json!({}));
    }
}
