//! Route tests driven through the router with `oneshot`.

use std::sync::Arc;
use std::time::Duration;

use api::{ApiConfig, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use market_data::{async_trait, QuoteBackend, ServiceError, SwapQuote, SwapQuoteRequest};
use mock_brain::ScriptedBrain;
use orchestrator::{Backends, Brain, Orchestrator, RouterConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

struct FixedQuotes;

#[async_trait]
impl QuoteBackend for FixedQuotes {
    async fn quote(&self, request: &SwapQuoteRequest) -> Result<SwapQuote, ServiceError> {
        if request.output_mint == "Nowhere" {
            return Err(ServiceError::NoRoute);
        }
        Ok(SwapQuote {
            in_amount: request.amount.clone(),
            out_amount: "4200".to_string(),
            price_impact_pct: None,
            route_count: 2,
        })
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn app_with(brain: Arc<ScriptedBrain>, config: ApiConfig) -> Router {
    let tiers: Vec<Arc<dyn Brain>> = vec![brain];
    let orchestrator = Orchestrator::with_backends(&RouterConfig::default(), tiers, Backends::demo());
    api::app(AppState::new(Arc::new(orchestrator), Arc::new(FixedQuotes), &config))
}

fn app(brain: Arc<ScriptedBrain>) -> Router {
    app_with(brain, ApiConfig::default())
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(Arc::new(ScriptedBrain::new("openai"))), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "ok",
            "providers": ["openai"],
            "services": ["new_listings", "top_holders", "price", "generic_info", "generic"],
            "trackedClients": 0
        })
    );
}

#[tokio::test]
async fn empty_prompt_rejected_before_routing() {
    let brain = Arc::new(ScriptedBrain::new("openai").on_classification(r#"{"kind":"generic"}"#));

    for body in [json!({ "prompt": "" }), json!({ "prompt": 42 }), json!({})] {
        let (status, response) = send(app(brain.clone()), post("/api/query", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "ok": false, "error": "Missing prompt" }));
    }

    assert_eq!(brain.call_count(), 0);
}

#[tokio::test]
async fn unparsable_body_is_missing_prompt() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/query")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, response) = send(app(Arc::new(ScriptedBrain::new("openai"))), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Missing prompt");
}

#[tokio::test]
async fn query_returns_envelope() {
    let brain = Arc::new(
        ScriptedBrain::new("openai").on_classification(r#"{"kind":"price","token":"SOL"}"#),
    );
    let (status, body) = send(
        app(brain),
        post("/api/query", json!({ "prompt": "sol?", "wallet": "Wallet1" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["wallet"], "Wallet1");
    assert_eq!(body["meta"]["ai"]["source"], "primary_provider");
    assert_eq!(body["meta"]["svc"]["name"], "birdeye:price");
    assert_eq!(body["data"]["table"][0]["token"], "SOL");
}

#[tokio::test]
async fn rate_limit_applies_per_client() {
    let brain = Arc::new(ScriptedBrain::new("openai").on_classification(r#"{"kind":"generic"}"#));
    let config = ApiConfig {
        rate_capacity: 2,
        rate_refill: Duration::from_secs(3600),
        ..ApiConfig::default()
    };
    let app = app_with(brain, config);

    let from = |ip: &str| {
        Request::builder()
            .method("POST")
            .uri("/api/query")
            .header("x-forwarded-for", ip)
            .body(Body::from(json!({ "prompt": "gm" }).to_string()))
            .unwrap()
    };

    for _ in 0..2 {
        let (status, _) = send(app.clone(), from("10.0.0.1, 10.0.0.2")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(app.clone(), from("10.0.0.1")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({ "ok": false, "error": "Too many requests. Slow down." }));

    let (status, _) = send(app, from("10.0.0.9")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rate_limiter_forgets_least_recent_client() {
    let brain = Arc::new(ScriptedBrain::new("openai").on_classification(r#"{"kind":"generic"}"#));
    let config = ApiConfig {
        rate_capacity: 1,
        rate_refill: Duration::from_secs(3600),
        rate_max_clients: 1,
        ..ApiConfig::default()
    };
    let app = app_with(brain, config);

    let from = |ip: &str| {
        Request::builder()
            .method("POST")
            .uri("/api/query")
            .header("x-forwarded-for", ip)
            .body(Body::from(json!({ "prompt": "gm" }).to_string()))
            .unwrap()
    };

    assert_eq!(send(app.clone(), from("10.0.0.1")).await.0, StatusCode::OK);
    assert_eq!(send(app.clone(), from("10.0.0.1")).await.0, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(send(app.clone(), from("10.0.0.2")).await.0, StatusCode::OK);

    let health = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (_, body) = send(app.clone(), health).await;
    assert_eq!(body["trackedClients"], 1);

    // evicted, so it starts over with a full bucket
    assert_eq!(send(app, from("10.0.0.1")).await.0, StatusCode::OK);
}

#[tokio::test]
async fn quote_returns_out_amount() {
    let (status, body) = send(
        app(Arc::new(ScriptedBrain::new("openai"))),
        post(
            "/api/quote",
            json!({ "inputMint": "In", "outputMint": "Out", "amount": "1000000" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "data": { "outAmount": "4200", "routeCount": 2 } }));
}

#[tokio::test]
async fn quote_errors() {
    let (status, body) = send(
        app(Arc::new(ScriptedBrain::new("openai"))),
        post("/api/quote", json!({ "inputMint": "In" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing swap params");

    let (status, body) = send(
        app(Arc::new(ScriptedBrain::new("openai"))),
        post(
            "/api/quote",
            json!({ "inputMint": "In", "outputMint": "Nowhere", "amount": 5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "ok": false, "error": "No route found" }));
}

#[tokio::test]
async fn signin_upserts_wallet() {
    let app = app(Arc::new(ScriptedBrain::new("openai")));

    let (status, first) = send(app.clone(), post("/api/signin", json!({ "wallet": "Wallet1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["ok"], true);
    assert_eq!(first["user"]["wallet"], "Wallet1");
    assert!(first["user"]["createdAt"].as_u64().unwrap() > 0);

    let (_, second) = send(app.clone(), post("/api/signin", json!({ "wallet": "Wallet1" }))).await;
    assert_eq!(first["user"], second["user"]);

    let (status, body) = send(app, post("/api/signin", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing wallet");
}
