//! HTTP handlers

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use feature_core::FeatureContract;
use tower_http::trace::TraceLayer;

use crate::error::ServingError;
use crate::ready::{Prediction, ReadyContext};
use crate::page;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ready: Arc<ReadyContext>,
    pub predict_timeout: Duration,
}

impl AppState {
    pub fn new(ready: ReadyContext, predict_timeout: Duration) -> Self {
        Self {
            ready: Arc::new(ready),
            predict_timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn home() -> Html<String> {
    Html(page::render(None, None))
}

/// Run `work` on the blocking pool, giving up after `timeout`.
pub async fn run_blocking<T, F>(timeout: Duration, work: F) -> Result<T, ServingError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join)) => Err(ServingError::Prediction(join.to_string())),
        Err(_) => Err(ServingError::PredictionTimeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

/// Score the six raw form fields.
pub async fn predict(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, ServingError> {
    let inputs = FeatureContract::parse_inputs(|name| fields.get(name).map(String::as_str))?;
    let ready = Arc::clone(&state.ready);
    let prediction: Prediction =
        run_blocking(state.predict_timeout, move || ready.score(&inputs)).await??;
    tracing::info!(
        class = prediction.class,
        probability = prediction.probability,
        "prediction served"
    );
    Ok(Html(page::render(Some(prediction.label()), None)))
}

/// Liveness probe
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe. A running server always holds a loaded context.
pub async fn readiness(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.ready.model_kind().name(),
        "model_path": state.ready.model_path().display().to_string(),
        "scaler_path": state.ready.scaler_path().display().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ready::fixtures::{fitted_parts, write_slot};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn state() -> AppState {
        let (model, scaler) = fitted_parts();
        AppState::new(
            ReadyContext::from_parts(model, scaler).unwrap(),
            Duration::from_millis(2000),
        )
    }

    fn form(pairs: &[(&str, &str)]) -> Form<HashMap<String, String>> {
        Form(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn full_form(fico: &str) -> Form<HashMap<String, String>> {
        form(&[
            ("credit_lines_outstanding", "1"),
            ("loan_amt_outstanding", "3200"),
            ("total_debt_outstanding", "5500"),
            ("income", "55000"),
            ("years_employed", "3"),
            ("fico_score", fico),
        ])
    }

    async fn body(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_predict_labels() {
        let Html(page) = predict(State(state()), full_form("520")).await.unwrap();
        assert!(page.contains("Predicted Status: Will Default"));
        let Html(page) = predict(State(state()), full_form("690")).await.unwrap();
        assert!(page.contains("Predicted Status: Will Not Default"));
    }

    #[tokio::test]
    async fn test_form_order_does_not_matter() {
        let shuffled = form(&[
            ("fico_score", "690"),
            ("years_employed", "3"),
            ("income", "55000"),
            ("total_debt_outstanding", "5500"),
            ("loan_amt_outstanding", "3200"),
            ("credit_lines_outstanding", "1"),
            ("submit", "Predict"),
        ]);
        let Html(page) = predict(State(state()), shuffled).await.unwrap();
        assert!(page.contains("Will Not Default"));
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request_without_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let slot = write_slot(tmp.path());
        let before = (
            std::fs::read(&slot.model_path).unwrap(),
            std::fs::read(&slot.scaler_path).unwrap(),
        );
        let state = AppState::new(ReadyContext::load(&slot).unwrap(), Duration::from_secs(2));

        let missing = form(&[
            ("credit_lines_outstanding", "1"),
            ("loan_amt_outstanding", "3200"),
            ("total_debt_outstanding", "5500"),
            ("income", "55000"),
            ("years_employed", "3"),
        ]);
        let response = predict(State(state), missing).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let page = body(response).await;
        assert!(page.contains("fico_score"));
        assert!(!page.contains("Predicted Status"));

        let after = (
            std::fs::read(&slot.model_path).unwrap(),
            std::fs::read(&slot.scaler_path).unwrap(),
        );
        assert_eq!(before, after);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_non_numeric_field_is_bad_request() {
        let response = predict(State(state()), full_form("<b>high</b>"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let page = body(response).await;
        assert!(page.contains("fico_score"));
        assert!(page.contains("&lt;b&gt;"));
    }

    #[tokio::test]
    async fn test_slow_prediction_times_out() {
        let result = run_blocking(Duration::from_millis(10), || {
            std::thread::sleep(Duration::from_millis(300));
        })
        .await;
        let error = result.unwrap_err();
        assert!(matches!(error, ServingError::PredictionTimeout { timeout_ms: 10 }));
        assert_eq!(
            error.into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let Json(live) = liveness().await;
        assert_eq!(live["status"], "alive");
        let Json(ready) = readiness(State(state())).await;
        assert_eq!(ready["status"], "ready");
        assert_eq!(ready["model"], "LogisticRegression");
    }

    #[tokio::test]
    async fn test_home_renders_form() {
        let Html(page) = home().await;
        assert!(page.contains("action=\"/predict\""));
    }
}
