use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use loan_eligibility::error::AppError;
use loan_eligibility::{
    AmortizationRequest, AmortizationResult, ApplicantProfile, EligibilityEngine,
    PaymentFrequency,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

const REQUIRED_FIELDS_MESSAGE: &str = "Loan amount, monthly income, and tenure are required";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EvaluationOptions {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstallmentResponse {
    #[serde(flatten)]
    pub(crate) result: AmortizationResult,
    pub(crate) frequency: PaymentFrequency,
    pub(crate) frequency_label: &'static str,
}

pub(crate) fn with_eligibility_routes(engine: Arc<EligibilityEngine>) -> Router {
    Router::new()
        .route("/api/v1/emi", post(installment_endpoint))
        .route("/api/v1/eligibility", post(eligibility_endpoint))
        .with_state(engine)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn installment_endpoint(
    Json(request): Json<AmortizationRequest>,
) -> Json<InstallmentResponse> {
    let result = request.compute();
    Json(InstallmentResponse {
        result,
        frequency: request.frequency,
        frequency_label: request.frequency.label(),
    })
}

pub(crate) async fn eligibility_endpoint(
    State(engine): State<Arc<EligibilityEngine>>,
    Json(payload): Json<Value>,
) -> Result<Response, AppError> {
    if !has_required_fields(&payload) {
        warn!("eligibility request missing loan amount, income or tenure");
        let body = json!({ "error": REQUIRED_FIELDS_MESSAGE });
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let options = EvaluationOptions::deserialize(&payload)?;
    let profile = ApplicantProfile::deserialize(&payload)?;
    let as_of = options
        .as_of
        .unwrap_or_else(|| Local::now().date_naive());

    let eligibility = engine.evaluate(&profile, as_of)?;
    let body = json!({
        "success": true,
        "eligibility": eligibility,
        "statusLabel": eligibility.status.label(),
        "proposedEmi": engine.proposed_emi(&profile),
    });

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Missing, null and zero all count as absent.
fn has_required_fields(payload: &Value) -> bool {
    let present = |keys: &[&str]| {
        keys.iter().any(|key| match payload.get(*key) {
            Some(Value::Number(number)) => number.as_f64().is_some_and(|value| value != 0.0),
            Some(Value::Null) | None => false,
            Some(_) => true,
        })
    };

    present(&["loanAmount"])
        && present(&["monthlyIncome"])
        && present(&["preferredTenure", "preferredTenureMonths"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_eligibility_routes(Arc::new(EligibilityEngine::default())).layer(Extension(state))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");

        let response = app(true).oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let value = serde_json::from_slice(&bytes).expect("body is json");
        (status, value)
    }

    fn applicant() -> Value {
        json!({
            "loanType": "unsecured",
            "loanAmount": 150000,
            "preferredTenure": 12,
            "monthlyIncome": 50000,
            "occupation": "salaried",
            "yearsOfExperience": 5,
            "dateOfBirth": "1995-01-10",
            "existingLoans": [],
            "asOf": "2025-06-15"
        })
    }

    #[tokio::test]
    async fn eligibility_endpoint_scores_the_applicant() {
        let (status, body) = post_json("/api/v1/eligibility", applicant()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["eligibility"]["score"], 100);
        assert_eq!(body["eligibility"]["status"], "likely_approved");
        assert_eq!(body["statusLabel"], "Likely to be Approved");
        assert_eq!(
            body["eligibility"]["breakdown"]
                .as_array()
                .map(Vec::len),
            Some(5)
        );
    }

    #[tokio::test]
    async fn eligibility_endpoint_requires_amount_income_and_tenure() {
        for field in ["loanAmount", "monthlyIncome", "preferredTenure"] {
            let mut payload = applicant();
            payload[field] = json!(0);
            let (status, body) = post_json("/api/v1/eligibility", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
            assert_eq!(body["error"], REQUIRED_FIELDS_MESSAGE);
        }

        let mut payload = applicant();
        if let Some(fields) = payload.as_object_mut() {
            fields.remove("monthlyIncome");
        }
        let (status, _) = post_json("/api/v1/eligibility", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn eligibility_endpoint_reports_invalid_profiles() {
        let mut payload = applicant();
        payload["loanAmount"] = json!(-5000);
        let (status, body) = post_json("/api/v1/eligibility", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("loan amount")));

        let mut payload = applicant();
        payload["dateOfBirth"] = json!("10/01/1995");
        let (status, _) = post_json("/api/v1/eligibility", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn eligibility_endpoint_scores_blank_or_unknown_loan_types_as_unsecured() {
        for loan_type in ["", "personal"] {
            let mut payload = applicant();
            payload["loanType"] = json!(loan_type);
            payload["collateral"] = json!({ "estimatedValue": 1000000 });
            let (status, body) = post_json("/api/v1/eligibility", payload).await;

            assert_eq!(status, StatusCode::OK, "{loan_type:?}");
            assert_eq!(body["eligibility"]["score"], 100);
            assert!(body["eligibility"].get("collateral").is_none());
        }
    }

    #[tokio::test]
    async fn installment_endpoint_returns_the_schedule_totals() {
        let (status, body) = post_json(
            "/api/v1/emi",
            json!({ "principal": 1000000, "annualRate": 12, "tenureYears": 5 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["installmentAmount"], 22244.45);
        assert_eq!(body["totalPayments"], 60);
        assert_eq!(body["frequency"], "monthly");
        assert_eq!(body["frequencyLabel"], "Monthly");
    }

    #[tokio::test]
    async fn readiness_reflects_the_startup_flag() {
        let request = Request::builder()
            .uri("/ready")
            .body(Body::empty())
            .expect("request builds");
        let response = app(false).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
