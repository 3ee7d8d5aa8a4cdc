use api::config::RateLimitSettings;
use api::service::ChurnService;
use api::{create_router, AppState};
use artifact_store::{ArtifactBundle, ArtifactPaths};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use feature_engine::{NumericInput, RawCustomerRecord};
use inference_engine::{ChurnLabel, InferenceError};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

fn artifacts() -> Arc<ArtifactBundle> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../model_artifacts");
    Arc::new(ArtifactBundle::load(&ArtifactPaths::in_dir(dir)).expect("load fixtures"))
}

fn service() -> ChurnService {
    ChurnService::new(artifacts())
}

fn router() -> axum::Router {
    create_router(Arc::new(AppState::new(artifacts())), &RateLimitSettings::default())
}

/// New customer on a month-to-month fiber plan paying by electronic check.
fn at_risk_record() -> RawCustomerRecord {
    RawCustomerRecord {
        gender: "Female".to_string(),
        senior_citizen: 1,
        partner: "No".to_string(),
        dependents: "No".to_string(),
        tenure: 1,
        phone_service: "Yes".to_string(),
        multiple_lines: "No".to_string(),
        internet_service: "Fiber optic".to_string(),
        online_security: "No".to_string(),
        online_backup: "No".to_string(),
        device_protection: "No".to_string(),
        tech_support: "No".to_string(),
        streaming_tv: "No".to_string(),
        streaming_movies: "No".to_string(),
        contract: "Month-to-month".to_string(),
        paperless_billing: "Yes".to_string(),
        payment_method: "Electronic check".to_string(),
        monthly_charges: 90.0,
        total_charges: NumericInput::Number(90.0),
    }
}

/// Six-year customer on a two-year contract with no internet service.
fn loyal_record() -> RawCustomerRecord {
    RawCustomerRecord {
        gender: "Male".to_string(),
        senior_citizen: 0,
        partner: "Yes".to_string(),
        dependents: "Yes".to_string(),
        tenure: 72,
        phone_service: "Yes".to_string(),
        multiple_lines: "No".to_string(),
        internet_service: "No".to_string(),
        online_security: "No internet service".to_string(),
        online_backup: "No internet service".to_string(),
        device_protection: "No internet service".to_string(),
        tech_support: "No internet service".to_string(),
        streaming_tv: "No internet service".to_string(),
        streaming_movies: "No internet service".to_string(),
        contract: "Two year".to_string(),
        paperless_billing: "No".to_string(),
        payment_method: "Mailed check".to_string(),
        monthly_charges: 20.0,
        total_charges: NumericInput::Number(1440.0),
    }
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[test]
fn at_risk_customer_is_predicted_to_churn() {
    let result = service().predict_churn(&at_risk_record()).unwrap();
    assert_eq!(result.prediction, ChurnLabel::Yes);
    assert!(result.probability > 50.0);
    assert!(result.probability <= 100.0);
}

#[test]
fn long_tenure_two_year_contract_is_retained() {
    let result = service().predict_churn(&loyal_record()).unwrap();
    assert_eq!(result.prediction, ChurnLabel::No);
    assert!(result.probability >= 0.0 && result.probability < 50.0);
}

#[test]
fn probability_has_two_decimals() {
    let result = service().predict_churn(&at_risk_record()).unwrap();
    let scaled = result.probability * 100.0;
    assert!((scaled - scaled.round()).abs() < 1e-6);
}

#[test]
fn unknown_categories_do_not_fail() {
    let mut record = loyal_record();
    record.contract = "Lifetime".to_string();
    record.internet_service = "Satellite".to_string();
    record.gender = "".to_string();
    assert!(service().predict_churn(&record).is_ok());
}

#[test]
fn blank_total_charges_still_scores() {
    let mut record = at_risk_record();
    record.total_charges = NumericInput::from("");
    assert!(service().predict_churn(&record).is_ok());
}

#[test]
fn minus_one_total_charges_is_an_error_not_a_prediction() {
    use feature_engine::FeatureError;

    let mut record = at_risk_record();
    record.total_charges = NumericInput::Number(-1.0);
    assert!(matches!(
        service().predict_churn(&record),
        Err(InferenceError::Features(FeatureError::NonFiniteFeature(_)))
    ));

    record.monthly_charges = 0.0;
    assert!(matches!(
        service().predict_churn(&record),
        Err(InferenceError::Features(FeatureError::NonFiniteFeature(_)))
    ));
}

#[test]
fn concurrent_requests_agree() {
    let service = service();
    let expected = service.predict_churn(&at_risk_record()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| service.predict_churn(&at_risk_record()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn drifted_classifier_surfaces_inference_error() {
    use feature_engine::Scaler;
    use inference_engine::{ClassScores, Classifier};

    // Reports no width up front, so the bundle accepts it; fails at scoring time.
    struct Drifted;

    impl Classifier for Drifted {
        fn name(&self) -> &str {
            "drifted"
        }

        fn input_dim(&self) -> Option<usize> {
            None
        }

        fn score(&self, features: &[f64]) -> Result<ClassScores, InferenceError> {
            Err(InferenceError::InvalidInputShape {
                expected: features.len() + 1,
                actual: features.len(),
            })
        }
    }

    let bundle = artifacts();
    let scaler: Scaler = bundle.scaler().clone();
    let drifted = ArtifactBundle::from_parts(bundle.schema().clone(), scaler, Box::new(Drifted))
        .unwrap();

    let service = ChurnService::new(Arc::new(drifted));
    assert!(matches!(
        service.predict_churn(&at_risk_record()),
        Err(InferenceError::InvalidInputShape { .. })
    ));
}

#[tokio::test]
async fn predict_endpoint_returns_label_and_probability() {
    let body = serde_json::to_value(at_risk_record()).unwrap();
    let (status, value) = post_json(router(), "/predict", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["prediction"], "Yes");
    assert!(value["probability"].as_f64().unwrap() > 50.0);
}

#[tokio::test]
async fn predict_endpoint_accepts_string_total_charges() {
    let mut body = serde_json::to_value(loyal_record()).unwrap();
    body["TotalCharges"] = json!(" ");
    let (status, value) = post_json(router(), "/predict", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(value["prediction"] == "Yes" || value["prediction"] == "No");
}

#[tokio::test]
async fn predict_endpoint_rejects_out_of_range_values() {
    let mut body = serde_json::to_value(loyal_record()).unwrap();
    body["SeniorCitizen"] = json!(3);
    let (status, value) = post_json(router(), "/predict", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(value["detail"].as_str().unwrap().contains("SeniorCitizen"));
}

#[tokio::test]
async fn predict_endpoint_rejects_negative_total_charges() {
    let mut body = serde_json::to_value(at_risk_record()).unwrap();
    body["TotalCharges"] = json!(-1.0);
    let (status, value) = post_json(router(), "/predict", body.clone()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(value["detail"].as_str().unwrap().contains("TotalCharges"));

    body["MonthlyCharges"] = json!(0.0);
    let (status, _) = post_json(router(), "/predict", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn predict_endpoint_rejects_missing_fields() {
    let mut body = serde_json::to_value(loyal_record()).unwrap();
    body.as_object_mut().unwrap().remove("Contract");
    let (status, _) = post_json(router(), "/predict", body).await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn root_and_health_respond() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["message"], "Welcome to the Churn Prediction API");

    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["artifacts"]["columns"], 30);
    assert_eq!(value["artifacts"]["classifier"], "logistic");
}

#[tokio::test]
async fn metrics_is_not_found_without_exporter() {
    let response = router()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
