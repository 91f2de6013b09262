use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use rent_backend::inference::{LinearRentModel, RentModel};
use rent_backend::models::{ErrorResponse, HealthResponse, HomeResponse, PredictionResponse};
use rent_backend::routes;
use serde_json::{json, Value};

fn model() -> Arc<dyn RentModel> {
    let coefficients: BTreeMap<String, f64> = [
        ("const", 7.0),
        ("sqft", 0.001),
        ("laundry_in-unit", 0.1),
        ("hood_district_marina", 0.2),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    Arc::new(LinearRentModel::new("test-1", coefficients).unwrap())
}

fn body(overrides: Value) -> Value {
    let mut base = json!({
        "sqft": 800,
        "beds": 2,
        "bath": 1.0,
        "laundry": "(a) in-unit",
        "pets": "(a) both",
        "housing_type": "(a) single",
        "parking": "(a) unknown",
        "hood_district": 7
    });
    if let (Some(base), Some(overrides)) = (base.as_object_mut(), overrides.as_object()) {
        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }
    }
    base
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::from(model()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn home_describes_service() {
    let app = app!();
    let req = test::TestRequest::get().uri("/").to_request();
    let resp: HomeResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.message, "San Francisco Rental Price Prediction");
}

#[actix_web::test]
async fn health_reports_model_version() {
    let app = app!();
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp, HealthResponse::ok("test-1"));
}

#[actix_web::test]
async fn predicts_rent_for_valid_request() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(body(json!({})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp: PredictionResponse = test::read_body_json(resp).await;
    let expected = ((7.0f64 + 0.2 + 0.1 + 0.001 * 800.0).exp() * 100.0).round() / 100.0;
    assert_eq!(resp.status, "success");
    assert_eq!(resp.message, "Prediction successful");
    assert_eq!(resp.model_version, "test-1");
    assert_eq!(resp.predicted_rent, expected);
    assert!(
        chrono::DateTime::parse_from_rfc3339(&resp.timestamp).is_ok(),
        "{}",
        resp.timestamp
    );
}

#[actix_web::test]
async fn accepts_float_district() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(body(json!({ "hood_district": 7.0 })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn accepts_integral_float_counts() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(body(json!({ "sqft": 800.0, "beds": 2.0 })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(body(json!({ "sqft": 800.5 })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn small_area_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(body(json!({ "sqft": 50 })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        resp,
        ErrorResponse::new("Invalid input: Area must be at least 100 sqft")
    );
}

#[actix_web::test]
async fn out_of_range_district_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(body(json!({ "hood_district": 11 })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(resp.status, "error");
    assert!(resp.detail.starts_with("Invalid input:"), "{}", resp.detail);
}

#[actix_web::test]
async fn unknown_category_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(body(json!({ "parking": "(e) valet" })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn malformed_json_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/predict")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn unknown_route_is_json_404() {
    let app = app!();
    let req = test::TestRequest::get().uri("/model-info").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(resp, ErrorResponse::new("Not Found"));
}

#[actix_web::test]
async fn cors_allows_configured_origin() {
    let origins = vec!["http://localhost:5173".to_string()];
    let app = test::init_service(
        App::new()
            .wrap(rent_backend::cors(&origins))
            .app_data(web::Data::from(model()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "http://localhost:5173"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
}
