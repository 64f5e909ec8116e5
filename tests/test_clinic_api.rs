use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use clinic_orchard::{create_clinic_routes, db::MemoryStore, state::ClinicState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> Router {
    create_clinic_routes(ClinicState {
        store: Arc::new(MemoryStore::seeded()),
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "GET {} failed", uri);

    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_patients_envelope_includes_doctors() {
    let json = get_json(create_test_app(), "/patients").await;

    let patients = json["patients"].as_array().unwrap();
    assert_eq!(patients.len(), 2);

    assert_eq!(patients[0]["id"], 1);
    assert_eq!(patients[0]["name"], "Patient 1");
    assert!(patients[0]["createdAt"].is_string());
    assert_eq!(patients[0]["doctors"][0]["name"], "John Doe");
    assert_eq!(patients[0]["doctors"][0]["specialty"], "Dentist");

    assert_eq!(patients[1]["doctors"][0]["name"], "Schmitty Footman");
    assert_eq!(patients[1]["doctors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_doctors_envelope_includes_patient_names() {
    let json = get_json(create_test_app(), "/doctors").await;

    let doctors = json["doctors"].as_array().unwrap();
    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0]["name"], "John Doe");
    assert_eq!(doctors[0]["specialty"], "Dentist");
    assert_eq!(doctors[1]["specialty"], "Podiatrist");

    let patients = doctors[1]["patients"].as_array().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0]["name"], "Patient 2");
    // Only the name is exposed on nested patients
    assert!(patients[0].get("id").is_none());
}

#[tokio::test]
async fn test_appointments_envelope() {
    let json = get_json(create_test_app(), "/appointments").await;

    let appointments = json["appointments"].as_array().unwrap();
    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0]["reason"], "Teeth stuff");
    assert_eq!(appointments[0]["doctorId"], 1);
    assert_eq!(appointments[0]["patientId"], 1);
    assert_eq!(appointments[1]["reason"], "Foot stuff");
    assert_eq!(appointments[1]["doctorId"], 2);
}

#[tokio::test]
async fn test_single_patient_and_doctor() {
    let json = get_json(create_test_app(), "/patients/2").await;
    assert_eq!(json["patient"]["name"], "Patient 2");
    assert_eq!(json["patient"]["doctors"][0]["name"], "Schmitty Footman");

    let json = get_json(create_test_app(), "/doctors/1").await;
    assert_eq!(json["doctor"]["name"], "John Doe");
    assert_eq!(json["doctor"]["patients"][0]["name"], "Patient 1");
}

#[tokio::test]
async fn test_missing_patient_is_not_found() {
    let (status, body) = get(create_test_app(), "/patients/99").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "Patient 99 not found");

    let (status, _) = get(create_test_app(), "/doctors/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (status, _) = get(create_test_app(), "/patients/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_store_returns_empty_lists() {
    let app = create_clinic_routes(ClinicState {
        store: Arc::new(MemoryStore::new()),
    });

    let json = get_json(app, "/patients").await;
    assert_eq!(json, serde_json::json!({ "patients": [] }));
}
