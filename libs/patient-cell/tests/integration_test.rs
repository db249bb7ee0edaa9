use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use patient_cell::create_patient_router;
use patient_cell::models::{CreatePatientRequest, Patient};
use patient_cell::services::PatientService;
use shared_utils::test_utils::{count_rows, test_database};

fn new_patient(doctor_id: &str, name: &str, r4: Option<&str>) -> CreatePatientRequest {
    CreatePatientRequest {
        doctor_id: doctor_id.to_string(),
        name: name.to_string(),
        r4: r4.map(str::to_string),
    }
}

#[tokio::test]
async fn patients_are_scoped_to_their_doctor() {
    let db = test_database();
    let service = PatientService::new(&db);

    let sara = service.create_patient(new_patient("d1", "Sara", Some("R-100"))).await.unwrap();
    service.create_patient(new_patient("d2", "Omar", None)).await.unwrap();

    let roster = service.list_patients("d1").await.unwrap();
    assert_eq!(roster, vec![sara.clone()]);
    assert_eq!(sara.r4, "R-100");
    assert_eq!(sara.doctor_id, "d1");
}

#[tokio::test]
async fn missing_secondary_id_is_stored_empty() {
    let db = test_database();
    let service = PatientService::new(&db);

    service.create_patient(new_patient("d1", "Omar", None)).await.unwrap();

    let roster = service.list_patients("d1").await.unwrap();
    assert_eq!(roster[0].r4, "");
}

#[tokio::test]
async fn delete_ignores_ownership_and_unknown_ids() {
    let db = test_database();
    let service = PatientService::new(&db);

    let patient = service.create_patient(new_patient("d1", "Sara", None)).await.unwrap();
    service.delete_patient(&patient.id).await.unwrap();
    service.delete_patient("never-existed").await.unwrap();

    assert_eq!(count_rows(&db, "patients").await, 0);
}

#[tokio::test]
async fn roster_endpoints() {
    let db = test_database();
    let app = create_patient_router(db.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/patients")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "doctor_id": "d1", "name": "Lina" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Patient = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.name, "Lina");
    assert_eq!(created.r4, "");

    let request = Request::builder()
        .uri("/patients?doctor_id=d1")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let listed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/patients/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let status: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(status["status"], "deleted");

    assert_eq!(count_rows(&db, "patients").await, 0);
}

#[tokio::test]
async fn listing_requires_doctor_id() {
    let db = test_database();
    let request = Request::builder()
        .uri("/patients")
        .body(Body::empty())
        .unwrap();

    let response = create_patient_router(db).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
