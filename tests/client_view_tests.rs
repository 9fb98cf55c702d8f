/// Tests for the typed API client and the list/form view state, run
/// against a wiremock server standing in for the real API.
use chrono::NaiveDate;
use seguros_api::api_client::{ClientError, InsuredsClient};
use seguros_api::view_state::{FormMode, InsuredForm, ListViewState, SubmitError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn insured_json(id: i64, email: &str) -> serde_json::Value {
    json!({
        "identificationNumber": id,
        "firstName": "Juan",
        "middleName": "Carlos",
        "firstLastName": "Perez",
        "secondLastName": "Garcia",
        "contactPhone": "3001234567",
        "email": email,
        "birthDate": "1990-05-15",
        "estimatedRequestValue": "5000000.50",
        "observations": null,
        "createdAt": "2026-01-10T12:00:00Z"
    })
}

fn page_json(items: Vec<serde_json::Value>, total: i64) -> serde_json::Value {
    json!({
        "totalRecords": total,
        "totalPages": (total + 9) / 10,
        "currentPage": 1,
        "pageSize": 10,
        "data": items
    })
}

async fn mock_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/insureds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn load_page_replaces_items_and_totals() {
    let server = MockServer::start().await;
    mock_list(
        &server,
        page_json(vec![insured_json(1, "a@b.com"), insured_json(2, "c@d.com")], 2),
    )
    .await;

    let client = InsuredsClient::new(server.uri()).unwrap();
    let mut state = ListViewState::new();
    state.load_page(&client).await.unwrap();

    assert_eq!(state.items.len(), 2);
    assert_eq!(state.total_records, 2);
    assert_eq!(state.current_page, 1);
    assert!(!state.loading);
}

#[tokio::test]
async fn list_sends_paging_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/insureds"))
        .and(query_param("pageNumber", "3"))
        .and(query_param("pageSize", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 0,
            "totalPages": 0,
            "currentPage": 3,
            "pageSize": 20,
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = InsuredsClient::new(server.uri()).unwrap();
    let mut state = ListViewState::new();
    state.change_page(&client, 3, 20).await.unwrap();

    assert_eq!(state.current_page, 3);
    assert_eq!(state.page_size, 20);
}

#[tokio::test]
async fn search_replaces_list_and_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/insureds/search/456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [insured_json(123456789, "a@b.com")],
            "totalCount": 1,
            "searchTerm": "456",
            "message": "Found 1 insured(s)"
        })))
        .mount(&server)
        .await;

    let client = InsuredsClient::new(server.uri()).unwrap();
    let mut state = ListViewState::new();
    state.search_term = "456".to_string();
    state.search(&client).await.unwrap();

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.total_records, 1);
    assert_eq!(state.take_notice().as_deref(), Some("Found 1 insured(s)"));
    assert!(state.take_notice().is_none());
}

#[tokio::test]
async fn blank_search_reloads_the_current_page() {
    let server = MockServer::start().await;
    // Only the list endpoint is mounted; a search request would 404.
    mock_list(&server, page_json(vec![insured_json(1, "a@b.com")], 1)).await;

    let client = InsuredsClient::new(server.uri()).unwrap();
    let mut state = ListViewState::new();
    state.search_term = "   ".to_string();
    state.search(&client).await.unwrap();

    assert_eq!(state.items.len(), 1);
    assert!(state.take_notice().is_none());
}

#[tokio::test]
async fn delete_requires_confirmation_then_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/insureds/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Insured deleted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mock_list(&server, page_json(vec![], 0)).await;

    let client = InsuredsClient::new(server.uri()).unwrap();
    let mut state = ListViewState::new();
    state.items = vec![];
    state.request_delete(7);
    assert_eq!(state.pending_delete, Some(7));

    state.confirm_delete(&client).await.unwrap();
    assert!(state.pending_delete.is_none());
    assert_eq!(
        state.take_notice().as_deref(),
        Some("Insured deleted successfully")
    );
    assert_eq!(state.total_records, 0);
}

#[tokio::test]
async fn cancelled_delete_sends_nothing() {
    let server = MockServer::start().await;
    // No DELETE mock mounted: any request would fail the test via error.
    let client = InsuredsClient::new(server.uri()).unwrap();
    let mut state = ListViewState::new();

    state.request_delete(7);
    state.cancel_delete();
    assert!(state.pending_delete.is_none());

    // Confirming with no pending id is a no-op.
    state.confirm_delete(&client).await.unwrap();
}

#[tokio::test]
async fn error_envelope_is_decoded_into_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/insureds/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Insured with identification number 99 not found"
        })))
        .mount(&server)
        .await;

    let client = InsuredsClient::new(server.uri()).unwrap();
    let err = client.get_by_id(99).await.unwrap_err();

    match err {
        ClientError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Insured with identification number 99 not found");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn validation_errors_reach_the_caller_per_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/insureds"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "One or more validation errors occurred",
            "errors": ["firstName: must be between 2 and 50 characters"]
        })))
        .mount(&server)
        .await;

    let client = InsuredsClient::new(server.uri()).unwrap();
    // A syntactically valid request; the mocked server rejects it anyway,
    // exercising the envelope decoding path.
    let request = valid_form()
        .to_create_request(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap())
        .unwrap();

    let err = client.create(&request).await.unwrap_err();
    match err {
        ClientError::Api { status, errors, .. } => {
            assert_eq!(status, 400);
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("firstName: "));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

fn valid_form() -> InsuredForm {
    let mut form = InsuredForm::new();
    form.set_identification_number(123456789);
    form.first_name = "Juan".to_string();
    form.first_last_name = "Perez".to_string();
    form.second_last_name = "Garcia".to_string();
    form.contact_phone = "3001234567".to_string();
    form.email = "juan.perez@example.com".to_string();
    form.birth_date = NaiveDate::from_ymd_opt(1990, 5, 15);
    form.estimated_request_value = "5000000.50".to_string();
    form
}

#[tokio::test]
async fn form_submit_creates_and_returns_the_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/insureds"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("location", "/api/insureds/123456789")
                .set_body_json(insured_json(123456789, "juan.perez@example.com")),
        )
        .mount(&server)
        .await;

    let client = InsuredsClient::new(server.uri()).unwrap();
    let form = valid_form();
    let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

    let created = form.submit(&client, today).await.unwrap();
    assert_eq!(created.identification_number, 123456789);
    assert!(created.updated_at.is_none());
}

#[test]
fn form_mirrors_server_validation_before_submitting() {
    let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

    let mut form = valid_form();
    form.email = "not-an-email".to_string();
    let errors = form.validate(today);
    assert_eq!(errors, vec!["email: format is not valid".to_string()]);

    // Underage: born one day after the 18-years-ago mark is still 17
    let mut form = valid_form();
    form.birth_date = NaiveDate::from_ymd_opt(2008, 8, 29);
    let errors = form.validate(today);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("birthDate: "));

    // Exactly 18 today passes
    let mut form = valid_form();
    form.birth_date = NaiveDate::from_ymd_opt(2008, 8, 28);
    assert!(form.validate(today).is_empty());
}

#[tokio::test]
async fn invalid_form_never_reaches_the_network() {
    let server = MockServer::start().await;
    // No POST mock mounted; an outgoing request would surface as an error.
    let client = InsuredsClient::new(server.uri()).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

    let mut form = valid_form();
    form.contact_phone = "123".to_string();

    match form.submit(&client, today).await {
        Err(SubmitError::Invalid(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("contactPhone: "));
        }
        other => panic!("expected Invalid, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn edit_mode_freezes_the_identification_number() {
    let server_record: seguros_api::models::InsuredResponse =
        serde_json::from_value(insured_json(123456789, "juan.perez@example.com")).unwrap();

    let mut form = InsuredForm::for_edit(&server_record);
    assert_eq!(form.mode(), FormMode::Edit);
    assert_eq!(form.identification_number(), Some(123456789));

    assert!(!form.set_identification_number(999));
    assert_eq!(form.identification_number(), Some(123456789));

    // The frozen id travels in the update body so the server can check it
    // against the path.
    let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
    let request = form.to_update_request(today).unwrap();
    assert_eq!(request.identification_number, Some(123456789));
}

#[test]
fn form_normalizes_birth_date_to_midnight() {
    let form = valid_form();
    let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
    let request = form.to_create_request(today).unwrap();

    assert_eq!(
        request.birth_date,
        NaiveDate::from_ymd_opt(1990, 5, 15).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    let wire = serde_json::to_value(&request).unwrap();
    assert_eq!(wire["birthDate"], json!("1990-05-15T00:00:00"));
}
