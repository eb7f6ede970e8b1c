//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.
//! Each test registers its own users under a unique department so the
//! broadcast assertions cannot see each other's notifications.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique_tag() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

/// Register a user and return its id
async fn register_user(client: &Client, name: &str, role: &str, department: &str, tag: u128) -> i64 {
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": name,
            "email": format!("{}-{}@test.example", name.to_lowercase().replace(' ', "-"), tag),
            "password": "secret123",
            "role": role,
            "department": department
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse register response");
    body["id"].as_i64().expect("No user id in response")
}

/// Fetch all notifications of a user
async fn notifications_of(client: &Client, user_id: i64) -> Vec<Value> {
    let response = client
        .get(format!("{}/notifications/user/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to fetch notifications");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse notifications");
    body["data"].as_array().expect("data is not an array").clone()
}

fn count_of_type(notifications: &[Value], kind: &str) -> usize {
    notifications
        .iter()
        .filter(|n| n["type"] == kind)
        .count()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let tag = unique_tag();
    let dept = format!("LoginDept-{}", tag);

    register_user(&client, "Login User", "Student", &dept, tag).await;

    let email = format!("login-user-{}@test.example", tag);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "secret123" }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse login response");
    assert_eq!(body["email"], email.as_str());
    // The hash must never leave the server
    assert!(body.get("password_hash").is_none());

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_rejected() {
    let client = Client::new();
    let tag = unique_tag();

    register_user(&client, "First User", "Student", "DupDept", tag).await;

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Second User",
            "email": format!("first-user-{}@test.example", tag),
            "password": "secret123",
            "role": "Student",
            "department": "DupDept"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_upload_without_request_broadcasts_to_department() {
    let client = Client::new();
    let tag = unique_tag();
    let dept = format!("Physics-{}", tag);

    let uploader = register_user(&client, "Uploader", "Teacher Admin", &dept, tag).await;
    let student_a = register_user(&client, "Student A", "Student", &dept, tag).await;
    let student_b = register_user(&client, "Student B", "Student", &dept, tag).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Optics",
            "author": "Hecht",
            "department": dept,
            "subject": "Waves",
            "file_url": "http://localhost:8080/uploads/optics.pdf",
            "access_type": "public",
            "uploaded_by": uploader
        }))
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse upload response");
    let book_id = body["id"].as_i64().expect("No book id");

    for student in [student_a, student_b] {
        let notifications = notifications_of(&client, student).await;
        assert_eq!(count_of_type(&notifications, "book_upload"), 1);
        assert_eq!(count_of_type(&notifications, "book_request"), 0);

        let broadcast = notifications
            .iter()
            .find(|n| n["type"] == "book_upload")
            .unwrap();
        assert_eq!(
            broadcast["message"],
            format!("New book uploaded in {}: Optics", dept).as_str()
        );
        assert_eq!(broadcast["related_id"].as_i64(), Some(book_id));
    }

    // The uploader is excluded from their own broadcast
    let notifications = notifications_of(&client, uploader).await;
    assert_eq!(count_of_type(&notifications, "book_upload"), 0);
}

#[tokio::test]
#[ignore]
async fn test_upload_fulfills_pending_request() {
    let client = Client::new();
    let tag = unique_tag();
    let dept = format!("Mathematics-{}", tag);

    let uploader = register_user(&client, "Teacher", "Teacher Admin", &dept, tag).await;
    let student = register_user(&client, "Requester", "Student", &dept, tag).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "student_id": student,
            "department": dept,
            "book_name": "Algebra I"
        }))
        .send()
        .await
        .expect("Failed to submit request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse request response");
    let request_id = body["id"].as_i64().expect("No request id");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Algebra I",
            "department": dept,
            "file_url": "http://localhost:8080/uploads/algebra.pdf",
            "uploaded_by": uploader,
            "request_id": request_id
        }))
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse upload response");
    let book_id = body["id"].as_i64().expect("No book id");

    // The request transitioned to fulfilled with the uploader recorded
    let response = client
        .get(format!("{}/requests/student/{}", BASE_URL, student))
        .send()
        .await
        .expect("Failed to fetch requests");
    let body: Value = response.json().await.expect("Failed to parse requests");
    let request = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"].as_i64() == Some(request_id))
        .expect("Request not found")
        .clone();

    assert_eq!(request["status"], "fulfilled");
    assert_eq!(request["fulfilled_by"].as_i64(), Some(uploader));
    assert!(!request["fulfilled_date"].is_null());

    // Exactly one targeted notification, plus the department broadcast
    let notifications = notifications_of(&client, student).await;
    assert_eq!(count_of_type(&notifications, "book_request"), 1);
    assert_eq!(count_of_type(&notifications, "book_upload"), 1);

    let targeted = notifications
        .iter()
        .find(|n| n["type"] == "book_request")
        .unwrap();
    assert_eq!(
        targeted["message"],
        "Your request for 'Algebra I' has been fulfilled!"
    );
    assert_eq!(targeted["related_id"].as_i64(), Some(book_id));
}

#[tokio::test]
#[ignore]
async fn test_upload_with_invalid_request_id_still_broadcasts() {
    let client = Client::new();
    let tag = unique_tag();
    let dept = format!("Chemistry-{}", tag);

    let uploader = register_user(&client, "Chem Teacher", "Teacher Admin", &dept, tag).await;
    let student = register_user(&client, "Chem Student", "Student", &dept, tag).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Organic Chemistry",
            "department": dept,
            "file_url": "http://localhost:8080/uploads/orgo.pdf",
            "uploaded_by": uploader,
            "request_id": 999_999_999
        }))
        .send()
        .await
        .expect("Failed to send upload request");

    // The bogus request id is a no-op, not an error
    assert_eq!(response.status(), 201);

    let notifications = notifications_of(&client, student).await;
    assert_eq!(count_of_type(&notifications, "book_upload"), 1);
    assert_eq!(count_of_type(&notifications, "book_request"), 0);
}

#[tokio::test]
#[ignore]
async fn test_second_fulfillment_of_same_request_is_a_noop() {
    let client = Client::new();
    let tag = unique_tag();
    let dept = format!("Biology-{}", tag);

    let uploader = register_user(&client, "Bio Teacher", "Teacher Admin", &dept, tag).await;
    let other = register_user(&client, "Bio Other", "Teacher Admin", &dept, tag).await;
    let student = register_user(&client, "Bio Student", "Student", &dept, tag).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "student_id": student,
            "department": dept,
            "book_name": "Cell Biology"
        }))
        .send()
        .await
        .expect("Failed to submit request");
    let body: Value = response.json().await.expect("Failed to parse request response");
    let request_id = body["id"].as_i64().expect("No request id");

    for who in [uploader, other] {
        let response = client
            .post(format!("{}/books", BASE_URL))
            .json(&json!({
                "title": "Cell Biology",
                "department": dept,
                "file_url": "http://localhost:8080/uploads/cell.pdf",
                "uploaded_by": who,
                "request_id": request_id
            }))
            .send()
            .await
            .expect("Failed to send upload request");
        assert_eq!(response.status(), 201);
    }

    // Only the first upload fulfilled the request and notified the student
    let notifications = notifications_of(&client, student).await;
    assert_eq!(count_of_type(&notifications, "book_request"), 1);

    let response = client
        .get(format!("{}/requests/student/{}", BASE_URL, student))
        .send()
        .await
        .expect("Failed to fetch requests");
    let body: Value = response.json().await.expect("Failed to parse requests");
    let request = &body["data"][0];
    assert_eq!(request["fulfilled_by"].as_i64(), Some(uploader));
}

#[tokio::test]
#[ignore]
async fn test_upload_without_title_is_rejected() {
    let client = Client::new();
    let tag = unique_tag();
    let uploader = register_user(&client, "No Title", "Teacher Admin", "NT", tag).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "",
            "department": "NT",
            "file_url": "http://localhost:8080/uploads/x.pdf",
            "uploaded_by": uploader
        }))
        .send()
        .await
        .expect("Failed to send upload request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_approval_emits_exactly_one_notification() {
    let client = Client::new();
    let tag = unique_tag();
    let user = register_user(&client, "Pending User", "Student", "ApprDept", tag).await;

    let response = client
        .put(format!("{}/approvals", BASE_URL))
        .json(&json!({ "user_id": user, "status": "approved" }))
        .send()
        .await
        .expect("Failed to send approval request");

    assert!(response.status().is_success());

    let notifications = notifications_of(&client, user).await;
    assert_eq!(count_of_type(&notifications, "approval"), 1);

    let approval = notifications
        .iter()
        .find(|n| n["type"] == "approval")
        .unwrap();
    assert_eq!(approval["message"], "Your account has been approved");
}

#[tokio::test]
#[ignore]
async fn test_approval_of_unknown_user_is_404() {
    let client = Client::new();

    let response = client
        .put(format!("{}/approvals", BASE_URL))
        .json(&json!({ "user_id": 999_999_999, "status": "approved" }))
        .send()
        .await
        .expect("Failed to send approval request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_mark_all_read_clears_unread_count() {
    let client = Client::new();
    let tag = unique_tag();
    let user = register_user(&client, "Reader", "Student", "ReadDept", tag).await;

    // Give the user a notification via the approval workflow
    let response = client
        .put(format!("{}/approvals", BASE_URL))
        .json(&json!({ "user_id": user, "status": "approved" }))
        .send()
        .await
        .expect("Failed to send approval request");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/notifications/user/{}/read-all", BASE_URL, user))
        .send()
        .await
        .expect("Failed to mark all read");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/notifications/user/{}/unread-count", BASE_URL, user))
        .send()
        .await
        .expect("Failed to fetch unread count");
    let body: Value = response.json().await.expect("Failed to parse unread count");
    assert_eq!(body["count"].as_i64(), Some(0));

    // Marking again stays at zero
    let response = client
        .put(format!("{}/notifications/user/{}/read-all", BASE_URL, user))
        .send()
        .await
        .expect("Failed to mark all read");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/notifications/user/{}/unread-count", BASE_URL, user))
        .send()
        .await
        .expect("Failed to fetch unread count");
    let body: Value = response.json().await.expect("Failed to parse unread count");
    assert_eq!(body["count"].as_i64(), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_book_search_and_recent() {
    let client = Client::new();
    let tag = unique_tag();
    let dept = format!("History-{}", tag);
    let uploader = register_user(&client, "Historian", "Teacher Admin", &dept, tag).await;

    let title = format!("Annales-{}", tag);
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "department": dept,
            "file_url": "http://localhost:8080/uploads/annales.pdf",
            "uploaded_by": uploader
        }))
        .send()
        .await
        .expect("Failed to send upload request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/books/search?q={}", BASE_URL, title))
        .send()
        .await
        .expect("Failed to search books");
    let body: Value = response.json().await.expect("Failed to parse search response");
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["uploader_name"], "Historian");

    let response = client
        .get(format!("{}/books/recent", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch recent books");
    let body: Value = response.json().await.expect("Failed to parse recent response");
    assert!(body["data"].as_array().unwrap().len() <= 10);
}
