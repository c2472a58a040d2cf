//! API integration tests
//!
//! These tests run against a live server. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Register a fresh user and return its bearer token and email
async fn sign_up_user(client: &Client) -> (String, String) {
    let email = format!("ceren+{}@gmail.com", uuid::Uuid::new_v4());
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "name": "Ceren",
            "email": email,
            "password": "123456"
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse signup response");
    let token = body["token"].as_str().expect("No token in response").to_string();
    (token, email)
}

#[tokio::test]
#[ignore]
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
async fn test_readiness_check_reaches_the_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_signup_and_login_issue_tokens_for_same_user() {
    let client = Client::new();
    let (signup_token, email) = sign_up_user(&client).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "123456"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let login_token = body["token"].as_str().expect("No token in response");

    // Both tokens must resolve to the same user
    let me_with = |token: String| {
        let client = client.clone();
        async move {
            let response = client
                .get(format!("{}/auth/me", BASE_URL))
                .header("Authorization", format!("Bearer {}", token))
                .send()
                .await
                .expect("Failed to send request");
            assert!(response.status().is_success());
            let body: Value = response.json().await.expect("Failed to parse response");
            body["id"].as_str().expect("No id").to_string()
        }
    };

    let id_from_signup = me_with(signup_token).await;
    let id_from_login = me_with(login_token.to_string()).await;
    assert_eq!(id_from_signup, id_from_login);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_conflicts() {
    let client = Client::new();
    let (_, email) = sign_up_user(&client).await;

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "name": "Ceren",
            "email": email,
            "password": "123456"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_login_bad_credentials_are_indistinguishable() {
    let client = Client::new();
    let (_, email) = sign_up_user(&client).await;

    let wrong_password = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "654321" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(wrong_password.status(), 401);
    let wrong_password_body: Value = wrong_password.json().await.expect("parse");

    let unknown_email = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": "nobody@example.com", "password": "123456" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(unknown_email.status(), 401);
    let unknown_email_body: Value = unknown_email.json().await.expect("parse");

    assert_eq!(wrong_password_body["message"], unknown_email_body["message"]);
}

#[tokio::test]
#[ignore]
async fn test_create_requires_authentication() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Book",
            "description": "Bookdescription",
            "author": "Author",
            "price": 150,
            "category": "ADVENTURE"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_rejects_invalid_payloads() {
    let client = Client::new();
    let (token, _) = sign_up_user(&client).await;

    for payload in [
        // negative price
        json!({
            "title": "Book", "description": "d", "author": "a",
            "price": -1, "category": "ADVENTURE"
        }),
        // unknown category
        json!({
            "title": "Book", "description": "d", "author": "a",
            "price": 10, "category": "POETRY"
        }),
        // missing title
        json!({
            "description": "d", "author": "a",
            "price": 10, "category": "ADVENTURE"
        }),
    ] {
        let response = client
            .post(format!("{}/books", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 400);
    }
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();
    let (token, _) = sign_up_user(&client).await;

    // Owner id of the authenticated user
    let me: Value = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("parse");
    let user_id = me["id"].as_str().expect("No id");

    // Create
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Book",
            "description": "Bookdescription",
            "author": "Author",
            "price": 150,
            "category": "ADVENTURE",
            // Owner fields in the payload are ignored
            "user_id": "00000000-0000-0000-0000-000000000000"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("parse");
    assert_eq!(created["user_id"].as_str().expect("No owner"), user_id);
    assert_eq!(created["category"], "ADVENTURE");
    let book_id = created["id"].as_str().expect("No id").to_string();

    // Read back
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let fetched: Value = response.json().await.expect("parse");
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["title"], "Book");

    // Partial update
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "Updated Name" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let updated: Value = response.json().await.expect("parse");
    assert_eq!(updated["title"], "Updated Name");
    assert_eq!(updated["author"], "Author");

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("parse");
    assert_eq!(body["deleted"], true);

    // Gone afterwards
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_invalid_and_absent_book_ids() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/invalid-id", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_list_books_pagination_and_keyword() {
    let client = Client::new();
    let (token, _) = sign_up_user(&client).await;

    // Seed three books sharing a unique keyword
    let keyword = format!("Kw{}", uuid::Uuid::new_v4().simple());
    for i in 0..3 {
        let response = client
            .post(format!("{}/books", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "title": format!("{} volume {}", keyword, i),
                "description": "Bookdescription",
                "author": "Author",
                "price": 100,
                "category": "CLASSICS"
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    // Keyword match is case-insensitive; page size is fixed at 2
    let page1: Value = client
        .get(format!(
            "{}/books?keyword={}&page=1",
            BASE_URL,
            keyword.to_lowercase()
        ))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("parse");
    assert_eq!(page1.as_array().expect("array").len(), 2);

    let page2: Value = client
        .get(format!("{}/books?keyword={}&page=2", BASE_URL, keyword))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("parse");
    assert_eq!(page2.as_array().expect("array").len(), 1);

    // A page past the end is an empty list, not an error
    let page9: Value = client
        .get(format!("{}/books?keyword={}&page=9", BASE_URL, keyword))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("parse");
    assert_eq!(page9.as_array().expect("array").len(), 0);
}
