//! Tests for the booking handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{BookingRepository, RetreatRepository};
use crate::domain::{NewRetreat, RetreatDraft};
use crate::inbound::http::test_utils::in_memory_state;
use crate::outbound::memory::InMemoryStore;
use pagination::PageRequest;

async fn seed_retreat(store: &Arc<InMemoryStore>, title: &str) -> i32 {
    let retreat = NewRetreat::new(RetreatDraft {
        title: title.into(),
        description: "Sunrise flows by the sea".into(),
        location: "Algarve".into(),
        price: 890.0,
        duration: 7,
        capacity: 20,
    })
    .expect("valid retreat");
    RetreatRepository::insert(store.as_ref(), &retreat)
        .await
        .expect("retreat stored")
        .id
        .get()
}

fn booking_body(user_id: i32, retreat_id: i32) -> Value {
    json!({
        "retreat_id": retreat_id,
        "user_id": user_id,
        "user_name": "Mira Okafor",
        "user_email": "mira@example.com",
        "user_phone": "555-0100",
        "retreat_title": "Coastal Yoga",
        "retreat_location": "Algarve",
        "retreat_price": 890.0,
        "retreat_duration": 7,
        "payment_details": "card ending 4242",
    })
}

async fn stored_bookings(store: &InMemoryStore) -> usize {
    store
        .list(BookingFilter::default(), PageRequest::default())
        .await
        .expect("bookings listed")
        .items()
        .len()
}

macro_rules! send {
    ($app:expr, $request:expr) => {{
        let response = actix_test::call_service(&$app, $request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let json: Value = serde_json::from_slice(&body).expect("JSON body");
        (status, json)
    }};
}

#[actix_web::test]
async fn second_booking_for_same_pair_is_rejected() {
    let (state, store) = in_memory_state();
    seed_retreat(&store, "First").await;
    let retreat_id = seed_retreat(&store, "Coastal Yoga").await;
    let app = actix_test::init_service(App::new().app_data(state).service(create_booking)).await;

    let (status, created) = send!(
        app,
        actix_test::TestRequest::post()
            .uri("/book")
            .set_json(booking_body(5, retreat_id))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Booking created successfully");
    assert_eq!(created["booking"]["user_id"], 5);
    assert_eq!(created["booking"]["retreat_id"], retreat_id);

    let (status, error) = send!(
        app,
        actix_test::TestRequest::post()
            .uri("/book")
            .set_json(booking_body(5, retreat_id))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "conflict");
    assert_eq!(error["error"], "You have already booked this retreat");
    assert_eq!(stored_bookings(&store).await, 1);
}

#[actix_web::test]
async fn booking_unknown_retreat_is_not_found() {
    let (state, store) = in_memory_state();
    let app = actix_test::init_service(App::new().app_data(state).service(create_booking)).await;

    let (status, error) = send!(
        app,
        actix_test::TestRequest::post()
            .uri("/book")
            .set_json(booking_body(5, 9999))
    );

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Retreat not found");
    assert_eq!(error["code"], "not_found");
    assert_eq!(stored_bookings(&store).await, 0);
}

#[actix_web::test]
async fn stored_snapshot_comes_from_retreat_record() {
    let (state, store) = in_memory_state();
    let retreat_id = seed_retreat(&store, "Coastal Yoga").await;
    let app = actix_test::init_service(App::new().app_data(state).service(create_booking)).await;
    let mut body = booking_body(3, retreat_id);
    body["retreat_title"] = json!("Something else");
    body["retreat_price"] = json!(1);

    let (status, created) = send!(
        app,
        actix_test::TestRequest::post().uri("/book").set_json(body)
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["booking"]["retreat_title"], "Coastal Yoga");
    assert_eq!(created["booking"]["retreat_price"], 890.0);
}

#[rstest]
#[case::missing_retreat("retreat_id", None, "Missing required field: retreat_id")]
#[case::missing_payment("payment_details", None, "Missing required field: payment_details")]
#[case::bad_user_id("user_id", Some(json!("five")), "user_id must be an integer")]
#[case::numeric_name("user_name", Some(json!(42)), "user_name must be a string")]
#[case::long_phone("user_phone", Some(json!("0".repeat(21))), "user_phone must be at most 20 characters")]
#[case::long_payment(
    "payment_details",
    Some(json!("p".repeat(201))),
    "payment_details must be at most 200 characters"
)]
#[actix_web::test]
async fn invalid_payloads_name_the_field(
    #[case] field: &str,
    #[case] value: Option<Value>,
    #[case] message: &str,
) {
    let (state, store) = in_memory_state();
    let retreat_id = seed_retreat(&store, "Coastal Yoga").await;
    let app = actix_test::init_service(App::new().app_data(state).service(create_booking)).await;
    let mut body = booking_body(5, retreat_id);
    match value {
        Some(value) => body[field] = value,
        None => {
            body.as_object_mut().expect("object").remove(field);
        }
    }

    let (status, error) = send!(
        app,
        actix_test::TestRequest::post().uri("/book").set_json(body)
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], message);
    assert_eq!(error["details"]["field"], field);
    assert_eq!(stored_bookings(&store).await, 0);
}

#[actix_web::test]
async fn validation_runs_before_retreat_lookup() {
    let (state, _) = in_memory_state();
    let app = actix_test::init_service(App::new().app_data(state).service(create_booking)).await;
    let mut body = booking_body(5, 9999);
    body.as_object_mut().expect("object").remove("user_email");

    let (status, error) = send!(
        app,
        actix_test::TestRequest::post().uri("/book").set_json(body)
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Missing required field: user_email");
}

#[rstest]
#[case::everyone("/bookings", 3)]
#[case::exact_user("/bookings?user_id=1", 1)]
#[case::user_zero("/bookings?user_id=0", 1)]
#[case::unknown_user("/bookings?user_id=42", 0)]
#[case::garbage_user_ignored("/bookings?user_id=abc", 3)]
#[case::paged("/bookings?limit=2&page=2", 1)]
#[case::repeated_user_uses_first("/bookings?user_id=1&user_id=10", 1)]
#[actix_web::test]
async fn lists_bookings(#[case] uri: &str, #[case] expected: usize) {
    let (state, store) = in_memory_state();
    let retreat_id = seed_retreat(&store, "Coastal Yoga").await;
    let app = actix_test::init_service(
        App::new()
            .app_data(state)
            .service(create_booking)
            .service(list_bookings),
    )
    .await;
    for user in [0, 1, 10] {
        let (status, _) = send!(
            app,
            actix_test::TestRequest::post()
                .uri("/book")
                .set_json(booking_body(user, retreat_id))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send!(app, actix_test::TestRequest::get().uri(uri));

    assert_eq!(status, StatusCode::OK);
    let bookings = body["bookings"].as_array().expect("bookings array");
    assert_eq!(bookings.len(), expected);
    for booking in bookings {
        let date = booking["booking_date"].as_str().expect("booking_date string");
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
    }
}

#[actix_web::test]
async fn list_rejects_zero_limit() {
    let (state, _) = in_memory_state();
    let app = actix_test::init_service(App::new().app_data(state).service(list_bookings)).await;

    let (status, body) = send!(app, actix_test::TestRequest::get().uri("/bookings?limit=0"));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}
