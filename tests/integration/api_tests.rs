// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{attraction, bearer, create_test_app, create_test_app_with, FixtureAdapter};
use axum::http::StatusCode;
use cityguide::domain::models::listing::ListingKind;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_and_version() {
    let app = create_test_app().await;

    let health = app.server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.text(), "OK");

    let version = app.server.get("/api/v1/version").await;
    assert_eq!(version.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cities_and_overview() {
    let app = create_test_app().await;

    let cities: Value = app.server.get("/api/v1/cities").await.json();
    assert_eq!(cities.as_array().unwrap().len(), 1);
    let id = cities[0]["id"].as_i64().unwrap();

    let city: Value = app.server.get(&format!("/api/v1/cities/{}", id)).await.json();
    assert_eq!(city["name"], "Macomb");
    assert_eq!(city["state"], "MI");

    let overview: Value = app
        .server
        .get("/api/v1/cities/by-name/macomb/overview")
        .await
        .json();
    assert_eq!(overview["attractions"], 3);
    assert_eq!(overview["restaurants"], 2);
    assert_eq!(overview["upcoming_events"], 1);
    assert_eq!(overview["properties"], 2);

    let missing = app.server.get("/api/v1/cities/by-name/Detroit/overview").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.server.get("/api/v1/cities/999").await.status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_taxonomy_lists() {
    let app = create_test_app().await;

    let categories: Value = app.server.get("/api/v1/categories").await.json();
    let names: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Park"));
    assert!(names.contains(&"Library"));

    let cuisines: Value = app.server.get("/api/v1/cuisines").await.json();
    assert_eq!(cuisines.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_attraction_filters_and_ordering() {
    let app = create_test_app().await;

    let all: Value = app.server.get("/api/v1/attractions").await.json();
    assert_eq!(all["count"], 3);

    let parks: Value = app
        .server
        .get("/api/v1/attractions")
        .add_query_param("category", "park")
        .await
        .json();
    assert_eq!(parks["count"], 2);

    let ordered: Value = app
        .server
        .get("/api/v1/attractions")
        .add_query_param("ordering", "-name")
        .add_query_param("limit", 1)
        .await
        .json();
    assert_eq!(ordered["count"], 3);
    assert_eq!(ordered["results"][0]["name"], "Stony Creek Metropark");

    let searched: Value = app
        .server
        .get("/api/v1/attractions")
        .add_query_param("search", "LIBRARY")
        .await
        .json();
    assert_eq!(searched["results"][0]["name"], "Macomb Township Library");
}

#[tokio::test]
async fn test_attraction_detail_and_nearby() {
    let app = create_test_app().await;

    let parks: Value = app
        .server
        .get("/api/v1/attractions")
        .add_query_param("search", "Freedom")
        .await
        .json();
    let id = parks["results"][0]["id"].as_i64().unwrap();

    let detail: Value = app
        .server
        .get(&format!("/api/v1/attractions/{}", id))
        .await
        .json();
    assert_eq!(detail["category"], "Park");

    let nearby: Value = app
        .server
        .get(&format!("/api/v1/attractions/{}/nearby", id))
        .await
        .json();
    let nearby = nearby.as_array().unwrap();
    assert_eq!(nearby.len(), 1);
    assert_eq!(nearby[0]["name"], "Stony Creek Metropark");

    let missing = app.server.get("/api/v1/attractions/9999").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert!(missing.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_event_and_property_filters() {
    let app = create_test_app().await;

    let upcoming: Value = app
        .server
        .get("/api/v1/events")
        .add_query_param("upcoming", true)
        .await
        .json();
    assert_eq!(upcoming["count"], 1);
    assert_eq!(upcoming["results"][0]["name"], "Summer Symphony");

    let soon: Value = app.server.get("/api/v1/events/upcoming").await.json();
    assert_eq!(soon.as_array().unwrap().len(), 1);

    let for_sale: Value = app
        .server
        .get("/api/v1/properties")
        .add_query_param("for_sale", true)
        .add_query_param("min_price", 100_000)
        .await
        .json();
    assert_eq!(for_sale["count"], 1);
    assert_eq!(for_sale["results"][0]["price"], 425_000);

    let inverted = app
        .server
        .get("/api/v1/properties")
        .add_query_param("min_price", 10)
        .add_query_param("max_price", 5)
        .await;
    assert_eq!(inverted.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_restaurants_ordered_by_rating() {
    let app = create_test_app().await;

    let restaurants: Value = app
        .server
        .get("/api/v1/restaurants")
        .add_query_param("ordering", "-rating")
        .await
        .json();
    assert_eq!(restaurants["results"][0]["name"], "Lakeside Grill");

    let thai: Value = app
        .server
        .get("/api/v1/restaurants")
        .add_query_param("cuisine", "Thai")
        .await
        .json();
    assert_eq!(thai["count"], 1);
}

#[tokio::test]
async fn test_search_rejects_short_queries() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/v1/search")
        .add_query_param("q", "p")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app.server.get("/api/v1/search").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_spans_kinds() {
    let app = create_test_app().await;

    let results: Value = app
        .server
        .get("/api/v1/search")
        .add_query_param("q", "macomb")
        .await
        .json();

    assert!(!results["attractions"].as_array().unwrap().is_empty());
    assert_eq!(results["properties"].as_array().unwrap().len(), 2);
    assert_eq!(results["transportation"].as_array().unwrap().len(), 1);
    // venue matches
    assert!(!results["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let app = create_test_app().await;

    for q in ["%%", "__"] {
        let results: Value = app
            .server
            .get("/api/v1/search")
            .add_query_param("q", q)
            .await
            .json();
        for kind in ["attractions", "restaurants", "events", "properties", "transportation"] {
            assert!(results[kind].as_array().unwrap().is_empty(), "{} matched {}", q, kind);
        }
    }

    let filtered: Value = app
        .server
        .get("/api/v1/attractions")
        .add_query_param("search", "%")
        .await
        .json();
    assert_eq!(filtered["count"], 0);
}

#[tokio::test]
async fn test_search_caps_each_kind() {
    let trails = (1..=12)
        .map(|n| attraction(&format!("Trail {}", n), "Park"))
        .collect();
    let app = create_test_app_with(vec![FixtureAdapter::new(ListingKind::Attraction, trails)]).await;

    let results: Value = app
        .server
        .get("/api/v1/search")
        .add_query_param("q", "trail")
        .await
        .json();

    assert_eq!(results["attractions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_scrape_requires_staff() {
    let app = create_test_app().await;

    let anonymous = app
        .server
        .post("/api/v1/scrape")
        .json(&json!({"type": "all"}))
        .await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);

    let regular = app
        .server
        .post("/api/v1/scrape")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"type": "all"}))
        .await;
    assert_eq!(regular.status_code(), StatusCode::FORBIDDEN);

    let invalid = app
        .server
        .post("/api/v1/scrape")
        .add_header("Authorization", bearer(&app.staff_key))
        .json(&json!({"type": "museums"}))
        .await;
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scrape_returns_run_report() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/v1/scrape")
        .add_header("Authorization", bearer(&app.staff_key))
        .json(&json!({"type": "attractions"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report: Value = response.json();
    assert_eq!(report["totals"]["created"], 0);
    assert_eq!(report["totals"]["updated"], 3);
    assert_eq!(report["sources"][0]["kind"], "attraction");
    assert_eq!(report["sources"][0]["items"][0]["status"], "updated");
}

#[tokio::test]
async fn test_invalid_key_is_rejected() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/v1/favorites")
        .add_header("Authorization", bearer("not-a-key"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_favorites_lifecycle() {
    let app = create_test_app().await;
    let attractions: Value = app.server.get("/api/v1/attractions").await.json();
    let object_id = attractions["results"][0]["id"].as_i64().unwrap();

    let created = app
        .server
        .post("/api/v1/favorites")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"listing_kind": "attraction", "object_id": object_id}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let favorite_id = created.json::<Value>()["id"].as_i64().unwrap();

    let duplicate = app
        .server
        .post("/api/v1/favorites")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"listing_kind": "attraction", "object_id": object_id}))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let missing_target = app
        .server
        .post("/api/v1/favorites")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"listing_kind": "restaurant", "object_id": 9999}))
        .await;
    assert_eq!(missing_target.status_code(), StatusCode::NOT_FOUND);

    let only_restaurants: Value = app
        .server
        .get("/api/v1/favorites")
        .add_query_param("kind", "restaurants")
        .add_header("Authorization", bearer(&app.user_key))
        .await
        .json();
    assert!(only_restaurants.as_array().unwrap().is_empty());

    // another user cannot remove it
    let foreign = app
        .server
        .delete(&format!("/api/v1/favorites/{}", favorite_id))
        .add_header("Authorization", bearer(&app.staff_key))
        .await;
    assert_eq!(foreign.status_code(), StatusCode::NOT_FOUND);

    let removed = app
        .server
        .delete(&format!("/api/v1/favorites/{}", favorite_id))
        .add_header("Authorization", bearer(&app.user_key))
        .await;
    assert_eq!(removed.status_code(), StatusCode::NO_CONTENT);

    let remaining: Value = app
        .server
        .get("/api/v1/favorites")
        .add_header("Authorization", bearer(&app.user_key))
        .await
        .json();
    assert!(remaining.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rsvps() {
    let app = create_test_app().await;
    let events: Value = app.server.get("/api/v1/events/upcoming").await.json();
    let event_id = events[0]["id"].as_i64().unwrap();

    let created = app
        .server
        .post("/api/v1/rsvps")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"event_id": event_id}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);

    let again = app
        .server
        .post("/api/v1/rsvps")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"event_id": event_id}))
        .await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);

    let unknown = app
        .server
        .post("/api/v1/rsvps")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"event_id": 9999}))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

    let mine: Value = app
        .server
        .get("/api/v1/rsvps")
        .add_header("Authorization", bearer(&app.user_key))
        .await
        .json();
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let staff_rsvps: Value = app
        .server
        .get("/api/v1/rsvps")
        .add_header("Authorization", bearer(&app.staff_key))
        .await
        .json();
    assert!(staff_rsvps.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_reviews() {
    let app = create_test_app().await;
    let restaurants: Value = app.server.get("/api/v1/restaurants").await.json();
    let object_id = restaurants["results"][0]["id"].as_i64().unwrap();

    let anonymous = app
        .server
        .post("/api/v1/reviews")
        .json(&json!({"listing_kind": "restaurant", "object_id": object_id, "rating": 5, "content": "Great"}))
        .await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);

    let out_of_range = app
        .server
        .post("/api/v1/reviews")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"listing_kind": "restaurant", "object_id": object_id, "rating": 9, "content": "Great"}))
        .await;
    assert_eq!(out_of_range.status_code(), StatusCode::BAD_REQUEST);

    let created = app
        .server
        .post("/api/v1/reviews")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&json!({"listing_kind": "restaurant", "object_id": object_id, "rating": 4, "content": "Great patio"}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);

    let reviews: Value = app
        .server
        .get("/api/v1/reviews")
        .add_query_param("kind", "restaurant")
        .add_query_param("object_id", object_id)
        .await
        .json();
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["username"], "resident");
    assert_eq!(reviews[0]["rating"], 4);
}

#[tokio::test]
async fn test_contacts_visibility() {
    let app = create_test_app().await;
    let message = json!({
        "name": "Pat",
        "email": "pat@example.com",
        "subject": "Parking",
        "message": "Is the garage open on Sundays?"
    });

    let anonymous = app.server.post("/api/v1/contacts").json(&message).await;
    assert_eq!(anonymous.status_code(), StatusCode::CREATED);
    assert!(anonymous.json::<Value>()["user_id"].is_null());

    let signed = app
        .server
        .post("/api/v1/contacts")
        .add_header("Authorization", bearer(&app.user_key))
        .json(&message)
        .await;
    assert_eq!(signed.status_code(), StatusCode::CREATED);

    let bad_email = app
        .server
        .post("/api/v1/contacts")
        .json(&json!({"name": "Pat", "email": "nope", "subject": "x", "message": "y"}))
        .await;
    assert_eq!(bad_email.status_code(), StatusCode::BAD_REQUEST);

    let own: Value = app
        .server
        .get("/api/v1/contacts")
        .add_header("Authorization", bearer(&app.user_key))
        .await
        .json();
    assert_eq!(own.as_array().unwrap().len(), 1);

    let all: Value = app
        .server
        .get("/api/v1/contacts")
        .add_header("Authorization", bearer(&app.staff_key))
        .await
        .json();
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let app = create_test_app().await;
    app.server
        .post("/api/v1/contacts")
        .json(&json!({"name": "Pat", "email": "pat@example.com", "subject": "Hi", "message": "Hello"}))
        .await;

    let public: Value = app.server.get("/api/v1/dashboard/stats").await.json();
    assert_eq!(public["counts"]["attractions"], 3);
    assert_eq!(public["counts"]["users"], 2);
    assert_eq!(public["upcoming_events"].as_array().unwrap().len(), 1);
    assert!(public.get("recent_contacts").is_none());

    let staff: Value = app
        .server
        .get("/api/v1/dashboard/stats")
        .add_header("Authorization", bearer(&app.staff_key))
        .await
        .json();
    assert_eq!(staff["recent_contacts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_home_page() {
    let app = create_test_app().await;

    let home: Value = app.server.get("/api/v1/home").await.json();

    assert!(home["featured_attractions"].is_array());
    assert_eq!(home["upcoming_events"].as_array().unwrap().len(), 1);
    assert!(home["featured_restaurants"].is_array());
}
