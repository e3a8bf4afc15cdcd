//! End-to-end API tests over the in-memory store.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use galaxy_api::model::{FavoriteKind, NewPeople, People, UserInsert};
use galaxy_api::routes::BODY_LIMIT_BYTES;
use galaxy_api::{app, AppState, MemoryStore, Store, TokenIssuer};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

const SECRET: &[u8] = b"test-secret-test-secret-test-secret!";

fn state() -> AppState<MemoryStore> {
    AppState::new(MemoryStore::new(), TokenIssuer::new(SECRET, Duration::from_secs(900)))
}

async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    call_with_auth(router, method, uri, body, None).await
}

async fn call_with_auth(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(v) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res = router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn luke() -> Value {
    json!({
        "name": "Luke Skywalker",
        "gender": "male",
        "skin_color": "fair",
        "birth": "19BBY",
        "eyes_color": "blue"
    })
}

/// Users inserted straight into the store, skipping password hashing.
async fn seed_users(state: &AppState<MemoryStore>, n: usize) {
    for i in 1..=n {
        state
            .store
            .create_user(UserInsert {
                email: format!("pilot{}@rebels.org", i),
                password_hash: "unused".into(),
                name: format!("Pilot {}", i),
                is_active: true,
            })
            .await
            .unwrap();
    }
}

async fn seed_people(state: &AppState<MemoryStore>, n: usize) {
    for i in 1..=n {
        state
            .store
            .create::<People>(NewPeople {
                name: format!("Person {}", i),
                gender: "n/a".into(),
                skin_color: "grey".into(),
                birth: "unknown".into(),
                eyes_color: "red".into(),
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn sitemap_lists_endpoints() {
    let router = app(state());
    let (status, body) = call(&router, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints
        .iter()
        .any(|e| e["method"] == "POST" && e["path"] == "/token"));
    assert!(endpoints
        .iter()
        .any(|e| e["method"] == "GET" && e["path"] == "/people/:id"));
}

#[tokio::test]
async fn health_and_ready() {
    let router = app(state());
    let (status, body) = call(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (status, body) = call(&router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn create_then_read_people() {
    let router = app(state());
    let (status, body) = call(&router, Method::POST, "/people", Some(luke())).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call(&router, Method::GET, &format!("/people/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = luke();
    expected["id"] = json!(id);
    assert_eq!(body["data"], expected);

    let (status, body) = call(&router, Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);
}

#[tokio::test]
async fn missing_entity_is_404() {
    let router = app(state());
    for uri in ["/people/99", "/planets/99", "/vehicles/99", "/user/99"] {
        let (status, body) = call(&router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"]["code"], "not_found");
    }
}

#[tokio::test]
async fn non_integer_id_is_400() {
    let router = app(state());
    let (status, body) = call(&router, Method::GET, "/planets/tatooine", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn blank_attribute_is_422() {
    let router = app(state());
    let planet = json!({
        "name": "Hoth",
        "diameter": "7200",
        "climate": "",
        "population": "unknown",
        "gravity": "1.1"
    });
    let (status, body) = call(&router, Method::POST, "/planets", Some(planet)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("climate"));
}

#[tokio::test]
async fn missing_field_is_422() {
    let router = app(state());
    let (status, body) = call(&router, Method::POST, "/vehicles", Some(json!({ "name": "X-wing" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn favorite_shows_up_once() {
    let state = state();
    seed_users(&state, 7).await;
    seed_people(&state, 3).await;
    let router = app(state);

    let (status, body) = call(&router, Method::POST, "/user/7/favorites/people/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], 7);
    assert_eq!(body["data"]["people_id"], 3);

    let (status, body) = call(&router, Method::GET, "/user/7/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    let people = body["data"]["people"].as_array().unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["people_id"], 3);
    assert!(body["data"]["planets"].as_array().unwrap().is_empty());
    assert!(body["data"]["vehicles"].as_array().unwrap().is_empty());

    let (status, _) = call(&router, Method::GET, "/user/6/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_favorite_is_409() {
    let state = state();
    seed_users(&state, 1).await;
    seed_people(&state, 1).await;
    let router = app(state);

    let (status, _) = call(&router, Method::POST, "/user/1/favorites/people/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = call(&router, Method::POST, "/user/1/favorites/people/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");

    let (_, body) = call(&router, Method::GET, "/user/1/favorites", None).await;
    assert_eq!(body["data"]["people"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn favorite_needs_both_ends() {
    let state = state();
    seed_users(&state, 1).await;
    seed_people(&state, 1).await;
    let router = app(state);

    let (status, _) = call(&router, Method::POST, "/user/2/favorites/people/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = call(&router, Method::POST, "/user/1/favorites/planets/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "not found: planet 1 not found");
    let (status, _) = call(&router, Method::POST, "/user/1/favorites/starships/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&router, Method::GET, "/user/2/favorites", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_favorite() {
    let state = state();
    seed_users(&state, 1).await;
    seed_people(&state, 2).await;
    let router = app(state);

    let (status, _) = call(&router, Method::DELETE, "/user/1/favorites/people/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    call(&router, Method::POST, "/user/1/favorites/people/1", None).await;
    call(&router, Method::POST, "/user/1/favorites/people/2", None).await;
    let (status, body) = call(&router, Method::DELETE, "/user/1/favorites/people/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["people_id"], 2);

    let (_, body) = call(&router, Method::GET, "/user/1/favorites", None).await;
    let people = body["data"]["people"].as_array().unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["people_id"], 1);

    let (status, _) = call(&router, Method::DELETE, "/user/1/favorites/people/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_hides_password() {
    let router = app(state());
    let body = json!({ "email": "leia@rebels.org", "password": "alderaan1", "name": "Leia" });
    let (status, created) = call(&router, Method::POST, "/user", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["data"]["email"], "leia@rebels.org");
    assert_eq!(created["data"]["is_active"], true);
    assert!(created["data"].get("password").is_none());
    assert!(created["data"].get("password_hash").is_none());

    let (status, _) = call(&router, Method::POST, "/user", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, listed) = call(&router, Method::GET, "/user", None).await;
    assert_eq!(listed["meta"]["count"], 1);
    assert!(listed["data"][0].get("password_hash").is_none());
}

#[tokio::test]
async fn token_and_me() {
    let router = app(state());
    let user = json!({ "email": "han@falcon.net", "password": "kessel-run", "name": "Han" });
    call(&router, Method::POST, "/user", Some(user)).await;

    let login = json!({ "email": "han@falcon.net", "password": "kessel-run" });
    let (status, body) = call(&router, Method::POST, "/token", Some(login)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 900);
    let token = body["access_token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let (status, body) = call_with_auth(&router, Method::GET, "/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "han@falcon.net");

    let (status, _) = call(&router, Method::GET, "/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call_with_auth(&router, Method::GET, "/me", None, Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_gets_no_token() {
    let router = app(state());
    let user = json!({ "email": "han@falcon.net", "password": "kessel-run", "name": "Han" });
    call(&router, Method::POST, "/user", Some(user)).await;

    let login = json!({ "email": "han@falcon.net", "password": "parsecs12" });
    let (status, body) = call(&router, Method::POST, "/token", Some(login)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("access_token").is_none());
    assert_eq!(body["error"]["code"], "unauthorized");

    let unknown = json!({ "email": "greedo@cantina.net", "password": "kessel-run" });
    let (status, body) = call(&router, Method::POST, "/token", Some(unknown)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("access_token").is_none());
}

#[tokio::test]
async fn inactive_user_gets_no_token() {
    let router = app(state());
    let user = json!({ "email": "ben@jedi.org", "password": "high-ground", "name": "Ben", "is_active": false });
    call(&router, Method::POST, "/user", Some(user)).await;

    let login = json!({ "email": "ben@jedi.org", "password": "high-ground" });
    let (status, body) = call(&router, Method::POST, "/token", Some(login)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("access_token").is_none());
}

#[tokio::test]
async fn malformed_json_is_400() {
    let router = app(state());
    let req = Request::builder()
        .method(Method::POST)
        .uri("/people")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = router.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

/// A valid create body for the table behind `kind`.
fn target_body(kind: FavoriteKind) -> Value {
    match kind {
        FavoriteKind::People => luke(),
        FavoriteKind::Planet => json!({
            "name": "Dagobah",
            "diameter": "8900",
            "climate": "murky",
            "population": "unknown",
            "gravity": "N/A"
        }),
        FavoriteKind::Vehicle => json!({
            "name": "Sand Crawler",
            "crafter": "Corellia Mining Corporation",
            "tripulation": "46",
            "speed": "30",
            "passengers": "30"
        }),
    }
}

#[tokio::test]
async fn favorites_round_trip_for_every_kind() {
    let state = state();
    seed_users(&state, 1).await;
    let router = app(state);

    for kind in FavoriteKind::ALL {
        let segment = kind.segment();
        let column = kind.target_column();
        let (status, created) = call(&router, Method::POST, &format!("/{}", segment), Some(target_body(kind))).await;
        assert_eq!(status, StatusCode::OK, "{}", segment);
        let target_id = created["data"]["id"].as_i64().unwrap();

        let uri = format!("/user/1/favorites/{}/{}", segment, target_id);
        let (status, body) = call(&router, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["data"][column], target_id);

        let (_, listed) = call(&router, Method::GET, "/user/1/favorites", None).await;
        let of_kind = listed["data"][segment].as_array().unwrap();
        assert_eq!(of_kind.len(), 1, "{}", segment);
        assert_eq!(of_kind[0][column], target_id);

        let (status, body) = call(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["data"][column], target_id);

        let (_, listed) = call(&router, Method::GET, "/user/1/favorites", None).await;
        assert!(listed["data"][segment].as_array().unwrap().is_empty(), "{}", segment);
    }
}

#[tokio::test]
async fn refused_logins_look_the_same() {
    let router = app(state());
    let han = json!({ "email": "han@falcon.net", "password": "kessel-run", "name": "Han" });
    let ben = json!({ "email": "ben@jedi.org", "password": "high-ground", "name": "Ben", "is_active": false });
    call(&router, Method::POST, "/user", Some(han)).await;
    call(&router, Method::POST, "/user", Some(ben)).await;

    let attempts = [
        json!({ "email": "greedo@cantina.net", "password": "kessel-run" }),
        json!({ "email": "han@falcon.net", "password": "parsecs12" }),
        json!({ "email": "ben@jedi.org", "password": "high-ground" }),
    ];
    let mut bodies = Vec::new();
    for login in attempts {
        let (status, body) = call(&router, Method::POST, "/token", Some(login)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        bodies.push(body);
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[1], bodies[2]);
    assert_eq!(bodies[0]["error"]["message"], "unauthorized: bad email or password");
}

#[tokio::test]
async fn oversized_body_is_413() {
    let router = app(state());
    let mut planet = target_body(FavoriteKind::Planet);
    planet["name"] = json!("x".repeat(BODY_LIMIT_BYTES + 1));
    let payload = planet.to_string();

    let declared = Request::builder()
        .method(Method::POST)
        .uri("/planets")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload.clone()))
        .unwrap();
    let res = router.clone().oneshot(declared).await.unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let (status, body) = call(&router, Method::POST, "/planets", Some(planet)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");

    let (_, listed) = call(&router, Method::GET, "/planets", None).await;
    assert_eq!(listed["meta"]["count"], 0);
}
