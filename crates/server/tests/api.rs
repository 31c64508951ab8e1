use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{ServerState, router};

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build().await.unwrap();
    router(ServerState {
        engine: Arc::new(engine),
    })
}

async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    request(router, "GET", uri, None).await
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(router, "POST", uri, Some(body)).await
}

fn lunch_payload() -> Value {
    json!({
        "descripcion": "Lunch",
        "monto": 12.50,
        "fecha_gasto": "2024-01-01T12:00:00Z",
        "categoria": 1
    })
}

#[tokio::test]
async fn full_expense_flow() {
    let app = test_router().await;

    let (status, body) = post(&app, "/categorias", json!({"nombre": "Food"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["nombre"], json!("Food"));

    let (status, body) = post(&app, "/gastos", lunch_payload()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["monto"].as_f64(), Some(12.5));
    assert_eq!(body["categoria"], json!(1));
    assert_eq!(body["categoria_nombre"], json!("Food"));

    // Identical resubmission is a duplicate.
    let (status, body) = post(&app, "/gastos", lunch_payload()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        json!("an expense with the same description, amount, and date already exists")
    );

    let (status, body) = get(&app, "/gastos?categoria=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["descripcion"], json!("Lunch"));

    let (status, body) = get(&app, "/gastos/total").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_f64(), Some(12.5));
}

#[tokio::test]
async fn total_is_zero_when_empty() {
    let app = test_router().await;

    let (status, body) = get(&app, "/gastos/total").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn total_ignores_list_filters() {
    let app = test_router().await;
    post(&app, "/categorias", json!({"nombre": "Food"})).await;
    post(&app, "/gastos", lunch_payload()).await;

    // The aggregate is global; any query string is irrelevant.
    let (status, body) = get(&app, "/gastos/total?categoria=99&search=nope").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_f64(), Some(12.5));
}

#[tokio::test]
async fn validation_errors_are_422_with_messages() {
    let app = test_router().await;
    post(&app, "/categorias", json!({"nombre": "Food"})).await;

    let mut payload = lunch_payload();
    payload["monto"] = json!(0);
    let (status, body) = post(&app, "/gastos", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("amount must be greater than zero"));

    let mut payload = lunch_payload();
    payload["descripcion"] = json!("   ");
    let (status, body) = post(&app, "/gastos", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("description cannot be empty"));

    let mut payload = lunch_payload();
    payload.as_object_mut().unwrap().remove("fecha_gasto");
    let (status, body) = post(&app, "/gastos", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("expense date is required"));
}

#[tokio::test]
async fn missing_categoria_reference_is_404() {
    let app = test_router().await;

    let (status, _) = post(&app, "/gastos", lunch_payload()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_categoria_nombre_is_409() {
    let app = test_router().await;
    post(&app, "/categorias", json!({"nombre": "Food"})).await;

    let (status, _) = post(&app, "/categorias", json!({"nombre": "Food"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_categoria_is_restricted_while_referenced() {
    let app = test_router().await;
    post(&app, "/categorias", json!({"nombre": "Food"})).await;
    post(&app, "/gastos", lunch_payload()).await;

    let (status, _) = request(&app, "DELETE", "/categorias/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = request(&app, "DELETE", "/gastos/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(&app, "DELETE", "/categorias/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn get_missing_resources_are_404() {
    let app = test_router().await;

    let (status, _) = get(&app, "/categorias/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/gastos/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn seed_amounts(app: &Router) {
    post(app, "/categorias", json!({"nombre": "Food"})).await;
    for (descripcion, monto, fecha) in [
        ("Coffee", 5.0, "2024-01-01T08:00:00Z"),
        ("Dinner", 20.0, "2024-01-02T20:00:00Z"),
        ("Lunch", 10.0, "2024-01-03T13:00:00Z"),
    ] {
        let (status, _) = post(
            app,
            "/gastos",
            json!({
                "descripcion": descripcion,
                "monto": monto,
                "fecha_gasto": fecha,
                "categoria": 1
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

fn montos(body: &Value) -> Vec<f64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|g| g["monto"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn ordering_by_monto_works_both_ways() {
    let app = test_router().await;
    seed_amounts(&app).await;

    let (status, body) = get(&app, "/gastos?ordering=monto").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(montos(&body), [5.0, 10.0, 20.0]);

    let (_, body) = get(&app, "/gastos?ordering=-monto").await;
    assert_eq!(montos(&body), [20.0, 10.0, 5.0]);
}

#[tokio::test]
async fn unknown_ordering_falls_back_to_newest_first() {
    let app = test_router().await;
    seed_amounts(&app).await;

    let (status, body) = get(&app, "/gastos?ordering=bogus").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(montos(&body), [10.0, 20.0, 5.0]);
}

#[tokio::test]
async fn search_matches_substring_case_insensitively() {
    let app = test_router().await;
    seed_amounts(&app).await;

    let (status, body) = get(&app, "/gastos?search=lun").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["descripcion"], json!("Lunch"));
}

#[tokio::test]
async fn patch_merges_over_stored_values() {
    let app = test_router().await;
    post(&app, "/categorias", json!({"nombre": "Food"})).await;
    post(&app, "/gastos", lunch_payload()).await;

    let (status, body) =
        request(&app, "PATCH", "/gastos/1", Some(json!({"monto": 20.0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monto"].as_f64(), Some(20.0));
    assert_eq!(body["descripcion"], json!("Lunch"));

    // A no-op PATCH matches its own triple and must not conflict.
    let (status, _) = request(&app, "PATCH", "/gastos/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn put_replaces_and_requires_all_fields() {
    let app = test_router().await;
    post(&app, "/categorias", json!({"nombre": "Food"})).await;
    post(&app, "/gastos", lunch_payload()).await;

    let (status, _) =
        request(&app, "PUT", "/gastos/1", Some(json!({"monto": 20.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut payload = lunch_payload();
    payload["monto"] = json!(20.0);
    let (status, body) = request(&app, "PUT", "/gastos/1", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monto"].as_f64(), Some(20.0));
}

#[tokio::test]
async fn categoria_update_and_partial_update() {
    let app = test_router().await;
    post(&app, "/categorias", json!({"nombre": "Food"})).await;

    let (status, body) = request(
        &app,
        "PUT",
        "/categorias/1",
        Some(json!({"nombre": "Groceries"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], json!("Groceries"));

    let (status, body) = request(&app, "PATCH", "/categorias/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], json!("Groceries"));
}
