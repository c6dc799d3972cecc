use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{json, Value};
use tower::Service;

use server::routes;
use server::state::ServerState;
use service::auth::token::TokenConfig;

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

async fn build_app() -> anyhow::Result<(Router, DatabaseConnection)> {
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        let msg = format!("{}", e);
        if msg.contains("duplicate key value violates unique constraint") {
            eprintln!("migrations already applied, continue: {}", msg);
        } else {
            return Err(e.into());
        }
    }
    let state = ServerState { db: db.clone(), tokens: TokenConfig::new("test-secret", 15, 30) };
    Ok((routes::build_router(cors(), state), db))
}

fn unique_iin() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{:012}", nanos % 1_000_000_000_000)
}

fn unique_username() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("a{:09}", nanos)
}

fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {}", t));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn put_json(uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn doctor_payload(iin: &str) -> Value {
    json!({
        "first_name": "Aray",
        "last_name": "Bekova",
        "middle_name": "Serikovna",
        "iin": iin,
        "password": "S3curePass!",
        "gender": "Female",
        "age": 41,
        "qualification": "Internists"
    })
}

fn patient_payload(iin: &str, doctor_id: i64) -> Value {
    json!({
        "first_name": "Dana",
        "last_name": "Kim",
        "middle_name": "Olegovna",
        "iin": iin,
        "password": "S3curePass!",
        "gender": "Female",
        "age": 29,
        "doctor_id": doctor_id
    })
}

/// First admin cannot be created over HTTP; insert it directly.
async fn bootstrap_admin(db: &DatabaseConnection, username: &str, password: &str) -> anyhow::Result<()> {
    let hash = service::auth::password::hash_password(password)?;
    let am = models::admin::ActiveModel {
        first_name: Set("Marat".into()),
        last_name: Set("Aliyev".into()),
        middle_name: Set("Bolatovich".into()),
        username: Set(username.to_owned()),
        hashed_password: Set(hash),
        ..Default::default()
    };
    am.insert(db).await?;
    Ok(())
}

async fn login(app: &Router, username: &str, password: &str, role: &str) -> anyhow::Result<String> {
    let resp = app
        .clone()
        .call(post_json(
            "/api/v1/auth/login",
            None,
            &json!({"username": username, "password": password, "role": role}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let pair = body_json(resp).await?;
    Ok(pair["access_token"].as_str().unwrap().to_owned())
}

#[tokio::test]
async fn patient_lifecycle_with_role_gating() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (app, db) = build_app().await?;

    // Doctor signup + login
    let doctor_iin = unique_iin();
    let resp = app
        .clone()
        .call(post_json("/api/v1/doctors/register", None, &doctor_payload(&doctor_iin)))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doctor = body_json(resp).await?;
    let doctor_id = doctor["id"].as_i64().unwrap();
    let doctor_token = login(&app, &doctor_iin, "S3curePass!", "Doctor").await?;

    // Patient register must point at an existing doctor
    let patient_iin = unique_iin();
    let resp = app
        .clone()
        .call(post_json(
            "/api/v1/patients/register",
            None,
            &patient_payload(&patient_iin, doctor_id + 100_000),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .call(post_json("/api/v1/patients/register", None, &patient_payload(&patient_iin, doctor_id)))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let patient = body_json(resp).await?;
    let patient_id = patient["id"].as_i64().unwrap();
    assert!(patient.get("hashed_password").is_none());

    // Duplicate IIN rejected
    let resp = app
        .clone()
        .call(post_json("/api/v1/patients/register", None, &patient_payload(&patient_iin, doctor_id)))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Patients may read their own record but not the listing
    let patient_token = login(&app, &patient_iin, "S3curePass!", "Patient").await?;
    let resp = app
        .clone()
        .call(request("GET", &format!("/api/v1/patients/{patient_id}"), &patient_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .call(request("GET", "/api/v1/patients", &patient_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .clone()
        .call(request(
            "GET",
            "/api/v1/doctors/search?query=Bekova",
            &patient_token,
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Doctor sees the paginated envelope
    let resp = app
        .clone()
        .call(request("GET", "/api/v1/patients?page=1&page_size=5", &doctor_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_json(resp).await?;
    assert_eq!(page["page"], 1);
    assert_eq!(page["page_size"], 5);
    assert!(page["total"].as_u64().unwrap() >= 1);
    assert!(page["total_pages"].as_u64().unwrap() >= 1);
    assert!(page["data"].is_array());

    // Fuzzy search finds the patient by last name
    let resp = app
        .clone()
        .call(request("GET", "/api/v1/patients/search?query=Kim", &doctor_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    // Full update re-points and re-hashes
    let mut updated = patient_payload(&patient_iin, doctor_id);
    updated["first_name"] = json!("Aliya");
    updated["age"] = json!(30);
    let resp = app
        .clone()
        .call(put_json(&format!("/api/v1/patients/{patient_id}"), &doctor_token, &updated))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["first_name"], "Aliya");

    // Doctor removal blocked while the patient is assigned
    let username = unique_username();
    bootstrap_admin(&db, &username, "S3curePass!").await?;
    let admin_token = login(&app, &username, "S3curePass!", "Admin").await?;

    let resp = app
        .clone()
        .call(request("DELETE", &format!("/api/v1/doctors/{doctor_id}"), &admin_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app
        .clone()
        .call(request("DELETE", &format!("/api/v1/patients/{patient_id}"), &doctor_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted = body_json(resp).await?;
    assert_eq!(deleted.as_i64().unwrap(), patient_id);

    let resp = app
        .clone()
        .call(request("DELETE", &format!("/api/v1/doctors/{doctor_id}"), &admin_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn admin_endpoints_require_admin_token() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let (app, db) = build_app().await?;

    let username = unique_username();
    bootstrap_admin(&db, &username, "S3curePass!").await?;
    let admin_token = login(&app, &username, "S3curePass!", "Admin").await?;

    // Unauthenticated listing rejected
    let req = Request::builder().uri("/api/v1/admins").body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Admin creates another admin
    let second = unique_username();
    let payload = json!({
        "first_name": "Aigerim",
        "last_name": "Nurpeisova",
        "middle_name": "Kairatovna",
        "username": second,
        "password": "S3curePass!"
    });
    let resp = app
        .clone()
        .call(post_json("/api/v1/admins/register", Some(&admin_token), &payload))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await?;
    let second_id = created["id"].as_i64().unwrap();

    // Duplicate username conflicts
    let resp = app
        .clone()
        .call(post_json("/api/v1/admins/register", Some(&admin_token), &payload))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Doctor tokens are not enough
    let doctor_iin = unique_iin();
    let resp = app
        .clone()
        .call(post_json("/api/v1/doctors/register", None, &doctor_payload(&doctor_iin)))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doctor_token = login(&app, &doctor_iin, "S3curePass!", "Doctor").await?;
    let resp = app
        .clone()
        .call(request("GET", "/api/v1/admins", &doctor_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Cleanup path doubles as the delete check
    let resp = app
        .clone()
        .call(request("DELETE", &format!("/api/v1/admins/{second_id}"), &admin_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .call(request("GET", &format!("/api/v1/admins/{second_id}"), &admin_token))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}
