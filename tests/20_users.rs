mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::unique_name;

#[tokio::test]
async fn create_normalizes_names() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    let name = unique_name("ada");

    let (status, body) = app
        .post("/users", json!({ "first_name": format!("  {}  ", name.to_lowercase()), "last_name": "Lovelace" }))
        .await?;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["message"], "user is created");
    assert_eq!(body["data"]["first_name"], name);
    assert_eq!(body["data"]["last_name"], "Lovelace 😄");
    assert_eq!(body["data"]["full_name"], format!("{} Lovelace 😄", name));
    assert!(body["data"].get("deleted_at").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_first_name_is_rejected() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    let name = unique_name("dup");

    app.create_user(&name).await?;
    let (status, body) = app.post("/users", json!({ "first_name": name.to_lowercase() })).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "first_name must be unique");
    Ok(())
}

#[tokio::test]
async fn batch_create_is_all_or_nothing() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    let kept = unique_name("first");
    let repeated = unique_name("twice");

    let (status, _) = app
        .post(
            "/users",
            json!([{ "first_name": kept }, { "first_name": repeated }, { "first_name": repeated }]),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let written: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE first_name = ANY($1)")
        .bind(vec![kept.clone(), repeated.clone()])
        .fetch_one(app.db.pool())
        .await?;
    assert_eq!(written, 0);

    let (status, body) = app
        .post("/users", json!([{ "first_name": kept }, { "first_name": repeated, "last_name": "Two" }]))
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let created = body["data"].as_array().expect("batch returns an array");
    assert_eq!(created.len(), 2);
    assert_eq!(created[1]["last_name"], "Two 😄");
    Ok(())
}

#[tokio::test]
async fn list_loads_contacts_by_default() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    app.create_user(&unique_name("list")).await?;

    let (status, body) = app.get("/users").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["count"].as_i64().unwrap_or(0) >= 1);
    let rows = body["data"]["rows"].as_array().expect("rows");
    assert!(!rows.is_empty());
    for row in rows {
        assert!(row["contacts"].is_array(), "{}", row);
        assert!(row.get("subjects").is_none(), "{}", row);
    }

    let (status, body) = app.get("/users?limit=1&offset=0").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rows"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn show_honours_include() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    let id = app.create_user(&unique_name("show")).await?;

    let (status, body) = app.get(&format!("/users/{}?include=contacts,subjects", id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["contacts"].is_array());
    assert!(body["data"]["subjects"].is_array());

    let (_, body) = app.get(&format!("/users/{}?include=", id)).await?;
    assert!(body["data"].get("contacts").is_none());
    assert!(body["data"].get("subjects").is_none());
    Ok(())
}

#[tokio::test]
async fn update_applies_field_rules() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    let id = app.create_user(&unique_name("old")).await?;
    let renamed = unique_name("new");

    let (status, body) = app
        .put(&format!("/users/{}", id), json!({ "first_name": renamed.to_lowercase(), "last_name": "Hopper" }))
        .await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["message"], "User updated successfully!");
    assert_eq!(body["data"]["first_name"], renamed);
    assert_eq!(body["data"]["last_name"], "Hopper 😄");

    let (status, _) = app.put("/users/2147483000", json!({ "last_name": "Nobody" })).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn soft_delete_and_restore() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    let name = unique_name("gone");
    let id = app.create_user(&name).await?;

    let (status, body) = app.delete(&format!("/users/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully!");

    let (status, body) = app.get(&format!("/users/{}", id)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found!");

    let (status, _) = app.delete(&format!("/users/{}", id)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Row is still present, only hidden
    let deleted_at: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT deleted_at FROM users WHERE id = $1")
            .bind(id as i32)
            .fetch_one(app.db.pool())
            .await?;
    assert!(deleted_at.is_some());

    let (status, body) = app.get(&format!("/users/restore?id={}", id)).await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["message"], "User restored successfully!");
    assert_eq!(body["data"]["first_name"], name);

    let (status, _) = app.get(&format!("/users/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn restore_conflicts_with_live_name() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    let name = unique_name("clash");
    let first = app.create_user(&name).await?;
    app.delete(&format!("/users/{}", first)).await?;

    // Soft-deleted names are free again
    app.create_user(&name).await?;

    let (status, body) = app.get(&format!("/users/restore?id={}", first)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "first_name must be unique");
    Ok(())
}

#[tokio::test]
async fn restore_unknown_id_is_not_found() -> Result<()> {
    let Some(app) = common::setup().await? else { return Ok(()) };
    let (status, _) = app.get("/users/restore?id=2147483000").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
