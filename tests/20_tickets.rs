mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn empty_field_is_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/tickets"))
        .json(&json!({ "customer": "c", "topic": "t", "contents": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing fields in payload.");
    Ok(())
}

#[tokio::test]
async fn absent_field_is_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/tickets"))
        .json(&json!({ "customer": "c", "topic": "t" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/tickets"))
        .header("content-type", "application/json")
        .body("{\"customer\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn created_ticket_is_listed() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/tickets"))
        .json(&json!({ "customer": "c", "topic": "t", "contents": "printer on fire" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<Value>().await?["data"]["id"].as_i64().expect("numeric id");

    let res = server.client.get(server.url("/tickets")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let tickets = body["data"].as_array().expect("ticket array");
    assert!(tickets.iter().any(|t| {
        t["id"] == id && t["customer"] == "c" && t["topic"] == "t" && t["contents"] == "printer on fire"
    }));
    Ok(())
}

#[tokio::test]
async fn listing_needs_no_token() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.client.get(server.url("/tickets")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn wrong_method_is_405() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.client.put(server.url("/tickets")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
