mod common;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

async fn add_movie(server: &common::TestServer, token: &str, body: Value) -> Result<Value> {
    let res = server
        .client
        .post(server.url("/add_movie"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(res.json().await?)
}

fn id_of(movie: &Value) -> Result<String> {
    movie["id"].as_str().map(str::to_string).context("movie has no id")
}

#[tokio::test]
async fn add_get_delete_lifecycle() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.login_as("paul").await?;

    let created = add_movie(&server, &token, json!({ "Title": "Dune", "Year": "2021" })).await?;
    let id = id_of(&created)?;
    assert!(Uuid::parse_str(&id).is_ok());
    assert_eq!(created["Title"], "Dune");
    assert_eq!(created["Year"], "2021");
    assert!(created["Director"].is_null());
    assert!(created["Images"].is_null());

    let res = server
        .client
        .get(server.url(&format!("/get_movie/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await?;
    assert_eq!(fetched, created);

    let res = server
        .client
        .delete(server.url(&format!("/delete_movie/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "message": "Favourite movie deleted successfully" }));

    let res = server
        .client
        .get(server.url(&format!("/get_movie/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Movie not found");

    Ok(())
}

#[tokio::test]
async fn partial_update_preserves_other_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.login_as("chani").await?;

    let created = add_movie(
        &server,
        &token,
        json!({
            "Title": "Dune",
            "Year": "2021",
            "Director": "Denis Villeneuve",
            "Images": ["https://example.com/dune.jpg"]
        }),
    )
    .await?;
    let id = id_of(&created)?;

    let res = server
        .client
        .put(server.url(&format!("/update_movie/{}", id)))
        .bearer_auth(&token)
        .json(&json!({ "Year": "2022", "imdbRating": "8.0" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["Title"], "Dune");
    assert_eq!(updated["Director"], "Denis Villeneuve");
    assert_eq!(updated["Images"], json!(["https://example.com/dune.jpg"]));
    assert_eq!(updated["Year"], "2022");
    assert_eq!(updated["imdbRating"], "8.0");

    let res = server
        .client
        .get(server.url(&format!("/get_movie/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    let fetched: Value = res.json().await?;
    assert_eq!(fetched, updated);

    Ok(())
}

#[tokio::test]
async fn empty_list_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.login_as("leto").await?;

    let res = server.client.get(server.url("/get_movies")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "No favourite movies found");

    Ok(())
}

#[tokio::test]
async fn list_returns_movies_in_insertion_order() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.login_as("jessica").await?;

    let first = add_movie(&server, &token, json!({ "Title": "Blade Runner" })).await?;
    let second = add_movie(&server, &token, json!({ "Title": "Blade Runner" })).await?;
    assert_ne!(first["id"], second["id"]);

    let res = server.client.get(server.url("/get_movies")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let movies: Vec<Value> = res.json().await?;
    assert_eq!(movies, vec![first, second]);

    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.login_as("stilgar").await?;
    let missing = Uuid::new_v4();

    let res = server
        .client
        .put(server.url(&format!("/update_movie/{}", missing)))
        .bearer_auth(&token)
        .json(&json!({ "Title": "Ghost" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .client
        .delete(server.url(&format!("/delete_movie/{}", missing)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Movie not found");

    // Not a UUID at all
    let res = server
        .client
        .get(server.url("/get_movie/abc123"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn numeric_fields_are_stored_as_text() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.login_as("deckard").await?;

    let created = add_movie(&server, &token, json!({ "Title": "Blade Runner", "Year": 1982, "imdbRating": 8.1 })).await?;
    assert_eq!(created["Year"], "1982");
    assert_eq!(created["imdbRating"], "8.1");

    Ok(())
}
