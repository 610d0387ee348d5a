use axum::http::{self, Request, StatusCode};
use base64::Engine;
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn auth() -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!(
        "{}:{}",
        mock_server::USERNAME,
        mock_server::PASSWORD
    ));
    format!("Basic {token}")
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn authed(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth())
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn authed_json(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, auth())
        .body(body.to_string())
        .unwrap()
}

// Router clones share one store, so multi-step flows clone per request.

// --- discovery ---

#[tokio::test]
async fn discovery_announces_the_namespace() {
    let resp = app().oneshot(get("/wp-json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let site = body_json(resp).await;
    assert_eq!(site["name"], "Mock Site");
    assert_eq!(site["namespaces"], serde_json::json!(["wp/v2"]));
    assert_eq!(site["gmt_offset"], 0.0);
}

// --- posts ---

#[tokio::test]
async fn list_posts_starts_empty() {
    let resp = app().oneshot(get("/wp-json/wp/v2/posts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let posts = body_json(resp).await;
    assert_eq!(posts, serde_json::json!([]));
}

#[tokio::test]
async fn create_post_requires_credentials() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"Hello"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err = body_json(resp).await;
    assert_eq!(err["code"], "rest_cannot_create");
    assert_eq!(err["data"]["status"], 401);
}

#[tokio::test]
async fn create_post_defaults_to_draft() {
    let resp = app()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"Hello World"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let post = body_json(resp).await;
    assert_eq!(post["title"]["rendered"], "Hello World");
    assert_eq!(post["status"], "draft");
    assert_eq!(post["slug"], "hello-world");
    assert_eq!(post["categories"], serde_json::json!([1]));
    assert_eq!(post["type"], "post");
}

#[tokio::test]
async fn retrieve_post_not_found() {
    let resp = app()
        .oneshot(get("/wp-json/wp/v2/posts/999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err = body_json(resp).await;
    assert_eq!(err["code"], "rest_post_invalid_id");
}

#[tokio::test]
async fn drafts_are_hidden_from_anonymous_readers() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"Secret draft"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], "rest_forbidden");

    let resp = app.clone().oneshot(get("/wp-json/wp/v2/posts")).await.unwrap();
    assert_eq!(body_json(resp).await, serde_json::json!([]));

    let resp = app
        .clone()
        .oneshot(authed("GET", "/wp-json/wp/v2/posts?status=draft"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn status_filter_is_forbidden_without_credentials() {
    let resp = app()
        .oneshot(get("/wp-json/wp/v2/posts?status=draft"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], "rest_forbidden_status");
}

#[tokio::test]
async fn edit_context_is_forbidden_without_credentials() {
    let resp = app()
        .oneshot(get("/wp-json/wp/v2/posts?context=edit"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], "rest_forbidden_context");
}

#[tokio::test]
async fn per_page_is_validated() {
    let resp = app()
        .oneshot(get("/wp-json/wp/v2/posts?per_page=0"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err = body_json(resp).await;
    assert_eq!(err["code"], "rest_invalid_param");
    assert_eq!(err["message"], "Invalid parameter(s): per_page");
}

#[tokio::test]
async fn post_lifecycle_trash_then_force_delete() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"Walk dog","content":"<p>Around the block.</p>","status":"publish"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["id"].as_u64().unwrap();

    // visible anonymously once published
    let resp = app.clone().oneshot(get("/wp-json/wp/v2/posts")).await.unwrap();
    let posts = body_json(resp).await;
    assert_eq!(posts.as_array().unwrap().len(), 1);
    assert_eq!(posts[0]["id"], id);

    // update through POST on the entity path
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/wp-json/wp/v2/posts/{id}"),
            r#"{"title":"Walk cat"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["title"]["rendered"], "Walk cat");
    assert_eq!(updated["content"]["rendered"], "<p>Around the block.</p>");

    // first delete trashes
    let resp = app
        .clone()
        .oneshot(authed("DELETE", &format!("/wp-json/wp/v2/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "trash");

    // second trash is gone
    let resp = app
        .clone()
        .oneshot(authed("DELETE", &format!("/wp-json/wp/v2/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::GONE);
    assert_eq!(body_json(resp).await["code"], "rest_already_trashed");

    // force delete unwraps the previous state
    let resp = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/wp-json/wp/v2/posts/{id}?force=true"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let gone = body_json(resp).await;
    assert_eq!(gone["deleted"], true);
    assert_eq!(gone["previous"]["id"], id);

    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn password_protected_content_is_gated() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"Members","content":"<p>Inside.</p>","status":"publish","password":"swordfish"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let hidden = body_json(resp).await;
    assert_eq!(hidden["content"]["protected"], true);
    assert_eq!(hidden["content"]["rendered"], "");

    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/posts/{id}?password=wrong")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["code"], "rest_post_incorrect_password");

    let resp = app
        .clone()
        .oneshot(get(&format!(
            "/wp-json/wp/v2/posts/{id}?password=swordfish"
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["content"]["rendered"], "<p>Inside.</p>");
}

// --- revisions ---

#[tokio::test]
async fn updates_accumulate_revisions() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"v1","status":"publish"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();

    for title in ["v2", "v3"] {
        let resp = app
            .clone()
            .oneshot(authed_json(
                "POST",
                &format!("/wp-json/wp/v2/posts/{id}"),
                &format!(r#"{{"title":"{title}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // reads need credentials
    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/posts/{id}/revisions")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], "rest_cannot_read");

    let resp = app
        .clone()
        .oneshot(authed("GET", &format!("/wp-json/wp/v2/posts/{id}/revisions")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let revisions = body_json(resp).await;
    assert_eq!(revisions.as_array().unwrap().len(), 2);
    assert_eq!(revisions[0]["parent"], id);
    assert_eq!(revisions[0]["slug"], format!("{id}-revision-v2"));
    assert_eq!(revisions[0]["title"]["rendered"], "v3");
}

#[tokio::test]
async fn revision_delete_requires_force() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"v1","status":"publish"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/wp-json/wp/v2/posts/{id}"),
            r#"{"title":"v2"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(authed("GET", &format!("/wp-json/wp/v2/posts/{id}/revisions")))
        .await
        .unwrap();
    let revision_id = body_json(resp).await[0]["id"].as_u64().unwrap();

    let resp = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/wp-json/wp/v2/posts/{id}/revisions/{revision_id}"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body_json(resp).await["code"], "rest_trash_not_supported");

    let resp = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/wp-json/wp/v2/posts/{id}/revisions/{revision_id}?force=true"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["deleted"], true);

    let resp = app
        .clone()
        .oneshot(authed("GET", &format!("/wp-json/wp/v2/posts/{id}/revisions")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}

#[tokio::test]
async fn autosave_overwrites_in_place() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"Post","status":"publish"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/wp-json/wp/v2/posts/{id}/autosaves"),
            r#"{"title":"Draft v1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first = body_json(resp).await;
    assert_eq!(first["slug"], format!("{id}-autosave-v1"));

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            &format!("/wp-json/wp/v2/posts/{id}/autosaves"),
            r#"{"title":"Draft v2"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let second = body_json(resp).await;
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["title"]["rendered"], "Draft v2");
}

// --- pages ---

#[tokio::test]
async fn pages_carry_hierarchy_fields() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/pages",
            r#"{"title":"About","status":"publish","menu_order":2}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let page = body_json(resp).await;
    assert_eq!(page["type"], "page");
    assert_eq!(page["menu_order"], 2);
    assert_eq!(page["parent"], 0);
    assert!(page.get("sticky").is_none());

    let resp = app
        .clone()
        .oneshot(get("/wp-json/wp/v2/pages?menu_order=2"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);

    let resp = app
        .clone()
        .oneshot(get("/wp-json/wp/v2/pages?menu_order=9"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}

// --- comments ---

#[tokio::test]
async fn comments_require_a_published_post() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/wp-json/wp/v2/comments",
            r#"{"post":1,"content":"Hi"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], "rest_comment_login_required");

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/comments",
            r#"{"post":999,"content":"Hi"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["code"], "rest_comment_invalid_post_id");
}

#[tokio::test]
async fn comment_lifecycle() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            r#"{"title":"Post","status":"publish"}"#,
        ))
        .await
        .unwrap();
    let post_id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/comments",
            &format!(r#"{{"post":{post_id},"content":"Nice post!","author_name":"admin"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let comment = body_json(resp).await;
    assert_eq!(comment["status"], "approved");
    let id = comment["id"].as_u64().unwrap();

    // anonymous readers see it in the default approve view
    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/comments?post={post_id}")))
        .await
        .unwrap();
    let listed = body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert!(listed[0].get("author_email").is_none());

    // trash, then force delete
    let resp = app
        .clone()
        .oneshot(authed("DELETE", &format!("/wp-json/wp/v2/comments/{id}")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["status"], "trash");

    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/comments/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], "rest_cannot_read");

    let resp = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/wp-json/wp/v2/comments/{id}?force=true"),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["deleted"], true);

    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/comments/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["code"], "rest_comment_invalid_id");
}

// --- categories ---

#[tokio::test]
async fn categories_start_with_the_default_term() {
    let resp = app()
        .oneshot(get("/wp-json/wp/v2/categories"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let terms = body_json(resp).await;
    assert_eq!(terms.as_array().unwrap().len(), 1);
    assert_eq!(terms[0]["id"], 1);
    assert_eq!(terms[0]["slug"], "uncategorized");
}

#[tokio::test]
async fn category_create_validates_the_name() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json("POST", "/wp-json/wp/v2/categories", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err = body_json(resp).await;
    assert_eq!(err["code"], "rest_missing_callback_param");
    assert_eq!(err["message"], "Missing parameter(s): name");

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/categories",
            r#"{"name":"News"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["slug"], "news");

    // duplicate names collide case-insensitively under the same parent
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/categories",
            r#"{"name":"news"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "term_exists");
}

#[tokio::test]
async fn category_delete_requires_force() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/categories",
            r#"{"name":"Old"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = app
        .clone()
        .oneshot(authed("DELETE", &format!("/wp-json/wp/v2/categories/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body_json(resp).await["code"], "rest_trash_not_supported");

    let resp = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/wp-json/wp/v2/categories/{id}?force=true"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["previous"]["name"], "Old");

    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/categories/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["code"], "rest_term_invalid");
}

#[tokio::test]
async fn category_counts_track_published_posts() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/categories",
            r#"{"name":"News"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/wp-json/wp/v2/posts",
            &format!(r#"{{"title":"Scoop","status":"publish","categories":[{id}]}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(get(&format!("/wp-json/wp/v2/categories/{id}")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["count"], 1);

    // the seeded default category has no posts and drops out
    let resp = app
        .clone()
        .oneshot(get("/wp-json/wp/v2/categories?hide_empty=true"))
        .await
        .unwrap();
    let terms = body_json(resp).await;
    assert_eq!(terms.as_array().unwrap().len(), 1);
    assert_eq!(terms[0]["id"], id);
}

// --- taxonomies ---

#[tokio::test]
async fn taxonomies_list_the_two_builtins() {
    let app = app();
    let resp = app.clone().oneshot(get("/wp-json/wp/v2/taxonomies")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let map = body_json(resp).await;
    assert_eq!(map["category"]["rest_base"], "categories");
    assert_eq!(map["post_tag"]["hierarchical"], false);

    let resp = app
        .clone()
        .oneshot(get("/wp-json/wp/v2/taxonomies?type=page"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, serde_json::json!({}));
}

#[tokio::test]
async fn retrieve_taxonomy_validates_the_slug() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(get("/wp-json/wp/v2/taxonomies/category"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["types"], serde_json::json!(["post"]));

    let resp = app
        .clone()
        .oneshot(get("/wp-json/wp/v2/taxonomies/genre"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["code"], "rest_taxonomy_invalid");

    let resp = app
        .clone()
        .oneshot(get("/wp-json/wp/v2/taxonomies/category?context=edit"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["code"], "rest_forbidden_context");
}
