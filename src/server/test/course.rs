use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Tests listing courses on an empty database.
///
/// Expected: 200 with no items, zero totals and the default page size
#[tokio::test]
async fn empty_course_list() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/courses", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["items"], json!([]));
    assert_eq!(body["payload"]["pagination"]["totalItems"], json!(0));
    assert_eq!(body["payload"]["pagination"]["totalPages"], json!(0));
    assert_eq!(body["payload"]["pagination"]["pageSize"], json!(10));
    assert_eq!(body["payload"]["pagination"]["currentPage"], json!(1));
}

/// Tests that out-of-range pagination is rejected.
///
/// Expected: 400 `INVALID_REQUEST` for page 0 and for page size 101
#[tokio::test]
async fn rejects_out_of_range_pagination() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/courses?page=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], json!("INVALID_REQUEST"));

    let (status, _) = app.get("/courses?pageSize=101", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Tests that a missing course is reported as not found.
///
/// Expected: 404 `NOT_FOUND`
#[tokio::test]
async fn missing_course_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/courses/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], json!("NOT_FOUND"));
}

/// Tests that creating a unit needs a token and the admin role.
///
/// Expected: 401 without a token, 403 for a user, 200 for an admin
#[tokio::test]
async fn create_unit_requires_admin() {
    let app = TestApp::new().await;
    let course = factory::create_course(&app.db).await.unwrap();
    let uri = format!("/courses/{}/units", course.id);
    let (_, user_token) = app.user_token().await;
    let (_, admin_token) = app.admin_token().await;

    let (status, _) = app.post(&uri, None, unit_body("Arrays")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post(&uri, Some(&user_token), unit_body("Arrays"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorCode"], json!("FORBIDDEN"));

    let (status, body) = app
        .post(&uri, Some(&admin_token), unit_body("Arrays"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["courseId"], json!(course.id));
    assert!(body["payload"]["id"].as_i64().is_some());
}

/// Tests numbering of units created without an explicit number, and a clash.
///
/// Expected: numbers 1 then 2, then 409 `DUPLICATE_VALUE` for an explicit 2
#[tokio::test]
async fn numbers_units_sequentially() {
    let app = TestApp::new().await;
    let course = factory::create_course(&app.db).await.unwrap();
    let uri = format!("/courses/{}/units", course.id);
    let (_, token) = app.admin_token().await;

    let (_, first) = app.post(&uri, Some(&token), unit_body("One")).await;
    let (_, second) = app.post(&uri, Some(&token), unit_body("Two")).await;

    assert_eq!(first["payload"]["unitNumber"], json!(1));
    assert_eq!(second["payload"]["unitNumber"], json!(2));

    let (status, body) = app
        .post(
            &uri,
            Some(&token),
            json!({ "unitNumber": 2, "name": "Clash", "description": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], json!("DUPLICATE_VALUE"));
}

/// Tests creating a module with sections, then reading it back publicly.
///
/// Expected: 200, module number 1, sections ordered by position
#[tokio::test]
async fn creates_module_with_sections() {
    let app = TestApp::new().await;
    let course = factory::create_course(&app.db).await.unwrap();
    let unit = factory::create_unit(&app.db, course.id, 1).await.unwrap();
    let (_, token) = app.admin_token().await;
    let uri = format!("/courses/{}/units/{}/modules", course.id, unit.id);

    let (status, body) = app
        .post(
            &uri,
            Some(&token),
            json!({
                "name": "Binary search",
                "description": "Halving the search space",
                "sections": [
                    { "type": "video", "position": 2, "url": "https://example.com/v.mp4" },
                    { "type": "text", "position": 1, "content": "Intro" }
                ]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["moduleNumber"], json!(1));
    let module_id = body["payload"]["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("{}/{}", uri, module_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let sections = body["payload"]["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["type"], json!("text"));
    assert_eq!(sections[1]["type"], json!("video"));
}

/// Tests that a module is only reachable under its own unit and course.
///
/// Expected: 404 when the unit belongs to another course
#[tokio::test]
async fn module_outside_course_is_not_found() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let other = factory::create_course(&app.db).await.unwrap();

    let (status, _) = app
        .get(
            &format!(
                "/courses/{}/units/{}/modules/{}",
                other.id, tree.unit.id, tree.module.id
            ),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Tests the public course tree at both depths.
///
/// Expected: no progress fields and no current position; sections only for `type=full`
#[tokio::test]
async fn public_course_tree_depths() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();

    let (status, body) = app
        .get(&format!("/courses/{}?type=full", tree.course.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let course = &body["payload"];
    assert!(course.get("currentUnit").is_none());
    assert!(course.get("currentModule").is_none());
    let module = &course["units"][0]["modules"][0];
    assert!(module.get("progress").is_none());
    assert!(module.get("status").is_none());
    assert_eq!(module["sections"].as_array().map(Vec::len), Some(3));

    let (status, body) = app
        .get(&format!("/courses/{}?type=summary", tree.course.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let module = &body["payload"]["units"][0]["modules"][0];
    assert_eq!(module["id"], json!(tree.module.id));
    assert!(module.get("sections").is_none());
}

/// Tests the course tree for a signed-in user without any recorded progress.
///
/// Expected: every module at progress 0 and `uninitiated`
#[tokio::test]
async fn course_progress_defaults_to_uninitiated() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let (_, token) = app.user_token().await;

    let (status, body) = app
        .get(&format!("/courses/{}/progress", tree.course.id), Some(&token))
        .await;

    assert_eq!(status, StatusCode::OK);
    let module = &body["payload"]["units"][0]["modules"][0];
    assert_eq!(module["progress"], json!(0));
    assert_eq!(module["status"], json!("uninitiated"));
    assert!(module.get("sections").is_none());
}

/// Tests course deletion permissions and the cascade to its content.
///
/// Expected: 403 for a user, then 200 for an admin with no units, modules or
/// sections left
#[tokio::test]
async fn delete_course_cascades() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let uri = format!("/courses/{}", tree.course.id);
    let (_, user_token) = app.user_token().await;
    let (_, admin_token) = app.admin_token().await;

    let (status, body) = app
        .send(Method::DELETE, &uri, Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorCode"], json!("FORBIDDEN"));
    assert_eq!(entity::unit::Entity::find().count(&app.db).await.unwrap(), 1);

    let (status, _) = app
        .send(Method::DELETE, &uri, Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(entity::unit::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(entity::module::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(entity::section::Entity::find().count(&app.db).await.unwrap(), 0);

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
