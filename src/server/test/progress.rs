use super::*;

fn progress_uri(tree: &factory::helpers::CourseTree) -> String {
    format!(
        "/courses/{}/units/{}/modules/{}/progress",
        tree.course.id, tree.unit.id, tree.module.id
    )
}

/// Tests reading module progress before anything was recorded.
///
/// Expected: progress 0, status `uninitiated`, sections without progress
#[tokio::test]
async fn reads_zero_progress() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let (_, token) = app.user_token().await;

    let (status, body) = app.get(&progress_uri(&tree), Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["progress"], json!(0));
    assert_eq!(body["payload"]["status"], json!("uninitiated"));
    assert_eq!(body["payload"]["sections"].as_array().unwrap().len(), 3);
}

/// Tests recording a batch twice.
///
/// Completing two of three sections stores 66 percent in progress; the
/// second identical submission leaves the result unchanged.
///
/// Expected: both posts 200, progress 66 and status `in_progress` afterwards
#[tokio::test]
async fn recording_same_batch_twice_is_idempotent() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let (_, token) = app.user_token().await;
    let uri = progress_uri(&tree);
    let batch = json!({
        "sections": [
            { "sectionId": tree.sections[0].id, "completedAt": "2026-01-01T10:00:00Z" },
            { "sectionId": tree.sections[1].id, "completedAt": "2026-01-01T10:05:00Z" }
        ],
        "answers": [
            { "questionId": tree.question.id, "optionId": tree.correct_option.id }
        ]
    });

    let (first, _) = app.post(&uri, Some(&token), batch.clone()).await;
    let (second, _) = app.post(&uri, Some(&token), batch).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let (_, body) = app.get(&uri, Some(&token)).await;
    assert_eq!(body["payload"]["progress"], json!(66));
    assert_eq!(body["payload"]["status"], json!("in_progress"));
}

/// Tests that completing every section completes the module.
///
/// Expected: progress 100 and status `completed`
#[tokio::test]
async fn completing_all_sections_completes_module() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let (_, token) = app.user_token().await;
    let uri = progress_uri(&tree);
    let sections: Vec<Value> = tree
        .sections
        .iter()
        .map(|s| json!({ "sectionId": s.id, "completedAt": "2026-01-01T10:00:00Z" }))
        .collect();

    let (status, _) = app
        .post(&uri, Some(&token), json!({ "sections": sections }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&uri, Some(&token)).await;
    assert_eq!(body["payload"]["progress"], json!(100));
    assert_eq!(body["payload"]["status"], json!("completed"));
}

/// Tests a batch naming a section from another module.
///
/// Expected: 400, and nothing is recorded
#[tokio::test]
async fn rejects_foreign_section() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let other = factory::create_course_tree(&app.db).await.unwrap();
    let (_, token) = app.user_token().await;
    let uri = progress_uri(&tree);

    let (status, _) = app
        .post(
            &uri,
            Some(&token),
            json!({
                "sections": [
                    { "sectionId": tree.sections[0].id, "completedAt": "2026-01-01T10:00:00Z" },
                    { "sectionId": other.sections[0].id, "completedAt": "2026-01-01T10:00:00Z" }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get(&uri, Some(&token)).await;
    assert_eq!(body["payload"]["progress"], json!(0));
}

/// Tests recording progress in a module that does not exist.
///
/// Expected: 404
#[tokio::test]
async fn unknown_module_is_not_found() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let (_, token) = app.user_token().await;

    let (status, _) = app
        .post(
            &format!(
                "/courses/{}/units/{}/modules/9999/progress",
                tree.course.id, tree.unit.id
            ),
            Some(&token),
            json!({ "sections": [] }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Tests that recording progress moves the enrollment pointer and starts a streak.
///
/// Expected: the course lists this unit and module as current; streak is 1
#[tokio::test]
async fn recording_updates_enrollment_and_streak() {
    let app = TestApp::new().await;
    let tree = factory::create_course_tree(&app.db).await.unwrap();
    let (_, token) = app.user_token().await;

    app.post(
        &progress_uri(&tree),
        Some(&token),
        json!({ "sections": [ { "sectionId": tree.sections[0].id, "seenAt": "2026-01-01T10:00:00Z" } ] }),
    )
    .await;

    let (status, body) = app
        .get(&format!("/courses/{}/progress", tree.course.id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["currentUnit"]["id"], json!(tree.unit.id));
    assert_eq!(body["payload"]["currentModule"]["id"], json!(tree.module.id));

    let (_, body) = app.get("/users/me/streak", Some(&token)).await;
    assert_eq!(body["payload"]["currentStreak"], json!(1));
}
