use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::core::time::primitive_now_utc;
use crate::db::types::{ResourceKind, UserRole};
use crate::repositories;
use crate::test_support::{self, TestContext};

async fn student_token(ctx: &TestContext) -> (i64, String) {
    let student =
        test_support::insert_user(ctx.state.db(), "sam", "student-pass", UserRole::Student).await;
    (student.id, test_support::bearer_token(&student.username, ctx.state.settings()))
}

async fn get(ctx: &TestContext, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, uri, Some(token), None))
        .await
        .expect("response");
    let status = response.status();
    (status, test_support::read_json(response).await)
}

/// Course with a ten-question test; question `n` has a correct option and a wrong one.
async fn seed_ten_question_test(ctx: &TestContext) -> (i64, i64) {
    let course = repositories::courses::create(ctx.state.db(), "Python 101", primitive_now_utc())
        .await
        .expect("course");

    let texts: Vec<String> = (1..=10).map(|n| format!("Question {n}")).collect();
    let questions = texts
        .iter()
        .map(|text| repositories::tests::NewQuestion {
            text,
            options: vec![
                repositories::tests::NewOption { text: "right", is_correct: true },
                repositories::tests::NewOption { text: "wrong", is_correct: false },
            ],
        })
        .collect();

    let created = repositories::tests::create_with_questions(
        ctx.state.db(),
        repositories::tests::CreateTest {
            course_id: course.id,
            title: "Ten questions",
            description: Some("Scoring fixture"),
            max_score: 100,
            created_by: None,
            questions,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .expect("test");

    (course.id, created.test.id)
}

#[tokio::test]
async fn lessons_by_id_and_title() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let (_, token) = student_token(&ctx).await;

    let lesson = repositories::lessons::create(
        ctx.state.db(),
        repositories::lessons::CreateLesson {
            title: "Intro to Python",
            difficulty: "beginner",
            content: "print('hi')",
            created_at: primitive_now_utc(),
        },
    )
    .await
    .expect("lesson");

    let (status, body) = get(&ctx, &format!("/learn/lesson/id/{}", lesson.id), &token).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["title"], "Intro to Python");

    let (status, body) = get(&ctx, "/learn/lesson/title/Intro%20to%20Python", &token).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["id"], lesson.id);

    let (status, body) = get(&ctx, "/learn/lesson/id/9999", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Lesson not found");

    let (status, _) = get(&ctx, "/learn/lesson/title/Nothing", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resources_and_courses_listing() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let (_, token) = student_token(&ctx).await;

    let beginner = repositories::resources::create(
        ctx.state.db(),
        repositories::resources::CreateResource {
            kind: ResourceKind::Quiz,
            title: "Exponentiation",
            difficulty: "beginner",
            description: None,
            code: None,
            question: Some("2**3?"),
            answer: Some("8"),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .expect("resource");
    repositories::resources::create(
        ctx.state.db(),
        repositories::resources::CreateResource {
            kind: ResourceKind::CodeExample,
            title: "Decorators",
            difficulty: "advanced",
            description: None,
            code: Some("@staticmethod"),
            question: None,
            answer: None,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .expect("resource");

    let course = repositories::courses::create(ctx.state.db(), "Python 101", primitive_now_utc())
        .await
        .expect("course");
    repositories::courses::attach_resources(ctx.state.db(), course.id, &[beginner.id])
        .await
        .expect("attach");
    repositories::courses::create(ctx.state.db(), "Empty course", primitive_now_utc())
        .await
        .expect("course");

    let (status, body) = get(&ctx, "/learn/resource/beginner", &token).await;
    assert_eq!(status, StatusCode::OK);
    let resources = body.as_array().expect("array");
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["type"], "Quiz");

    let (status, body) = get(&ctx, "/learn/resource/expert", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get(&ctx, "/learn/courses/", &token).await;
    assert_eq!(status, StatusCode::OK);
    let courses = body.as_array().expect("array");
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["title"], "Python 101");
    assert_eq!(courses[0]["resources"][0]["id"], beginner.id);
    assert_eq!(courses[1]["resources"], json!([]));
}

#[tokio::test]
async fn sanitized_test_view_hides_answers() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let (_, token) = student_token(&ctx).await;
    let (course_id, test_id) = seed_ten_question_test(&ctx).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/learn/course/{course_id}/test/{test_id}"),
            Some(&token),
            None,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let raw = test_support::read_text(response).await;
    assert!(!raw.contains("is_correct"));

    let body: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let questions = body["questions"].as_array().expect("questions");
    assert_eq!(questions.len(), 10);
    assert_eq!(questions[0]["text"], "Question 1");
    assert_eq!(questions[9]["text"], "Question 10");
    assert_eq!(questions[0]["options"][0]["text"], "right");
    assert_eq!(questions[0]["options"][1]["text"], "wrong");

    let other = repositories::courses::create(ctx.state.db(), "Other", primitive_now_utc())
        .await
        .expect("course");
    let (status, _) =
        get(&ctx, &format!("/learn/course/{}/test/{test_id}", other.id), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&ctx, &format!("/learn/course/9999/test/{test_id}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Course not found");
}

#[tokio::test]
async fn submission_is_scored_and_stored() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let (student_id, token) = student_token(&ctx).await;
    let (_, test_id) = seed_ten_question_test(&ctx).await;

    let options = repositories::tests::list_options(ctx.state.db(), test_id).await.expect("options");
    let answers: Vec<_> = options
        .chunks(2)
        .enumerate()
        .map(|(index, pair)| {
            let chosen = if index < 7 { &pair[0] } else { &pair[1] };
            json!({"question_id": chosen.question_id, "selected_option_id": chosen.id})
        })
        .collect();

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/learn/course/test/submit",
            Some(&token),
            Some(json!({"test_id": test_id, "answers": answers})),
        ))
        .await
        .expect("submit");

    let status = response.status();
    let result = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {result}");
    assert_eq!(result["score"], 70.0);
    assert_eq!(result["user_id"], student_id);
    assert_eq!(result["test_id"], test_id);

    let stored: f64 = sqlx::query_scalar("SELECT score FROM test_results WHERE id = $1")
        .bind(result["id"].as_i64().expect("id"))
        .fetch_one(ctx.state.db())
        .await
        .expect("stored result");
    assert_eq!(stored, 70.0);
}

#[tokio::test]
async fn cross_question_answers_earn_nothing() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let (_, token) = student_token(&ctx).await;
    let (_, test_id) = seed_ten_question_test(&ctx).await;

    let options = repositories::tests::list_options(ctx.state.db(), test_id).await.expect("options");
    // Correct option of the second question submitted for the first.
    let answers = json!([{
        "question_id": options[0].question_id,
        "selected_option_id": options[2].id
    }]);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/learn/course/test/submit",
            Some(&token),
            Some(json!({"test_id": test_id, "answers": answers})),
        ))
        .await
        .expect("submit");

    assert_eq!(response.status(), StatusCode::OK);
    let result = test_support::read_json(response).await;
    assert_eq!(result["score"], 0.0);
}

#[tokio::test]
async fn submitting_unknown_test_is_not_found() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let (_, token) = student_token(&ctx).await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/learn/course/test/submit",
            Some(&token),
            Some(json!({"test_id": 12345, "answers": []})),
        ))
        .await
        .expect("submit");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn examples_come_from_learning_kits() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let (_, token) = student_token(&ctx).await;

    let (status, body) = get(&ctx, "/learn/example/CodeExample/advanced", &token).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["type"], "CodeExample");
    assert_eq!(body["title"], "List Comprehension");
    assert_eq!(body["difficulty"], "advanced");

    let (status, _) = get(&ctx, "/learn/example/Video/beginner", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
