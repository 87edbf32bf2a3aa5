use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::metrics;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::course::CourseResponse;
use crate::schemas::lesson::LessonResponse;
use crate::schemas::resource::{ResourceExample, ResourceResponse};
use crate::schemas::test::{
    SanitizedOption, SanitizedQuestion, SanitizedTest, TestResultResponse, TestSubmission,
};
use crate::services::learning_kits;
use crate::services::scoring::{self, AnswerKey, ScoringError};

pub(super) async fn lesson_by_id(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LessonResponse>, ApiError> {
    let lesson = repositories::lessons::find_by_id(state.db(), id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load lesson"))?
        .ok_or_else(lesson_not_found)?;

    Ok(Json(LessonResponse::from_db(lesson)))
}

pub(super) async fn lesson_by_title(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<LessonResponse>, ApiError> {
    let lesson = repositories::lessons::find_by_title(state.db(), &title)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load lesson"))?
        .ok_or_else(lesson_not_found)?;

    Ok(Json(LessonResponse::from_db(lesson)))
}

pub(super) async fn resources_by_level(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> Result<Json<Vec<ResourceResponse>>, ApiError> {
    let rows = repositories::resources::list_by_difficulty(state.db(), &level)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list resources"))?;

    Ok(Json(rows.into_iter().map(ResourceResponse::from_db).collect()))
}

pub(super) async fn list_courses(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = repositories::courses::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list courses"))?;

    let course_ids: Vec<i64> = courses.iter().map(|course| course.id).collect();
    let links = repositories::courses::list_resources_for_courses(state.db(), &course_ids)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list course resources"))?;

    let mut by_course: HashMap<i64, Vec<ResourceResponse>> = HashMap::new();
    for link in links {
        by_course.entry(link.course_id).or_default().push(ResourceResponse::from_db(link.resource));
    }

    let response = courses
        .into_iter()
        .map(|course| {
            let resources = by_course.remove(&course.id).unwrap_or_default();
            CourseResponse::from_db(course, resources)
        })
        .collect();

    Ok(Json(response))
}

pub(super) async fn get_test(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path((course_id, test_id)): Path<(i64, i64)>,
) -> Result<Json<SanitizedTest>, ApiError> {
    repositories::courses::find_by_id(state.db(), course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let test = repositories::tests::find_by_id(state.db(), test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load test"))?
        .filter(|test| test.course_id == course_id)
        .ok_or_else(test_not_found)?;

    let questions = repositories::tests::list_questions(state.db(), test.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load questions"))?;
    let options = repositories::tests::list_options(state.db(), test.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load answer options"))?;

    let mut options_by_question: HashMap<i64, Vec<SanitizedOption>> = HashMap::new();
    for option in options {
        options_by_question
            .entry(option.question_id)
            .or_default()
            .push(SanitizedOption { id: option.id, text: option.text });
    }

    let questions = questions
        .into_iter()
        .map(|question| SanitizedQuestion {
            options: options_by_question.remove(&question.id).unwrap_or_default(),
            id: question.id,
            text: question.text,
        })
        .collect();

    Ok(Json(SanitizedTest {
        id: test.id,
        course_id: test.course_id,
        title: test.title,
        description: test.description,
        max_score: test.max_score,
        questions,
    }))
}

pub(super) async fn submit_test(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<TestSubmission>,
) -> Result<Json<TestResultResponse>, ApiError> {
    let test = repositories::tests::find_by_id(state.db(), payload.test_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load test"))?
        .ok_or_else(test_not_found)?;

    let total_questions = repositories::tests::count_questions(state.db(), test.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count questions"))?;
    let options = repositories::tests::list_options(state.db(), test.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load answer key"))?;

    let key = AnswerKey::from_options(&options);
    let outcome =
        scoring::score_submission(&key, total_questions as usize, test.max_score, &payload.answers)
            .map_err(|e| match e {
                ScoringError::NoQuestions => {
                    ApiError::BadRequest("Test has no questions".to_string())
                }
            })?;

    let result = repositories::test_results::create(
        state.db(),
        user.id,
        test.id,
        outcome.score,
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to save test result"))?;

    metrics::record_test_score(outcome.score, test.max_score);
    tracing::info!(
        user_id = user.id,
        test_id = test.id,
        correct = outcome.correct,
        total = outcome.total,
        score = outcome.score,
        "Scored test submission"
    );

    Ok(Json(TestResultResponse::from_db(result)))
}

pub(super) async fn example(
    CurrentUser(_user): CurrentUser,
    Path((kind, level)): Path<(String, String)>,
) -> Result<Json<ResourceExample>, ApiError> {
    learning_kits::example_for(&kind, &level).map(Json).ok_or_else(|| {
        ApiError::BadRequest(
            "Unknown example: type must be CodeExample or Quiz, level beginner or advanced"
                .to_string(),
        )
    })
}

fn lesson_not_found() -> ApiError {
    ApiError::NotFound("Lesson not found".to_string())
}

fn test_not_found() -> ApiError {
    ApiError::NotFound("Test not found".to_string())
}
