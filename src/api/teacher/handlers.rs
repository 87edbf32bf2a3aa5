use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentTeacher;
use crate::api::validation::{validate_answer_keys, validate_payload};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::repositories::statistics::Counter;
use crate::schemas::course::{CourseCreate, CourseResponse};
use crate::schemas::lesson::{CloneParams, LessonCloneResponse, LessonCreate, LessonResponse};
use crate::schemas::resource::{ResourceBody, ResourceCreate, ResourceResponse};
use crate::schemas::test::{TestCreate, TestSummary};
use crate::services::course_builder::CourseBuilder;

pub(super) async fn create_lesson(
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<LessonCreate>,
) -> Result<(StatusCode, Json<LessonResponse>), ApiError> {
    validate_payload(&payload)?;
    ensure_lesson_title_free(&state, &payload.title).await?;

    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let lesson = repositories::lessons::create(
        &mut *tx,
        repositories::lessons::CreateLesson {
            title: &payload.title,
            difficulty: &payload.difficulty,
            content: &payload.content,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(map_lesson_insert_error)?;

    repositories::statistics::increment(&mut *tx, Counter::LessonsCreated)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to update statistics"))?;

    repositories::statistics::commit_and_record(tx, Counter::LessonsCreated)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to commit lesson"))?;

    tracing::info!(teacher_id = teacher.id, lesson_id = lesson.id, "Created lesson");
    Ok((StatusCode::CREATED, Json(LessonResponse::from_db(lesson))))
}

pub(super) async fn clone_lesson(
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
    Path(title): Path<String>,
    Query(params): Query<CloneParams>,
) -> Result<(StatusCode, Json<LessonCloneResponse>), ApiError> {
    validate_payload(&params)?;

    let source = repositories::lessons::find_by_title(state.db(), &title)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load lesson"))?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    ensure_lesson_title_free(&state, &params.new_title).await?;

    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let lesson = repositories::lessons::create(
        &mut *tx,
        repositories::lessons::CreateLesson {
            title: &params.new_title,
            difficulty: &source.difficulty,
            content: &source.content,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(map_lesson_insert_error)?;

    repositories::statistics::increment(&mut *tx, Counter::LessonsCloned)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to update statistics"))?;

    repositories::statistics::commit_and_record(tx, Counter::LessonsCloned)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to commit lesson clone"))?;

    tracing::info!(
        teacher_id = teacher.id,
        source_id = source.id,
        lesson_id = lesson.id,
        "Cloned lesson"
    );
    Ok((
        StatusCode::CREATED,
        Json(LessonCloneResponse { status: "cloned", lesson: LessonResponse::from_db(lesson) }),
    ))
}

pub(super) async fn create_resource(
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<ResourceCreate>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    validate_payload(&payload)?;

    let (code, question, answer) = match &payload.body {
        ResourceBody::CodeExample { code } => (Some(code.as_str()), None, None),
        ResourceBody::Quiz { question, answer } => {
            (None, Some(question.as_str()), Some(answer.as_str()))
        }
    };

    let mut tx = state
        .db()
        .begin()
        .await
        .map_err(|e| ApiError::internal(e, "Failed to start transaction"))?;

    let row = repositories::resources::create(
        &mut *tx,
        repositories::resources::CreateResource {
            kind: payload.body.kind(),
            title: &payload.title,
            difficulty: &payload.difficulty,
            description: payload.description.as_deref(),
            code,
            question,
            answer,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create resource"))?;

    repositories::statistics::increment(&mut *tx, Counter::ResourcesCreated)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to update statistics"))?;

    repositories::statistics::commit_and_record(tx, Counter::ResourcesCreated)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to commit resource"))?;

    tracing::info!(teacher_id = teacher.id, resource_id = row.id, kind = ?row.kind, "Created resource");
    Ok((StatusCode::CREATED, Json(ResourceResponse::from_db(row))))
}

pub(super) async fn create_course(
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<CourseCreate>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    validate_payload(&payload)?;

    let exists = repositories::courses::exists_by_title(state.db(), &payload.title)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check course title"))?;
    if exists {
        return Err(course_title_taken());
    }

    let builder = payload
        .resources
        .iter()
        .fold(CourseBuilder::new(payload.title.clone()), |builder, id| builder.add_resource(*id));
    tracing::debug!(
        title = %payload.title,
        requested = builder.resource_ids().len(),
        "Building course"
    );

    let built = builder.build_and_save(state.db()).await.map_err(|e| {
        if repositories::is_unique_violation(&e) {
            course_title_taken()
        } else {
            ApiError::internal(e, "Failed to create course")
        }
    })?;

    tracing::info!(
        teacher_id = teacher.id,
        course_id = built.course.id,
        resources = built.resources.len(),
        "Built course"
    );

    let resources = built.resources.into_iter().map(ResourceResponse::from_db).collect();
    Ok((StatusCode::CREATED, Json(CourseResponse::from_db(built.course, resources))))
}

pub(super) async fn create_test(
    CurrentTeacher(teacher): CurrentTeacher,
    State(state): State<AppState>,
    Json(payload): Json<TestCreate>,
) -> Result<(StatusCode, Json<TestSummary>), ApiError> {
    validate_payload(&payload)?;
    validate_answer_keys(&payload)?;

    repositories::courses::find_by_id(state.db(), payload.course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let questions = payload
        .questions
        .iter()
        .map(|question| repositories::tests::NewQuestion {
            text: &question.text,
            options: question
                .options
                .iter()
                .map(|option| repositories::tests::NewOption {
                    text: &option.text,
                    is_correct: option.is_correct,
                })
                .collect(),
        })
        .collect();

    let created = repositories::tests::create_with_questions(
        state.db(),
        repositories::tests::CreateTest {
            course_id: payload.course_id,
            title: &payload.title,
            description: payload.description.as_deref(),
            max_score: payload.max_score,
            created_by: Some(teacher.id),
            questions,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create test"))?;

    tracing::info!(
        teacher_id = teacher.id,
        test_id = created.test.id,
        questions = created.questions_count,
        options = created.options_count,
        "Created test"
    );

    let test = created.test;
    Ok((
        StatusCode::CREATED,
        Json(TestSummary {
            id: test.id,
            course_id: test.course_id,
            title: test.title,
            description: test.description,
            max_score: test.max_score,
            questions_count: created.questions_count,
            options_count: created.options_count,
        }),
    ))
}

async fn ensure_lesson_title_free(state: &AppState, title: &str) -> Result<(), ApiError> {
    let exists = repositories::lessons::exists_by_title(state.db(), title)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check lesson title"))?;
    if exists {
        return Err(lesson_title_taken());
    }
    Ok(())
}

fn map_lesson_insert_error(err: sqlx::Error) -> ApiError {
    if repositories::is_unique_violation(&err) {
        lesson_title_taken()
    } else {
        ApiError::internal(err, "Failed to create lesson")
    }
}

fn lesson_title_taken() -> ApiError {
    ApiError::Conflict("Lesson with this title already exists".to_string())
}

fn course_title_taken() -> ApiError {
    ApiError::Conflict("Course with this title already exists".to_string())
}
