use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{category_exists, get_all_categories},
            questions::{self, get_all_questions, get_question_by_id},
        },
        NewQuestion, Question,
    },
    server::{app::AppState, error::ApiError, pagination::PageQuery},
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{categories_map, page_of, ApiResponse, AppJson, AppPath, AppQuery};

const DIFFICULTY_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Deserialize)]
struct CreateQuestionBody {
    question: String,
    answer: String,
    // the web client sends category ids as strings
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

impl CreateQuestionBody {
    fn validate(self) -> Result<NewQuestion, ApiError> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        if question.is_empty() {
            return Err(ApiError::BadRequest("question must not be empty".into()));
        }
        if answer.is_empty() {
            return Err(ApiError::BadRequest("answer must not be empty".into()));
        }
        if !DIFFICULTY_RANGE.contains(&self.difficulty) {
            return Err(ApiError::BadRequest(format!(
                "difficulty must be between {} and {}",
                DIFFICULTY_RANGE.start(),
                DIFFICULTY_RANGE.end()
            )));
        }
        Ok(NewQuestion {
            question: question.to_owned(),
            answer: answer.to_owned(),
            category: self.category,
            difficulty: self.difficulty,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct DeletedQuestion {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct CreatedQuestion {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    searched_questions: usize,
    total_questions: usize,
    current_category: Option<String>,
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    AppQuery(query): AppQuery<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let selection = get_all_questions(&pool).await?;
    let current = page_of(query.page, &selection);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsPage {
        success: true,
        questions: current,
        total_questions: selection.len(),
        categories: categories_map(get_all_categories(&pool).await?),
        current_category: None,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> ApiResponse<DeletedQuestion> {
    let question = get_question_by_id(&pool, id).await?;
    questions::delete_question(&pool, question.id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            e => {
                tracing::warn!("Failed to delete question {id}: {e}");
                ApiError::Unprocessable
            }
        })?;
    QUESTIONS_DELETED.inc();
    tracing::info!("Deleted question {id}");

    let selection = get_all_questions(&pool).await?;
    Ok(Json(DeletedQuestion {
        success: true,
        deleted: id,
        questions: page_of(1, &selection),
        total_questions: selection.len(),
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    AppJson(body): AppJson<CreateQuestionBody>,
) -> ApiResponse<CreatedQuestion> {
    let new_question = body.validate()?;
    if !category_exists(&pool, new_question.category).await? {
        tracing::info!("Rejected question for unknown category {}", new_question.category);
        return Err(ApiError::Unprocessable);
    }
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to create question: {e}");
            ApiError::Unprocessable
        })?;
    QUESTIONS_CREATED.inc();
    tracing::info!("Created question {id}");

    let selection = get_all_questions(&pool).await?;
    Ok(Json(CreatedQuestion {
        success: true,
        created: id,
        questions: page_of(1, &selection),
        total_questions: selection.len(),
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    AppQuery(query): AppQuery<PageQuery>,
    AppJson(body): AppJson<SearchBody>,
) -> ApiResponse<SearchResults> {
    let selection = questions::search_questions(&pool, &body.search_term).await?;
    Ok(Json(SearchResults {
        success: true,
        questions: page_of(query.page, &selection),
        searched_questions: selection.len(),
        total_questions: selection.len(),
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
