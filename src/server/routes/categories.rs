use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, categories::get_category, questions},
        Question,
    },
    server::{app::AppState, pagination::PageQuery},
};

use super::{categories_map, page_of, ApiResponse, AppPath, AppQuery};

#[derive(Serialize)]
struct CategoriesPage {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesPage> {
    let categories = get_all_categories(&pool).await?;
    Ok(Json(CategoriesPage {
        success: true,
        categories: categories_map(categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
    AppQuery(query): AppQuery<PageQuery>,
) -> ApiResponse<CategoryQuestionsPage> {
    let category = get_category(&pool, id).await?;
    let selection = questions::get_questions_for_category(&pool, category.id).await?;
    Ok(Json(CategoryQuestionsPage {
        success: true,
        questions: page_of(query.page, &selection),
        total_questions: selection.len(),
        current_category: category.name,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
