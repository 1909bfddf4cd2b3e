mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::extract::{FromRequest, FromRequestParts};
use axum::Json;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::db::{Category, Question};

use super::error::ApiError;
use super::pagination::{paginate, QUESTIONS_PER_PAGE};

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// `Json` that reports malformed bodies as [`ApiError::BadRequest`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// Wire shape of the categories listing: id to display type.
pub fn categories_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.name)).collect()
}

fn page_of(page: i64, questions: &[Question]) -> Vec<Question> {
    paginate(page, QUESTIONS_PER_PAGE, questions).to_vec()
}
