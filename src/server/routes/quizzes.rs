use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_category,
            questions::{get_all_questions, get_questions_for_category},
        },
        Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_ids,
        quiz::{pick_unseen, ALL_CATEGORIES},
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{ApiResponse, AppJson};

const GAME_OVER: &str = "game over";

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizRound {
    quiz_category: QuizCategory,
    #[serde(default, deserialize_with = "deserialize_ids")]
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuizTurn {
    Question { success: bool, question: Question },
    GameOver { success: bool, message: &'static str },
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    AppJson(round): AppJson<QuizRound>,
) -> ApiResponse<QuizTurn> {
    let category = round.quiz_category.id;
    let candidates = if category == ALL_CATEGORIES {
        get_all_questions(&pool).await?
    } else {
        let category = get_category(&pool, category).await?;
        get_questions_for_category(&pool, category.id).await?
    };
    let previous: HashSet<i64> = round.previous_questions.into_iter().collect();

    let picked = pick_unseen(candidates, &previous, &mut rand::thread_rng());
    let turn = match picked {
        Some(question) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[question.category.to_string().as_str()])
                .inc();
            tracing::debug!("Serving question {} in category {category}", question.id);
            QuizTurn::Question {
                success: true,
                question,
            }
        }
        None => {
            tracing::debug!("Quiz over for category {category} after {} questions", previous.len());
            QuizTurn::GameOver {
                success: true,
                message: GAME_OVER,
            }
        }
    };
    Ok(Json(turn))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_accepts_client_shapes() {
        let round: QuizRound = serde_json::from_str(
            r#"{"previous_questions": [20, 21], "quiz_category": {"id": "1", "type": "Science"}}"#,
        )
        .unwrap();
        assert_eq!(round.quiz_category.id, 1);
        assert_eq!(round.previous_questions, [20, 21]);

        let round: QuizRound =
            serde_json::from_str(r#"{"quiz_category": {"type": "click", "id": 0}}"#).unwrap();
        assert_eq!(round.quiz_category.id, ALL_CATEGORIES);
        assert!(round.previous_questions.is_empty());
    }

    #[test]
    fn round_requires_category() {
        assert!(serde_json::from_str::<QuizRound>(r#"{"previous_questions": []}"#).is_err());
    }

    #[test]
    fn game_over_has_no_question() {
        let value = serde_json::to_value(QuizTurn::GameOver {
            success: true,
            message: GAME_OVER,
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "message": "game over"}));
    }
}
