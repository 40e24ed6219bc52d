use serde::{Deserialize, Serialize};

use crate::models::domain::Question;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResponseDto {
    pub title: String,
    pub questions: Vec<Question>,
}
