use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::ServerError;

const MIN_TITLE_LEN: usize = 3;
/// Matches the `quiz.title` column width.
const MAX_TITLE_LEN: usize = 200;
const MIN_OPTION_COUNT: usize = 2;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "question_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionType {
    #[default]
    Single,
    Multiple,
}

/// A fully materialized quiz, questions and options in play order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Quiz {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnswerOption {
    pub id: Uuid,
    pub text: String,
    pub is_correct: bool,
}

impl Question {
    pub fn correct_option_ids(&self) -> HashSet<Uuid> {
        self.options
            .iter()
            .filter(|option| option.is_correct)
            .map(|option| option.id)
            .collect()
    }

    pub fn has_option(&self, option_id: &Uuid) -> bool {
        self.options.iter().any(|option| option.id == *option_id)
    }
}

/* Rows */

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuizRow {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub text: String,
    pub question_type: QuestionType,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OptionRow {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct QuizSummary {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub question_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn from_rows(quiz: QuizRow, questions: Vec<QuestionRow>, options: Vec<OptionRow>) -> Self {
        let questions = questions
            .into_iter()
            .map(|question| Question {
                options: options
                    .iter()
                    .filter(|option| option.question_id == question.id)
                    .map(|option| AnswerOption {
                        id: option.id,
                        text: option.text.clone(),
                        is_correct: option.is_correct,
                    })
                    .collect(),
                id: question.id,
                text: question.text,
                question_type: question.question_type,
            })
            .collect();

        Self {
            id: quiz.id,
            owner_id: quiz.owner_id,
            title: quiz.title,
            description: quiz.description,
            created_at: quiz.created_at,
            questions,
        }
    }
}

/* Requests */

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateQuizRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuestionRequest {
    pub text: String,
    pub options: Vec<String>,
    pub correct_indices: Vec<usize>,
    #[serde(default, rename = "type")]
    pub question_type: QuestionType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddQuestionRequest {
    pub quiz_id: Uuid,
    #[serde(flatten)]
    pub question: QuestionRequest,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

fn validate_title(title: &str) -> Result<(), ServerError> {
    if title.trim().chars().count() < MIN_TITLE_LEN {
        return Err(ServerError::Validation(format!(
            "Title must be at least {} characters",
            MIN_TITLE_LEN
        )));
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ServerError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }

    Ok(())
}

impl CreateQuizRequest {
    pub fn validate(&self) -> Result<(), ServerError> {
        validate_title(&self.title)?;
        self.questions.iter().try_for_each(QuestionRequest::validate)
    }
}

impl UpdateQuizRequest {
    pub fn validate(&self) -> Result<(), ServerError> {
        validate_title(&self.title)
    }
}

impl QuestionRequest {
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.text.trim().is_empty() {
            return Err(ServerError::Validation("Question text is required".into()));
        }

        if self.options.len() < MIN_OPTION_COUNT {
            return Err(ServerError::Validation(format!(
                "Add at least {} options",
                MIN_OPTION_COUNT
            )));
        }

        if self.options.iter().any(|option| option.trim().is_empty()) {
            return Err(ServerError::Validation("Option text is required".into()));
        }

        if let Some(index) = self
            .correct_indices
            .iter()
            .find(|index| **index >= self.options.len())
        {
            return Err(ServerError::Validation(format!(
                "Correct index {} is out of range",
                index
            )));
        }

        let correct: HashSet<&usize> = self.correct_indices.iter().collect();
        match (self.question_type, correct.len()) {
            (_, 0) => Err(ServerError::Validation(
                "Mark at least one option as correct".into(),
            )),
            (QuestionType::Single, n) if n > 1 => Err(ServerError::Validation(
                "Single choice questions have exactly one correct option".into(),
            )),
            _ => Ok(()),
        }
    }

    pub fn is_correct(&self, index: usize) -> bool {
        self.correct_indices.contains(&index)
    }
}
