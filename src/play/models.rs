use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    play::engine::{Phase, PlaySession},
    quiz::models::QuestionType,
};

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("Quiz {0} is empty or does not exist")]
    QuizUnavailable(Uuid),

    #[error("Play session {0} does not exist or has expired")]
    UnknownSession(Uuid),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectOptionRequest {
    pub option_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptionView {
    pub id: Uuid,
    pub text: String,
    pub selected: bool,
    /// Hidden until the question is revealed.
    pub is_correct: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: Uuid,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<OptionView>,
}

/// Everything a client needs to render the player.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub quiz_id: Uuid,
    pub title: String,
    pub phase: Phase,
    pub position: usize,
    pub total: usize,
    pub score: u32,
    pub revealed: bool,
    pub finished: bool,
    pub answered_correctly: Option<bool>,
    pub question: QuestionView,
    pub result: Option<QuizResult>,
}

impl SessionView {
    pub fn from_session(session_id: Uuid, session: &PlaySession) -> Self {
        let revealed = session.is_revealed();
        let question = session.current_question();
        let (position, total) = session.progress();

        let options = question
            .options
            .iter()
            .map(|option| OptionView {
                id: option.id,
                text: option.text.clone(),
                selected: session.selected().contains(&option.id),
                is_correct: revealed.then_some(option.is_correct),
            })
            .collect();

        Self {
            session_id,
            quiz_id: session.quiz().id,
            title: session.quiz().title.clone(),
            phase: session.phase(),
            position,
            total,
            score: session.score(),
            revealed,
            finished: session.is_finished(),
            answered_correctly: session.answered_correctly(),
            question: QuestionView {
                id: question.id,
                text: question.text.clone(),
                question_type: question.question_type,
                options,
            },
            result: session.result(),
        }
    }
}
