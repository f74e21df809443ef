use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    play::models::{PlayError, QuizResult},
    quiz::models::{Question, QuestionType, Quiz},
};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Answering,
    Revealed,
    Finished,
}

/// One player's pass through a quiz.
///
/// Every operation that does not apply to the current phase is a no-op and
/// reports `false`; nothing here returns an error once the session exists.
#[derive(Debug, Clone)]
pub struct PlaySession {
    quiz: Quiz,
    current_index: usize,
    selected: HashSet<Uuid>,
    phase: Phase,
    score: u32,
    last_correct: Option<bool>,
}

impl PlaySession {
    /// Fails when the quiz has no questions or any question has no options,
    /// since such a session could never reach `Finished`.
    pub fn start(quiz: Quiz) -> Result<Self, PlayError> {
        if quiz.questions.is_empty() || quiz.questions.iter().any(|q| q.options.is_empty()) {
            return Err(PlayError::QuizUnavailable(quiz.id));
        }

        Ok(Self {
            quiz,
            current_index: 0,
            selected: HashSet::new(),
            phase: Phase::Answering,
            score: 0,
            last_correct: None,
        })
    }

    pub fn select_option(&mut self, option_id: Uuid) -> bool {
        if self.phase != Phase::Answering {
            return false;
        }

        let question_type = {
            let question = self.current_question();
            if !question.has_option(&option_id) {
                return false;
            }
            question.question_type
        };

        match question_type {
            QuestionType::Single => {
                self.selected.clear();
                self.selected.insert(option_id);
            }
            QuestionType::Multiple => {
                if !self.selected.remove(&option_id) {
                    self.selected.insert(option_id);
                }
            }
        }

        true
    }

    pub fn submit(&mut self) -> bool {
        if self.phase != Phase::Answering || self.selected.is_empty() {
            return false;
        }

        // Exact match only: subsets and supersets of the correct set score nothing.
        let correct = self.selected == self.current_question().correct_option_ids();
        if correct {
            self.score += 1;
        }

        self.last_correct = Some(correct);
        self.phase = Phase::Revealed;
        true
    }

    pub fn advance(&mut self) -> bool {
        if self.phase != Phase::Revealed {
            return false;
        }

        if self.current_index + 1 >= self.total_questions() {
            self.phase = Phase::Finished;
            return true;
        }

        self.current_index += 1;
        self.selected.clear();
        self.last_correct = None;
        self.phase = Phase::Answering;
        true
    }

    /// 1-based position and total question count.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.total_questions())
    }

    pub fn result(&self) -> Option<QuizResult> {
        match self.phase {
            Phase::Finished => Some(QuizResult {
                score: self.score,
                total: self.total_questions(),
            }),
            _ => None,
        }
    }

    /// Outcome of the current question's submission, once revealed.
    pub fn answered_correctly(&self) -> Option<bool> {
        match self.phase {
            Phase::Answering => None,
            _ => self.last_correct,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.quiz.questions[self.current_index]
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[cfg(test)]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn selected(&self) -> &HashSet<Uuid> {
        &self.selected
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_revealed(&self) -> bool {
        self.phase != Phase::Answering
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.questions.len()
    }
}
