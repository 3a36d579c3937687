use tracing::debug;

use crate::errors::CoreError;
use crate::models::quiz::{AnswerFeedback, Question, QuizResult, ScoreTier};

/// A linear walk through a fixed list of questions.
///
/// Each question is answered exactly once, in order. After the last answer
/// the session is completed and only `result()` and `reset()` are useful.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    score: usize,
    answers: Vec<bool>,
    completed: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Result<Self, CoreError> {
        if questions.is_empty() {
            return Err(CoreError::ValidationError(
                "A quiz needs at least one question".into(),
            ));
        }
        Ok(Self {
            questions,
            current: 0,
            score: 0,
            answers: Vec::new(),
            completed: false,
        })
    }

    /// The question awaiting an answer, or `None` once completed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.completed {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    /// 1-based position of the current question.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// `(index + 1) / total × 100`, the progress bar while answering.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        (self.current + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    /// Submit an answer to the current question and advance.
    pub fn answer(&mut self, option_id: &str) -> Result<AnswerFeedback, CoreError> {
        if self.completed {
            return Err(CoreError::QuizCompleted);
        }
        let question = &self.questions[self.current];
        let option = question
            .option(option_id)
            .ok_or_else(|| CoreError::InvalidOption(option_id.to_string()))?;

        let feedback = AnswerFeedback {
            question_id: question.id,
            selected: option.id.clone(),
            correct: option.correct,
            correct_option: question.correct_option().map(|o| o.id.clone()),
            explanation: question.explanation.clone(),
        };

        self.answers.push(feedback.correct);
        if feedback.correct {
            self.score += 1;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.completed = true;
        }
        debug!(
            question = feedback.question_id,
            correct = feedback.correct,
            score = self.score,
            "quiz answer recorded"
        );

        Ok(feedback)
    }

    /// Final summary, available only once completed.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        if !self.completed {
            return None;
        }
        let total = self.questions.len();
        let tier = ScoreTier::from_ratio(self.score, total);
        let percentage = (self.score as f64 / total as f64 * 100.0).round() as u32;
        Some(QuizResult {
            score: self.score,
            total,
            percentage,
            tier,
            message: tier.message().to_string(),
            answers: self.answers.clone(),
        })
    }

    /// Back to question 1 with a clean score.
    pub fn reset(&mut self) {
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.completed = false;
    }
}
