use serde::{Deserialize, Serialize};

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Short identifier ("a", "b", ...)
    pub id: String,
    pub text: String,
    pub correct: bool,
}

/// A multiple-choice question with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub explanation: String,
}

impl Question {
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// The first option marked correct.
    #[must_use]
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.correct)
    }
}

/// Returned after submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub question_id: u32,
    pub selected: String,
    pub correct: bool,
    pub correct_option: Option<String>,
    pub explanation: String,
}

/// Score band for the completion screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    /// 80% and above
    Excellent,
    /// 60% up to 80%
    Good,
    /// Below 60%
    KeepStudying,
}

impl ScoreTier {
    /// Classify a raw `score / total` ratio.
    pub fn from_ratio(score: usize, total: usize) -> Self {
        // Compare 100·score against 80·total to stay in integers.
        let scaled = score * 100;
        if scaled >= total * 80 {
            ScoreTier::Excellent
        } else if scaled >= total * 60 {
            ScoreTier::Good
        } else {
            ScoreTier::KeepStudying
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => {
                "Excellent work! You have a strong understanding of investment fundamentals."
            }
            ScoreTier::Good => "Good job! Consider reviewing the areas you missed.",
            ScoreTier::KeepStudying => "Keep studying! Review the lesson materials and try again.",
        }
    }
}

/// Final summary of a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    /// Accuracy rounded to the nearest whole percent
    pub percentage: u32,
    pub tier: ScoreTier,
    pub message: String,
    pub answers: Vec<bool>,
}
