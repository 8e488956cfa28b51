use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ChoiceId, QuestionId};

/// A recorded answer for one question of an in-progress attempt.
///
/// Correctness is tracked as two distinct facts: `provisional_correct` is the
/// client-side guess resolved at selection time from the locally known
/// correct choice, and `confirmed_correct` is the server-authoritative value
/// filled in when the attempt is submitted. Only the server response is
/// trusted; until it arrives, reads fall back to the provisional guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub choice_id: ChoiceId,
    pub provisional_correct: bool,
    #[serde(default)]
    pub confirmed_correct: Option<bool>,
    pub selected_at: DateTime<Utc>,
}

impl Answer {
    #[must_use]
    pub fn new(
        question_id: QuestionId,
        choice_id: ChoiceId,
        provisional_correct: bool,
        selected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            question_id,
            choice_id,
            provisional_correct,
            confirmed_correct: None,
            selected_at,
        }
    }

    /// Best known correctness: confirmed when available, provisional otherwise.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.confirmed_correct.unwrap_or(self.provisional_correct)
    }

    /// Record the server's verdict for this answer.
    pub fn confirm(&mut self, correct: bool) {
        self.confirmed_correct = Some(correct);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn falls_back_to_provisional_guess() {
        let answer = Answer::new(QuestionId::new(1), ChoiceId::new(2), true, fixed_now());
        assert!(answer.is_correct());
    }

    #[test]
    fn confirmation_overrides_guess() {
        let mut answer = Answer::new(QuestionId::new(1), ChoiceId::new(2), true, fixed_now());
        answer.confirm(false);
        assert!(!answer.is_correct());
        assert_eq!(answer.confirmed_correct, Some(false));
    }
}
