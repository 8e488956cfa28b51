use serde::{Deserialize, Serialize};

use crate::model::{ChoiceId, Difficulty, QuestionId, QuizId};

/// One selectable choice of a multiple-choice question.
///
/// `is_correct` is only present on admin-authenticated responses; during
/// play it is the locally known correct flag the store resolves against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

impl Choice {
    /// True when this choice is known (locally) to be the correct one.
    #[must_use]
    pub fn is_marked_correct(&self) -> bool {
        self.is_correct == Some(true)
    }
}

/// A question with its ordered choices, immutable once fetched for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub quiz_id: QuizId,
    /// Ordinal position within the quiz; the backend sorts by it, the store
    /// re-sorts defensively on initialize.
    pub position: u32,
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub choices: Vec<Choice>,
}

impl Question {
    /// Looks up a choice of this question by id.
    #[must_use]
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    /// The id of the locally known correct choice, if the payload carried it.
    #[must_use]
    pub fn correct_choice_id(&self) -> Option<ChoiceId> {
        self.choices
            .iter()
            .find(|c| c.is_marked_correct())
            .map(|c| c.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            id: QuestionId::new(1),
            quiz_id: QuizId::new(1),
            position: 1,
            title: "Q1".into(),
            text: "Pick one".into(),
            image: None,
            difficulty: Difficulty::Easy,
            tags: vec!["sample".into()],
            explanation: None,
            choices: vec![
                Choice {
                    id: ChoiceId::new(1),
                    text: "A".into(),
                    is_correct: Some(true),
                },
                Choice {
                    id: ChoiceId::new(2),
                    text: "B".into(),
                    is_correct: Some(false),
                },
            ],
        }
    }

    #[test]
    fn finds_choice_by_id() {
        let q = sample();
        assert_eq!(q.choice(ChoiceId::new(2)).unwrap().text, "B");
        assert!(q.choice(ChoiceId::new(99)).is_none());
    }

    #[test]
    fn resolves_correct_choice() {
        assert_eq!(sample().correct_choice_id(), Some(ChoiceId::new(1)));
    }

    #[test]
    fn correctness_absent_on_public_payloads() {
        // Public (non-admin) payloads omit is_correct entirely.
        let json = r#"{
            "id": 1, "quiz_id": 1, "position": 1,
            "title": "Q1", "text": "Pick one", "difficulty": "easy",
            "tags": [], "choices": [{"id": 1, "text": "A"}]
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.choices[0].is_correct, None);
        assert_eq!(q.correct_choice_id(), None);
    }
}
