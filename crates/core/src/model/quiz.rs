use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::QuizId;

/// Difficulty tag shared by quizzes and questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A quiz as served by the backend.
///
/// Read-only to the client during play; admin CRUD goes through the API
/// client and never mutates a fetched instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub difficulty: Difficulty,
    pub is_published: bool,
    /// Denormalized count maintained by the backend.
    pub question_count: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_roundtrips_lowercase() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let parsed: Difficulty = d.as_str().parse().unwrap();
            assert_eq!(parsed, d);
        }
    }

    #[test]
    fn quiz_deserializes_backend_shape() {
        let json = r#"{
            "id": 3,
            "title": "Capitals",
            "description": null,
            "difficulty": "medium",
            "is_published": true,
            "question_count": 10,
            "created_at": "2024-01-15T09:00:00Z"
        }"#;
        let quiz: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.id, QuizId::new(3));
        assert_eq!(quiz.difficulty, Difficulty::Medium);
        assert_eq!(quiz.question_count, 10);
    }
}
