use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AttemptId, ChoiceId, QuestionId, QuizId};

/// One `{question, choice}` pair of a submission payload.
///
/// The backend re-scores from these; the client's provisional correctness
/// never crosses the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptAnswer {
    pub question_id: QuestionId,
    pub choice_id: ChoiceId,
}

/// Submission payload for `POST /attempts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRequest {
    pub quiz_id: QuizId,
    pub player_name: String,
    pub answers: Vec<AttemptAnswer>,
    /// Whole seconds between session start and submission.
    pub time_spent: u32,
}

/// Scored result returned by the backend for a submitted attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResponse {
    pub id: AttemptId,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub time_spent: u32,
    /// Ids of the questions the server scored as correct.
    pub correct_answers: Vec<QuestionId>,
}

/// A stored attempt as returned by `GET /attempts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: AttemptId,
    pub quiz_id: QuizId,
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub time_spent: u32,
    pub created_at: DateTime<Utc>,
}

/// Read-only leaderboard row; ordering is decided by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: AttemptId,
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub time_spent: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_wire_shape() {
        let request = AttemptRequest {
            quiz_id: QuizId::new(1),
            player_name: "Ada".into(),
            answers: vec![AttemptAnswer {
                question_id: QuestionId::new(1),
                choice_id: ChoiceId::new(4),
            }],
            time_spent: 30,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["quiz_id"], 1);
        assert_eq!(json["answers"][0]["choice_id"], 4);
        assert_eq!(json["time_spent"], 30);
    }

    #[test]
    fn response_deserializes_correct_ids() {
        let json = r#"{
            "id": 9, "score": 1, "total_questions": 2,
            "percentage": 50.0, "time_spent": 30, "correct_answers": [1]
        }"#;
        let response: AttemptResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.correct_answers, vec![QuestionId::new(1)]);
        assert_eq!(response.total_questions, 2);
    }
}
