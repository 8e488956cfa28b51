mod answer;
mod attempt;
mod ids;
mod question;
mod quiz;
mod theme;

pub use answer::Answer;
pub use attempt::{Attempt, AttemptAnswer, AttemptRequest, AttemptResponse, LeaderboardEntry};
pub use ids::{AttemptId, ChoiceId, ParseIdError, QuestionId, QuizId};
pub use question::{Choice, Question};
pub use quiz::{Difficulty, Quiz};
pub use theme::Theme;
