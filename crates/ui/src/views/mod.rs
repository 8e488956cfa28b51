mod admin;
mod admin_quiz;
mod home;
mod leaderboard;
mod play;
mod question_edit;
mod quiz_select;
mod quiz_start;
mod score;
mod settings;
mod state;

pub use admin::AdminView;
pub use admin_quiz::AdminQuizView;
pub use home::HomeView;
pub use leaderboard::LeaderboardView;
pub use question_edit::{QuestionEditView, QuestionNewView};
pub use play::QuizPlayView;
pub use quiz_select::QuizSelectView;
pub use quiz_start::QuizStartView;
pub use score::ScoreView;
pub use settings::SettingsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
