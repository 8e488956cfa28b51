mod ports;
mod progress;
mod service;
mod store;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use ports::{AttemptSink, QuestionSource};
pub use progress::SessionProgress;
pub use service::QuizSessionService;
pub use store::QuizSession;
