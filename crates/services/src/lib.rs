#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod error;
pub mod participation;
pub mod session;
pub mod theme;

pub use quiz_core::Clock;

pub use api::{ApiClient, ApiConfig};
pub use app_services::AppServices;
pub use error::{ApiError, AppServicesError, SessionError};
pub use participation::ParticipationService;
pub use session::{AttemptSink, QuestionSource, QuizSession, QuizSessionService, SessionProgress};
pub use theme::ThemeService;
