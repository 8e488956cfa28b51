mod admin;
mod play_vm;
mod theme;
mod time_fmt;

pub use admin::{FormError, QUESTION_CHOICE_ROWS, QuestionForm, QuizForm};
pub use play_vm::{ChoiceVm, PlayVm, start_play};
pub use theme::apply_document_theme;
pub use time_fmt::{format_datetime, format_duration};
