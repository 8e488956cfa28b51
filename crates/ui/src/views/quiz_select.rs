use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::Quiz;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct QuizListData {
    quizzes: Vec<Quiz>,
}

#[component]
pub fn QuizSelectView() -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.api();

    let resource = use_resource(move || {
        let api = api.clone();
        async move {
            let quizzes = api
                .fetch_quizzes()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(QuizListData { quizzes })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Quizzes" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.quizzes.is_empty() {
                        p { "No quizzes published yet." }
                    } else {
                        ul { class: "quiz-list",
                            for quiz in data.quizzes {
                                QuizCard { quiz }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn QuizCard(quiz: Quiz) -> Element {
    rsx! {
        li { class: "quiz-card",
            Link { to: Route::QuizStart { quiz_id: quiz.id.value() },
                h3 { "{quiz.title}" }
                if let Some(description) = quiz.description.as_deref() {
                    p { "{description}" }
                }
                p { class: "quiz-meta",
                    span { class: "difficulty {quiz.difficulty}", "{quiz.difficulty}" }
                    span { "{quiz.question_count} questions" }
                }
            }
        }
    }
}
