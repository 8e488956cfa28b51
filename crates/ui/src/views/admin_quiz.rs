use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::{Question, Quiz, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct QuizQuestionsData {
    quiz: Quiz,
    questions: Vec<Question>,
}

/// Question management for one quiz: list, edit links, delete.
#[component]
pub fn AdminQuizView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.api();

    let mut resource = use_resource(move || {
        let api = api.clone();
        async move {
            let quiz = api
                .fetch_quiz(QuizId::new(quiz_id))
                .await
                .map_err(|_| ViewError::Unknown)?;
            let questions = api
                .fetch_questions(QuizId::new(quiz_id))
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(QuizQuestionsData { quiz, questions })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page admin",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    h2 { "{data.quiz.title}" }
                    p { class: "quiz-meta",
                        span { "Difficulty: {data.quiz.difficulty}" }
                        span { "{data.questions.len()} questions" }
                    }

                    if data.questions.is_empty() {
                        p { "No questions yet." }
                    } else {
                        table {
                            thead {
                                tr {
                                    th { "#" }
                                    th { "Question" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for question in data.questions {
                                    QuestionRow {
                                        question,
                                        on_changed: move |_| resource.restart(),
                                    }
                                }
                            }
                        }
                    }

                    nav { class: "score-links",
                        Link {
                            class: "button primary",
                            to: Route::QuestionNew { quiz_id },
                            "New question"
                        }
                        Link { class: "button", to: Route::Admin {}, "Back to admin" }
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
fn QuestionRow(question: Question, on_changed: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let question_id = question.id;

    let remove = move |_| {
        let api = ctx.api();
        spawn(async move {
            match api.delete_question(question_id).await {
                Ok(()) => on_changed.call(()),
                Err(err) => log::warn!("could not delete question {question_id}: {err}"),
            }
        });
    };

    rsx! {
        tr {
            td { "{question.position}" }
            td {
                Link {
                    to: Route::QuestionDetail { question_id: question_id.value() },
                    "{question.title}"
                }
            }
            td {
                button { class: "button", onclick: remove, "Delete" }
            }
        }
    }
}
