use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{Quiz, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct StartData {
    quiz: Quiz,
    saved_name: String,
}

#[component]
pub fn QuizStartView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let api = ctx.api();
    let participation = ctx.participation();

    let mut player = use_signal(String::new);

    let resource = use_resource(move || {
        let api = api.clone();
        let participation = participation.clone();
        async move {
            let quiz = api
                .fetch_quiz(QuizId::new(quiz_id))
                .await
                .map_err(|_| ViewError::Unknown)?;
            // Prefill the name from the legacy participation fields.
            let saved_name = participation
                .player_name()
                .await
                .ok()
                .flatten()
                .unwrap_or_default();
            Ok(StartData { quiz, saved_name })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => {
                    let name_value = if player.read().is_empty() {
                        data.saved_name.clone()
                    } else {
                        player.read().clone()
                    };
                    let start_disabled = name_value.trim().is_empty();
                    let quiz_title = data.quiz.title.clone();
                    let start_name = name_value.clone();

                    rsx! {
                        h2 { "{quiz_title}" }
                        if let Some(description) = data.quiz.description.as_deref() {
                            p { "{description}" }
                        }
                        p { class: "quiz-meta",
                            span { "Difficulty: {data.quiz.difficulty}" }
                            span { "{data.quiz.question_count} questions" }
                        }

                        form { class: "start-form",
                            onsubmit: move |event| {
                                event.prevent_default();
                                let name = start_name.trim().to_string();
                                if name.is_empty() {
                                    return;
                                }
                                navigator.push(Route::QuizPlay { quiz_id, player: name });
                            },
                            label { r#for: "player-name", "Your name" }
                            input {
                                id: "player-name",
                                value: "{name_value}",
                                oninput: move |event| player.set(event.value()),
                            }
                            button {
                                class: "button primary",
                                r#type: "submit",
                                disabled: start_disabled,
                                "Start quiz"
                            }
                        }
                    }
                }
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}
