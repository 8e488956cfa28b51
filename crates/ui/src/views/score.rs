use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::{Attempt, AttemptId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::format_duration;

#[derive(Clone, Debug, PartialEq)]
struct ScoreData {
    attempt: Attempt,
}

#[component]
pub fn ScoreView(attempt_id: u64, quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.api();

    let resource = use_resource(move || {
        let api = api.clone();
        async move {
            let attempt = api
                .fetch_attempt(AttemptId::new(attempt_id))
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(ScoreData { attempt })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page score",
            h2 { "Your result" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => {
                    let attempt = data.attempt;
                    let percentage = format!("{:.0}", attempt.percentage);
                    rsx! {
                        p { class: "score-headline",
                            "{attempt.player_name}: {attempt.score} / {attempt.total_questions} ({percentage}%)"
                        }
                        p { "Time spent: {format_duration(attempt.time_spent)}" }

                        nav { class: "score-links",
                            Link {
                                class: "button primary",
                                to: Route::Leaderboard { quiz_id },
                                "View leaderboard"
                            }
                            Link { class: "button", to: Route::QuizSelect {}, "Play another quiz" }
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
