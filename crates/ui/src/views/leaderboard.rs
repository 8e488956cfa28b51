use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::{LeaderboardEntry, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{format_datetime, format_duration};

const LEADERBOARD_LIMIT: u32 = 50;

#[derive(Clone, Debug, PartialEq)]
struct LeaderboardData {
    entries: Vec<LeaderboardEntry>,
}

#[component]
pub fn LeaderboardView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.api();

    let resource = use_resource(move || {
        let api = api.clone();
        async move {
            // The backend sorts; rows are rendered in the order received.
            let entries = api
                .fetch_leaderboard(QuizId::new(quiz_id), LEADERBOARD_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(LeaderboardData { entries })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page leaderboard",
            h2 { "Leaderboard" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.entries.is_empty() {
                        p { "No attempts yet. Be the first!" }
                    } else {
                        table {
                            thead {
                                tr {
                                    th { "#" }
                                    th { "Player" }
                                    th { "Score" }
                                    th { "Time" }
                                    th { "When" }
                                }
                            }
                            tbody {
                                for (rank, entry) in data.entries.into_iter().enumerate() {
                                    LeaderboardRow { rank: rank + 1, entry }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }

            Link { class: "button", to: Route::QuizSelect {}, "Back to quizzes" }
        }
    }
}

#[component]
fn LeaderboardRow(rank: usize, entry: LeaderboardEntry) -> Element {
    let percentage = format!("{:.0}", entry.percentage);
    rsx! {
        tr {
            td { "{rank}" }
            td { "{entry.player_name}" }
            td { "{entry.score}/{entry.total_questions} ({percentage}%)" }
            td { "{format_duration(entry.time_spent)}" }
            td { "{format_datetime(entry.created_at)}" }
        }
    }
}
