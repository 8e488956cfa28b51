use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{ChoiceId, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{ChoiceVm, PlayVm, format_duration, start_play};

/// Per-render snapshot of the play state.
///
/// Extracted before `rsx!` so no borrow of the view-model signal is held
/// inside event handlers or across awaits.
#[derive(Clone, Debug, PartialEq)]
struct PlaySnapshot {
    number: usize,
    total: usize,
    percent: u32,
    title: String,
    text: String,
    image: Option<String>,
    choices: Vec<ChoiceVm>,
    can_advance: bool,
    can_retreat: bool,
    is_last: bool,
    all_answered: bool,
    answered: usize,
    elapsed: u32,
}

impl PlaySnapshot {
    fn capture(play: &PlayVm) -> Option<Self> {
        let question = play.current_question()?;
        Some(Self {
            number: play.question_number(),
            total: play.total_questions(),
            percent: play.progress_percent(),
            title: question.title.clone(),
            text: question.text.clone(),
            image: question.image.clone(),
            choices: play.choices(),
            can_advance: play.can_advance(),
            can_retreat: play.can_retreat(),
            is_last: play.is_last_question(),
            all_answered: play.all_answered(),
            answered: play.answered_count(),
            elapsed: play.elapsed_seconds(),
        })
    }
}

#[component]
pub fn QuizPlayView(quiz_id: u64, player: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let sessions = ctx.sessions();
    let participation = ctx.participation();

    let mut vm = use_signal(|| None::<PlayVm>);
    let mut error = use_signal(|| None::<ViewError>);

    use_future(move || {
        let sessions = sessions.clone();
        let player = player.clone();
        async move {
            match start_play(sessions, QuizId::new(quiz_id), &player).await {
                Ok(play) => vm.set(Some(play)),
                Err(err) => error.set(Some(err)),
            }
        }
    });

    let snapshot = vm.read().as_ref().and_then(PlaySnapshot::capture);
    let current_error = *error.read();

    let on_choice = move |choice_id: ChoiceId| {
        spawn(async move {
            if let Some(mut play) = vm.take() {
                let result = play.answer(choice_id).await;
                vm.set(Some(play));
                if let Err(err) = result {
                    error.set(Some(err));
                }
            }
        });
    };

    let on_previous = move |_| {
        spawn(async move {
            if let Some(mut play) = vm.take() {
                let result = play.previous().await;
                vm.set(Some(play));
                if let Err(err) = result {
                    error.set(Some(err));
                }
            }
        });
    };

    let on_next = move |_| {
        spawn(async move {
            if let Some(mut play) = vm.take() {
                let result = play.next().await;
                vm.set(Some(play));
                if let Err(err) = result {
                    error.set(Some(err));
                }
            }
        });
    };

    let on_submit = move |_| {
        let participation = participation.clone();
        spawn(async move {
            let Some(mut play) = vm.take() else {
                return;
            };
            match play.submit().await {
                Ok(response) => {
                    // Keep the legacy participation fields in sync.
                    if let Err(err) = participation.save_player_name(play.player_name()).await {
                        log::warn!("could not save player name: {err}");
                    }
                    if let Err(err) = participation.save_participation_score(response.score).await
                    {
                        log::warn!("could not save participation score: {err}");
                    }
                    vm.set(Some(play));
                    navigator.push(Route::Score {
                        attempt_id: response.id.value(),
                        quiz_id,
                    });
                }
                Err(err) => {
                    vm.set(Some(play));
                    error.set(Some(err));
                }
            }
        });
    };

    rsx! {
        div { class: "page play",
            if let Some(err) = current_error {
                p { class: "error", "{err.message()}" }
            }

            match snapshot {
                Some(snap) => rsx! {
                    header { class: "play-header",
                        span { "Question {snap.number} of {snap.total}" }
                        span { "Answered {snap.answered}/{snap.total}" }
                        span { "Time {format_duration(snap.elapsed)}" }
                        progress { max: "100", value: "{snap.percent}" }
                    }

                    section { class: "question",
                        h2 { "{snap.title}" }
                        p { "{snap.text}" }
                        if let Some(image) = snap.image.as_deref() {
                            img { src: "{image}", alt: "question illustration" }
                        }
                    }

                    ul { class: "choices",
                        for choice in snap.choices {
                            li {
                                button {
                                    class: if choice.selected { "choice selected" } else { "choice" },
                                    onclick: move |_| on_choice(choice.id),
                                    "{choice.text}"
                                }
                            }
                        }
                    }

                    footer { class: "play-nav",
                        button {
                            disabled: !snap.can_retreat,
                            onclick: on_previous,
                            "Previous"
                        }
                        if snap.is_last {
                            button {
                                class: "button primary",
                                disabled: !snap.all_answered,
                                onclick: on_submit,
                                "Submit"
                            }
                        } else {
                            button {
                                disabled: !snap.can_advance,
                                onclick: on_next,
                                "Next"
                            }
                        }
                    }
                },
                None => rsx! {
                    if current_error.is_none() {
                        p { "Loading..." }
                    }
                },
            }
        }
    }
}
