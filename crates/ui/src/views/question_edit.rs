use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{Difficulty, QuestionId, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QUESTION_CHOICE_ROWS, QuestionForm};

#[derive(Clone, Debug, PartialEq)]
struct NewQuestionData {
    position: u32,
    difficulty: Difficulty,
}

/// Create a question at the end of a quiz.
#[component]
pub fn QuestionNewView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let api = ctx.api();

    let resource = use_resource(move || {
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
            let position = u32::try_from(questions.len()).unwrap_or(u32::MAX - 1) + 1;
            Ok(NewQuestionData {
                position,
                difficulty: quiz.difficulty,
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page admin",
            h2 { "New question" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    QuestionFormFields {
                        initial: QuestionForm::default(),
                        submit_label: "Create question",
                        on_save: {
                            let ctx = ctx.clone();
                            move |form: QuestionForm| {
                                let api = ctx.api();
                                spawn(async move {
                                    let Ok(mut draft) = form.draft() else { return };
                                    draft.quiz_id = Some(QuizId::new(quiz_id));
                                    draft.position = Some(data.position);
                                    draft.difficulty = Some(data.difficulty);
                                    match api.create_question(&draft).await {
                                        Ok(_) => {
                                            navigator.push(Route::AdminQuiz { quiz_id });
                                        }
                                        Err(err) => {
                                            log::warn!("could not create question: {err}");
                                        }
                                    }
                                });
                            }
                        },
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

/// Edit or delete an existing question.
#[component]
pub fn QuestionEditView(question_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let api = ctx.api();

    let resource = use_resource(move || {
        let api = api.clone();
        async move {
            api.fetch_question(QuestionId::new(question_id))
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page admin",
            h2 { "Edit question" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(question) => {
                    let quiz_id = question.quiz_id.value();
                    rsx! {
                        QuestionFormFields {
                            initial: QuestionForm::from_question(&question),
                            submit_label: "Save changes",
                            on_save: {
                                let ctx = ctx.clone();
                                move |form: QuestionForm| {
                                    let api = ctx.api();
                                    spawn(async move {
                                        let Ok(draft) = form.draft() else { return };
                                        match api
                                            .update_question(QuestionId::new(question_id), &draft)
                                            .await
                                        {
                                            Ok(_) => {
                                                navigator.push(Route::AdminQuiz { quiz_id });
                                            }
                                            Err(err) => {
                                                log::warn!(
                                                    "could not update question {question_id}: {err}"
                                                );
                                            }
                                        }
                                    });
                                }
                            },
                        }

                        button {
                            class: "button",
                            onclick: {
                                let ctx = ctx.clone();
                                move |_| {
                                    let api = ctx.api();
                                    spawn(async move {
                                        match api.delete_question(QuestionId::new(question_id)).await {
                                            Ok(()) => {
                                                navigator.push(Route::AdminQuiz { quiz_id });
                                            }
                                            Err(err) => {
                                                log::warn!(
                                                    "could not delete question {question_id}: {err}"
                                                );
                                            }
                                        }
                                    });
                                }
                            },
                            "Delete question"
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

/// Shared title/text/choices form for question create and edit.
///
/// Validation runs through `QuestionForm::draft`; the parent receives the
/// form only once it validates.
#[component]
fn QuestionFormFields(
    initial: QuestionForm,
    submit_label: &'static str,
    on_save: EventHandler<QuestionForm>,
) -> Element {
    let mut form = use_signal(|| initial.clone());
    let mut error = use_signal(|| None::<&'static str>);

    rsx! {
        form { class: "start-form",
            onsubmit: move |event| {
                event.prevent_default();
                let current = form.read().clone();
                match current.draft() {
                    Ok(_) => {
                        error.set(None);
                        on_save.call(current);
                    }
                    Err(err) => error.set(Some(err.message())),
                }
            },
            label { r#for: "question-title", "Title" }
            input {
                id: "question-title",
                value: "{form.read().title}",
                oninput: move |event| form.write().title = event.value(),
            }
            label { r#for: "question-text", "Text" }
            input {
                id: "question-text",
                value: "{form.read().text}",
                oninput: move |event| form.write().text = event.value(),
            }
            label { r#for: "question-explanation", "Explanation (optional)" }
            input {
                id: "question-explanation",
                value: "{form.read().explanation}",
                oninput: move |event| form.write().explanation = event.value(),
            }

            fieldset {
                legend { "Choices (mark the correct one)" }
                for index in 0..QUESTION_CHOICE_ROWS {
                    div { class: "choice-row",
                        input {
                            r#type: "radio",
                            name: "correct-choice",
                            checked: form.read().correct == Some(index),
                            onchange: move |_| form.write().correct = Some(index),
                        }
                        input {
                            value: "{form.read().choices[index]}",
                            oninput: move |event| form.write().choices[index] = event.value(),
                        }
                    }
                }
            }

            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button { class: "button primary", r#type: "submit", "{submit_label}" }
        }
    }
}
