use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::{Difficulty, Quiz};
use services::api::QuizDraft;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::QuizForm;

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut authed = use_signal(|| ctx.api().has_token());

    rsx! {
        div { class: "page admin",
            h2 { "Admin" }

            if authed() {
                QuizAdminPanel {}
            } else {
                LoginForm { on_login: move |_| authed.set(true) }
            }
        }
    }
}

#[component]
fn LoginForm(on_login: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut password = use_signal(String::new);
    let mut failed = use_signal(|| false);

    rsx! {
        form { class: "start-form",
            onsubmit: move |event| {
                event.prevent_default();
                let services = ctx.services();
                let value = password.read().clone();
                spawn(async move {
                    match services.api().login(&value).await {
                        Ok(token) => {
                            if let Err(err) = services.remember_auth_token(&token).await {
                                log::warn!("could not persist auth token: {err}");
                            }
                            on_login.call(());
                        }
                        Err(err) => {
                            log::warn!("admin login failed: {err}");
                            failed.set(true);
                        }
                    }
                });
            },
            label { r#for: "admin-password", "Password" }
            input {
                id: "admin-password",
                r#type: "password",
                value: "{password}",
                oninput: move |event| password.set(event.value()),
            }
            if failed() {
                p { class: "error", "Login failed. Check the password." }
            }
            button { class: "button primary", r#type: "submit", "Log in" }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct AdminQuizData {
    quizzes: Vec<Quiz>,
}

#[component]
fn QuizAdminPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.api();

    let mut resource = use_resource(move || {
        let api = api.clone();
        async move {
            let quizzes = api.fetch_quizzes().await.map_err(|_| ViewError::Unknown)?;
            Ok(AdminQuizData { quizzes })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        NewQuizForm { on_created: move |_| resource.restart() }

        match state {
            ViewState::Idle => rsx! {
                p { "Idle" }
            },
            ViewState::Loading => rsx! {
                p { "Loading..." }
            },
            ViewState::Ready(data) => rsx! {
                if data.quizzes.is_empty() {
                    p { "No quizzes yet." }
                } else {
                    table {
                        thead {
                            tr {
                                th { "Quiz" }
                                th { "Difficulty" }
                                th { "Questions" }
                                th { "Published" }
                                th { "" }
                            }
                        }
                        tbody {
                            for quiz in data.quizzes {
                                QuizRow { quiz, on_changed: move |_| resource.restart() }
                            }
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

#[component]
fn QuizRow(quiz: Quiz, on_changed: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_id = quiz.id;
    let is_published = quiz.is_published;

    let toggle = {
        let ctx = ctx.clone();
        move |_| {
            let api = ctx.api();
            spawn(async move {
                let draft = QuizDraft {
                    is_published: Some(!is_published),
                    ..QuizDraft::default()
                };
                match api.update_quiz(quiz_id, &draft).await {
                    Ok(_) => on_changed.call(()),
                    Err(err) => log::warn!("could not update quiz {quiz_id}: {err}"),
                }
            });
        }
    };

    let remove = move |_| {
        let api = ctx.api();
        spawn(async move {
            match api.delete_quiz(quiz_id).await {
                Ok(()) => on_changed.call(()),
                Err(err) => log::warn!("could not delete quiz {quiz_id}: {err}"),
            }
        });
    };

    rsx! {
        tr {
            td {
                Link { to: Route::AdminQuiz { quiz_id: quiz_id.value() }, "{quiz.title}" }
            }
            td { "{quiz.difficulty}" }
            td { "{quiz.question_count}" }
            td {
                if is_published { "yes" } else { "no" }
            }
            td {
                button {
                    class: "button",
                    onclick: toggle,
                    if is_published { "Unpublish" } else { "Publish" }
                }
                button { class: "button", onclick: remove, "Delete" }
            }
        }
    }
}

#[component]
fn NewQuizForm(on_created: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut form = use_signal(QuizForm::default);
    let mut error = use_signal(|| None::<&'static str>);

    rsx! {
        form { class: "start-form",
            onsubmit: move |event| {
                event.prevent_default();
                let draft = match form.read().draft() {
                    Ok(draft) => draft,
                    Err(err) => {
                        error.set(Some(err.message()));
                        return;
                    }
                };
                error.set(None);
                let api = ctx.api();
                spawn(async move {
                    match api.create_quiz(&draft).await {
                        Ok(_) => {
                            form.set(QuizForm::default());
                            on_created.call(());
                        }
                        Err(err) => {
                            log::warn!("could not create quiz: {err}");
                            error.set(Some("Could not create the quiz."));
                        }
                    }
                });
            },
            h3 { "New quiz" }
            label { r#for: "quiz-title", "Title" }
            input {
                id: "quiz-title",
                value: "{form.read().title}",
                oninput: move |event| form.write().title = event.value(),
            }
            label { r#for: "quiz-description", "Description" }
            input {
                id: "quiz-description",
                value: "{form.read().description}",
                oninput: move |event| form.write().description = event.value(),
            }
            label { r#for: "quiz-difficulty", "Difficulty" }
            select {
                id: "quiz-difficulty",
                onchange: move |event| form.write().difficulty = event.value(),
                option { value: "", selected: form.read().difficulty.is_empty(), "" }
                for difficulty in Difficulty::ALL {
                    option {
                        value: "{difficulty}",
                        selected: form.read().difficulty == difficulty.as_str(),
                        "{difficulty}"
                    }
                }
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: form.read().publish,
                    onchange: move |event| form.write().publish = event.checked(),
                }
                "Publish immediately"
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button { class: "button primary", r#type: "submit", "Create quiz" }
        }
    }
}
