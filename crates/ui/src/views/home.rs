use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    rsx! {
        div { class: "page home",
            h2 { "Welcome" }
            p { "Pick a quiz, answer at your own pace, and see how you rank." }
            p { "Progress is saved locally, so you can safely come back later." }
            Link { class: "button primary", to: Route::QuizSelect {}, "Browse quizzes" }
        }
    }
}
