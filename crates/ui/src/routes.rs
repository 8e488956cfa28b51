use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{
    AdminQuizView, AdminView, HomeView, LeaderboardView, QuestionEditView, QuestionNewView,
    QuizPlayView, QuizSelectView, QuizStartView, ScoreView, SettingsView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quizzes", QuizSelectView)] QuizSelect {},
        #[route("/quiz/:quiz_id/start", QuizStartView)] QuizStart { quiz_id: u64 },
        #[route("/quiz/:quiz_id/play?:player", QuizPlayView)] QuizPlay { quiz_id: u64, player: String },
        #[route("/score/:attempt_id?:quiz_id", ScoreView)] Score { attempt_id: u64, quiz_id: u64 },
        #[route("/quiz/:quiz_id/leaderboard", LeaderboardView)] Leaderboard { quiz_id: u64 },
        #[route("/settings", SettingsView)] Settings {},
        #[route("/admin", AdminView)] Admin {},
        #[route("/admin/quizzes/:quiz_id", AdminQuizView)] AdminQuiz { quiz_id: u64 },
        #[route("/admin/quizzes/:quiz_id/questions/new", QuestionNewView)] QuestionNew { quiz_id: u64 },
        #[route("/admin/questions/:question_id", QuestionEditView)] QuestionDetail { question_id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Topbar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Topbar() -> Element {
    rsx! {
        nav { class: "topbar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::QuizSelect {}, "Quizzes" } }
                li { Link { to: Route::Settings {}, "Settings" } }
                li { Link { to: Route::Admin {}, "Admin" } }
            }
        }
    }
}
