use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::apply_document_theme;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    // Apply the persisted (or system) theme before the first routes render.
    use_future(move || {
        let themes = ctx.themes();
        async move {
            match themes.current().await {
                Ok(theme) => apply_document_theme(theme),
                Err(err) => log::warn!("could not load theme preference: {err}"),
            }
        }
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route titles render inside the pages.
        document::Title { "Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
