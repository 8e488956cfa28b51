use dioxus::prelude::*;

use quiz_core::model::Theme;

use crate::context::AppContext;
use crate::vm::apply_document_theme;

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let themes = ctx.themes();

    let mut current = use_signal(|| None::<Theme>);

    use_future({
        let themes = themes.clone();
        move || {
            let themes = themes.clone();
            async move {
                if let Ok(theme) = themes.current().await {
                    current.set(Some(theme));
                }
            }
        }
    });

    let select = {
        let themes = themes.clone();
        move |theme: Theme| {
            let themes = themes.clone();
            spawn(async move {
                match themes.set(theme).await {
                    Ok(()) => {
                        apply_document_theme(theme);
                        current.set(Some(theme));
                    }
                    Err(err) => log::warn!("could not persist theme: {err}"),
                }
            });
        }
    };

    let selected = *current.read();

    rsx! {
        div { class: "page settings",
            h2 { "Settings" }

            section {
                h3 { "Theme" }
                div { class: "theme-picker",
                    for theme in Theme::ALL {
                        {
                            let select = select.clone();
                            let is_active = selected == Some(theme);
                            rsx! {
                                button {
                                    class: if is_active { "theme-option active" } else { "theme-option" },
                                    onclick: move |_| select(theme),
                                    "{theme}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
