use dioxus::document::eval;

use quiz_core::model::Theme;

/// Mutate the document root to reflect the selected theme.
///
/// Light clears the attribute so the stylesheet's defaults apply; the other
/// variants set `data-theme` for their CSS blocks.
pub fn apply_document_theme(theme: Theme) {
    let script = match theme.document_attribute() {
        Some(attr) => format!("document.documentElement.setAttribute('data-theme', '{attr}');"),
        None => "document.documentElement.removeAttribute('data-theme');".to_string(),
    };
    let _ = eval(&script);
}
