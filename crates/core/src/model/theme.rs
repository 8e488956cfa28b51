use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of UI themes.
///
/// `Tournament` is the high-contrast variant used during live events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Tournament,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Tournament];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Tournament => "tournament",
        }
    }

    /// Value for the document root's `data-theme` attribute.
    ///
    /// Light is the unthemed default and clears the attribute.
    #[must_use]
    pub fn document_attribute(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
            Theme::Tournament => Some("tournament"),
        }
    }

    /// Next theme in the fixed cycle order light -> dark -> tournament.
    #[must_use]
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Tournament,
            Theme::Tournament => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "tournament" => Ok(Theme::Tournament),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_covers_all_and_wraps() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Tournament);
        assert_eq!(Theme::Tournament.next(), Theme::Light);
    }

    #[test]
    fn string_roundtrip() {
        for theme in Theme::ALL {
            let parsed: Theme = theme.as_str().parse().unwrap();
            assert_eq!(parsed, theme);
        }
    }

    #[test]
    fn light_clears_document_attribute() {
        assert_eq!(Theme::Light.document_attribute(), None);
        assert_eq!(Theme::Dark.document_attribute(), Some("dark"));
    }
}
