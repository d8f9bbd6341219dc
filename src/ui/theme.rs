//! Declarative presentation config for the login screen
//!
//! Provides:
//! - `Style`, an ordered list of CSS declarations rendered to an inline style
//! - `LoginTheme`, one `Style` per element of the login screen
//! - context helpers so a host application can swap the theme

use leptos::prelude::*;

/// Ordered CSS declarations; later values for the same property win
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    declarations: Vec<(&'static str, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `property`, replacing an earlier value
    pub fn with(mut self, property: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.declarations.push((property, value)),
        }
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Overlay `other` on top of `self`
    pub fn merge(&self, other: &Style) -> Style {
        other
            .declarations
            .iter()
            .fold(self.clone(), |style, (p, v)| style.with(*p, v.clone()))
    }

    /// Render as the value of a `style` attribute
    pub fn css(&self) -> String {
        self.declarations
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Styles for every element of the login screen
#[derive(Clone, Debug, PartialEq)]
pub struct LoginTheme {
    pub page: Style,
    pub center: Style,
    pub header: Style,
    pub logo: Style,
    pub title: Style,
    pub subtitle: Style,
    pub card: Style,
    pub sign_in_as: Style,
    pub role_row: Style,
    pub role_button: Style,
    pub role_button_active: Style,
    pub label: Style,
    pub input: Style,
    pub error: Style,
    pub notice: Style,
    pub submit_button: Style,
}

const NAVY: &str = "#132f4c";
const BORDER: &str = "1px solid #d7dbe0";

impl Default for LoginTheme {
    fn default() -> Self {
        Self {
            page: Style::new()
                .with("min-height", "100vh")
                .with("background", "radial-gradient(circle at top, #2d4b6d, #0f2233)")
                .with("display", "flex")
                .with("align-items", "center")
                .with("justify-content", "center")
                .with("padding", "24px")
                .with("font-family", "Arial, sans-serif"),
            center: Style::new().with("width", "100%").with("max-width", "520px"),
            header: Style::new()
                .with("text-align", "center")
                .with("color", "white")
                .with("margin-bottom", "20px"),
            logo: Style::new()
                .with("width", "56px")
                .with("height", "56px")
                .with("border-radius", "14px")
                .with("display", "grid")
                .with("place-items", "center")
                .with("margin", "0 auto 10px")
                .with("background", "rgba(255,255,255,0.12)")
                .with("border", "1px solid rgba(255,255,255,0.22)")
                .with("font-size", "22px"),
            title: Style::new().with("margin", "0").with("font-size", "34px"),
            subtitle: Style::new().with("margin", "6px 0 0").with("opacity", "0.85"),
            card: Style::new()
                .with("background", "white")
                .with("border-radius", "14px")
                .with("padding", "22px")
                .with("box-shadow", "0 10px 40px rgba(0,0,0,0.25)"),
            sign_in_as: Style::new()
                .with("margin", "0")
                .with("color", "#3a3a3a")
                .with("font-weight", "600"),
            role_row: Style::new()
                .with("display", "flex")
                .with("gap", "10px")
                .with("margin-top", "12px")
                .with("margin-bottom", "18px"),
            role_button: Style::new()
                .with("flex", "1")
                .with("padding", "10px 12px")
                .with("border-radius", "10px")
                .with("border", BORDER)
                .with("background", "#fff")
                .with("cursor", "pointer")
                .with("font-weight", "600"),
            role_button_active: Style::new()
                .with("background", NAVY)
                .with("color", "white")
                .with("border-color", NAVY),
            label: Style::new()
                .with("display", "block")
                .with("font-size", "13px")
                .with("font-weight", "700")
                .with("color", "#25313b"),
            input: Style::new()
                .with("width", "100%")
                .with("padding", "12px 12px")
                .with("border-radius", "10px")
                .with("border", BORDER)
                .with("margin-top", "6px")
                .with("outline", "none"),
            error: Style::new()
                .with("margin-top", "12px")
                .with("padding", "10px")
                .with("border-radius", "10px")
                .with("background", "#ffecec")
                .with("border", "1px solid #ffb4b4")
                .with("color", "#7a1b1b")
                .with("font-size", "13px"),
            notice: Style::new()
                .with("margin-top", "12px")
                .with("padding", "10px")
                .with("border-radius", "10px")
                .with("background", "#e9f7ef")
                .with("border", "1px solid #a8dcbc")
                .with("color", "#1b5e34")
                .with("font-size", "13px"),
            submit_button: Style::new()
                .with("width", "100%")
                .with("margin-top", "16px")
                .with("padding", "12px 14px")
                .with("border-radius", "10px")
                .with("border", "0")
                .with("background", NAVY)
                .with("color", "white")
                .with("font-weight", "700")
                .with("cursor", "pointer"),
        }
    }
}

impl LoginTheme {
    /// Style of a role button, active or not
    pub fn role_button_style(&self, active: bool) -> Style {
        if active {
            self.role_button.merge(&self.role_button_active)
        } else {
            self.role_button.clone()
        }
    }

    /// Style of the submit button; dimmed while it cannot be used
    pub fn submit_button_style(&self, enabled: bool) -> Style {
        if enabled {
            self.submit_button.clone()
        } else {
            self.submit_button
                .clone()
                .with("opacity", "0.6")
                .with("cursor", "not-allowed")
        }
    }
}

/// Make `theme` available to the login components
pub fn provide_login_theme(theme: LoginTheme) {
    provide_context(theme);
}

/// Theme from context, or the default one
pub fn use_login_theme() -> LoginTheme {
    use_context::<LoginTheme>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rendering() {
        let style = Style::new().with("color", "white").with("padding", "24px");
        assert_eq!(style.css(), "color: white; padding: 24px;");
    }

    #[test]
    fn test_with_replaces_in_place() {
        let style = Style::new()
            .with("color", "white")
            .with("padding", "1px")
            .with("color", "black");

        assert_eq!(style.css(), "color: black; padding: 1px;");
    }

    #[test]
    fn test_merge_overlays() {
        let base = Style::new().with("background", "#fff").with("flex", "1");
        let top = Style::new().with("background", NAVY).with("color", "white");

        let merged = base.merge(&top);
        assert_eq!(merged.get("background"), Some(NAVY));
        assert_eq!(merged.get("flex"), Some("1"));
        assert_eq!(merged.get("color"), Some("white"));
    }

    #[test]
    fn test_active_role_button() {
        let theme = LoginTheme::default();

        assert_eq!(theme.role_button_style(false).get("background"), Some("#fff"));
        assert_eq!(theme.role_button_style(true).get("background"), Some(NAVY));
        assert_eq!(theme.role_button_style(true).get("cursor"), Some("pointer"));
    }

    #[test]
    fn test_disabled_submit_button() {
        let theme = LoginTheme::default();

        assert_eq!(theme.submit_button_style(true).get("opacity"), None);
        assert_eq!(theme.submit_button_style(false).get("cursor"), Some("not-allowed"));
    }
}
