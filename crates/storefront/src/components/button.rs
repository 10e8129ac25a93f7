//! Presentational button.

use askama::Template;

const BASE_CLASSES: &str = "cursor-pointer transition-bg duration-200 py-1 px-3 rounded-md";
const PRIMARY_CLASSES: &str = "bg-stone-600 hover:bg-stone-800 text-white";
const SECONDARY_CLASSES: &str =
    "bg-transparent text-stone-900 hover:bg-stone-100 border border-stone-600";

/// HTML `type` of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonType {
    Submit,
    Button,
}

impl ButtonType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Button => "button",
        }
    }
}

/// Visual treatment of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

impl ButtonStyle {
    /// Classes specific to this style.
    #[must_use]
    pub const fn treatment(self) -> &'static str {
        match self {
            Self::Primary => PRIMARY_CLASSES,
            Self::Secondary => SECONDARY_CLASSES,
        }
    }

    /// Full class attribute value.
    #[must_use]
    pub fn class(self) -> String {
        format!("{BASE_CLASSES} {}", self.treatment())
    }
}

/// Name of a client-side click handler bound by the page script.
///
/// Rendered as `data-on-click`; handlers run alongside the default action
/// and never cancel a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickHandler(String);

impl ClickHandler {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A button with a visible label and a separate accessible name.
///
/// The visible label is hidden from assistive technology; `aria_label`
/// is what screen readers announce.
#[derive(Debug, Clone, Template)]
#[template(path = "components/button.html")]
pub struct Button {
    pub label: String,
    pub aria_label: String,
    pub kind: ButtonType,
    pub style: ButtonStyle,
    pub disabled: bool,
    pub on_click: Option<ClickHandler>,
}

impl Button {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        aria_label: impl Into<String>,
        kind: ButtonType,
        style: ButtonStyle,
    ) -> Self {
        Self {
            label: label.into(),
            aria_label: aria_label.into(),
            kind,
            style,
            disabled: false,
            on_click: None,
        }
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn on_click(mut self, handler: Option<ClickHandler>) -> Self {
        self.on_click = handler;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tokens(classes: &str) -> Vec<&str> {
        classes.split_whitespace().collect()
    }

    #[test]
    fn test_styles_never_share_treatment() {
        let primary = tokens(ButtonStyle::Primary.treatment());
        let secondary = tokens(ButtonStyle::Secondary.treatment());
        assert!(primary.iter().all(|class| !secondary.contains(class)));

        let secondary_full = ButtonStyle::Secondary.class();
        for class in primary {
            assert!(!tokens(&secondary_full).contains(&class));
        }
        let primary_full = ButtonStyle::Primary.class();
        for class in tokens(SECONDARY_CLASSES) {
            assert!(!tokens(&primary_full).contains(&class));
        }
    }

    #[test]
    fn test_render_submit_button() {
        let html = Button::new("add to cart", "add to cart", ButtonType::Submit, ButtonStyle::Primary)
            .render()
            .unwrap();

        assert!(html.contains(r#"type="submit""#));
        assert!(html.contains(r#"aria-label="add to cart""#));
        assert!(html.contains(r#"<span aria-hidden="true">add to cart</span>"#));
        assert!(html.contains("bg-stone-600"));
        assert!(!html.contains("disabled"));
        assert!(!html.contains("data-on-click"));
    }

    #[test]
    fn test_render_disabled_with_handler() {
        let html = Button::new("Close", "Close dialog", ButtonType::Button, ButtonStyle::Secondary)
            .disabled(true)
            .on_click(Some(ClickHandler::new("close-dialog")))
            .render()
            .unwrap();

        assert!(html.contains(r#"type="button""#));
        assert!(html.contains(" disabled"));
        assert!(html.contains(r#"data-on-click="close-dialog""#));
        assert!(html.contains("border-stone-600"));
        assert!(!html.contains("bg-stone-600"));
    }

    #[test]
    fn test_label_is_escaped() {
        let html = Button::new("<b>", "bold", ButtonType::Button, ButtonStyle::Primary)
            .render()
            .unwrap();
        assert!(html.contains("&#60;b&#62;") || html.contains("&lt;b&gt;"));
    }
}
