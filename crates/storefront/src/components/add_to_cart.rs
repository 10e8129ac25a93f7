//! Add-to-cart form.
//!
//! Renders a form that posts a `LinesAdd` cart action to `/cart`, carrying
//! the lines and an opaque analytics payload as hidden fields.

use askama::Template;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::button::{Button, ButtonStyle, ButtonType, ClickHandler};
use crate::shopify::types::CartLineInput;

/// Route the cart form posts to.
pub const CART_ROUTE: &str = "/cart";

/// Value of the analytics field when no payload is given.
const NO_ANALYTICS: &str = "undefined";

const LABEL: &str = "add to cart";

/// Errors building or rendering an add-to-cart form.
#[derive(Debug, Error)]
pub enum AddToCartError {
    /// A cart form must add at least one line.
    #[error("Add to cart requires at least one line")]
    EmptyLines,

    /// Form input could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Submission state of one cart form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetcherState {
    #[default]
    Idle,
    Submitting,
    Loading,
}

impl FetcherState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Loading => "loading",
        }
    }
}

/// Cart action submitted through the `cartFormInput` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "inputs")]
pub enum CartAction {
    LinesAdd { lines: Vec<CartLineInput> },
}

/// Add-to-cart button wrapped in its cart form.
#[derive(Debug, Clone)]
pub struct AddToCartButton {
    lines: Vec<CartLineInput>,
    analytics: Option<serde_json::Value>,
    disabled: Option<bool>,
    on_click: Option<ClickHandler>,
}

#[derive(Template)]
#[template(path = "components/add_to_cart_button.html")]
struct AddToCartTemplate<'a> {
    action: &'a str,
    state: FetcherState,
    disabled_override: Option<bool>,
    cart_form_input: String,
    analytics: String,
    button: String,
}

impl AddToCartButton {
    /// # Errors
    ///
    /// Returns `EmptyLines` if `lines` is empty.
    pub fn new(lines: Vec<CartLineInput>) -> Result<Self, AddToCartError> {
        if lines.is_empty() {
            return Err(AddToCartError::EmptyLines);
        }
        Ok(Self {
            lines,
            analytics: None,
            disabled: None,
            on_click: None,
        })
    }

    #[must_use]
    pub fn analytics(mut self, analytics: Option<serde_json::Value>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Force the button on or off regardless of submission state.
    #[must_use]
    pub const fn disabled(mut self, disabled: Option<bool>) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn on_click(mut self, handler: Option<ClickHandler>) -> Self {
        self.on_click = handler;
        self
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLineInput] {
        &self.lines
    }

    /// An explicit `disabled` wins; otherwise the button is disabled while
    /// the form is not idle.
    #[must_use]
    pub fn is_disabled(&self, state: FetcherState) -> bool {
        self.disabled.unwrap_or(state != FetcherState::Idle)
    }

    /// Value of the hidden `analytics` field.
    ///
    /// # Errors
    ///
    /// Returns error if the payload cannot be serialized.
    pub fn analytics_field(&self) -> Result<String, AddToCartError> {
        match &self.analytics {
            Some(value) => Ok(serde_json::to_string(value)?),
            None => Ok(NO_ANALYTICS.to_string()),
        }
    }

    /// Value of the hidden `cartFormInput` field.
    ///
    /// # Errors
    ///
    /// Returns error if the lines cannot be serialized.
    pub fn cart_form_input(&self) -> Result<String, AddToCartError> {
        let action = CartAction::LinesAdd {
            lines: self.lines.clone(),
        };
        Ok(serde_json::to_string(&action)?)
    }

    /// Render the form in `state`.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or rendering fails.
    pub fn render(&self, state: FetcherState) -> Result<String, AddToCartError> {
        let button = Button::new(LABEL, LABEL, ButtonType::Submit, ButtonStyle::Primary)
            .disabled(self.is_disabled(state))
            .on_click(self.on_click.clone())
            .render()?;

        let template = AddToCartTemplate {
            action: CART_ROUTE,
            state,
            disabled_override: self.disabled,
            cart_form_input: self.cart_form_input()?,
            analytics: self.analytics_field()?,
            button,
        };
        Ok(template.render()?)
    }
}
