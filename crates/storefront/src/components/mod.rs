//! Reusable server-rendered UI components.
//!
//! Components render to HTML strings with askama and are embedded into
//! page templates with `|safe`.

pub mod add_to_cart;
pub mod button;

pub use add_to_cart::{AddToCartButton, AddToCartError, CartAction, FetcherState};
pub use button::{Button, ButtonStyle, ButtonType, ClickHandler};
