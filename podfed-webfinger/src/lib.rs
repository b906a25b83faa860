//! hCard profile discovery documents.
//!
//! An hCard is the HTML page a pod publishes so peers can discover an
//! account's guid, names, avatar URLs, public key and search preference.
//! - [`HCard::from_account`] + [`HCard::to_html`] generate the page
//! - [`HCard::from_html`] reads it back, accepting the current layout and
//!   the legacy one described by [`convention::LEGACY`]
//!
//! Parsing is tolerant of real-world HTML; see [`Document`].

pub mod convention;
mod error;
mod hcard;
mod html;

pub use convention::{Convention, HCardField, Locator};
pub use error::{HCardError, HCardResult};
pub use hcard::{AccountData, HCard};
pub use html::Document;
