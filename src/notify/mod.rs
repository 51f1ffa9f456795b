//! notify
//!
//! Outbound notifications for the contact form.
//!
//! # Modules
//!
//! - [`traits`] - The `NotificationRelay` trait and message type
//! - [`emailjs`] - EmailJS REST relay
//! - [`mock`] - Recording relay for tests

pub mod emailjs;
pub mod mock;
pub mod traits;

pub use emailjs::EmailJsRelay;
pub use mock::MockRelay;
pub use traits::{ContactMessage, NotificationRelay, RelayError};
