//! contact
//!
//! The consultation request form.
//!
//! Six fields are required: first name, last name, address, phone, the
//! type of service and a preferred date and time. Special notes are
//! optional. A form that fails validation is never sent; every invalid
//! field is flagged and one aggregate notice is shown. A valid form is
//! handed to a [`NotificationRelay`]; on success the form is cleared.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::notify::{ContactMessage, NotificationRelay};

/// Notice shown when required fields are missing.
pub const INCOMPLETE_MESSAGE: &str = "Please fill all required fields!";

/// Notice shown after a successful send.
pub const SENT_MESSAGE: &str = "Message sent successfully!";

/// Notice shown when the relay fails.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Accepted `preferred_time` layouts (seconds are optional).
const PREFERRED_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    FirstName,
    LastName,
    Address,
    Phone,
    ServiceType,
    PreferredTime,
    SpecialNotes,
}

impl ContactField {
    pub fn all() -> &'static [ContactField] {
        &[
            ContactField::FirstName,
            ContactField::LastName,
            ContactField::Address,
            ContactField::Phone,
            ContactField::ServiceType,
            ContactField::PreferredTime,
            ContactField::SpecialNotes,
        ]
    }

    /// Form field name, also the relay template parameter name.
    pub fn name(&self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::LastName => "last_name",
            ContactField::Address => "address",
            ContactField::Phone => "phone",
            ContactField::ServiceType => "service_type",
            ContactField::PreferredTime => "preferred_time",
            ContactField::SpecialNotes => "special_notes",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ContactField::FirstName => "First Name:",
            ContactField::LastName => "Last Name:",
            ContactField::Address => "Address:",
            ContactField::Phone => "Phone Number",
            ContactField::ServiceType => "Select Type of Service",
            ContactField::PreferredTime => "Preferred Date & Time",
            ContactField::SpecialNotes => "Special Notes",
        }
    }

    /// Message shown under the field when it is flagged.
    pub fn required_message(&self) -> &'static str {
        match self {
            ContactField::FirstName => "First name is required",
            ContactField::LastName => "Last name is required",
            ContactField::Address => "Address is required",
            ContactField::Phone => "Phone number is required",
            ContactField::ServiceType => "Service type is required",
            ContactField::PreferredTime => "Preferred time is required",
            ContactField::SpecialNotes => "",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, ContactField::SpecialNotes)
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of work requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    BathroomRenovation,
    InteriorRemodeling,
    Flooring,
    Painting,
    Venetian,
    Other,
}

impl ServiceType {
    pub fn all() -> &'static [ServiceType] {
        &[
            ServiceType::BathroomRenovation,
            ServiceType::InteriorRemodeling,
            ServiceType::Flooring,
            ServiceType::Painting,
            ServiceType::Venetian,
            ServiceType::Other,
        ]
    }

    /// Submitted value.
    pub fn value(&self) -> &'static str {
        match self {
            ServiceType::BathroomRenovation => "bathroom_renovation",
            ServiceType::InteriorRemodeling => "interior_remodeling",
            ServiceType::Flooring => "flooring",
            ServiceType::Painting => "painting",
            ServiceType::Venetian => "venetian",
            ServiceType::Other => "other",
        }
    }

    /// Option label.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::BathroomRenovation => "Bathroom Renovation",
            ServiceType::InteriorRemodeling => "Full Interior Remodeling",
            ServiceType::Flooring => "Flooring Installation",
            ServiceType::Painting => "Painting & Finishes",
            ServiceType::Venetian => "Venetian Plaster & Wallpaper",
            ServiceType::Other => "Other",
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.value() == s)
            .ok_or_else(|| {
                let values: Vec<_> = Self::all().iter().map(|t| t.value()).collect();
                format!("unknown service type '{}' (expected one of: {})", s, values.join(", "))
            })
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Raw form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub service_type: String,
    pub preferred_time: String,
    pub special_notes: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Address => &self.address,
            ContactField::Phone => &self.phone,
            ContactField::ServiceType => &self.service_type,
            ContactField::PreferredTime => &self.preferred_time,
            ContactField::SpecialNotes => &self.special_notes,
        }
    }

    fn slot(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Address => &mut self.address,
            ContactField::Phone => &mut self.phone,
            ContactField::ServiceType => &mut self.service_type,
            ContactField::PreferredTime => &mut self.preferred_time,
            ContactField::SpecialNotes => &mut self.special_notes,
        }
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the form and produce a submission.
    ///
    /// Text fields must be non-blank after trimming. The service type must
    /// be one of the offered values and the preferred time must parse as a
    /// local date-time.
    ///
    /// # Errors
    ///
    /// Returns every invalid field, in form order.
    ///
    /// # Example
    ///
    /// ```
    /// use groundwork::contact::{ContactField, ContactForm};
    ///
    /// let form = ContactForm::new()
    ///     .with(ContactField::FirstName, "Ada")
    ///     .with(ContactField::LastName, "Byron")
    ///     .with(ContactField::Address, "12 Elm St")
    ///     .with(ContactField::ServiceType, "flooring")
    ///     .with(ContactField::PreferredTime, "2025-03-04T09:30");
    ///
    /// let errors = form.validate().unwrap_err();
    /// assert_eq!(errors.fields(), &[ContactField::Phone]);
    /// ```
    pub fn validate(&self) -> Result<ContactSubmission, FormErrors> {
        let mut invalid = Vec::new();
        let mut text = |field: ContactField| {
            let value = self.get(field).trim();
            if value.is_empty() {
                invalid.push(field);
            }
            value.to_string()
        };
        let first_name = text(ContactField::FirstName);
        let last_name = text(ContactField::LastName);
        let address = text(ContactField::Address);
        let phone = text(ContactField::Phone);

        let service_type = self.service_type.trim().parse::<ServiceType>().ok();
        if service_type.is_none() {
            invalid.push(ContactField::ServiceType);
        }
        let preferred_time = parse_preferred_time(&self.preferred_time);
        if preferred_time.is_none() {
            invalid.push(ContactField::PreferredTime);
        }

        match (service_type, preferred_time) {
            (Some(service_type), Some(preferred_time)) if invalid.is_empty() => {
                let notes = self.special_notes.trim();
                Ok(ContactSubmission {
                    first_name,
                    last_name,
                    address,
                    phone,
                    service_type,
                    preferred_time,
                    special_notes: (!notes.is_empty()).then(|| notes.to_string()),
                })
            }
            _ => Err(FormErrors { fields: invalid }),
        }
    }
}

fn parse_preferred_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    PREFERRED_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// A validated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub service_type: ServiceType,
    pub preferred_time: NaiveDateTime,
    pub special_notes: Option<String>,
}

impl ContactSubmission {
    /// Template parameters for the relay, keyed by form field name.
    pub fn to_message(&self) -> ContactMessage {
        ContactMessage::new()
            .param(ContactField::FirstName.name(), &self.first_name)
            .param(ContactField::LastName.name(), &self.last_name)
            .param(ContactField::Address.name(), &self.address)
            .param(ContactField::Phone.name(), &self.phone)
            .param(ContactField::ServiceType.name(), self.service_type.value())
            .param(
                ContactField::PreferredTime.name(),
                self.preferred_time.format("%Y-%m-%dT%H:%M").to_string(),
            )
            .param(
                ContactField::SpecialNotes.name(),
                self.special_notes.clone().unwrap_or_default(),
            )
    }
}

/// Fields that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill all required fields!")]
pub struct FormErrors {
    fields: Vec<ContactField>,
}

impl FormErrors {
    pub fn fields(&self) -> &[ContactField] {
        &self.fields
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.fields.contains(&field)
    }
}

/// Tone of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    pub fn success(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message,
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Error,
            message,
        }
    }
}

/// Form state as shown on the contact page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactView {
    pub form: ContactForm,
    flagged: Vec<ContactField>,
    notice: Option<Notice>,
}

impl ContactView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: ContactForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    /// Fields currently flagged as invalid.
    pub fn flagged(&self) -> &[ContactField] {
        &self.flagged
    }

    pub fn is_flagged(&self, field: ContactField) -> bool {
        self.flagged.contains(&field)
    }

    /// The most recent notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Validate and send the form.
    ///
    /// An invalid form flags its fields and never reaches the relay. A
    /// relay failure keeps the form as typed. Nothing is retried.
    pub async fn submit(&mut self, relay: &dyn NotificationRelay) -> &Notice {
        let notice = match self.form.validate() {
            Err(errors) => {
                debug!(fields = ?errors.fields(), "contact form incomplete");
                self.flagged = errors.fields;
                Notice::error(INCOMPLETE_MESSAGE)
            }
            Ok(submission) => {
                self.flagged.clear();
                match relay.send(&submission.to_message()).await {
                    Ok(()) => {
                        debug!(relay = relay.name(), "contact message sent");
                        self.form.reset();
                        Notice::success(SENT_MESSAGE)
                    }
                    Err(err) => {
                        warn!(relay = relay.name(), error = %err, "contact message failed");
                        Notice::error(SEND_FAILED_MESSAGE)
                    }
                }
            }
        };
        self.notice.insert(notice)
    }
}
