//! contact command - Send a consultation request
//!
//! The form is validated exactly as on the Contact page; a request with
//! missing fields is never sent.

use anyhow::{bail, Result};

use super::load_config;
use crate::cli::Context;
use crate::contact::{ContactField, ContactForm, ContactView, NoticeKind};
use crate::notify::EmailJsRelay;
use crate::ui::output;

/// Raw field values from the command line.
#[derive(Debug, Clone, Default)]
pub struct ContactArgs {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub service_type: String,
    pub preferred_time: String,
    pub special_notes: String,
}

impl ContactArgs {
    fn into_form(self) -> ContactForm {
        ContactForm::new()
            .with(ContactField::FirstName, self.first_name)
            .with(ContactField::LastName, self.last_name)
            .with(ContactField::Address, self.address)
            .with(ContactField::Phone, self.phone)
            .with(ContactField::ServiceType, self.service_type)
            .with(ContactField::PreferredTime, self.preferred_time)
            .with(ContactField::SpecialNotes, self.special_notes)
    }
}

/// Run the contact command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn contact(ctx: &Context, args: ContactArgs, dry_run: bool) -> Result<()> {
    let form = args.into_form();

    if dry_run {
        return match form.validate() {
            Ok(submission) => {
                let params = submission.to_message();
                let pairs: Vec<(&String, &String)> = params.template_params.iter().collect();
                output::print(output::format_pairs(&pairs), ctx.verbosity());
                output::success("Form is complete (not sent)", ctx.verbosity());
                Ok(())
            }
            Err(errors) => {
                report_missing(errors.fields());
                bail!("{}", errors)
            }
        };
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(contact_async(ctx, form))
}

async fn contact_async(ctx: &Context, form: ContactForm) -> Result<()> {
    if let Err(errors) = form.validate() {
        report_missing(errors.fields());
        bail!("{}", errors);
    }

    let config = load_config(ctx)?;
    let relay = EmailJsRelay::from_config(&config)?;
    output::debug(format!("sending via {}", relay.endpoint()), ctx.verbosity());

    let mut view = ContactView::with_form(form);
    let notice = view.submit(&relay).await.clone();
    match notice.kind {
        NoticeKind::Success => {
            output::success(notice.message, ctx.verbosity());
            Ok(())
        }
        NoticeKind::Error => bail!("{}", notice.message),
    }
}

fn report_missing(fields: &[ContactField]) {
    for field in fields {
        output::error(field.required_message());
    }
}
