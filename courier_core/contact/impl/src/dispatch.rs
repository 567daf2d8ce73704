use courier_email_contracts::{Email, EmailService};
use courier_models::{
    contact::{ContactErrorMessages, ContactMessageKey, ContactRecord, SEND_FAILED_MESSAGE},
    email_address::NamedAddress,
};
use courier_shared_contracts::settings::{Setting, SettingsService};
use email_address::EmailAddress;
use tracing::error;
use url::Url;

use crate::ContactFeatureServiceImpl;

const DEFAULT_RECIPIENT_NAME: &str = "Admin";
const DEFAULT_SITE_NAME: &str = "Contact Form";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DispatchOutcome {
    Sent,
    NotSent(NotSentReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotSentReason {
    /// The submission has error messages and must not be sent.
    Rejected,
    /// The mail server could not be reached or refused the message.
    TransportError,
}

impl<EmailS, Settings, TransientState> ContactFeatureServiceImpl<EmailS, Settings, TransientState>
where
    EmailS: EmailService,
    Settings: SettingsService,
{
    /// Emails the submission to the site owner unless `messages` already
    /// contains errors. A failed send adds the `generic` message.
    pub(crate) async fn dispatch(
        &self,
        data: &ContactRecord,
        messages: &mut ContactErrorMessages,
    ) -> DispatchOutcome {
        if !messages.is_empty() {
            return DispatchOutcome::NotSent(NotSentReason::Rejected);
        }

        let email = Email {
            from: Some(NamedAddress::new(&data.email, &data.name)),
            recipient: self.resolve_recipient(),
            subject: format!("Contact From {}", self.resolve_site_name()),
            body: compose_body(data),
        };

        match self.email.send(email).await {
            Ok(true) => return DispatchOutcome::Sent,
            Ok(false) => error!("Failed to send contact email: rejected by mail server"),
            Err(err) => error!("Failed to send contact email: {err:#}"),
        }

        messages.insert(ContactMessageKey::Generic, SEND_FAILED_MESSAGE);
        DispatchOutcome::NotSent(NotSentReason::TransportError)
    }

    /// The configured contact address if it is valid, otherwise the admin
    /// address. Empty if neither is set.
    fn resolve_recipient(&self) -> NamedAddress {
        let name = self
            .settings
            .get(Setting::ContactName)
            .unwrap_or_else(|| DEFAULT_RECIPIENT_NAME.into());

        let address = self
            .settings
            .get(Setting::ContactAddress)
            .filter(|address| EmailAddress::is_valid(address))
            .or_else(|| self.settings.get(Setting::AdminEmail))
            .unwrap_or_default();

        NamedAddress { address, name }
    }

    /// The host of the configured site url.
    fn resolve_site_name(&self) -> String {
        self.settings
            .get(Setting::SiteUrl)
            .and_then(|url| Url::parse(url.trim()).ok()?.host_str().map(Into::into))
            .unwrap_or_else(|| DEFAULT_SITE_NAME.into())
    }
}

fn compose_body(data: &ContactRecord) -> String {
    format!(
        "Name: {}\nEmail: {}\nCompany: {}\n\nMessage:\n\n{}",
        data.name, data.email, data.company, data.message
    )
}
