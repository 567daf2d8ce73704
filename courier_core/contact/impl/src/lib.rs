use courier_core_contact_contracts::{
    ContactFeatureService, ContactOutcome, ContactRequestContext, ContactSubmitError,
};
use courier_di::Build;
use courier_email_contracts::EmailService;
use courier_models::{
    contact::{ContactErrorMessages, ContactStatus, ContactSubmission},
    transient_state::TransientStateKey,
};
use courier_shared_contracts::{settings::SettingsService, transient_state::TransientStateService};
use courier_utils::trace_instrument;
use tracing::{debug, warn};

mod dispatch;
mod messages;
mod report;
mod validate;

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<EmailS, Settings, TransientState> {
    email: EmailS,
    settings: Settings,
    transient_state: TransientState,
}

impl<EmailS, Settings, TransientState> ContactFeatureService
    for ContactFeatureServiceImpl<EmailS, Settings, TransientState>
where
    EmailS: EmailService,
    Settings: SettingsService,
    TransientState: TransientStateService,
{
    #[trace_instrument(skip(self))]
    async fn submit(
        &self,
        context: ContactRequestContext,
        submission: ContactSubmission,
    ) -> Result<ContactOutcome, ContactSubmitError> {
        let validated = validate::validate(&submission);

        if validated.automated {
            warn!("Discarding contact form submission with filled honeypot field");
            return self
                .report(&context, ContactErrorMessages::default(), &validated.data)
                .await
                .map_err(Into::into);
        }

        let mut messages = messages::build_messages(&validated.errors);
        let outcome = self.dispatch(&validated.data, &mut messages).await;
        debug!(?outcome, errors = messages.len(), "contact form submission processed");

        self.report(&context, messages, &validated.data)
            .await
            .map_err(Into::into)
    }

    #[trace_instrument(skip(self))]
    async fn take_status(
        &self,
        state_key: TransientStateKey,
    ) -> anyhow::Result<Option<ContactStatus>> {
        self.load_status(&state_key).await
    }
}
