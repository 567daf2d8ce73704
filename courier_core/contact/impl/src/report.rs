use std::collections::HashMap;

use anyhow::Context;
use courier_core_contact_contracts::{ContactOutcome, ContactRequestContext};
use courier_models::{
    contact::{
        ContactErrorMessages, ContactField, ContactMessageKey, ContactRecord, ContactStatus,
        SubmissionMode,
    },
    transient_state::TransientStateKey,
};
use courier_shared_contracts::transient_state::TransientStateService;

use crate::ContactFeatureServiceImpl;

const SUCCESS_KEY: &str = "success";
const ERROR_PREFIX: &str = "error_";
const VALUE_PREFIX: &str = "value_";

impl<EmailS, Settings, TransientState> ContactFeatureServiceImpl<EmailS, Settings, TransientState>
where
    TransientState: TransientStateService,
{
    /// Decides how the submitter learns about the result.
    ///
    /// Interactive submissions get the result directly. For form posts the
    /// result and the submitted values are stored for the next render of the
    /// form page and the client is redirected there.
    pub(crate) async fn report(
        &self,
        context: &ContactRequestContext,
        messages: ContactErrorMessages,
        data: &ContactRecord,
    ) -> anyhow::Result<ContactOutcome> {
        match context.mode {
            SubmissionMode::Interactive if messages.is_empty() => Ok(ContactOutcome::Success),
            SubmissionMode::Interactive => Ok(ContactOutcome::Errors(messages)),
            SubmissionMode::FormPost => {
                self.store_status(&context.state_key, &messages, data)
                    .await
                    .context("Failed to store contact form status")?;

                Ok(ContactOutcome::Redirect {
                    location: redirect_location(context.referer.as_deref()),
                })
            }
        }
    }

    async fn store_status(
        &self,
        key: &TransientStateKey,
        messages: &ContactErrorMessages,
        data: &ContactRecord,
    ) -> anyhow::Result<()> {
        self.transient_state
            .replace(key, status_entries(messages, data))
            .await
    }

    /// Reads back what [`Self::report`] stored for a form post submission.
    pub(crate) async fn load_status(
        &self,
        key: &TransientStateKey,
    ) -> anyhow::Result<Option<ContactStatus>> {
        let state = self.transient_state.take(key).await?;
        if state.is_empty() {
            return Ok(None);
        }

        let mut status = ContactStatus::default();
        for (name, value) in state {
            if name == SUCCESS_KEY {
                status.success = value == "1";
            } else if let Some(message_key) = name
                .strip_prefix(ERROR_PREFIX)
                .and_then(|key| key.parse::<ContactMessageKey>().ok())
            {
                status.errors.insert(message_key, value);
            } else if let Some(field) = name
                .strip_prefix(VALUE_PREFIX)
                .and_then(|field| field.parse::<ContactField>().ok())
            {
                status.values.insert(field, value);
            }
        }

        Ok(Some(status))
    }
}

/// The namespaced entries describing a form post result: the success flag, or
/// every error message together with every submitted value.
fn status_entries(
    messages: &ContactErrorMessages,
    data: &ContactRecord,
) -> HashMap<String, String> {
    if messages.is_empty() {
        return HashMap::from([(SUCCESS_KEY.into(), "1".into())]);
    }

    let errors = messages
        .iter()
        .map(|(key, message)| (format!("{ERROR_PREFIX}{key}"), message.to_owned()));
    let values = data
        .iter()
        .map(|(field, value)| (format!("{VALUE_PREFIX}{field}"), value.to_owned()));

    errors.chain(values).collect()
}

/// The referring page without its query string.
fn redirect_location(referer: Option<&str>) -> String {
    referer
        .and_then(|referer| referer.split('?').next())
        .filter(|location| !location.is_empty())
        .unwrap_or("/")
        .into()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use courier_demo::contact::{MAX_RECORD, REFERER, REFERER_WITHOUT_QUERY};
    use courier_email_contracts::MockEmailService;
    use courier_models::contact::SEND_FAILED_MESSAGE;
    use courier_shared_contracts::{
        settings::MockSettingsService, transient_state::MockTransientStateService,
    };
    use courier_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::Sut;

    fn sut(transient_state: MockTransientStateService) -> Sut {
        ContactFeatureServiceImpl {
            email: MockEmailService::new(),
            settings: MockSettingsService::new(),
            transient_state,
        }
    }

    fn context(mode: SubmissionMode, key: TransientStateKey) -> ContactRequestContext {
        ContactRequestContext {
            mode,
            state_key: key,
            referer: Some(REFERER.into()),
        }
    }

    fn messages() -> ContactErrorMessages {
        [
            (ContactField::Email, "Email cannot be blank"),
            (ContactField::Message, "Message cannot be blank"),
        ]
        .into_iter()
        .collect()
    }

    fn state(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|&(name, value)| (name.into(), value.into()))
            .collect()
    }

    #[tokio::test]
    async fn interactive_success() {
        // Arrange
        let key = TransientStateKey::generate();
        let sut = sut(MockTransientStateService::new());

        // Act
        let result = sut
            .report(
                &context(SubmissionMode::Interactive, key),
                ContactErrorMessages::default(),
                &MAX_RECORD,
            )
            .await;

        // Assert
        assert_eq!(result.unwrap(), ContactOutcome::Success);
    }

    #[tokio::test]
    async fn interactive_errors() {
        // Arrange
        let key = TransientStateKey::generate();
        let sut = sut(MockTransientStateService::new());

        // Act
        let result = sut
            .report(
                &context(SubmissionMode::Interactive, key),
                messages(),
                &MAX_RECORD,
            )
            .await;

        // Assert
        assert_eq!(result.unwrap(), ContactOutcome::Errors(messages()));
    }

    #[tokio::test]
    async fn form_post_success() {
        // Arrange
        let key = TransientStateKey::generate();
        let transient_state =
            MockTransientStateService::new().with_replace(key, &[("success", "1")]);
        let sut = sut(transient_state);

        // Act
        let result = sut
            .report(
                &context(SubmissionMode::FormPost, key),
                ContactErrorMessages::default(),
                &MAX_RECORD,
            )
            .await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactOutcome::Redirect {
                location: REFERER_WITHOUT_QUERY.into()
            }
        );
    }

    #[tokio::test]
    async fn form_post_errors() {
        // Arrange
        let key = TransientStateKey::generate();
        let transient_state = MockTransientStateService::new().with_replace(
            key,
            &[
                ("error_email", "Email cannot be blank"),
                ("error_message", "Message cannot be blank"),
                ("value_name", "Max Mustermann"),
                ("value_email", "max.mustermann@example.de"),
                ("value_company", "Example GmbH"),
                ("value_message", "Hello World!"),
            ],
        );
        let sut = sut(transient_state);

        // Act
        let result = sut
            .report(
                &context(SubmissionMode::FormPost, key),
                messages(),
                &MAX_RECORD,
            )
            .await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactOutcome::Redirect {
                location: REFERER_WITHOUT_QUERY.into()
            }
        );
    }

    #[tokio::test]
    async fn form_post_storage_error() {
        // Arrange
        let key = TransientStateKey::generate();
        let transient_state = MockTransientStateService::new().with_replace_error(key);
        let sut = sut(transient_state);

        // Act
        let result = sut
            .report(
                &context(SubmissionMode::FormPost, key),
                messages(),
                &MAX_RECORD,
            )
            .await;

        // Assert
        assert_matches!(result, Err(err) if err.to_string().contains("contact form status"));
    }

    #[test]
    fn entries_for_errors() {
        let result = status_entries(&messages(), &MAX_RECORD);

        assert_eq!(
            result,
            state(&[
                ("error_email", "Email cannot be blank"),
                ("error_message", "Message cannot be blank"),
                ("value_name", "Max Mustermann"),
                ("value_email", "max.mustermann@example.de"),
                ("value_company", "Example GmbH"),
                ("value_message", "Hello World!"),
            ])
        );
    }

    #[test]
    fn entries_for_success() {
        let result = status_entries(&ContactErrorMessages::default(), &MAX_RECORD);

        assert_eq!(result, state(&[("success", "1")]));
    }

    #[test]
    fn redirect_locations() {
        for (referer, expected) in [
            (Some(REFERER), REFERER_WITHOUT_QUERY),
            (Some("https://www.example.com/"), "https://www.example.com/"),
            (Some(""), "/"),
            (Some("?page=contact"), "/"),
            (None, "/"),
        ] {
            assert_eq!(redirect_location(referer), expected, "referer: {referer:?}");
        }
    }

    #[tokio::test]
    async fn load_status_errors() {
        // Arrange
        let key = TransientStateKey::generate();
        let transient_state = MockTransientStateService::new().with_take(
            key,
            state(&[
                ("error_email", "Please make sure the email field is in valid format"),
                ("error_generic", SEND_FAILED_MESSAGE),
                ("value_name", "Max Mustermann"),
                ("value_email", "max(at)example.de"),
                ("value_company", ""),
                ("value_message", "Hello World!"),
                ("value_covfefe", "ignored"),
            ]),
        );
        let sut = sut(transient_state);

        // Act
        let result = sut.load_status(&key).await;

        // Assert
        let mut errors = [(
            ContactField::Email,
            "Please make sure the email field is in valid format",
        )]
        .into_iter()
        .collect::<ContactErrorMessages>();
        errors.insert(ContactMessageKey::Generic, SEND_FAILED_MESSAGE);
        assert_eq!(
            result.unwrap(),
            Some(ContactStatus {
                success: false,
                errors,
                values: BTreeMap::from([
                    (ContactField::Name, "Max Mustermann".into()),
                    (ContactField::Email, "max(at)example.de".into()),
                    (ContactField::Company, "".into()),
                    (ContactField::Message, "Hello World!".into()),
                ]),
            })
        );
    }

    #[tokio::test]
    async fn load_status_success() {
        // Arrange
        let key = TransientStateKey::generate();
        let transient_state =
            MockTransientStateService::new().with_take(key, state(&[("success", "1")]));
        let sut = sut(transient_state);

        // Act
        let result = sut.load_status(&key).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            Some(ContactStatus {
                success: true,
                ..Default::default()
            })
        );
    }

    #[tokio::test]
    async fn load_status_empty() {
        // Arrange
        let key = TransientStateKey::generate();
        let transient_state = MockTransientStateService::new().with_take(key, HashMap::new());
        let sut = sut(transient_state);

        // Act
        let result = sut.load_status(&key).await;

        // Assert
        assert_eq!(result.unwrap(), None);
    }
}
