use std::future::Future;

use courier_models::{
    contact::{ContactErrorMessages, ContactStatus, ContactSubmission, SubmissionMode},
    transient_state::TransientStateKey,
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates a contact form submission, notifies the site owner if it is
    /// valid and decides how the result is reported back to the submitter.
    ///
    /// The notification email is sent at most once per call and never if any
    /// field was rejected.
    fn submit(
        &self,
        context: ContactRequestContext,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactOutcome, ContactSubmitError>> + Send;

    /// Returns and forgets the result of the client's last form post
    /// submission.
    fn take_status(
        &self,
        state_key: TransientStateKey,
    ) -> impl Future<Output = anyhow::Result<Option<ContactStatus>>> + Send;
}

/// Everything about the current request the contact feature needs besides
/// the submitted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequestContext {
    pub mode: SubmissionMode,
    /// Where the result of a form post submission is kept.
    pub state_key: TransientStateKey,
    /// The page the form was submitted from.
    pub referer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Interactive submission that was accepted.
    Success,
    /// Interactive submission that was rejected.
    Errors(ContactErrorMessages),
    /// Form post submission. The result has been stored and the client should
    /// be sent back to `location`.
    Redirect { location: String },
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        context: ContactRequestContext,
        submission: ContactSubmission,
        result: ContactOutcome,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(context),
                mockall::predicate::eq(submission),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_take_status(
        mut self,
        state_key: TransientStateKey,
        result: Option<ContactStatus>,
    ) -> Self {
        self.expect_take_status()
            .once()
            .with(mockall::predicate::eq(state_key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
