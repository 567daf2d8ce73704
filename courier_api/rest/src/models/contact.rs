use std::collections::{BTreeMap, HashMap};

use courier_models::contact::{
    ContactErrorMessages, ContactField, ContactStatus, ContactSubmission,
};
use serde::Serialize;

/// Form field whose presence marks a script driven submission.
pub const INTERACTIVE_FIELD: &str = "is_ajax";

/// The urlencoded contact form. The honeypot field name is configurable, so
/// the form is taken apart by hand.
#[derive(Debug, Clone, Default)]
pub struct ApiContactForm(pub HashMap<String, String>);

impl ApiContactForm {
    pub fn is_interactive(&self) -> bool {
        self.0.contains_key(INTERACTIVE_FIELD)
    }

    pub fn into_submission(mut self, honeypot_field: &str) -> ContactSubmission {
        let mut take = |field: ContactField| self.0.remove(field.as_str());
        let (name, email, company, message) = (
            take(ContactField::Name),
            take(ContactField::Email),
            take(ContactField::Company),
            take(ContactField::Message),
        );

        ContactSubmission {
            name,
            email,
            company,
            message,
            honeypot: self.0.remove(honeypot_field),
        }
    }
}

/// Result of the last form post submission of a client.
#[derive(Debug, Serialize)]
pub struct ApiContactStatus {
    pub success: bool,
    /// Error messages keyed by field, `generic` for delivery failures
    pub errors: ContactErrorMessages,
    /// Submitted values, to prefill the form
    pub values: BTreeMap<ContactField, String>,
}

impl From<ContactStatus> for ApiContactStatus {
    fn from(value: ContactStatus) -> Self {
        Self {
            success: value.success,
            errors: value.errors,
            values: value.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn form(entries: &[(&str, &str)]) -> ApiContactForm {
        ApiContactForm(
            entries
                .iter()
                .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }

    #[test]
    fn into_submission() {
        let form = form(&[
            ("name", "Max"),
            ("email", "max@example.de"),
            ("message", "Hi"),
            ("website", "spam"),
            ("unrelated", "x"),
        ]);

        assert!(!form.is_interactive());
        assert_eq!(
            form.into_submission("website"),
            ContactSubmission {
                name: Some("Max".into()),
                email: Some("max@example.de".into()),
                company: None,
                message: Some("Hi".into()),
                honeypot: Some("spam".into()),
            }
        );
    }

    #[test]
    fn interactive() {
        assert!(form(&[("is_ajax", "")]).is_interactive());
    }
}
