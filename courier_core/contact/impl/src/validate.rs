use std::sync::LazyLock;

use courier_models::contact::{
    ContactField, ContactFieldError, ContactFieldErrors, ContactRecord, ContactSubmission,
};
use email_address::EmailAddress;
use regex::Regex;

/// Comments and anything that looks like an opening or closing tag. A `>`
/// inside a quoted attribute value does not end the tag. An unterminated tag
/// or comment swallows the rest of the input, a lone `<` followed by
/// whitespace is kept.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<!--.*?(?:-->|\z)|<(?:[^\s<>][^>"']*(?:(?:"[^"]*(?:"|\z)|'[^']*(?:'|\z))[^>"']*)*)?(?:>|\z)"#,
    )
    .unwrap()
});

/// Characters that survive email sanitization besides ASCII letters and digits.
const EMAIL_SPECIAL_CHARS: &str = "!#$%&'*+-=?^_`{|}~@.[]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedSubmission {
    pub data: ContactRecord,
    pub errors: ContactFieldErrors,
    /// The honeypot field was filled in.
    pub automated: bool,
}

pub(crate) fn validate(submission: &ContactSubmission) -> ValidatedSubmission {
    let (name, name_error) = check_text(submission, ContactField::Name);
    let (email, email_error) = check_email(submission);
    let (company, company_error) = check_text(submission, ContactField::Company);
    let (message, message_error) = check_text(submission, ContactField::Message);

    let errors = [
        (ContactField::Name, name_error),
        (ContactField::Email, email_error),
        (ContactField::Company, company_error),
        (ContactField::Message, message_error),
    ]
    .into_iter()
    .filter_map(|(field, error)| error.map(|error| (field, error)))
    .collect();

    ValidatedSubmission {
        data: ContactRecord {
            name,
            email,
            company,
            message,
        },
        errors,
        automated: is_honeypot_filled(submission),
    }
}

/// Trims the raw value and removes markup. Required fields which end up
/// empty are blank.
fn check_text(
    submission: &ContactSubmission,
    field: ContactField,
) -> (String, Option<ContactFieldError>) {
    let raw = submission.get(field).unwrap_or_default();
    let value = strip_tags(raw.trim()).trim().to_owned();

    let error = (field.is_required() && value.is_empty()).then_some(ContactFieldError::Blank);

    (value, error)
}

/// Like [`check_text`], but a non-blank value is additionally sanitized and
/// must be a well-formed address.
fn check_email(submission: &ContactSubmission) -> (String, Option<ContactFieldError>) {
    let (value, error) = check_text(submission, ContactField::Email);
    if error.is_some() {
        return (value, error);
    }

    let email = sanitize_email(&value);
    let error = (!is_valid_email(&email)).then_some(ContactFieldError::Invalid);

    (email, error)
}

fn strip_tags(input: &str) -> String {
    TAG_REGEX.replace_all(input, "").into_owned()
}

fn sanitize_email(input: &str) -> String {
    input
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || EMAIL_SPECIAL_CHARS.contains(c))
        .collect()
}

/// A well-formed address whose domain is either an address literal or a
/// dotted host name.
fn is_valid_email(email: &str) -> bool {
    let Ok(address) = email.parse::<EmailAddress>() else {
        return false;
    };
    let domain = address.domain();
    domain.starts_with('[') || domain.contains('.')
}

fn is_honeypot_filled(submission: &ContactSubmission) -> bool {
    submission
        .honeypot
        .as_deref()
        .is_some_and(|value| !value.is_empty())
}
