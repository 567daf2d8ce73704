use std::{collections::BTreeMap, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Shown to the submitter when the notification email could not be sent.
pub const SEND_FAILED_MESSAGE: &str =
    "There was a problem sending your email. Please try again later.";

/// The visible fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Company,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Company, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Message => "message",
        }
    }

    /// Whether a blank value for this field is rejected.
    pub fn is_required(self) -> bool {
        !matches!(self, Self::Company)
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact form field: {0:?}")]
pub struct UnknownContactFieldError(pub String);

impl FromStr for ContactField {
    type Err = UnknownContactFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownContactFieldError(s.into()))
    }
}

impl Serialize for ContactField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFieldError {
    Blank,
    Invalid,
    Unknown,
}

/// The rejected fields of a submission. Fields without an entry are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFieldErrors(BTreeMap<ContactField, ContactFieldError>);

impl ContactFieldErrors {
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, ContactFieldError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ContactField, ContactFieldError)> for ContactFieldErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, ContactFieldError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Key of a user facing error message: either a form field or the `generic`
/// slot used for delivery failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactMessageKey {
    Field(ContactField),
    Generic,
}

impl ContactMessageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field(field) => field.as_str(),
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for ContactMessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContactField> for ContactMessageKey {
    fn from(value: ContactField) -> Self {
        Self::Field(value)
    }
}

impl FromStr for ContactMessageKey {
    type Err = UnknownContactFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(Self::Generic),
            _ => s.parse().map(Self::Field),
        }
    }
}

impl Serialize for ContactMessageKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Human readable error messages, keyed by field.
///
/// A submission with at least one message must never be emailed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactErrorMessages(BTreeMap<ContactMessageKey, String>);

impl ContactErrorMessages {
    pub fn get(&self, key: impl Into<ContactMessageKey>) -> Option<&str> {
        self.0.get(&key.into()).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<ContactMessageKey>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactMessageKey, &str)> + '_ {
        self.0.iter().map(|(&key, message)| (key, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<ContactMessageKey>, V: Into<String>> FromIterator<(K, V)> for ContactErrorMessages {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, message)| (key.into(), message.into()))
                .collect(),
        )
    }
}

/// The raw values of a contact form submission.
///
/// `None` means the field was not part of the request at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    /// Value of the decoy field that is hidden from human visitors.
    pub honeypot: Option<String>,
}

impl ContactSubmission {
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => self.name.as_deref(),
            ContactField::Email => self.email.as_deref(),
            ContactField::Company => self.company.as_deref(),
            ContactField::Message => self.message.as_deref(),
        }
    }
}

/// The sanitized values of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactRecord {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Company => &self.company,
            ContactField::Message => &self.message,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> + '_ {
        ContactField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
    }
}

/// How the submitter expects to receive the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionMode {
    /// Script driven submission which reads the result from the response.
    Interactive,
    /// Plain form submission which is redirected back to the form page.
    FormPost,
}

/// Result of a form post submission, kept for the next page render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactStatus {
    pub success: bool,
    pub errors: ContactErrorMessages,
    pub values: BTreeMap<ContactField, String>,
}
