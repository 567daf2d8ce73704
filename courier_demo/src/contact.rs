use std::sync::LazyLock;

use courier_models::contact::{ContactRecord, ContactSubmission};

pub const CONTACT_ADDRESS: &str = "contact@example.com";
pub const CONTACT_NAME: &str = "Example Support";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const SITE_URL: &str = "https://www.example.com/";
pub const SITE_HOST: &str = "www.example.com";
pub const REFERER: &str = "https://www.example.com/contact?utm_source=newsletter";
pub const REFERER_WITHOUT_QUERY: &str = "https://www.example.com/contact";

pub static MAX: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: Some("Max Mustermann".into()),
    email: Some("max.mustermann@example.de".into()),
    company: Some("Example GmbH".into()),
    message: Some("Hello World!".into()),
    honeypot: None,
});

pub static MAX_RECORD: LazyLock<ContactRecord> = LazyLock::new(|| ContactRecord {
    name: "Max Mustermann".into(),
    email: "max.mustermann@example.de".into(),
    company: "Example GmbH".into(),
    message: "Hello World!".into(),
});
