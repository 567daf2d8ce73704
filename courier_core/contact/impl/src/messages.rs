use courier_models::contact::{
    ContactErrorMessages, ContactField, ContactFieldError, ContactFieldErrors,
};

/// Turns the rejected fields into the messages shown next to the form.
pub(crate) fn build_messages(errors: &ContactFieldErrors) -> ContactErrorMessages {
    errors
        .iter()
        .map(|(field, error)| (field, message(field, error)))
        .collect()
}

fn message(field: ContactField, error: ContactFieldError) -> String {
    match error {
        ContactFieldError::Blank => format!("{} cannot be blank", capitalize(field.as_str())),
        ContactFieldError::Invalid => {
            format!("Please make sure the {field} field is in valid format")
        }
        ContactFieldError::Unknown => format!("The {field} input is incorrect."),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn messages() {
        let errors: ContactFieldErrors = [
            (ContactField::Name, ContactFieldError::Blank),
            (ContactField::Email, ContactFieldError::Invalid),
            (ContactField::Message, ContactFieldError::Unknown),
        ]
        .into_iter()
        .collect();

        let result = build_messages(&errors);

        assert_eq!(result.len(), 3);
        assert_eq!(result.get(ContactField::Name), Some("Name cannot be blank"));
        assert_eq!(
            result.get(ContactField::Email),
            Some("Please make sure the email field is in valid format")
        );
        assert_eq!(
            result.get(ContactField::Message),
            Some("The message input is incorrect.")
        );
    }

    #[test]
    fn blank_messages() {
        let errors: ContactFieldErrors = ContactField::ALL
            .into_iter()
            .map(|field| (field, ContactFieldError::Blank))
            .collect();

        let result = build_messages(&errors);

        assert_eq!(
            result.iter().map(|(_, message)| message).collect::<Vec<_>>(),
            [
                "Name cannot be blank",
                "Email cannot be blank",
                "Company cannot be blank",
                "Message cannot be blank",
            ]
        );
    }

    #[test]
    fn no_errors() {
        assert!(build_messages(&ContactFieldErrors::default()).is_empty());
    }

    #[test]
    fn deterministic() {
        let errors: ContactFieldErrors = [
            (ContactField::Email, ContactFieldError::Blank),
            (ContactField::Message, ContactFieldError::Blank),
        ]
        .into_iter()
        .collect();

        assert_eq!(build_messages(&errors), build_messages(&errors));
    }
}
