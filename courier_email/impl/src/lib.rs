use anyhow::{anyhow, Context};
use courier_email_contracts::{Email, EmailService};
use courier_models::email_address::{EmailAddress, NamedAddress};
use courier_utils::trace_instrument;
use lettre::{
    message::{header, Mailbox},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub async fn new(url: &str, from: EmailAddress) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }

    #[cfg(feature = "dummy")]
    pub async fn dummy() -> Self {
        Self::new("smtp://dummy", "dummy@example.com".parse().unwrap())
            .await
            .unwrap()
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let service = Mailbox::new(None, self.from.0.clone());

        let builder = match email.from {
            // The submitter appears as author, we remain the sender.
            Some(from) => Message::builder().from(mailbox(&from)?).sender(service),
            None => Message::builder().from(service),
        };

        builder
            .to(mailbox(&email.recipient)?)
            .subject(email.subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(email.body)
            .context("Failed to build email message")
    }
}

impl EmailService for EmailServiceImpl {
    #[trace_instrument(skip(self, email), fields(recipient = %email.recipient.address))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn mailbox(address: &NamedAddress) -> anyhow::Result<Mailbox> {
    let email = address
        .address
        .parse()
        .with_context(|| format!("Invalid email address {:?}", address.address))?;
    let name = (!address.name.is_empty()).then(|| address.name.clone());
    Ok(Mailbox::new(name, email))
}
