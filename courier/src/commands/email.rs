use anyhow::ensure;
use clap::Subcommand;
use courier_config::Config;
use courier_email_contracts::{Email, EmailService};
use courier_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email).await?;

    let ok = email_service
        .send(Email {
            from: None,
            recipient: recipient.into(),
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
