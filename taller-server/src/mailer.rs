//! Outbound ticket email.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpSettings;

/// Port on which SMTP speaks TLS from the first byte; other ports use STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

pub const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8; method=PUBLISH";

#[derive(Debug, Clone, PartialEq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// A single HTML email, optionally with one attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub to: String,
    pub bcc: Vec<String>,
    pub subject: String,
    pub html: String,
    pub attachment: Option<MailAttachment>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}

/// Sends through an SMTP relay. Built even without credentials so the
/// server can start; sending then fails with "SMTP configuration missing".
pub struct SmtpMailer {
    inner: Option<(AsyncSmtpTransport<Tokio1Executor>, Mailbox)>,
}

impl SmtpMailer {
    pub fn new(settings: Option<SmtpSettings>) -> Result<Self> {
        let Some(settings) = settings else {
            tracing::warn!("SMTP_HOST, SMTP_USER or SMTP_PASS not set, tickets cannot be emailed");
            return Ok(SmtpMailer { inner: None });
        };

        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .with_context(|| format!("Invalid SMTP host: {}", settings.host))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.user, settings.pass))
            .build();

        let from: Mailbox = settings
            .from
            .parse()
            .with_context(|| format!("Invalid sender address: {}", settings.from))?;

        tracing::info!(host = %settings.host, port = settings.port, "SMTP configured");
        Ok(SmtpMailer {
            inner: Some((transport, from)),
        })
    }
}

/// Build the MIME message for `mail`.
pub fn build_message(from: Mailbox, mail: OutgoingMail) -> Result<Message> {
    let to: Mailbox = mail
        .to
        .parse()
        .with_context(|| format!("Invalid recipient address: {}", mail.to))?;

    let mut builder = Message::builder().from(from).to(to).subject(mail.subject);
    for bcc in &mail.bcc {
        let bcc: Mailbox = bcc
            .parse()
            .with_context(|| format!("Invalid BCC address: {bcc}"))?;
        builder = builder.bcc(bcc);
    }

    let html = SinglePart::html(mail.html);
    let message = match mail.attachment {
        Some(att) => {
            let content_type = ContentType::parse(&att.content_type)
                .with_context(|| format!("Invalid content type: {}", att.content_type))?;
            let attachment = Attachment::new(att.filename).body(att.content, content_type);
            builder.multipart(MultiPart::mixed().singlepart(html).singlepart(attachment))?
        }
        None => builder.singlepart(html)?,
    };

    Ok(message)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        let Some((transport, from)) = &self.inner else {
            anyhow::bail!("SMTP configuration missing");
        };

        let to = mail.to.clone();
        let message = build_message(from.clone(), mail)?;
        transport.send(message).await.context("SMTP send failed")?;

        tracing::info!(to = %to, "ticket email sent");
        Ok(())
    }
}
