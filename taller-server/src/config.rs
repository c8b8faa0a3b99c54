//! Server configuration.
//!
//! Values come from compiled defaults, then an optional TOML file
//! (`taller.toml`, or the path in `TALLER_CONFIG`), then the process
//! environment. Environment names are the upper-case field names, e.g.
//! `PORT`, `SMTP_HOST`, `CORS_ORIGINS`. The workshop descriptor can only
//! be set from the file, under `[workshop]`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

use taller_core::Workshop;
use taller_core::qr::{DEFAULT_QR_BASE_URL, DEFAULT_QR_SIZE};

const DEFAULT_CONFIG_PATH: &str = "taller.toml";
const LIST_KEYS: [&str; 2] = ["cors_origins", "mail_bcc"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Origins allowed by CORS. Requests without an Origin header always pass.
    pub cors_origins: Vec<String>,
    /// Ticket HTML template; `~` is expanded
    pub ticket_path: String,
    /// SQLite URL. Without one, registrations live in memory only.
    pub database_url: Option<String>,

    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    /// Sender address; defaults to `smtp_user`
    pub mail_from: Option<String>,
    pub mail_subject: String,
    pub mail_bcc: Vec<String>,

    pub qr_base_url: String,
    pub qr_size: u32,

    /// Name reported by /health and used for the CSV filename
    pub service_name: String,
    pub workshop: Workshop,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 4000,
            cors_origins: vec!["https://kloudpaper.github.io".to_string()],
            ticket_path: "public/ticket.html".to_string(),
            database_url: None,
            smtp_host: None,
            smtp_port: 465,
            smtp_user: None,
            smtp_pass: None,
            mail_from: None,
            mail_subject: "Tu boleto — Taller de Óleo (Apelles Pro)".to_string(),
            mail_bcc: Vec::new(),
            qr_base_url: DEFAULT_QR_BASE_URL.to_string(),
            qr_size: DEFAULT_QR_SIZE,
            service_name: "apelles-taller".to_string(),
            workshop: Workshop::default(),
        }
    }
}

/// Credentials needed to send mail. Only present when host, user and
/// password are all configured.
#[derive(Debug, Clone, PartialEq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ServerConfig {
    /// Load from `TALLER_CONFIG` (or `taller.toml`) and the environment.
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("TALLER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let builder = config::Config::builder()
            .add_source(File::new(&path, FileFormat::Toml).required(false))
            .add_source(environment());

        Self::from_builder(builder).with_context(|| format!("Failed to load config ({path})"))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let mut cfg: ServerConfig = builder.build()?.try_deserialize()?;

        cfg.cors_origins = clean_list(cfg.cors_origins);
        cfg.mail_bcc = clean_list(cfg.mail_bcc);
        cfg.workshop
            .validate()
            .context("Invalid [workshop] configuration")?;

        Ok(cfg)
    }

    pub fn ticket_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.ticket_path).into_owned())
    }

    pub fn database_url(&self) -> Option<String> {
        present(&self.database_url)
    }

    pub fn smtp(&self) -> Option<SmtpSettings> {
        let host = present(&self.smtp_host)?;
        let user = present(&self.smtp_user)?;
        let pass = present(&self.smtp_pass)?;
        let from = present(&self.mail_from).unwrap_or_else(|| user.clone());

        Some(SmtpSettings {
            host,
            port: self.smtp_port,
            user,
            pass,
            from,
        })
    }
}

fn environment() -> Environment {
    let mut env = Environment::default().try_parsing(true).list_separator(",");
    for key in LIST_KEYS {
        env = env.with_list_parse_key(key);
    }
    env
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
