use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailboxlayer::{SyntaxMode, Validator, ValidatorConfig};

#[derive(Parser)]
#[command(name = "mailboxlayer-cli", version)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// clé d'accès mailboxlayer
    #[arg(long, env = "MAILBOXLAYER_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// désactive le contrôle SMTP côté API
    #[arg(long)]
    pub no_smtp: bool,

    /// demande la détection catch-all (plans payants)
    #[arg(long)]
    pub catch_all: bool,

    /// JSON indenté côté API
    #[arg(long)]
    pub pretty: bool,

    /// envoie la requête même si la syntaxe locale est invalide
    #[arg(long)]
    pub bypass_local_check: bool,

    /// accepte les adresses internationalisées (UTF-8 / IDN)
    #[arg(long)]
    pub unicode: bool,

    /// endpoint alternatif (ex: https://apilayer.net/api/check)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// timeout HTTP (ms), 0 = aucun
    #[arg(long = "timeout", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// write report to file (JSON/NDJSON/CSV selon --format)
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// interroge l'API pour chaque adresse
    Validate { emails: Vec<String> },
    /// contrôle de syntaxe local uniquement (pas de clé requise)
    #[command(name = "check-syntax")]
    CheckSyntax { emails: Vec<String> },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn syntax_mode(&self) -> SyntaxMode {
        if self.unicode {
            SyntaxMode::Unicode
        } else {
            SyntaxMode::Ascii
        }
    }

    pub fn config(&self) -> Result<ValidatorConfig> {
        let mut config = ValidatorConfig::new()
            .with_timeout_ms(self.timeout_ms)
            .with_syntax_mode(self.syntax_mode());
        if let Some(endpoint) = self.endpoint.as_deref() {
            config = config
                .with_endpoint_str(endpoint)
                .with_context(|| format!("invalid --endpoint '{endpoint}'"))?;
        }
        Ok(config)
    }

    pub fn validator(&self) -> Result<Validator> {
        let access_key = self
            .access_key
            .as_deref()
            .context("missing --access-key (or MAILBOXLAYER_ACCESS_KEY)")?;
        let validator = Validator::builder(access_key)
            .smtp_check(!self.no_smtp)
            .pretty_format(self.pretty)
            .catch_all_check(self.catch_all)
            .config(self.config()?)
            .build()
            .context("build HTTP client")?;
        Ok(validator)
    }
}
