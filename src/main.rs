use clap::{Args, Parser};
use miette::{IntoDiagnostic, Result};
use photomailer::application::pipeline::SubmissionPipeline;
use photomailer::config::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_PHOTOS, DEFAULT_PORT, PipelineConfig, ServerConfig,
};
use photomailer::domain::ports::MessageTransportBox;
use photomailer::infrastructure::gmail::{
    DEFAULT_API_BASE, DEFAULT_TOKEN_URL, GmailConfig, GmailTransport,
};
use photomailer::infrastructure::log::LogTransport;
use photomailer::interfaces::http;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Accepts passphrase-protected photo submissions and mails their captions.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Shared secret every submission must carry
    #[arg(long, env = "PASSPHRASE", hide_env_values = true)]
    passphrase: String,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Largest photo count a submission may declare
    #[arg(long, env = "MAX_PHOTOS", default_value_t = DEFAULT_MAX_PHOTOS)]
    max_photos: usize,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Log composed messages instead of sending them through Gmail
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    gmail: GmailArgs,
}

#[derive(Args)]
struct GmailArgs {
    /// OAuth2 client id
    #[arg(long, env = "CLIENT_ID")]
    client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// OAuth2 access token (refreshed at startup)
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// OAuth2 refresh token
    #[arg(long, env = "REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    /// Recipient address
    #[arg(long, env = "EMAIL_TO")]
    email_to: Option<String>,

    /// Sender address
    #[arg(long, env = "EMAIL_FROM")]
    email_from: Option<String>,

    /// Reply-To address, defaults to the sender
    #[arg(long, env = "REPLY_TO")]
    reply_to: Option<String>,

    /// Message subject
    #[arg(long, env = "SUBJECT", default_value = "")]
    subject: String,

    #[arg(long, env = "GMAIL_TOKEN_URL", default_value = DEFAULT_TOKEN_URL, hide = true)]
    token_url: String,

    #[arg(long, env = "GMAIL_API_BASE", default_value = DEFAULT_API_BASE, hide = true)]
    api_base: String,
}

impl GmailArgs {
    fn into_config(self) -> Result<GmailConfig> {
        Ok(GmailConfig {
            client_id: require(self.client_id, "--client-id", "CLIENT_ID")?,
            client_secret: require(self.client_secret, "--client-secret", "CLIENT_SECRET")?,
            access_token: self.access_token.unwrap_or_default(),
            refresh_token: require(self.refresh_token, "--refresh-token", "REFRESH_TOKEN")?,
            email_to: require(self.email_to, "--email-to", "EMAIL_TO")?,
            email_from: require(self.email_from, "--email-from", "EMAIL_FROM")?,
            reply_to: self.reply_to.unwrap_or_default(),
            subject: self.subject,
            token_url: self.token_url,
            api_base: self.api_base,
        })
    }
}

fn require(value: Option<String>, flag: &str, env: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            miette::miette!("missing Gmail setting: pass {flag} or set {env} (or use --dry-run)")
        })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let pipeline_config = PipelineConfig::new(cli.passphrase)
        .into_diagnostic()?
        .with_max_photos(cli.max_photos);

    let transport: MessageTransportBox = if cli.dry_run {
        warn!("dry run: composed messages are logged, not sent");
        Box::new(LogTransport)
    } else {
        let transport = GmailTransport::new(cli.gmail.into_config()?).into_diagnostic()?;
        transport.authenticate().await.into_diagnostic()?;
        info!("authenticated with Gmail");
        Box::new(transport)
    };

    let server = ServerConfig {
        bind: cli.bind,
        port: cli.port,
        max_body_bytes: cli.max_body_bytes,
    };
    let pipeline = Arc::new(SubmissionPipeline::new(pipeline_config, transport));

    http::serve(&server, pipeline).await.into_diagnostic()?;

    Ok(())
}
