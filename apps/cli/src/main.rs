use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{load_settings, CompletionDisposition};
use shared::AbsentFieldPolicy;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Ask the proposal service for a TODO title and memo")]
struct Args {
    /// Consultation text. Prompted for on stdin when omitted.
    text: Option<String>,
    #[arg(long)]
    server_url: Option<String>,
    /// Start from an existing title; kept if the proposal has none.
    #[arg(long)]
    title: Option<String>,
    /// Start from an existing memo; kept if the proposal has none.
    #[arg(long)]
    memo: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if args.title.is_some() || args.memo.is_some() {
        settings.absent_fields = AbsentFieldPolicy::Preserve;
    }
    if let Some(log_filter) = args.log_filter {
        settings.log_filter = log_filter;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let text = match args.text {
        Some(text) => text,
        None => prompt("consultation> ").await?,
    };
    if text.trim().is_empty() {
        bail!("input is empty; describe what you want to do");
    }

    let bootstrap = client_core::initialize(settings)?;
    let mut editor = bootstrap.editor;
    if let Some(title) = args.title {
        editor.form.set_title(title);
    }
    if let Some(memo) = args.memo {
        editor.form.set_memo(memo);
    }
    editor.consultation.open();
    editor.consultation.update_draft(text);

    match editor.consult(bootstrap.client.as_ref()).await {
        Some(CompletionDisposition::Applied) => {}
        Some(_) => {
            let error = editor.consultation.snapshot().error.unwrap_or_default();
            bail!("proposal failed: {error}");
        }
        None => bail!("consultation was not submitted"),
    }

    println!("{}", serde_json::to_string_pretty(&editor.form_state())?);
    Ok(())
}

async fn prompt(label: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read consultation text")?;
    Ok(line.trim().to_string())
}
