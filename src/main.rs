//! GuIA Carreiras - terminal chat client
//!
//! Talks to the GuIA career-guidance backend, walks the user through the
//! conversation and fetches the generated profile report at the end.

mod config;
mod runtime;
mod state_machine;
mod transport;
mod ui;

use config::ClientConfig;
use runtime::ConversationRuntime;
use state_machine::ConvContext;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transport::{HttpTransport, LoggingTransport};
use ui::{ExitReason, TerminalNavigator, TerminalView};

const LOG_FILE_NAME: &str = "guia-chat.log";
const EVENT_CHANNEL_CAPACITY: usize = 32;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;

    // The terminal belongs to the UI, so logs go to a file
    let _log_guard = init_logging(&config.log_dir)?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = ?config.request_timeout.map(|t| t.as_secs()),
        "Starting GuIA chat client"
    );

    let http = Arc::new(HttpTransport::new(&config.base_url, config.request_timeout)?);
    let transport = LoggingTransport::new(http.clone());

    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();

    let runtime = ConversationRuntime::new(
        ConvContext::new(config.report_url()),
        transport,
        TerminalView::new(ui_tx.clone()),
        TerminalNavigator::new(ui_tx),
        event_rx,
        event_tx.clone(),
    );
    let runtime_task = tokio::spawn(runtime.run());

    let exit = tokio::task::spawn_blocking(move || ui::run_terminal(ui_rx, event_tx)).await??;
    runtime_task.abort();

    match exit {
        ExitReason::Quit => tracing::info!("User quit"),
        ExitReason::Navigate(url) => match fetch_report(&http, &url, &config.report_path).await {
            Ok(()) => println!("Relatório salvo em {}", config.report_path.display()),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Report retrieval failed");
                eprintln!("Não foi possível obter o relatório: {e}");
                eprintln!("Acesse {url}");
            }
        },
    }

    Ok(())
}

fn init_logging(log_dir: &Path) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, LOG_FILE_NAME));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guia_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(writer),
        )
        .init();

    Ok(guard)
}

/// Download the report with the chat session's cookies and save it
async fn fetch_report(
    http: &HttpTransport,
    url: &str,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = http.fetch_document(url).await?;
    save_report(path, &document)?;
    tracing::info!(path = %path.display(), bytes = document.len(), "Report saved");
    Ok(())
}

fn save_report(path: &Path, document: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, document)
}
