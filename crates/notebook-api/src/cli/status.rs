//! System status dashboard command.

use anyhow::Result;
use console::style;

use notebook_core::chat::repository::ChatRepository;
use notebook_core::repository::notebook::NotebookRepository;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows entity counts, data directory, and version.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let notebooks = state.notebook_service.notebook_repo().count().await?;
    let sessions = state.chat_service.chat_repo().count_sessions().await?;
    let messages = state.chat_service.chat_repo().count_messages().await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "notebooks": notebooks,
            "chat_sessions": sessions,
            "chat_messages": messages,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Open Notebook v{}",
        style("📒").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Contents ──").dim());
    println!("  Notebooks: {}", style(notebooks).bold());
    println!("  Sessions:  {}", style(sessions).bold());
    println!("  Messages:  {}", style(messages).bold());
    println!();

    println!("  {}", style("── Storage ──").dim());
    println!(
        "  Data dir: {}",
        style(state.data_dir.display().to_string()).dim()
    );
    println!();

    Ok(())
}
