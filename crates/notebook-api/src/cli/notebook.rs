//! Notebook lifecycle CLI commands: create, list, show, delete.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use notebook_core::chat::repository::ChatRepository;
use notebook_core::repository::notebook::NotebookFilter;
use notebook_types::notebook::{CreateNotebookRequest, NotebookId};

use crate::state::AppState;

/// Create a new notebook via interactive wizard or one-shot flags.
///
/// # Examples
///
/// ```bash
/// # Interactive wizard
/// onb create notebook
///
/// # One-shot with flags
/// onb create notebook --name "Thesis" --description "Sources for chapter 3"
/// ```
pub async fn create_notebook(
    state: &AppState,
    name: Option<String>,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => {
            // Interactive wizard
            Input::<String>::new()
                .with_prompt("Notebook name")
                .interact_text()?
        }
    };

    let description = match description {
        Some(d) => d,
        None => Input::<String>::new()
            .with_prompt("Short description")
            .allow_empty(true)
            .interact_text()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Creating notebook...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let request = CreateNotebookRequest {
        name,
        description: Some(description),
    };

    let notebook = state.notebook_service.create_notebook(request).await?;

    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&notebook)?);
        return Ok(());
    }

    println!();
    println!("  {} Notebook created!", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Name:").bold(), style(&notebook.name).cyan());
    if !notebook.description.is_empty() {
        println!("  {}  {}", style("About:").bold(), &notebook.description);
    }
    println!(
        "  {}    {}",
        style("ID:").bold(),
        style(notebook.id.to_string()).dim()
    );
    println!();

    Ok(())
}

/// List notebooks in a rich colored table.
pub async fn list_notebooks(state: &AppState, all: bool, json: bool) -> Result<()> {
    let filter = Some(NotebookFilter {
        archived: if all { None } else { Some(false) },
        ..Default::default()
    });

    let notebooks = state.notebook_service.list_notebooks(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notebooks)?);
        return Ok(());
    }

    if notebooks.is_empty() {
        println!();
        println!(
            "  {} No notebooks found. Create one with: {}",
            style("i").blue().bold(),
            style("onb create notebook").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("State").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for notebook in &notebooks {
        let state_cell = if notebook.archived {
            Cell::new("◌ archived").fg(Color::DarkGrey)
        } else {
            Cell::new("● active").fg(Color::Green)
        };

        let desc = if notebook.description.len() > 50 {
            format!("{}...", &notebook.description[..47])
        } else {
            notebook.description.clone()
        };

        table.add_row(vec![
            Cell::new(&notebook.name).fg(Color::Cyan),
            Cell::new(desc),
            state_cell,
            Cell::new(format_relative_time(&notebook.updated_at)).fg(Color::DarkGrey),
            Cell::new(notebook.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} notebook{}",
        style(notebooks.len()).bold(),
        if notebooks.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show full details for a notebook, including its chat sessions.
pub async fn show_notebook(state: &AppState, id: &str, json: bool) -> Result<()> {
    let id: NotebookId = id.parse().map_err(|_| anyhow::anyhow!("invalid notebook id: {id}"))?;
    let notebook = state.notebook_service.get_notebook(&id).await?;
    let sessions = state
        .chat_service
        .chat_repo()
        .list_sessions(&id.0, None, None)
        .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "notebook": notebook,
                "chat_sessions": sessions,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("  📒 {}", style(&notebook.name).cyan().bold());
    if !notebook.description.is_empty() {
        println!("  {}", style(&notebook.description).dim());
    }
    println!();

    println!("  {}", style("── Details ──").dim());
    println!(
        "  {}   {}",
        style("State:").bold(),
        if notebook.archived {
            style("archived").dim().to_string()
        } else {
            style("active").green().to_string()
        }
    );
    println!(
        "  {}      {}",
        style("ID:").bold(),
        style(notebook.id.to_string()).dim()
    );
    println!();

    println!("  {}", style("── Timestamps ──").dim());
    println!(
        "  {} {}",
        style("Created:").bold(),
        notebook.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "  {} {}",
        style("Updated:").bold(),
        notebook.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    println!("  {}", style("── Chat Sessions ──").dim());
    if sessions.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for session in &sessions {
        println!(
            "  {} {}  {}",
            style("•").dim(),
            session.title.as_deref().unwrap_or("Untitled Chat"),
            style(format_relative_time(&session.updated_at)).dim()
        );
    }
    println!();

    Ok(())
}

/// Delete a notebook permanently with confirmation.
pub async fn delete_notebook(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let id: NotebookId = id.parse().map_err(|_| anyhow::anyhow!("invalid notebook id: {id}"))?;
    let notebook = state.notebook_service.get_notebook(&id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete notebook '{}' and all its chat sessions?",
                style(&notebook.name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.notebook_service.delete_notebook(&id).await?;

    if json {
        println!("{}", serde_json::json!({"deleted": true, "id": id.to_string()}));
    } else {
        println!(
            "  {} Notebook '{}' deleted.",
            style("✓").red().bold(),
            notebook.name
        );
    }

    Ok(())
}

fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let diff = now - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
