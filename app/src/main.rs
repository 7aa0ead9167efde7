use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_app::ui::{self, Command};
use todo_app::{AppConfig, HttpTodoApi, TodoApp};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    info!(api_url = %config.api_url, user_id = config.user_id, "starting");
    let api = HttpTodoApi::new(&config.api_url, config.user_id);
    let app = TodoApp::new(api, config.user_id, config.error_timeout());

    // Redraw on every change, including the error banner expiring on its own.
    let mut changes = app.subscribe();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let screen = ui::render(&changes.borrow_and_update());
            print!("{screen}");
        }
    });

    app.load().await;

    // Rollback title for the item being edited, kept by the front end.
    let mut editing: Option<(i64, String)> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        match command {
            Command::Add(title) => {
                app.set_draft(&title);
                app.add(&title).await;
            }
            Command::Toggle(id) => app.toggle(id).await,
            Command::ToggleAll => app.toggle_all().await,
            Command::Remove(id) => app.delete(id).await,
            Command::ClearCompleted => app.clear_completed().await,
            Command::Edit(id) => {
                if let Some((previous, rollback)) = editing.take() {
                    app.cancel_edit(previous, &rollback);
                }
                match app.begin_edit(id) {
                    Some(rollback) => editing = Some((id, rollback)),
                    None => eprintln!("no todo with id {id}"),
                }
            }
            Command::Title(text) => match &editing {
                Some((id, _)) => app.change_title(*id, &text),
                None => eprintln!("not editing; use `edit <id>` first"),
            },
            Command::Save => match editing.take() {
                Some((id, rollback)) => {
                    app.commit_edit(id).await;
                    // Still editing means the save failed; keep the rollback.
                    let still_editing = app
                        .snapshot()
                        .todos
                        .iter()
                        .flatten()
                        .any(|t| t.id == id && t.is_editing);
                    if still_editing {
                        editing = Some((id, rollback));
                    }
                }
                None => eprintln!("not editing"),
            },
            Command::Cancel => match editing.take() {
                Some((id, rollback)) => app.cancel_edit(id, &rollback),
                None => eprintln!("not editing"),
            },
            Command::Filter(filter) => app.set_filter(filter),
            Command::Dismiss => app.dismiss_error(),
            Command::List => print!("{}", ui::render(&app.snapshot())),
            Command::Help => println!("{}", ui::HELP),
            Command::Quit => break,
        }
    }
    Ok(())
}
