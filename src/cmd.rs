//! Command implementations for the CLI interface.
//!
//! `serve` runs the web application; the remaining subcommands work on the
//! same CSV task file directly, which is handy for scripting and for checking
//! on the board without a browser.

use anyhow::{anyhow, bail};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::api::{create_router, AppState};
use crate::db::TaskStore;
use crate::server::{Server, ServerConfig};
use crate::task::{validate_title, Task, TaskId};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server.
    Serve {
        /// Interface to bind.
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on.
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },

    /// List tasks, optionally filtered by a search query.
    List {
        /// Case-insensitive substring to match against titles.
        #[arg(long, short)]
        query: Option<String>,
        /// Include completed tasks.
        #[arg(long)]
        all: bool,
    },

    /// Add a new task.
    Add {
        /// Task title (3 to 100 characters).
        title: String,
    },

    /// Toggle a task between open and done.
    Toggle {
        /// Task ID, unique ID prefix, or title.
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task ID, unique ID prefix, or title.
        id: String,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Start the HTTP server on a multi-threaded runtime.
pub fn cmd_serve(store: TaskStore, config: ServerConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    tracing::info!(db = %store.path().display(), tasks = store.len(), "starting task board");
    let router = create_router(AppState::new(store));
    runtime.block_on(Server::new(config).run(router))
}

/// Print tasks as a table. Completed tasks are hidden unless `all` is set.
pub fn cmd_list(store: &TaskStore, query: Option<String>, all: bool) {
    let tasks: Vec<Task> = store
        .search(query.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|t| all || !t.completed)
        .collect();

    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    print!("{}", format_table(&tasks));
}

/// Validate and add a task.
pub fn cmd_add(store: &TaskStore, title: String) -> anyhow::Result<()> {
    let title = validate_title(&title)?;
    let task = Task::new(title);
    let id = task.id;
    store.add(task)?;
    println!("Added task {id}");
    Ok(())
}

/// Flip a task between open and done.
pub fn cmd_toggle(store: &TaskStore, id: String) -> anyhow::Result<()> {
    let task_id = resolve_task_identifier(&id, store).map_err(|e| anyhow!(e))?;
    let Some(task) = store.toggle_complete(task_id)? else {
        bail!("Task {task_id} not found.");
    };
    if task.completed {
        println!("Marked done: {}", task.title);
    } else {
        println!("Reopened: {}", task.title);
    }
    Ok(())
}

/// Delete a task permanently.
pub fn cmd_delete(store: &TaskStore, id: String) -> anyhow::Result<()> {
    let task_id = resolve_task_identifier(&id, store).map_err(|e| anyhow!(e))?;
    if !store.delete(task_id)? {
        bail!("Task {task_id} not found.");
    }
    println!("Deleted.");
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Resolve a task identifier (full ID, unique ID prefix, or title) to a task ID.
/// Returns an error if nothing matches or the match is ambiguous.
pub fn resolve_task_identifier(identifier: &str, store: &TaskStore) -> Result<TaskId, String> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err("Task identifier is empty".to_string());
    }

    if let Ok(id) = identifier.parse::<TaskId>() {
        return match store.get_by_id(id) {
            Some(_) => Ok(id),
            None => Err(format!("Task with ID {id} not found")),
        };
    }

    let tasks = store.get_all();
    let prefix = identifier.to_lowercase();
    let by_prefix: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.id.to_string().starts_with(&prefix))
        .collect();
    let matches = if by_prefix.is_empty() {
        tasks
            .iter()
            .filter(|t| t.title.to_lowercase() == prefix)
            .collect()
    } else {
        by_prefix
    };

    match matches.as_slice() {
        [] => Err(format!("No task found with ID prefix or name '{identifier}'")),
        [task] => Ok(task.id),
        _ => {
            let mut error_msg = format!("Multiple tasks match '{identifier}':\n");
            for task in &matches {
                error_msg.push_str(&format!("  {}: {}\n", task.id, task.title));
            }
            error_msg.push_str("Please use the full ID instead.");
            Err(error_msg)
        }
    }
}

/// Render tasks as a fixed-width table.
pub fn format_table(tasks: &[Task]) -> String {
    let mut out = format!("{:<9} {:<4} {:<10} {}\n", "ID", "Done", "Created", "Title");
    for t in tasks {
        let created = t
            .created_at
            .map(|c| c.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "{:<9} {:<4} {:<10} {}\n",
            t.id.short(),
            if t.completed { "x" } else { "" },
            created,
            truncate(&t.title, 60)
        ));
    }
    out
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(titles: &[&str]) -> (TempDir, TaskStore, Vec<Task>) {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::open(dir.path().join("tasks.csv")).unwrap();
        let mut tasks = Vec::new();
        for title in titles {
            let task = Task::new(*title);
            store.add(task.clone()).unwrap();
            tasks.push(task);
        }
        (dir, store, tasks)
    }

    #[test]
    fn resolves_full_id() {
        let (_dir, store, tasks) = store_with(&["Write report"]);
        let id = resolve_task_identifier(&tasks[0].id.to_string(), &store).unwrap();
        assert_eq!(id, tasks[0].id);
    }

    #[test]
    fn unknown_full_id_is_an_error() {
        let (_dir, store, _) = store_with(&["Write report"]);
        let err = resolve_task_identifier(&TaskId::generate().to_string(), &store).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn resolves_unique_prefix() {
        let (_dir, store, tasks) = store_with(&["Write report", "Buy milk"]);
        let id = resolve_task_identifier(&tasks[1].id.to_string()[..8], &store).unwrap();
        assert_eq!(id, tasks[1].id);
    }

    #[test]
    fn resolves_title_case_insensitively() {
        let (_dir, store, tasks) = store_with(&["Write report", "Buy milk"]);
        let id = resolve_task_identifier("buy MILK", &store).unwrap();
        assert_eq!(id, tasks[1].id);
    }

    #[test]
    fn duplicate_titles_are_ambiguous() {
        let (_dir, store, _) = store_with(&["Buy milk", "buy milk"]);
        let err = resolve_task_identifier("Buy milk", &store).unwrap_err();
        assert!(err.starts_with("Multiple tasks match"));
    }

    #[test]
    fn missing_identifier_is_an_error() {
        let (_dir, store, _) = store_with(&["Write report"]);
        assert!(resolve_task_identifier("zzz-nothing", &store).is_err());
        assert!(resolve_task_identifier("   ", &store).is_err());
    }

    #[test]
    fn add_toggle_delete_round_trip() {
        let (_dir, store, _) = store_with(&[]);
        cmd_add(&store, "  Write report ".to_string()).unwrap();
        assert_eq!(store.get_all()[0].title, "Write report");

        cmd_toggle(&store, "write report".to_string()).unwrap();
        assert!(store.get_all()[0].completed);

        cmd_delete(&store, "Write report".to_string()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_invalid_title() {
        let (_dir, store, _) = store_with(&[]);
        assert!(cmd_add(&store, "ab".to_string()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn table_lists_short_ids_and_marks_done() {
        let (_dir, _store, mut tasks) = store_with(&["Write report"]);
        tasks[0].completed = true;
        let table = format_table(&tasks);
        assert!(table.starts_with("ID"));
        assert!(table.contains(&tasks[0].id.short()));
        assert!(table.contains(" x "));
        assert!(table.contains("Write report"));
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
