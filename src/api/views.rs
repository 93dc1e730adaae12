//! Server-rendered HTML.
//!
//! Plain requests get whole documents from [`page`]. Enhanced requests get the
//! smaller pieces ([`task_item`], [`task_list`]) followed by a [`status`]
//! fragment marked for out-of-band swapping into the `#status` region.

use std::fmt::Write;

use axum::http::StatusCode;

use crate::task::Task;

/// Id of the live region every status fragment targets.
pub const STATUS_ID: &str = "status";
/// Id of the task list element.
pub const TASK_LIST_ID: &str = "task-list";

// htmx only swaps 2xx by default; 404 and 422 carry status fragments too.
const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":"[23]..","swap":true},{"code":"404","swap":true,"error":true},{"code":"422","swap":true,"error":true},{"code":"[45]..","swap":false,"error":true}]}"#;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
    Error,
}

impl StatusKind {
    fn class(self) -> &'static str {
        match self {
            StatusKind::Success => "status-success",
            StatusKind::Info => "status-info",
            StatusKind::Error => "status-error",
        }
    }
}

/// A message for the status region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One task row with its toggle and delete controls.
pub fn task_item(task: &Task) -> String {
    let id = task.id;
    let title = escape_html(&task.title);
    let (class, mark, action) = if task.completed {
        ("task completed", "&#9745;", "incomplete")
    } else {
        ("task", "&#9744;", "complete")
    };
    format!(
        r#"<li id="task-{id}" class="{class}">
  <form method="post" action="/tasks/{id}/toggle" hx-post="/tasks/{id}/toggle" hx-target="closest li" hx-swap="outerHTML">
    <button type="submit" class="toggle" aria-pressed="{completed}" aria-label="Mark &quot;{title}&quot; {action}">{mark}</button>
  </form>
  <span class="title">{title}</span>
  <form method="post" action="/tasks/{id}/delete" hx-post="/tasks/{id}/delete" hx-target="closest li" hx-swap="outerHTML">
    <button type="submit" class="delete" aria-label="Delete &quot;{title}&quot;">Delete</button>
  </form>
</li>
"#,
        completed = task.completed,
    )
}

/// The task list element alone.
pub fn task_list(tasks: &[Task]) -> String {
    let mut out = format!(r#"<ul id="{TASK_LIST_ID}" class="tasks">"#);
    for task in tasks {
        out.push_str(&task_item(task));
    }
    out.push_str("</ul>\n");
    out
}

/// The status region. With `oob` set the element carries `hx-swap-oob` so it
/// replaces `#status` wherever the primary content lands.
pub fn status(status: &Status, oob: bool) -> String {
    let oob_attr = if oob { r#" hx-swap-oob="true""# } else { "" };
    format!(
        r#"<div id="{STATUS_ID}" class="status {}" role="status" aria-live="polite"{oob_attr}>{}</div>
"#,
        status.kind.class(),
        escape_html(&status.message),
    )
}

fn empty_status() -> String {
    format!(r#"<div id="{STATUS_ID}" class="status" role="status" aria-live="polite"></div>
"#)
}

/// Full document: status region, add form, search box and the list.
pub fn page(tasks: &[Task], query: &str, current: Option<&Status>) -> String {
    let mut body = String::new();
    body.push_str(&match current {
        Some(s) => status(s, false),
        None => empty_status(),
    });

    let _ = write!(
        body,
        r##"<form class="add" method="post" action="/tasks" hx-post="/tasks" hx-target="#{TASK_LIST_ID}" hx-swap="beforeend" hx-on::after-request="if (event.detail.successful) this.reset()">
  <label for="title">New task</label>
  <input id="title" name="title" type="text" required minlength="3" maxlength="100" autocomplete="off">
  <button type="submit">Add</button>
</form>
<form class="search" method="get" action="/tasks/search" role="search" hx-get="/tasks/search" hx-target="#{TASK_LIST_ID}" hx-swap="outerHTML" hx-trigger="input changed delay:300ms from:find input, submit">
  <label for="q">Search</label>
  <input id="q" name="q" type="search" value="{}" autocomplete="off">
  <button type="submit">Search</button>
</form>
"##,
        escape_html(query),
    );
    body.push_str(&task_list(tasks));

    document("Tasks", &body)
}

/// Small standalone page for errors on the plain path.
pub fn error_page(code: StatusCode, message: &str) -> String {
    let reason = code.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<h2>{} {}</h2>
<p>{}</p>
<p><a href="/tasks">Back to tasks</a></p>
"#,
        code.as_u16(),
        escape_html(reason),
        escape_html(message),
    );
    document(reason, &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="htmx-config" content='{HTMX_CONFIG}'>
<title>{}</title>
<script src="https://unpkg.com/htmx.org@2.0.4" defer></script>
<style>
  body {{ font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }}
  .tasks {{ list-style: none; padding: 0; }}
  .tasks:empty::before {{ content: "No tasks yet."; color: #666; }}
  .task {{ display: flex; gap: .5rem; align-items: center; padding: .25rem 0; }}
  .task form {{ margin: 0; }}
  .task .title {{ flex: 1; }}
  .completed .title {{ text-decoration: line-through; color: #777; }}
  .status-success {{ color: #1a6b2a; }}
  .status-error {{ color: #a4161a; }}
</style>
</head>
<body>
<h1>Tasks</h1>
{body}</body>
</html>
"#,
        escape_html(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn task_item_reflects_completion() {
        let mut task = Task::new("Write report");
        let open = task_item(&task);
        assert!(open.contains(r#"class="task""#));
        assert!(open.contains(r#"aria-pressed="false""#));

        task.completed = true;
        let done = task_item(&task);
        assert!(done.contains(r#"class="task completed""#));
        assert!(done.contains(r#"aria-pressed="true""#));
        assert!(done.contains(&format!("/tasks/{}/toggle", task.id)));
    }

    #[test]
    fn task_item_escapes_title() {
        let task = Task::new("<script>alert(1)</script>");
        let html = task_item(&task);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn status_oob_marker_is_optional() {
        let s = Status::error("Title is required");
        assert!(status(&s, true).contains(r#"hx-swap-oob="true""#));
        assert!(!status(&s, false).contains("hx-swap-oob"));
        assert!(status(&s, false).contains("status-error"));
    }

    #[test]
    fn page_contains_forms_list_and_query() {
        let tasks = vec![Task::new("buy milk")];
        let html = page(&tasks, "mi\"lk", None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"action="/tasks""#));
        assert!(html.contains(r#"action="/tasks/search""#));
        assert!(html.contains(r#"id="task-list""#));
        assert!(html.contains("buy milk"));
        assert!(html.contains(r#"value="mi&quot;lk""#));
    }

    #[test]
    fn error_page_names_status() {
        let html = error_page(StatusCode::NOT_FOUND, "Task abc not found");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("Task abc not found"));
    }
}
