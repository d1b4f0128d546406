//! Tool-specific fragment builders.
//!
//! Each renderer takes the raw tool input mapping plus the invocation id and
//! returns an HTML fragment. Missing required fields yield an empty string
//! rather than an error; a degraded tool call must never abort a render pass.

use serde_json::Value;

use crate::render::html::{escape_html, format_json};

/// Todo status markers, one per state: completed, in progress, pending.
const MARKER_COMPLETED: &str = "[x]";
const MARKER_IN_PROGRESS: &str = "[~]";
const MARKER_PENDING: &str = "[ ]";

/// Fetch a string field from a tool input mapping.
fn str_field<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    input.get(key).and_then(Value::as_str)
}

/// Fetch a string field, treating empty as absent.
fn non_empty_field<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    str_field(input, key).filter(|s| !s.is_empty())
}

/// Opening tag for a tool container, carrying an anchor when the id is known.
fn open_tool_div(class: &str, tool_use_id: &str) -> String {
    if tool_use_id.is_empty() {
        format!("<div class=\"tool-call {class}\">")
    } else {
        format!(
            "<div class=\"tool-call {class}\" id=\"tu-{}\">",
            escape_html(tool_use_id)
        )
    }
}

/// Render a `TodoWrite` invocation as an ordered checklist.
///
/// Empty or absent `todos` renders nothing. In-progress items prefer their
/// `activeForm` phrasing when one is present.
pub fn render_todo_write(tool_input: &Value, tool_use_id: &str) -> String {
    let todos = match tool_input.get("todos").and_then(Value::as_array) {
        Some(todos) if !todos.is_empty() => todos,
        _ => return String::new(),
    };

    let mut items = String::new();
    for todo in todos {
        let Some(content) = non_empty_field(todo, "content") else {
            continue;
        };
        let status = str_field(todo, "status").unwrap_or("pending");
        let (class, marker) = match status {
            "completed" => ("todo-completed", MARKER_COMPLETED),
            "in_progress" => ("todo-in-progress", MARKER_IN_PROGRESS),
            _ => ("todo-pending", MARKER_PENDING),
        };
        let label = if status == "in_progress" {
            non_empty_field(todo, "activeForm").unwrap_or(content)
        } else {
            content
        };
        items.push_str(&format!(
            "<li class=\"{class}\"><span class=\"todo-marker\">{marker}</span> {}</li>\n",
            escape_html(label)
        ));
    }
    if items.is_empty() {
        return String::new();
    }

    let mut out = open_tool_div("tool-todo", tool_use_id);
    out.push_str("<div class=\"tool-header\">Todo list</div>\n<ol class=\"todo-list\">\n");
    out.push_str(&items);
    out.push_str("</ol></div>\n");
    out
}

/// Render a `Write` invocation: the target path plus the full file content.
pub fn render_write_tool(tool_input: &Value, tool_use_id: &str) -> String {
    let Some(file_path) = non_empty_field(tool_input, "file_path") else {
        return String::new();
    };
    let Some(content) = str_field(tool_input, "content") else {
        return String::new();
    };

    let mut out = open_tool_div("tool-write", tool_use_id);
    out.push_str(&format!(
        "<div class=\"tool-header\">Write <code>{}</code></div>\n",
        escape_html(file_path)
    ));
    out.push_str(&format!(
        "<pre class=\"file-content\"><code>{}</code></pre></div>\n",
        escape_html(content)
    ));
    out
}

/// Render an `Edit` invocation as a removed/added pair labeled with the path.
pub fn render_edit_tool(tool_input: &Value, tool_use_id: &str) -> String {
    let Some(file_path) = non_empty_field(tool_input, "file_path") else {
        return String::new();
    };
    let (Some(old_string), Some(new_string)) = (
        str_field(tool_input, "old_string"),
        str_field(tool_input, "new_string"),
    ) else {
        return String::new();
    };
    let replace_all = tool_input
        .get("replace_all")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut out = open_tool_div("tool-edit", tool_use_id);
    out.push_str(&format!(
        "<div class=\"tool-header\">Edit <code>{}</code>",
        escape_html(file_path)
    ));
    if replace_all {
        out.push_str(" <span class=\"replace-all-flag\">all occurrences</span>");
    }
    out.push_str("</div>\n");
    out.push_str(&format!(
        "<div class=\"edit-old\"><pre><code>{}</code></pre></div>\n",
        escape_html(old_string)
    ));
    out.push_str(&format!(
        "<div class=\"edit-new\"><pre><code>{}</code></pre></div></div>\n",
        escape_html(new_string)
    ));
    out
}

/// Render a `Bash` invocation: optional description caption plus the command.
pub fn render_bash_tool(tool_input: &Value, tool_use_id: &str) -> String {
    let Some(command) = non_empty_field(tool_input, "command") else {
        return String::new();
    };

    let mut out = open_tool_div("tool-bash", tool_use_id);
    out.push_str("<div class=\"tool-header\">Bash</div>\n");
    if let Some(description) = non_empty_field(tool_input, "description") {
        out.push_str(&format!(
            "<div class=\"tool-caption\">{}</div>\n",
            escape_html(description)
        ));
    }
    out.push_str(&format!(
        "<pre class=\"command\"><code>{}</code></pre></div>\n",
        escape_html(command)
    ));
    out
}

/// Fallback for tools with no specialized renderer.
///
/// Shows the tool name as the label and the raw input mapping as formatted
/// JSON. This is what Read, Grep, custom MCP tools and anything added to the
/// toolset later get.
pub fn render_generic_tool(name: &str, tool_input: &Value, tool_use_id: &str) -> String {
    let mut out = open_tool_div("tool-generic", tool_use_id);
    out.push_str(&format!(
        "<div class=\"tool-header\">{}</div>\n",
        escape_html(name)
    ));
    out.push_str(&format!(
        "<pre class=\"tool-input\"><code>{}</code></pre></div>\n",
        escape_html(&format_json(tool_input))
    ));
    out
}

// ===== Tests =====
