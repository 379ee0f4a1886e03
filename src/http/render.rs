//! HTML rendering of the shell page.
//!
//! The page carries only what the client-side comparison view needs to boot:
//! the title, the task id, the view name and the backend base URL.

use crate::routing::{NavigationError, Resolution};
use crate::shell::{Theme, DEFAULT_TITLE};

/// Page for a resolved navigation.
pub fn shell_page(resolution: &Resolution, theme: &Theme, api_base_url: &str) -> String {
    let target = &resolution.target;
    let title = target.title.as_deref().unwrap_or(DEFAULT_TITLE);

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"zh-CN\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{title}</title>\n",
            "<style>:root {{ {css} }}</style>\n",
            "</head>\n",
            "<body>\n",
            "<div id=\"app\" data-route=\"{route}\" data-view=\"{view}\" data-task-id=\"{task_id}\" data-api-base=\"{api}\" data-theme=\"{theme}\"></div>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = escape_html(title),
        css = escape_html(&theme.css_variables()),
        route = escape_html(&target.route),
        view = escape_html(target.view.name()),
        task_id = escape_html(&target.task_id),
        api = escape_html(api_base_url),
        theme = escape_html(&theme.name),
    )
}

/// Explicit page for a navigation that could not be resolved.
pub fn error_page(err: &NavigationError) -> String {
    let heading = match err {
        NavigationError::NotFound { .. } => "Page not found",
        NavigationError::RedirectCycle { .. } => "Redirect loop",
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{DEFAULT_TITLE}</title>\n</head>\n<body>\n<h1>{}</h1>\n<p>{}</p>\n</body>\n</html>\n",
        heading,
        escape_html(&err.to_string()),
    )
}

/// Escape text for HTML bodies and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
