//! HTML templates for the capsule page
//!
//! Simple inline HTML templates without a template engine.

use timecapsule::{
    ViewModel,
    controller::{LockedView, OpenView},
};

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 720px;
        margin: 40px auto;
        padding: 0 20px;
        background: #f5f5f5;
    }
    .container {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
        color: #333;
        border-bottom: 2px solid #0066cc;
        padding-bottom: 10px;
    }
    h2 {
        color: #555;
        margin-top: 30px;
    }
    .info-row {
        margin: 10px 0;
        padding: 8px;
        background: #f9f9f9;
        border-radius: 4px;
    }
    .form-group {
        margin: 15px 0;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 5px;
        color: #333;
    }
    input[type="text"],
    textarea {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    textarea {
        resize: vertical;
        min-height: 120px;
    }
    button {
        background: #0066cc;
        color: white;
        padding: 10px 20px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
    }
    button:hover {
        background: #0052a3;
    }
    .notice {
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
    .notice-success {
        color: #2d6a31;
        background: #dff0d8;
    }
    .notice-warning {
        color: #8a6d3b;
        background: #fcf8e3;
    }
    .notice-error {
        color: #d9534f;
        background: #f2dede;
    }
    .message {
        margin: 20px 0;
        padding-bottom: 15px;
        border-bottom: 1px solid #ddd;
    }
    .message-body {
        white-space: pre-wrap;
        background: #eef5fc;
        padding: 12px;
        border-radius: 4px;
    }
    .caption {
        color: #666;
        font-size: 0.85em;
    }
"#;

/// Severity of a notice shown above the page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Warning => "notice notice-warning",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

/// A one-off message for the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Form values to put back into the form after a failed submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub message: String,
}

/// Render the capsule page for either gate state
pub fn capsule_page(view: &ViewModel, notice: Option<&Notice>, draft: Option<&Draft>) -> String {
    let notice_html = notice.map_or(String::new(), |n| {
        format!(
            r#"<div class="{}">{}</div>"#,
            n.kind.css_class(),
            html_escape(&n.text)
        )
    });

    let content = match view {
        ViewModel::Locked(locked) => locked_content(locked, draft),
        ViewModel::Open(open) => open_content(open),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Time Capsule</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
        <h1>🕰️ The Five-Person Time Capsule</h1>
        {notice_html}
        {content}
    </div>
</body>
</html>"#
    )
}

fn locked_content(view: &LockedView, draft: Option<&Draft>) -> String {
    let participants: String = view
        .authors
        .iter()
        .map(|author| {
            format!(
                r#"<div class="info-row">👤 {} sealed a message. (contents hidden)</div>"#,
                html_escape(author)
            )
        })
        .collect();

    let form_html = if view.can_submit {
        let draft = draft.cloned().unwrap_or_default();
        format!(
            r#"<h2>📝 Leave a message in the capsule</h2>
        <form method="POST" action="/submit">
            <div class="form-group">
                <label for="name">Nickname:</label>
                <input type="text" id="name" name="name" value="{}" required autofocus>
            </div>
            <div class="form-group">
                <label for="message">A message for our future selves (private):</label>
                <textarea id="message" name="message" required>{}</textarea>
            </div>
            <button type="submit">Seal it in</button>
        </form>"#,
            html_escape(&draft.name),
            html_escape(&draft.message)
        )
    } else {
        format!(
            r#"<div class="notice notice-success">🎉 All {} messages are in! Now we just wait for the reveal.</div>"#,
            view.capacity
        )
    };

    format!(
        r#"<div class="notice notice-warning">🔒 The capsule is sealed.<br>Opens at: <strong>{}</strong></div>
        <h2>Participants so far ({}/{})</h2>
        {participants}
        {form_html}"#,
        html_escape(&view.target_display),
        view.participant_count,
        view.capacity
    )
}

fn open_content(view: &OpenView) -> String {
    let messages_html = if view.messages.is_empty() {
        r#"<p style="color: #666; font-style: italic;">Nobody left a message this time.</p>"#
            .to_string()
    } else {
        view.messages
            .iter()
            .map(|msg| {
                format!(
                    r#"<div class="message">
            <strong>To everyone (from {})</strong>
            <div class="message-body">{}</div>
            <div class="caption">Written: {}</div>
        </div>"#,
                    html_escape(&msg.author),
                    html_escape(&msg.body),
                    html_escape(&msg.submitted_at_display())
                )
            })
            .collect()
    };

    format!(
        r#"<div class="notice notice-success">🔓 The capsule is open! (as of {})</div>
        <h2>💌 Messages</h2>
        {messages_html}"#,
        html_escape(&view.target_display)
    )
}

/// Render a page for failures the visitor cannot fix
pub fn error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Time Capsule - Error</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
        <h1>Time Capsule</h1>
        <div class="notice notice-error">{}</div>
    </div>
</body>
</html>"#,
        html_escape(message)
    )
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
