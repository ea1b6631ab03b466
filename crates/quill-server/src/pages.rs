//! Server-rendered HTML pages.
//!
//! All pages are assembled as strings around a shared shell, with no template
//! engine, no JS framework. The shell renders the sign-in state in the
//! header and the one-shot flash banners above the content.
//!
//! User-supplied text (filenames, usernames, document content in the edit
//! textarea) is HTML-escaped. Rendered markdown output is embedded
//! unescaped by design: only signed-in users can author documents.

use axum::response::Html;

use crate::session::Flash;

/// Render the page shell around a content fragment.
#[must_use]
pub fn page(username: Option<&str>, flash: &Flash, content: &str) -> Html<String> {
    let mut html = String::with_capacity(4096);
    html.push_str(PAGE_CSS);
    html.push_str("<body>\n<header class=\"topbar\"><a class=\"brand\" href=\"/\">Quill</a><nav>");

    match username {
        Some(user) => {
            html.push_str("<span class=\"whoami\">Signed in as ");
            html.push_str(&escape_html(user));
            html.push_str("</span><form class=\"inline\" method=\"post\" action=\"/users/logout\"><button type=\"submit\">Sign out</button></form>");
        }
        None => {
            html.push_str("<a href=\"/users/login\">Sign in</a> <a href=\"/users/new\">Register</a>");
        }
    }

    html.push_str("</nav></header>\n<main>\n");

    if let Some(error) = &flash.error {
        html.push_str("<p class=\"flash error\">");
        html.push_str(&escape_html(error));
        html.push_str("</p>\n");
    }
    if let Some(success) = &flash.success {
        html.push_str("<p class=\"flash success\">");
        html.push_str(&escape_html(success));
        html.push_str("</p>\n");
    }

    html.push_str(content);
    html.push_str("\n</main>\n</body>\n</html>");
    Html(html)
}

/// The document listing.
#[must_use]
pub fn listing(files: &[String], signed_in: bool) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<ul class=\"files\">\n");

    for name in files {
        let escaped = escape_html(name);
        html.push_str("<li><a href=\"/");
        html.push_str(&escaped);
        html.push_str("\">");
        html.push_str(&escaped);
        html.push_str("</a>");

        if signed_in {
            html.push_str(" <a class=\"action\" href=\"/");
            html.push_str(&escaped);
            html.push_str("/edit\">edit</a>");
            html.push_str("<form class=\"inline\" method=\"post\" action=\"/");
            html.push_str(&escaped);
            html.push_str("/duplicate\"><button type=\"submit\">duplicate</button></form>");
            html.push_str("<form class=\"inline\" method=\"post\" action=\"/");
            html.push_str(&escaped);
            html.push_str("/delete\"><button type=\"submit\">delete</button></form>");
        }

        html.push_str("</li>\n");
    }

    html.push_str("</ul>\n<p><a href=\"/new\">New Document</a></p>");
    html
}

/// The new-document form. `filename` re-fills the input on a 422 re-render.
#[must_use]
pub fn new_document_form(filename: &str) -> String {
    format!(
        concat!(
            "<form method=\"post\" action=\"/new\">\n",
            "<label for=\"filename\">Add a new document: </label>\n",
            "<input id=\"filename\" name=\"filename\" value=\"{value}\" autofocus/>\n",
            "<button type=\"submit\">Create</button>\n",
            "</form>"
        ),
        value = escape_html(filename),
    )
}

/// The edit form for an existing document.
#[must_use]
pub fn edit_form(name: &str, content: &str) -> String {
    let escaped_name = escape_html(name);
    format!(
        concat!(
            "<h2>Edit content of {name}:</h2>\n",
            "<form method=\"post\" action=\"/{name}\">\n",
            "<textarea name=\"content\" rows=\"20\" cols=\"80\">{content}</textarea>\n",
            "<button type=\"submit\">Save Changes</button>\n",
            "</form>"
        ),
        name = escaped_name,
        content = escape_html(content),
    )
}

/// A rendered markdown document.
#[must_use]
pub fn document(html_fragment: &str) -> String {
    format!("<article class=\"document\">\n{html_fragment}\n</article>")
}

/// The registration form. `username` re-fills the input on a 422 re-render.
#[must_use]
pub fn register_form(username: &str) -> String {
    credentials_form("Register", "/users/new", username)
}

/// The sign-in form. `username` re-fills the input on a 422 re-render.
#[must_use]
pub fn login_form(username: &str) -> String {
    credentials_form("Sign in", "/users/login", username)
}

fn credentials_form(title: &str, action: &str, username: &str) -> String {
    format!(
        concat!(
            "<h2>{title}</h2>\n",
            "<form method=\"post\" action=\"{action}\">\n",
            "<label for=\"username\">Username: </label>\n",
            "<input id=\"username\" name=\"username\" value=\"{value}\" autofocus/>\n",
            "<label for=\"password\">Password: </label>\n",
            "<input id=\"password\" name=\"password\" type=\"password\"/>\n",
            "<button type=\"submit\">{title}</button>\n",
            "</form>"
        ),
        title = title,
        action = action,
        value = escape_html(username),
    )
}

/// Escape text for safe embedding in HTML body or attribute positions.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Document head and CSS for every page.
const PAGE_CSS: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/><title>Quill</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{--bg:#FBF7EF;--text:#2B2419;--muted:#8A7B63;--primary:#8C6A2F;--border:#E4DAC6;
--error-bg:#FBEAE7;--error-text:#A33A2A;--success-bg:#EDF5E7;--success-text:#3E6B2C}
body{font-family:Georgia,'Times New Roman',serif;background:var(--bg);color:var(--text);line-height:1.6;max-width:760px;margin:0 auto;padding:0 24px}
.topbar{display:flex;align-items:center;justify-content:space-between;padding:20px 0;border-bottom:1px solid var(--border);margin-bottom:24px}
.brand{font-size:22px;font-weight:700;color:var(--primary);text-decoration:none}
nav{display:flex;align-items:center;gap:12px;font-size:14px}
nav a{color:var(--muted);text-decoration:none}
nav a:hover{color:var(--primary)}
.whoami{color:var(--muted)}
.flash{padding:10px 14px;border-radius:6px;margin-bottom:16px;font-size:14px}
.flash.error{background:var(--error-bg);color:var(--error-text)}
.flash.success{background:var(--success-bg);color:var(--success-text)}
.files{list-style:none}
.files li{display:flex;align-items:center;gap:10px;padding:8px 0;border-bottom:1px solid var(--border)}
.files a{color:var(--text);text-decoration:none}
.files a:hover{color:var(--primary)}
.files .action{font-size:13px;color:var(--muted)}
.inline{display:inline}
.inline button{background:none;border:none;color:var(--muted);font-size:13px;cursor:pointer;padding:0;font-family:inherit}
.inline button:hover{color:var(--primary)}
form{margin:12px 0}
label{display:block;margin:10px 0 4px;font-size:14px}
input,textarea{width:100%;padding:8px 10px;border:1px solid var(--border);border-radius:6px;font-size:14px;font-family:inherit;background:#fff}
textarea{font-family:Menlo,Consolas,monospace;font-size:13px}
button[type=submit]{margin-top:10px;padding:8px 18px;border:none;border-radius:6px;background:var(--primary);color:#fff;font-size:14px;cursor:pointer}
.document pre{background:#F2ECDE;padding:12px;border-radius:6px;overflow-x:auto;font-size:13px}
.document code{font-family:Menlo,Consolas,monospace}
.document h1,.document h2,.document h3{margin:18px 0 8px}
</style></head>
"##;
