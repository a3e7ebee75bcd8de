//! HTML pages served by the dashboard
//!
//! Every interpolated value goes through [`escape`].

use crate::storage::html::escape;

/// Values rendered into the main app page
#[derive(Debug, Default)]
pub struct AppPage<'a> {
    pub username: &'a str,
    pub salt_b64: &'a str,
    pub enc_ctx_b64: &'a str,
    pub bypass: bool,
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"UTF-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn error_line(error: &str) -> String {
    if error.is_empty() {
        String::new()
    } else {
        format!("<p class=\"error\">{}</p>\n", escape(error))
    }
}

pub fn login_page(error: &str, redirect: &str) -> String {
    let body = format!(
        r#"<h1>Log in</h1>
{}<form method="post" action="/login">
<input type="hidden" name="redirect" value="{}">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>
<p><a href="/register">Create an account</a> or <a href="/app?bypass=1">continue as guest</a></p>"#,
        error_line(error),
        escape(redirect)
    );
    layout("Log in", &body)
}

pub fn register_page(error: &str) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{}<form method="post" action="/register">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Register</button>
</form>
<p><a href="/login">Back to login</a></p>"#,
        error_line(error)
    );
    layout("Register", &body)
}

/// Main UI shell; the client decrypts the context with a key derived from the salt
pub fn app_page(page: &AppPage<'_>) -> String {
    let greeting = if page.username.is_empty() {
        "Guest".to_string()
    } else {
        escape(page.username)
    };

    let body = format!(
        r#"<div id="app" data-username="{}" data-salt="{}" data-enc-ctx="{}" data-bypass="{}">
<header>Signed in as <strong>{}</strong> · <a href="/logout">Log out</a></header>
<section id="templates" data-manifest="/templates/manifest.json"></section>
<section id="forms"><a href="/forms">Stored forms</a></section>
<form id="import" method="post" action="/import" enctype="multipart/form-data">
<input type="file" name="formfile" accept=".html">
<button type="submit">Import template</button>
</form>
</div>"#,
        escape(page.username),
        escape(page.salt_b64),
        escape(page.enc_ctx_b64),
        page.bypass,
        greeting
    );
    layout("Dashboard", &body)
}

/// Stored forms matching the current query, plus a key/value submit form
pub fn forms_page(names: &[String]) -> String {
    let listing = if names.is_empty() {
        "<p>No stored form matches the current query.</p>".to_string()
    } else {
        let items: String = names
            .iter()
            .map(|name| {
                let name = escape(name);
                format!("<li><a href=\"/forms/{0}\">{0}</a></li>\n", name)
            })
            .collect();
        format!("<ul>\n{}</ul>", items)
    };

    let body = format!(
        r#"<h1>Forms matching the supplied query parameters</h1>
{}
<hr>
<h2>Submit a new form</h2>
<form method="post" action="/forms">
<label>Key: <input name="key" required></label><br>
<label>Value: <input name="value" required></label><br>
<button type="submit">Save form</button>
</form>"#,
        listing
    );
    layout("Matching Forms", &body)
}

pub fn stored_page(name: &str) -> String {
    let name = escape(name);
    let body = format!(
        "<p>Form saved as <a href=\"/forms/{0}\">{0}</a>. <a href=\"/forms\">Back</a></p>",
        name
    );
    layout("Form saved", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_escapes_redirect() {
        let page = login_page("Invalid credentials", "a=1&b=\"x\"");
        assert!(page.contains("Invalid credentials"));
        assert!(page.contains(r#"value="a=1&amp;b=&#34;x&#34;""#));
    }

    #[test]
    fn test_app_page_guest() {
        let page = app_page(&AppPage {
            bypass: true,
            ..Default::default()
        });
        assert!(page.contains("Guest"));
        assert!(page.contains(r#"data-bypass="true""#));
    }

    #[test]
    fn test_forms_page() {
        let empty = forms_page(&[]);
        assert!(empty.contains("No stored form matches"));

        let page = forms_page(&["form_1_1".to_string()]);
        assert!(page.contains(r#"<a href="/forms/form_1_1">form_1_1</a>"#));
    }
}
