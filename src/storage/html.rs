//! HTML rendering helpers shared by stored forms and pages

use crate::index::FieldSet;
use std::fmt::Write;

/// Escape text for use in HTML content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a stored form: one hidden input per submitted (name, value) pair
pub fn render_form_file(name: &str, fields: &FieldSet) -> String {
    let mut page = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"UTF-8\"><title>{}</title></head><body>\n<form method=\"post\" action=\"/forms\">\n",
        escape(name)
    );

    for (field, values) in fields.iter() {
        for value in values {
            let _ = writeln!(
                page,
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape(field),
                escape(value)
            );
        }
    }

    page.push_str("<button type=\"submit\">Resubmit</button>\n</form>\n</body></html>\n");
    page
}
