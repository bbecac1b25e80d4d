//! HTML rendering for the category admin pages.

use edit_workflow::ReadyState;

use crate::category::CategoryRow;
use crate::config::AdminSettings;

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
            background-color: #f5f5f5;
            margin: 0;
        }
        .container {
            max-width: 36rem;
            margin: 3rem auto;
        }
        .card {
            background: white;
            padding: 1.5rem;
            border-radius: 4px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        label { display: block; font-weight: 500; margin-bottom: 0.25rem; }
        input, textarea { width: 100%; box-sizing: border-box; padding: 0.5rem 0.75rem; margin-bottom: 1rem; }
        input[readonly] { background-color: #f3f4f6; }
        .error { color: #dc2626; margin-bottom: 1rem; }
        .button {
            padding: 0.5rem 1rem;
            background-color: #2563eb;
            color: white;
            border: none;
            border-radius: 4px;
        }
        .button:disabled { opacity: 0.6; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #e5e7eb; }
"#;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
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

// Mirrors `edit_workflow::derive_slug` so the read-only slug follows the title.
const SLUG_PREVIEW_SCRIPT: &str = r#"
        (function () {
            function deriveSlug(title) {
                var slug = '';
                var gap = false;
                for (var ch of title.toLowerCase().trim()) {
                    if (/\s/.test(ch)) {
                        gap = true;
                    } else if (/[a-z0-9_]/.test(ch)) {
                        if (gap) { slug += '_'; gap = false; }
                        slug += ch;
                    }
                }
                return gap ? slug + '_' : slug;
            }
            var title = document.getElementById('title');
            var slug = document.getElementById('slug');
            title.addEventListener('input', function () {
                slug.value = deriveSlug(title.value);
            });
        })();
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// The page shown in place of the form when the category cannot be loaded.
pub fn render_load_error(message: &str) -> String {
    page(
        "Edit Service Category",
        &format!(r#"        <div class="error">{}</div>"#, escape_html(message)),
    )
}

pub fn render_edit_form(admin: &AdminSettings, route_key: &str, ready: &ReadyState) -> String {
    let draft = ready.draft();
    let error = ready
        .submit_error()
        .map(|message| format!(r#"<div class="error">{}</div>"#, escape_html(message)))
        .unwrap_or_default();
    let disabled = if ready.is_saving() { " disabled" } else { "" };

    let body = format!(
        r#"        <h1>Edit Service Category</h1>
        <form method="post" action="{action}" class="card"
              onsubmit="var b = this.querySelector('button'); b.disabled = true; b.textContent = 'Saving...';">
            <input type="hidden" name="id" value="{id}">
            <label for="title">Title</label>
            <input id="title" name="title" required placeholder="Category Title" value="{title}">
            <label for="slug">Slug</label>
            <input id="slug" name="slug" required placeholder="category_slug" value="{slug}" readonly tabindex="-1">
            <label for="description">Description</label>
            <textarea id="description" name="description" placeholder="Short description">{description}</textarea>
            {error}
            <button type="submit" class="button"{disabled}>{label}</button>
        </form>
        <p><a href="{listing}">Back to categories</a></p>
        <script>{SLUG_PREVIEW_SCRIPT}</script>"#,
        id = escape_html(ready.id().unwrap_or_default()),
        action = escape_html(&admin.edit_path(route_key)),
        title = escape_html(draft.title()),
        slug = escape_html(draft.slug()),
        description = escape_html(draft.description()),
        label = ready.submit_label(),
        listing = escape_html(&admin.listing_path),
    );

    page("Edit Service Category", &body)
}

pub fn render_listing(admin: &AdminSettings, categories: &[CategoryRow]) -> String {
    let rows = if categories.is_empty() {
        r#"            <tr><td colspan="4">No categories yet.</td></tr>"#.to_string()
    } else {
        categories
            .iter()
            .map(|category| {
                format!(
                    r#"            <tr><td>{title}</td><td><code>{slug}</code></td><td>{description}</td><td><a href="{edit}">Edit</a></td></tr>"#,
                    title = escape_html(&category.title),
                    slug = escape_html(&category.slug),
                    description = escape_html(category.description.as_deref().unwrap_or("")),
                    edit = escape_html(&admin.edit_path(&category.slug)),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"        <h1>Service Categories</h1>
        <div class="card">
        <table>
            <thead><tr><th>Title</th><th>Slug</th><th>Description</th><th></th></tr></thead>
            <tbody>
{rows}
            </tbody>
        </table>
        </div>"#
    );

    page("Service Categories", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edit_workflow::{CategoryRecord, EditDraft};

    fn ready() -> ReadyState {
        let record = CategoryRecord {
            id: "42".to_string(),
            slug: "plumbing".to_string(),
            title: "Pipes <&> \"Drains\"".to_string(),
            description: Some("Pipes".to_string()),
        };
        ReadyState::new(Some(record.id.clone()), EditDraft::from_record(&record))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_edit_form_renders_fields_escaped() {
        let html = render_edit_form(&AdminSettings::default(), "plumbing", &ready());
        assert!(html.contains(r#"action="/admin/services/plumbing/edit""#));
        assert!(html.contains("Pipes &lt;&amp;&gt; &quot;Drains&quot;"));
        assert!(html.contains(r#"value="plumbing" readonly"#));
        assert!(html.contains("Save Changes"));
        assert!(!html.contains(r#"class="error""#));
        assert!(html.contains(r#"<input type="hidden" name="id" value="42">"#));
    }

    #[test]
    fn test_edit_form_previews_slug_from_title() {
        let html = render_edit_form(&AdminSettings::default(), "plumbing", &ready());
        assert!(html.contains("function deriveSlug(title)"));
        assert!(html.contains("title.addEventListener('input'"));
    }

    #[test]
    fn test_edit_form_shows_attached_error() {
        let ready = ready().with_submit_error("changed elsewhere");
        let html = render_edit_form(&AdminSettings::default(), "plumbing", &ready);
        assert!(html.contains(r#"<div class="error">changed elsewhere</div>"#));
    }

    #[test]
    fn test_listing_links_to_edit_pages() {
        let rows = vec![CategoryRow {
            id: "42".to_string(),
            slug: "plumbing".to_string(),
            title: "Plumbing".to_string(),
            description: None,
        }];
        let html = render_listing(&AdminSettings::default(), &rows);
        assert!(html.contains(r#"href="/admin/services/plumbing/edit""#));
        assert!(html.contains("<code>plumbing</code>"));
    }

    #[test]
    fn test_listing_empty() {
        let html = render_listing(&AdminSettings::default(), &[]);
        assert!(html.contains("No categories yet."));
    }
}
