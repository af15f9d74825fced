pub const FLASH_CSS: &str = r#"#notifications {
  position: fixed;
  top: 1rem;
  right: 1rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  z-index: 50;
}
.flash {
  min-width: 16rem;
  padding: 0.75rem 1rem;
  border-radius: 0.375rem;
  color: #fff;
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2);
}
.flash-success { background: #2f855a; }
.flash-error { background: #c53030; }
.flash-warning { background: #b7791f; }
.flash-info { background: #2b6cb0; }
.flash a { color: inherit; text-decoration: underline; }
"#;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";
const ALPINE_SRC: &str = "https://unpkg.com/alpinejs@3.14.8/dist/cdn.min.js";

/// Full document for the demo list page. `notifications` is the in-page
/// (non out-of-band) container markup.
pub fn render_index_page(items: &[String], notifications: &str) -> String {
    let list = items
        .iter()
        .enumerate()
        .map(|(index, item)| render_item(index, item))
        .collect::<String>();
    format!(
        r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>oobflash demo</title>
  <link rel="stylesheet" href="/assets/flash.css">
  <script src="{HTMX_SRC}"></script>
  <script defer src="{ALPINE_SRC}"></script>
</head>
<body>
  {notifications}
  <main>
    <h1>Items</h1>
    <form hx-post="/items" hx-target="#items" hx-swap="beforeend">
      <input name="text" placeholder="New item" required>
      <button type="submit">Add</button>
    </form>
    <button hx-post="/items/reload">Add and reload</button>
    <button hx-post="/items/redirect">Redirect home</button>
    <ul id="items">{list}</ul>
  </main>
</body>
</html>
"##
    )
}

pub fn render_item(index: usize, text: &str) -> String {
    format!(r#"<li id="item-{index}">{}</li>"#, escape_text(text))
}

fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
