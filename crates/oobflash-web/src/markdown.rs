use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// Renders notification text as inline markdown.
///
/// Block wrappers are dropped so the result sits inside the notification
/// element; raw HTML is rendered as text and unsafe link targets are replaced.
pub fn render_inline_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options).filter_map(|event| match event {
        Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph) => None,
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Some(Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_link_destination(dest_url),
            title,
            id,
        })),
        Event::Html(raw) | Event::InlineHtml(raw) => {
            Some(Event::Text(CowStr::from(raw.into_string())))
        }
        Event::SoftBreak | Event::HardBreak => Some(Event::Text(CowStr::from(" "))),
        other => Some(other),
    });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output.trim().to_string()
}

fn sanitize_link_destination(dest_url: CowStr<'_>) -> CowStr<'static> {
    let value = dest_url.into_string();
    if is_safe_destination(&value) {
        CowStr::from(value)
    } else {
        CowStr::from("#")
    }
}

fn is_safe_destination(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return true;
    }
    if lower.starts_with("//") {
        return false;
    }
    if lower.starts_with('#') || lower.starts_with('/') || lower.starts_with("./") {
        return true;
    }
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:")
    {
        return true;
    }
    !lower.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_renders_without_paragraph_wrapper() {
        assert_eq!(render_inline_markdown("Item added"), "Item added");
    }

    #[test]
    fn emphasis_and_links_are_kept() {
        let html = render_inline_markdown("Saved **draft** to [inbox](/inbox)");
        assert_eq!(
            html,
            r#"Saved <strong>draft</strong> to <a href="/inbox">inbox</a>"#
        );
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_inline_markdown("<script>alert(1)</script> done");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn javascript_links_are_neutralized() {
        let html = render_inline_markdown("[click](javascript:alert(1))");
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn protocol_relative_links_are_neutralized() {
        let html = render_inline_markdown("[x](//evil.example/path)");
        assert!(html.contains(r##"href="#""##));
    }
}
