use std::fmt::Write as _;
use std::time::Duration;

use uuid::Uuid;

use oobflash_core::{
    Category, FlashConfig, FlashError, FragmentRenderer, Notification, Result, SwapStrategy,
};

use crate::markdown::render_inline_markdown;

/// Renders notifications as htmx markup with Alpine.js self-dismiss bindings.
///
/// Each element starts visible, hides itself `dismiss_after` after it is
/// attached (full page render and out-of-band merge alike), fades out over
/// `transition`, then removes itself from the page.
#[derive(Debug, Clone)]
pub struct HtmlFragmentRenderer {
    container_id: String,
    swap: SwapStrategy,
    dismiss_after: Duration,
    transition: Duration,
}

impl HtmlFragmentRenderer {
    pub fn from_config(config: &FlashConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            container_id: config.container_id.clone(),
            swap: config.swap,
            dismiss_after: config.dismiss_after,
            transition: config.transition,
        })
    }

    fn render_item(&self, out: &mut String, notification: &Notification) -> std::fmt::Result {
        let dismiss_ms = self.dismiss_after.as_millis();
        let transition_ms = self.transition.as_millis();
        write!(
            out,
            concat!(
                r#"<div id="flash-{id}" class="flash flash-{category}" role="{role}" "#,
                r#"x-data="{{ visible: true }}" "#,
                r#"x-init="setTimeout(() => {{ visible = false; setTimeout(() => $el.remove(), {transition_ms}) }}, {dismiss_ms})" "#,
                r#"x-show="visible" x-transition:leave.duration.{transition_ms}ms>"#,
                "{text}</div>",
            ),
            id = Uuid::new_v4().simple(),
            category = notification.category,
            role = if notification.category == Category::Error {
                "alert"
            } else {
                "status"
            },
            transition_ms = transition_ms,
            dismiss_ms = dismiss_ms,
            text = render_inline_markdown(&notification.text),
        )
    }
}

impl FragmentRenderer for HtmlFragmentRenderer {
    fn render(&self, notifications: &[Notification], out_of_band: bool) -> Result<String> {
        let mut out = String::new();
        let opened = if out_of_band {
            write!(
                out,
                r#"<div id="{}" hx-swap-oob="{}">"#,
                self.container_id,
                self.swap.as_attr()
            )
        } else {
            write!(out, r#"<div id="{}" aria-live="polite">"#, self.container_id)
        };
        opened.map_err(render_error)?;
        for notification in notifications {
            self.render_item(&mut out, notification).map_err(render_error)?;
        }
        out.push_str("</div>");
        Ok(out)
    }
}

fn render_error(err: std::fmt::Error) -> FlashError {
    FlashError::Render(err.to_string())
}
