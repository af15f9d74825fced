use tracing::debug;

use crate::error::Result;
use crate::models::RequestContext;
use crate::policy::{InjectionOutcome, InjectionPolicy};
use crate::render::FragmentRenderer;
use crate::source::NotificationSource;

/// Response body that rendered markup can be appended to.
pub trait MarkupSink {
    fn append_markup(&mut self, markup: &str);
}

impl MarkupSink for String {
    fn append_markup(&mut self, markup: &str) {
        self.push_str(markup);
    }
}

impl MarkupSink for Vec<u8> {
    fn append_markup(&mut self, markup: &str) {
        self.extend_from_slice(markup.as_bytes());
    }
}

/// Result of one augmentation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation {
    pub outcome: InjectionOutcome,
    /// Number of notifications rendered into the body; zero unless injected.
    pub delivered: usize,
}

impl Augmentation {
    #[must_use]
    pub fn is_injected(&self) -> bool {
        self.outcome.is_injected()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseAugmenter {
    policy: InjectionPolicy,
}

impl ResponseAugmenter {
    #[must_use]
    pub fn new(policy: InjectionPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &InjectionPolicy {
        &self.policy
    }

    /// Appends the out-of-band notification fragment to `body` when the policy
    /// allows it.
    ///
    /// The source is only peeked. Rendering completes before the body is
    /// touched, so on error `body` is exactly what the caller passed in.
    /// Call at most once per response.
    pub fn augment<B, S, R>(
        &self,
        body: &mut B,
        ctx: &RequestContext,
        source: &S,
        renderer: &R,
    ) -> Result<Augmentation>
    where
        B: MarkupSink + ?Sized,
        S: NotificationSource + ?Sized,
        R: FragmentRenderer + ?Sized,
    {
        let pending = source.peek();
        let outcome = self.policy.evaluate(ctx, !pending.is_empty());
        if !outcome.is_injected() {
            debug!(outcome = outcome.as_str(), "notification injection skipped");
            return Ok(Augmentation {
                outcome,
                delivered: 0,
            });
        }

        let markup = renderer.render(&pending, true)?;
        body.append_markup(&markup);
        debug!(count = pending.len(), "notification fragment appended");
        Ok(Augmentation {
            outcome,
            delivered: pending.len(),
        })
    }
}

/// [`ResponseAugmenter::augment`] under the default policy.
pub fn augment<B, S, R>(
    body: &mut B,
    ctx: &RequestContext,
    source: &S,
    renderer: &R,
) -> Result<Augmentation>
where
    B: MarkupSink + ?Sized,
    S: NotificationSource + ?Sized,
    R: FragmentRenderer + ?Sized,
{
    ResponseAugmenter::default().augment(body, ctx, source, renderer)
}
