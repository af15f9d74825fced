//! Visible lifetime of a rendered notification element.
//!
//! Times are offsets from an arbitrary origin (page load, test start), so the
//! machine never reads a clock itself. The browser runs the same machine
//! through the attributes emitted by the fragment renderer.

use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityState {
    Visible,
    Hidden,
}

/// The single `Visible -> Hidden` transition of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub hidden_at: Duration,
    /// End of the removal animation; the element leaves the page here.
    pub removed_at: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DismissTimer {
    attached_at: Duration,
    delay: Duration,
    transition: Duration,
    state: VisibilityState,
}

impl DismissTimer {
    /// Starts `Visible` at `now`, the moment the element enters the page.
    #[must_use]
    pub fn attach(now: Duration, delay: Duration, transition: Duration) -> Self {
        Self {
            attached_at: now,
            delay,
            transition,
            state: VisibilityState::Visible,
        }
    }

    #[must_use]
    pub fn attached_at(&self) -> Duration {
        self.attached_at
    }

    #[must_use]
    pub fn hidden_at(&self) -> Duration {
        self.attached_at + self.delay
    }

    #[must_use]
    pub fn removed_at(&self) -> Duration {
        self.hidden_at() + self.transition
    }

    #[must_use]
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// State the element has at `now`, without advancing the timer.
    #[must_use]
    pub fn state_at(&self, now: Duration) -> VisibilityState {
        if self.state == VisibilityState::Hidden || now >= self.hidden_at() {
            VisibilityState::Hidden
        } else {
            VisibilityState::Visible
        }
    }

    /// Fires the transition once its deadline has passed. Later polls return `None`.
    pub fn poll(&mut self, now: Duration) -> Option<Transition> {
        if self.state == VisibilityState::Hidden || now < self.hidden_at() {
            return None;
        }
        self.state = VisibilityState::Hidden;
        Some(Transition {
            hidden_at: self.hidden_at(),
            removed_at: self.removed_at(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dismissal {
    pub id: String,
    #[serde(serialize_with = "serialize_millis")]
    pub attached_at: Duration,
    #[serde(serialize_with = "serialize_millis")]
    pub hidden_at: Duration,
    #[serde(serialize_with = "serialize_millis")]
    pub removed_at: Duration,
}

/// Every notification element currently on a page, each with its own timer.
#[derive(Debug, Clone)]
pub struct DismissBoard {
    delay: Duration,
    transition: Duration,
    elements: Vec<(String, DismissTimer)>,
}

impl DismissBoard {
    #[must_use]
    pub fn new(delay: Duration, transition: Duration) -> Self {
        Self {
            delay,
            transition,
            elements: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Attaches an element. Re-attaching an id that is still on the page
    /// restarts its timer, as a fresh render does.
    pub fn attach(&mut self, id: impl Into<String>, now: Duration) {
        let id = id.into();
        self.elements.retain(|(existing, _)| *existing != id);
        let timer = DismissTimer::attach(now, self.delay, self.transition);
        self.elements.push((id, timer));
    }

    /// Removes an element early; its pending transition never fires.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|(existing, _)| existing != id);
        before != self.elements.len()
    }

    #[must_use]
    pub fn state(&self, id: &str) -> Option<VisibilityState> {
        self.elements
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, timer)| timer.state())
    }

    /// Earliest pending `Visible -> Hidden` deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.elements
            .iter()
            .filter(|(_, timer)| timer.state() == VisibilityState::Visible)
            .map(|(_, timer)| timer.hidden_at())
            .min()
    }

    /// Fires every transition due by `now`, ordered by deadline.
    pub fn advance(&mut self, now: Duration) -> Vec<Dismissal> {
        let mut fired = self
            .elements
            .iter_mut()
            .filter_map(|(id, timer)| {
                timer.poll(now).map(|transition| Dismissal {
                    id: id.clone(),
                    attached_at: timer.attached_at(),
                    hidden_at: transition.hidden_at,
                    removed_at: transition.removed_at,
                })
            })
            .collect::<Vec<_>>();
        fired.sort_by_key(|dismissal| dismissal.hidden_at);
        fired
    }

    /// Drops hidden elements whose removal animation has finished by `now`.
    pub fn sweep(&mut self, now: Duration) -> Vec<String> {
        let mut removed = Vec::new();
        self.elements.retain(|(id, timer)| {
            let done = timer.state() == VisibilityState::Hidden && now >= timer.removed_at();
            if done {
                removed.push(id.clone());
            }
            !done
        });
        removed
    }
}

/// Dismissals for elements attached at the given offsets, in firing order.
#[must_use]
pub fn timeline(attach_offsets: &[Duration], delay: Duration, transition: Duration) -> Vec<Dismissal> {
    let mut board = DismissBoard::new(delay, transition);
    for (index, offset) in attach_offsets.iter().enumerate() {
        board.attach(format!("notification-{index}"), *offset);
    }
    let mut dismissals = Vec::with_capacity(attach_offsets.len());
    while let Some(deadline) = board.next_deadline() {
        dismissals.extend(board.advance(deadline));
    }
    dismissals
}

fn serialize_millis<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(2_000);
    const FADE: Duration = Duration::from_millis(300);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn timer_starts_visible_and_hides_after_delay() {
        let mut timer = DismissTimer::attach(ms(100), DELAY, FADE);
        assert_eq!(timer.state(), VisibilityState::Visible);
        assert_eq!(timer.state_at(ms(2_099)), VisibilityState::Visible);
        assert_eq!(timer.state_at(ms(2_100)), VisibilityState::Hidden);

        assert_eq!(timer.poll(ms(2_099)), None);
        assert_eq!(
            timer.poll(ms(2_100)),
            Some(Transition {
                hidden_at: ms(2_100),
                removed_at: ms(2_400),
            })
        );
        assert_eq!(timer.state(), VisibilityState::Hidden);
    }

    #[test]
    fn transition_fires_exactly_once() {
        let mut timer = DismissTimer::attach(Duration::ZERO, DELAY, FADE);
        assert!(timer.poll(ms(5_000)).is_some());
        assert!(timer.poll(ms(5_001)).is_none());
        assert!(timer.poll(ms(9_000)).is_none());
        assert_eq!(timer.state_at(ms(0)), VisibilityState::Hidden);
    }

    #[test]
    fn staggered_notifications_dismiss_independently() {
        let mut board = DismissBoard::new(DELAY, FADE);
        board.attach("first", Duration::ZERO);
        board.attach("second", ms(500));

        assert!(board.advance(ms(1_999)).is_empty());

        let at_2000 = board.advance(ms(2_000));
        assert_eq!(at_2000.len(), 1);
        assert_eq!(at_2000[0].id, "first");
        assert_eq!(at_2000[0].hidden_at, ms(2_000));
        assert_eq!(board.state("second"), Some(VisibilityState::Visible));

        assert!(board.advance(ms(2_499)).is_empty());
        let at_2500 = board.advance(ms(2_500));
        assert_eq!(at_2500.len(), 1);
        assert_eq!(at_2500[0].id, "second");
        assert_eq!(at_2500[0].hidden_at, ms(2_500));
    }

    #[test]
    fn removed_element_never_fires() {
        let mut board = DismissBoard::new(DELAY, FADE);
        board.attach("gone", Duration::ZERO);
        assert!(board.remove("gone"));
        assert!(!board.remove("gone"));
        assert!(board.advance(ms(10_000)).is_empty());
        assert!(board.next_deadline().is_none());
    }

    #[test]
    fn reattaching_restarts_the_timer() {
        let mut board = DismissBoard::new(DELAY, FADE);
        board.attach("flash", Duration::ZERO);
        board.attach("flash", ms(1_500));
        assert_eq!(board.len(), 1);
        assert!(board.advance(ms(2_000)).is_empty());
        assert_eq!(board.next_deadline(), Some(ms(3_500)));
    }

    #[test]
    fn sweep_drops_elements_after_removal_animation() {
        let mut board = DismissBoard::new(DELAY, FADE);
        board.attach("a", Duration::ZERO);
        board.attach("b", ms(1_000));
        board.advance(ms(2_000));

        assert!(board.sweep(ms(2_299)).is_empty());
        assert_eq!(board.sweep(ms(2_300)), vec!["a".to_string()]);
        assert_eq!(board.len(), 1);
        assert_eq!(board.state("b"), Some(VisibilityState::Visible));
    }

    #[test]
    fn timeline_orders_dismissals_by_deadline() {
        let dismissals = timeline(&[ms(500), Duration::ZERO, ms(500)], DELAY, FADE);
        let hidden = dismissals
            .iter()
            .map(|d| (d.id.as_str(), d.hidden_at))
            .collect::<Vec<_>>();
        assert_eq!(
            hidden,
            vec![
                ("notification-1", ms(2_000)),
                ("notification-0", ms(2_500)),
                ("notification-2", ms(2_500)),
            ]
        );
    }

    #[test]
    fn dismissal_serializes_durations_as_millis() {
        let dismissals = timeline(&[ms(250)], DELAY, FADE);
        let json = serde_json::to_value(&dismissals).expect("serialize timeline");
        assert_eq!(
            json,
            serde_json::json!([{
                "id": "notification-0",
                "attached_at": 250,
                "hidden_at": 2250,
                "removed_at": 2550
            }])
        );
    }
}
