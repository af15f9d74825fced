use crate::models::Notification;

/// Pending notifications for one request context.
///
/// `peek` must not consume anything: the augmenter only ever peeks, and
/// clearing is left to whoever renders the notifications on a full page.
pub trait NotificationSource {
    /// Pending notifications in insertion order.
    fn peek(&self) -> Vec<Notification>;

    fn has_any(&self) -> bool {
        !self.peek().is_empty()
    }

    /// Removes and returns every pending notification.
    fn drain(&mut self) -> Vec<Notification>;
}

impl NotificationSource for Vec<Notification> {
    fn peek(&self) -> Vec<Notification> {
        self.clone()
    }

    fn has_any(&self) -> bool {
        !self.is_empty()
    }

    fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(self)
    }
}
