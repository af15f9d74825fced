use crate::error::Result;
use crate::models::Notification;

/// Turns a notification list into markup.
///
/// With `out_of_band` set, the markup must carry the stable container id and
/// the merge marker so the client splices it into the existing node instead
/// of treating it as content for the primary swap target.
pub trait FragmentRenderer {
    fn render(&self, notifications: &[Notification], out_of_band: bool) -> Result<String>;
}

impl<F> FragmentRenderer for F
where
    F: Fn(&[Notification], bool) -> Result<String>,
{
    fn render(&self, notifications: &[Notification], out_of_band: bool) -> Result<String> {
        self(notifications, out_of_band)
    }
}
