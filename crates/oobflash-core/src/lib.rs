// Public fallible APIs in this crate share one concrete error contract (`FlashError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod augment;
pub mod config;
pub mod dismiss;
pub mod error;
pub mod models;
pub mod policy;
pub mod render;
pub mod source;

pub use augment::{Augmentation, MarkupSink, ResponseAugmenter, augment};
pub use config::{FlashConfig, SwapStrategy};
pub use dismiss::{DismissBoard, DismissTimer, Dismissal, Transition, VisibilityState, timeline};
pub use error::{FlashError, Result};
pub use models::{Category, Notification, RequestContext};
pub use policy::{InjectionOutcome, InjectionPolicy, decide};
pub use render::FragmentRenderer;
pub use source::NotificationSource;
