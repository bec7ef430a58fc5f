//! ob-event: Obverse event bus
//!
//! Minimal publish/subscribe used to decouple the scene controller from the
//! navigation shell and the rest of the app. Payloads are explicit typed
//! values passed by reference; a faulting subscriber never starves the
//! subscribers registered after it.

mod bus;

pub use bus::{EventBus, HandlerResult, SubscriptionId};
