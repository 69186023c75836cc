//! Background workers owned by the runtime.

mod notification;
mod session;

pub use notification::{DEFAULT_NOTIFICATION_TTL, NotificationWorker};
pub use session::{Command, SessionWorker, TimerConfig};
