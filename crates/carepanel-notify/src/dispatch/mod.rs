//! Notification dispatch and transient outcome history.

pub mod dispatcher;
pub mod history;

pub use dispatcher::NotificationDispatcher;
pub use history::DispatchHistory;
