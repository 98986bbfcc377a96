pub mod catalog;
pub mod feedback_store;
pub mod forest;
pub mod normalizer;
pub mod notification;
pub mod predictive;
pub mod ranking;
pub mod recommendations;
pub mod similarity;

pub use catalog::Catalog;
pub use feedback_store::FeedbackStore;
pub use forest::ForestParams;
pub use notification::{LogNotifier, NotificationEvent, Notifier};
