//! SubscriptionStore trait definition.

use miyabi_types::error::SubscriptionError;

/// Trait for the weather-notification opt-in list.
///
/// Recipients of the scheduled broadcast come exclusively from this store;
/// the notifier never infers a recipient from request context. The
/// file-backed implementation lives in miyabi-infra.
pub trait SubscriptionStore: Send + Sync {
    /// Add a user. Returns false if the user was already subscribed.
    fn subscribe(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, SubscriptionError>> + Send;

    /// Remove a user. Returns false if the user was not subscribed.
    fn unsubscribe(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, SubscriptionError>> + Send;

    /// All subscribed user ids.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, SubscriptionError>> + Send;
}
