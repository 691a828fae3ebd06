//! Messenger trait definition.

use miyabi_types::error::MessagingError;
use miyabi_types::event::UserProfile;

/// Trait for the messaging platform's outbound surface.
///
/// Replies are keyed by a one-time reply token tied to an inbound event;
/// pushes are keyed by a persistent user identifier and need no event
/// context. The implementation lives in miyabi-infra (`LineClient`).
pub trait Messenger: Send + Sync {
    /// Fetch a user's profile (display name) by persistent user id.
    fn get_profile(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<UserProfile, MessagingError>> + Send;

    /// Reply to an inbound event via its one-time reply token.
    fn reply(
        &self,
        reply_token: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), MessagingError>> + Send;

    /// Push an unsolicited message to a user by persistent id.
    fn push(
        &self,
        user_id: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), MessagingError>> + Send;
}
