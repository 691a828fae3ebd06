//! Scheduled weather broadcast.
//!
//! Recipients come from the subscription store only; the notifier carries no
//! request context. A fetch failure downgrades to a fixed fallback sentence
//! and the broadcast still goes out.

use std::sync::Arc;

use miyabi_types::error::WeatherError;
use miyabi_types::weather::WeatherReport;

use crate::messenger::Messenger;
use crate::subscription::SubscriptionStore;

/// Trait for the current-weather backend.
///
/// The OpenWeatherMap implementation lives in miyabi-infra.
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for a city query (e.g. "Tokyo").
    fn current(
        &self,
        city: &str,
    ) -> impl std::future::Future<Output = Result<WeatherReport, WeatherError>> + Send;
}

/// Sentence pushed when the weather fetch fails.
pub const WEATHER_UNAVAILABLE: &str = "天気情報を取得できませんでした。";

/// Format the morning forecast sentence.
pub fn format_weather(report: &WeatherReport) -> String {
    format!(
        "今日の天気は{}で、気温は{}℃です。",
        report.description, report.temperature
    )
}

/// Pushes the morning forecast to every subscribed user.
pub struct WeatherNotifier<W, M, S> {
    weather: Arc<W>,
    messenger: Arc<M>,
    subscriptions: Arc<S>,
    city: String,
}

impl<W, M, S> WeatherNotifier<W, M, S>
where
    W: WeatherProvider,
    M: Messenger,
    S: SubscriptionStore,
{
    pub fn new(
        weather: Arc<W>,
        messenger: Arc<M>,
        subscriptions: Arc<S>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            weather,
            messenger,
            subscriptions,
            city: city.into(),
        }
    }

    /// Run one broadcast.
    ///
    /// Skips the weather fetch entirely when nobody is subscribed.
    /// Per-recipient push failures are logged and do not stop the rest.
    pub async fn broadcast(&self) {
        let subscribers = match self.subscriptions.list().await {
            Ok(subscribers) => subscribers,
            Err(err) => {
                tracing::error!(error = %err, "failed to list weather subscribers");
                return;
            }
        };
        if subscribers.is_empty() {
            tracing::debug!("no weather subscribers, skipping broadcast");
            return;
        }

        let text = match self.weather.current(&self.city).await {
            Ok(report) => format_weather(&report),
            Err(err) => {
                tracing::warn!(error = %err, city = %self.city, "weather fetch failed");
                WEATHER_UNAVAILABLE.to_string()
            }
        };

        let mut delivered = 0usize;
        for user_id in &subscribers {
            match self.messenger.push(user_id, &text).await {
                Ok(()) => delivered += 1,
                Err(err) => {
                    tracing::error!(user = %user_id, error = %err, "weather push failed");
                }
            }
        }
        tracing::info!(delivered, total = subscribers.len(), "weather broadcast done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use miyabi_types::error::{MessagingError, SubscriptionError};
    use miyabi_types::event::UserProfile;

    struct StubWeather {
        result: Result<WeatherReport, ()>,
        fetches: AtomicUsize,
    }

    impl WeatherProvider for StubWeather {
        async fn current(&self, _city: &str) -> Result<WeatherReport, WeatherError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .map_err(|_| WeatherError::Status(503))
        }
    }

    #[derive(Default)]
    struct RecordingMessenger {
        pushes: StdMutex<Vec<(String, String)>>,
    }

    impl Messenger for RecordingMessenger {
        async fn get_profile(&self, user_id: &str) -> Result<UserProfile, MessagingError> {
            Ok(UserProfile {
                display_name: "stub".to_string(),
                user_id: user_id.to_string(),
            })
        }

        async fn reply(&self, _reply_token: &str, _text: &str) -> Result<(), MessagingError> {
            Ok(())
        }

        async fn push(&self, user_id: &str, text: &str) -> Result<(), MessagingError> {
            self.pushes
                .lock()
                .unwrap()
                .push((user_id.to_string(), text.to_string()));
            Ok(())
        }
    }

    struct FixedSubscriptions(BTreeSet<String>);

    impl SubscriptionStore for FixedSubscriptions {
        async fn subscribe(&self, _user_id: &str) -> Result<bool, SubscriptionError> {
            Ok(false)
        }

        async fn unsubscribe(&self, _user_id: &str) -> Result<bool, SubscriptionError> {
            Ok(false)
        }

        async fn list(&self) -> Result<Vec<String>, SubscriptionError> {
            Ok(self.0.iter().cloned().collect())
        }
    }

    fn subscribers(ids: &[&str]) -> Arc<FixedSubscriptions> {
        Arc::new(FixedSubscriptions(
            ids.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn test_format_weather_exact_sentence() {
        let report = WeatherReport {
            description: "clear sky".to_string(),
            temperature: 21.5,
        };
        assert_eq!(
            format_weather(&report),
            "今日の天気はclear skyで、気温は21.5℃です。"
        );
    }

    #[tokio::test]
    async fn test_broadcast_pushes_forecast_to_all_subscribers() {
        let weather = Arc::new(StubWeather {
            result: Ok(WeatherReport {
                description: "clear sky".to_string(),
                temperature: 21.5,
            }),
            fetches: AtomicUsize::new(0),
        });
        let messenger = Arc::new(RecordingMessenger::default());
        let notifier = WeatherNotifier::new(
            weather.clone(),
            messenger.clone(),
            subscribers(&["U1", "U2"]),
            "Tokyo",
        );

        notifier.broadcast().await;

        let pushes = messenger.pushes.lock().unwrap().clone();
        assert_eq!(pushes.len(), 2);
        for (_, text) in &pushes {
            assert_eq!(text, "今日の天気はclear skyで、気温は21.5℃です。");
        }
        // One fetch serves every recipient.
        assert_eq!(weather.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_broadcast_sends_fallback_on_fetch_failure() {
        let weather = Arc::new(StubWeather {
            result: Err(()),
            fetches: AtomicUsize::new(0),
        });
        let messenger = Arc::new(RecordingMessenger::default());
        let notifier =
            WeatherNotifier::new(weather, messenger.clone(), subscribers(&["U1"]), "Tokyo");

        notifier.broadcast().await;

        let pushes = messenger.pushes.lock().unwrap().clone();
        assert_eq!(pushes, vec![("U1".to_string(), WEATHER_UNAVAILABLE.to_string())]);
    }

    #[tokio::test]
    async fn test_broadcast_without_subscribers_skips_fetch() {
        let weather = Arc::new(StubWeather {
            result: Err(()),
            fetches: AtomicUsize::new(0),
        });
        let messenger = Arc::new(RecordingMessenger::default());
        let notifier =
            WeatherNotifier::new(weather.clone(), messenger.clone(), subscribers(&[]), "Tokyo");

        notifier.broadcast().await;

        assert_eq!(weather.fetches.load(Ordering::SeqCst), 0);
        assert!(messenger.pushes.lock().unwrap().is_empty());
    }
}
