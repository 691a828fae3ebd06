//! Application state wiring the services together.
//!
//! Services are generic over the port traits; AppState pins them to the
//! concrete infra implementations.

use std::sync::Arc;

use miyabi_core::conversation::ConversationStore;
use miyabi_core::dispatch::EventDispatcher;
use miyabi_core::notify::WeatherNotifier;
use miyabi_core::rules::RulesEngine;
use miyabi_infra::config::AppConfig;
use miyabi_infra::line::LineClient;
use miyabi_infra::llm::{OpenAiCompatConfig, OpenAiCompatibleProvider};
use miyabi_infra::subscription::FileSubscriptionStore;
use miyabi_infra::weather::OpenWeatherClient;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteDispatcher =
    EventDispatcher<OpenAiCompatibleProvider, FileSubscriptionStore, LineClient>;

pub type ConcreteNotifier =
    WeatherNotifier<OpenWeatherClient, LineClient, FileSubscriptionStore>;

/// Shared application state for the webhook endpoint and the scheduler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ConcreteDispatcher>,
    pub notifier: Option<Arc<ConcreteNotifier>>,
    /// Channel secret used to verify inbound webhook signatures.
    pub channel_secret: String,
}

impl AppState {
    /// Wire services from configuration: messaging client, completion
    /// provider, subscription store, rules engine, optional notifier.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let line = Arc::new(LineClient::new(config.line.access_token.clone()));

        let provider = Arc::new(OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            base_url: config.chat.base_url.clone(),
            api_key: config.chat.api_key.clone(),
            model: config.chat.model.clone(),
        }));

        let subscriptions = Arc::new(
            FileSubscriptionStore::load(config.data_dir.join("subscriptions.json")).await?,
        );

        let rules = RulesEngine::new(
            ConversationStore::new(),
            provider,
            subscriptions.clone(),
            config.chat.model.clone(),
            config.weather.is_some(),
        );
        let dispatcher = Arc::new(EventDispatcher::new(rules, line.clone()));

        let notifier = config.weather.as_ref().map(|weather| {
            Arc::new(WeatherNotifier::new(
                Arc::new(OpenWeatherClient::new(weather.api_key.clone())),
                line.clone(),
                subscriptions.clone(),
                weather.city.clone(),
            ))
        });

        Ok(Self {
            dispatcher,
            notifier,
            channel_secret: config.line.channel_secret,
        })
    }
}
