use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use rustexchangebot::alerts::AlertScheduler;
use rustexchangebot::errors::OperatorNotifier;
use rustexchangebot::exchange::ExchangeApi;
use rustexchangebot::schema::schema;
use rustexchangebot::state::ChatState;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::IgnoringErrorHandlerSafe;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use url::Url;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let level = std::env::var("LOG_LEVEL")
        .unwrap_or("error".into())
        .parse::<Level>()
        .unwrap_or(Level::ERROR);
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from_level(level))
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_ansi(true)
        .with_line_number(true)
        .with_target(false)
        .init();

    let teloxide_token = std::env::var("TELOXIDE_TOKEN").expect("TELOXIDE_TOKEN should be set.");
    let bot = Bot::new(teloxide_token);
    log::info!("Starting bot...");

    let base_url = std::env::var("EXCHANGE_API_URL")
        .expect("EXCHANGE_API_URL should be set.")
        .parse::<Url>()
        .expect("EXCHANGE_API_URL can't be parsed.");
    let api_key = std::env::var("EXCHANGE_API_KEY").expect("EXCHANGE_API_KEY should be set.");
    let rates = Arc::new(ExchangeApi::new(base_url, api_key));

    let scheduler = Arc::new(AlertScheduler::new());

    let operator_ids = std::env::var("OPERATOR_CHAT_IDS").unwrap_or_default();
    let notifier = OperatorNotifier::from_list(bot.clone(), &operator_ids);

    let webhook_url = std::env::var("WEBHOOK_URL")
        .map(|d| d.parse::<Url>().expect("WEBHOOK_URL can't be parsed."))
        .ok();
    let webhook_addr = std::env::var("WEBHOOK_ADDR")
        .map(|d| d.parse::<SocketAddr>().expect("WEBHOOK_ADDR can't be parsed."))
        .ok();

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![
            InMemStorage::<ChatState>::new(),
            rates,
            scheduler
        ])
        .error_handler(notifier)
        .enable_ctrlc_handler()
        .build();

    if let (Some(url), Some(addr)) = (webhook_url, webhook_addr) {
        let listener = webhooks::axum(bot, Options::new(addr, url))
            .await
            .expect("Failed to build a listener.");
        dispatcher
            .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
            .await
    } else {
        dispatcher.dispatch().await
    }
}
