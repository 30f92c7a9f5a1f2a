use std::sync::Arc;

use futures::future::BoxFuture;
use teloxide::{error_handlers::ErrorHandler, prelude::Requester, types::ChatId, Bot};
use thiserror::Error;

type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum BotError {
    /// Hidden chat trigger used to check the operator alert path end to end.
    #[error("reporting probe tripped")]
    ReportingProbe,
}

/// Forwards dispatcher errors to the configured operator chats.
pub struct OperatorNotifier {
    bot: Bot,
    operators: Vec<ChatId>,
}

impl OperatorNotifier {
    pub fn new(bot: Bot, operators: Vec<ChatId>) -> Arc<Self> {
        Arc::new(Self { bot, operators })
    }

    // "123456,-100789" style list, unparseable entries are skipped
    pub fn from_list(bot: Bot, raw: &str) -> Arc<Self> {
        let operators = raw
            .split(',')
            .filter_map(|id| id.trim().parse::<i64>().ok())
            .map(ChatId)
            .collect();
        Self::new(bot, operators)
    }
}

impl ErrorHandler<HandlerError> for OperatorNotifier {
    fn handle_error(self: Arc<Self>, error: HandlerError) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            log::error!("error: {error}");
            for operator in &self.operators {
                if let Err(send_error) = self
                    .bot
                    .send_message(*operator, format!("ERROR!!!: {error}"))
                    .await
                {
                    log::error!("failed to reach operator {operator}: {send_error}");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_lists_are_parsed_leniently() {
        let bot = Bot::new("123456:TEST");
        let notifier = OperatorNotifier::from_list(bot, " 42, -100123 ,nonsense,");
        assert_eq!(notifier.operators, vec![ChatId(42), ChatId(-100123)]);
    }

    #[test]
    fn empty_list_means_no_operators() {
        let bot = Bot::new("123456:TEST");
        let notifier = OperatorNotifier::from_list(bot, "");
        assert!(notifier.operators.is_empty());
    }
}
