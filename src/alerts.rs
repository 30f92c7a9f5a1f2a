use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

use teloxide::{
    prelude::Requester,
    types::{Message, UserId},
    Bot,
};
use tokio::{task::JoinHandle, time, time::MissedTickBehavior};
use tracing::instrument;

use crate::{
    exchange::{price_of, ProvideRates, BASE_CURRENCY},
    HandlerResult,
};

/// Repeating notification jobs, at most one per user.
pub struct AlertScheduler {
    jobs: Mutex<HashMap<UserId, AlertJob>>,
}

struct AlertJob {
    base: String,
    handle: JoinHandle<()>,
}

impl AlertScheduler {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Starts a repeating job for `user`, replacing any job it already has.
    /// The first run happens one full interval after scheduling, later runs
    /// keep the same spacing. Returns whether an old job was thrown away.
    pub fn schedule<F, Fut>(
        &self,
        user: UserId,
        base: impl Into<String>,
        every: Duration,
        mut tick: F,
    ) -> bool
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let replaced = self.cancel(user);
        let handle = tokio::spawn(async move {
            let mut timer = time::interval(every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick of an interval completes instantly
            timer.tick().await;
            loop {
                timer.tick().await;
                tick().await;
            }
        });
        self.jobs
            .lock()
            .expect("alert registry lock poisoned")
            .insert(
                user,
                AlertJob {
                    base: base.into(),
                    handle,
                },
            );
        replaced
    }

    pub fn cancel(&self, user: UserId) -> bool {
        match self
            .jobs
            .lock()
            .expect("alert registry lock poisoned")
            .remove(&user)
        {
            Some(job) => {
                job.handle.abort();
                log::info!("job of user {} ({}) has been removed", user, job.base);
                true
            }
            None => false,
        }
    }

    pub fn active_base(&self, user: UserId) -> Option<String> {
        self.jobs
            .lock()
            .expect("alert registry lock poisoned")
            .get(&user)
            .map(|job| job.base.clone())
    }
}

impl Default for AlertScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum IntervalError {
    NotANumber,
    TooShort,
}

pub(crate) fn parse_interval(arg: &str) -> Result<Duration, IntervalError> {
    let seconds: f64 = arg.trim().parse().map_err(|_| IntervalError::NotANumber)?;
    if !seconds.is_finite() || seconds < 5.0 {
        return Err(IntervalError::TooShort);
    }
    Ok(Duration::from_secs_f64(seconds))
}

#[instrument(level = "info", skip(bot, scheduler, rates))]
pub(crate) async fn set_alert<R: ProvideRates + 'static>(
    bot: Bot,
    msg: Message,
    scheduler: Arc<AlertScheduler>,
    rates: Arc<R>,
    seconds: String,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref().map(|user| user.id) else {
        return Ok(());
    };

    let every = match parse_interval(&seconds) {
        Ok(every) => every,
        Err(IntervalError::NotANumber) => {
            log::warn!("user {user} has used /set command wrongly");
            bot.send_message(msg.chat.id, "You used /set command wrongly!")
                .await?;
            return Ok(());
        }
        Err(IntervalError::TooShort) => {
            log::warn!("user {user} asked for an interval below 5 seconds");
            bot.send_message(
                msg.chat.id,
                "Please set an interval greater or equal than 5.",
            )
            .await?;
            return Ok(());
        }
    };

    let due = every.as_secs_f64();
    log::info!("user {user} set an exchange job for every {due} seconds");

    let chat_id = msg.chat.id;
    let job_bot = bot.clone();
    let replaced = scheduler.schedule(user, BASE_CURRENCY, every, move || {
        let bot = job_bot.clone();
        let rates = rates.clone();
        async move {
            let quotes = rates.quotes().await;
            let price = price_of(&quotes, BASE_CURRENCY).unwrap_or_default();
            if let Err(e) = bot
                .send_message(
                    chat_id,
                    format!(
                        "Convert For {BASE_CURRENCY} To IRR: {price}\n\
                         I will notify you after {due} seconds!"
                    ),
                )
                .await
            {
                log::error!("failed to push the exchange alert to chat {chat_id}: {e}");
            }
        }
    });

    let mut text = String::from("Your requested job is created");
    if replaced {
        text.push_str("\nAll your jobs are deleted.");
    }
    bot.send_message(chat_id, text).await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, scheduler))]
pub(crate) async fn unset_alert(
    bot: Bot,
    msg: Message,
    scheduler: Arc<AlertScheduler>,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref().map(|user| user.id) else {
        return Ok(());
    };
    scheduler.cancel(user);
    log::info!("user {user} unset the exchange notifier job");
    bot.send_message(msg.chat.id, "Your jobs are all deleted.")
        .await?;
    Ok(())
}
