use teloxide::{
    dispatching::dialogue::GetChatId,
    payloads::{EditMessageTextSetters, SendMessageSetters},
    prelude::Requester,
    types::{CallbackQuery, Message},
    Bot,
};
use tracing::instrument;

use crate::{
    keyboard::{choices_keyboard, restart_keyboard},
    state::{ChatState, QuizRound},
    HandlerResult, UserDialogue,
};

pub(crate) const RESTART: &str = "restart";
pub(crate) const QUIT: &str = "quit";

#[instrument(level = "info", skip(bot, dialogue))]
pub(crate) async fn begin(bot: Bot, dialogue: UserDialogue, msg: Message) -> HandlerResult {
    log::info!("chat {} started the math quiz", msg.chat.id);
    let round = QuizRound::first();
    bot.send_message(
        msg.chat.id,
        format!("Let's start with a math pop quiz.\n\n{}", round.prompt()),
    )
    .reply_markup(choices_keyboard(&round))
    .await?;
    dialogue.update(ChatState::Answering { round }).await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue))]
pub(crate) async fn take_answer(
    bot: Bot,
    dialogue: UserDialogue,
    q: CallbackQuery,
    round: QuizRound,
) -> HandlerResult {
    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    bot.answer_callback_query(&q.id).await?;
    let Some(chat_id) = q.chat_id() else {
        return Ok(());
    };

    let verdict = grade(&round, data);
    log::info!(
        "user {} answered {} on stage {} ({})",
        q.from.id,
        data,
        round.stage(),
        verdict
    );

    if round.is_last() {
        if let Some(message) = &q.message {
            bot.edit_message_text(
                chat_id,
                message.id(),
                format!("Your answer was {verdict}. Do you want to start over?"),
            )
            .reply_markup(restart_keyboard())
            .await?;
        }
        dialogue.update(ChatState::Deciding).await?;
    } else {
        let next = round.next();
        if let Some(message) = &q.message {
            bot.edit_message_text(
                chat_id,
                message.id(),
                format!(
                    "Your answer was {verdict}.\nYour question is:\n\n{}",
                    next.prompt()
                ),
            )
            .reply_markup(choices_keyboard(&next))
            .await?;
        }
        dialogue.update(ChatState::Answering { round: next }).await?;
    }

    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue))]
pub(crate) async fn decide(bot: Bot, dialogue: UserDialogue, q: CallbackQuery) -> HandlerResult {
    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    bot.answer_callback_query(&q.id).await?;
    let Some(chat_id) = q.chat_id() else {
        return Ok(());
    };

    match data {
        RESTART => {
            log::info!("user {} starts the quiz over", q.from.id);
            let round = QuizRound::first();
            if let Some(message) = &q.message {
                bot.edit_message_text(
                    chat_id,
                    message.id(),
                    format!("Nice. Glad to have you.\nLet's start.\n\n{}", round.prompt()),
                )
                .reply_markup(choices_keyboard(&round))
                .await?;
            }
            dialogue.update(ChatState::Answering { round }).await?;
        }
        QUIT => {
            log::info!("user {} has ended the quiz", q.from.id);
            if let Some(message) = &q.message {
                bot.edit_message_text(chat_id, message.id(), "Thank you for testing my bot!")
                    .await?;
            }
            dialogue.update(ChatState::Idle).await?;
        }
        other => {
            log::warn!("user {} sent unexpected quiz payload {:?}", q.from.id, other);
        }
    }

    Ok(())
}

fn grade(round: &QuizRound, data: &str) -> &'static str {
    match data.trim().parse::<i32>() {
        Ok(value) if value == round.answer() => "correct",
        _ => "incorrect",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_accepts_the_exact_sum() {
        let round = QuizRound::first();
        assert_eq!(grade(&round, &round.answer().to_string()), "correct");
    }

    #[test]
    fn grading_rejects_other_values() {
        let round = QuizRound::first();
        // candidate answers never exceed 210
        assert_eq!(grade(&round, "9999"), "incorrect");
    }

    #[test]
    fn grading_rejects_garbage_payloads() {
        let round = QuizRound::first();
        assert_eq!(grade(&round, "not a number"), "incorrect");
        assert_eq!(grade(&round, ""), "incorrect");
    }

    #[test]
    fn grading_tolerates_padding() {
        let round = QuizRound::first();
        assert_eq!(grade(&round, &format!(" {} ", round.answer())), "correct");
    }
}
