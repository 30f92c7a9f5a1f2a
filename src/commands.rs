use teloxide::{
    payloads::SendMessageSetters,
    prelude::Requester,
    types::Message,
    utils::command::{BotCommands, ParseError},
    Bot,
};

use crate::{keyboard::menu_keyboard, state::ChatState, HandlerResult, UserDialogue};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "greet and show the menu keyboard.")]
    Start,
    #[command(description = "what this bot is about.")]
    Aboutme,
    #[command(description = "roll a dice.")]
    Dice,
    #[command(description = "display help.")]
    Help,
    #[command(description = "how to use the exchange notifier.")]
    Exchange,
    #[command(description = "play a three question math quiz.")]
    Mathquiz,
    #[command(
        description = "notify the USD price every <seconds> seconds.",
        parse_with = raw_argument
    )]
    Set(String),
    #[command(description = "remove your exchange notifier.")]
    Unset,
}

// Hand the whole argument line to the handler; /set reports its own usage
// errors instead of silently falling through to the chat responder.
fn raw_argument(input: String) -> Result<(String,), ParseError> {
    Ok((input,))
}

pub(crate) async fn start(bot: Bot, dialogue: UserDialogue, msg: Message) -> HandlerResult {
    log::info!("chat {} has started the bot", msg.chat.id);
    bot.send_message(
        msg.chat.id,
        "Welcome to my Telegram Bot.\n\
         You can see the USD/IRR exchange ratio and also play two games \
         including Dice and math quiz.",
    )
    .reply_markup(menu_keyboard())
    .await?;
    dialogue.update(ChatState::Idle).await?;
    Ok(())
}

pub(crate) async fn aboutme(bot: Bot, msg: Message) -> HandlerResult {
    log::info!("chat {} wants to know about me", msg.chat.id);
    bot.send_message(
        msg.chat.id,
        "This bot shows the USD/IRR exchange ratio, rolls a dice and quizzes \
         you on quick math.\nUse /help to see every command.",
    )
    .await?;
    Ok(())
}

pub(crate) async fn dice(bot: Bot, msg: Message) -> HandlerResult {
    log::info!("chat {} wants to play Dice", msg.chat.id);
    bot.send_dice(msg.chat.id).await?;
    Ok(())
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        format!(
            "You can use the menu keyboard or the following commands:\n{}",
            Command::descriptions()
        ),
    )
    .await?;
    Ok(())
}

pub(crate) async fn exchange(bot: Bot, msg: Message) -> HandlerResult {
    log::info!("chat {} wants to use exchange", msg.chat.id);
    bot.send_message(
        msg.chat.id,
        "You can use this section in the following manner:\n\
         /set <seconds> -> send you the USD to IRR price every <seconds> seconds\n\n\
         /unset -> remove the notifier",
    )
    .await?;
    Ok(())
}
