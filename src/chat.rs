use teloxide::{
    prelude::Requester,
    types::{Me, Message},
    Bot,
};
use tracing::instrument;

use crate::{commands, errors::BotError, HandlerResult};

#[instrument(level = "info", skip(bot, me))]
pub(crate) async fn respond(bot: Bot, msg: Message, me: Me) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    log::info!("chat {} wants to talk to me and has sent {:?}", msg.chat.id, text);

    // menu keyboard labels come in as plain text
    if text.contains("About me") {
        return commands::aboutme(bot, msg).await;
    }
    if text.contains("Play Dice") {
        return commands::dice(bot, msg).await;
    }
    if text.contains("IRR exchange ratio") {
        return commands::exchange(bot, msg).await;
    }
    if text.contains("Help") {
        return commands::help(bot, msg).await;
    }

    // in groups, only speak when spoken to
    if msg.chat.is_group() && !text.contains(&me.mention()) {
        return Ok(());
    }

    let reply = keyword_reply(text)?;
    let first_name = msg
        .from
        .as_ref()
        .map(|user| user.first_name.clone())
        .unwrap_or_default();
    bot.send_message(msg.chat.id, format!("{reply}\n{first_name}"))
        .await?;
    Ok(())
}

pub(crate) fn keyword_reply(text: &str) -> Result<&'static str, BotError> {
    let lowered = text.to_lowercase();
    let parsed = lowered.trim();

    if ["hello", "hi", "salam"]
        .iter()
        .any(|greeting| parsed.contains(greeting))
    {
        return Ok("Hello to you");
    }
    if parsed.contains("how are you") {
        return Ok("I'm good thanks");
    }
    if parsed.contains("xxx") {
        return Err(BotError::ReportingProbe);
    }

    Ok("Sorry, I can't understand you! Please use /help")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_get_the_fixed_greeting() {
        assert_eq!(keyword_reply("hello there").unwrap(), "Hello to you");
        assert_eq!(keyword_reply("HI!").unwrap(), "Hello to you");
        assert_eq!(keyword_reply("  Salam  ").unwrap(), "Hello to you");
    }

    #[test]
    fn status_question_gets_the_fixed_answer() {
        assert_eq!(keyword_reply("how are you?").unwrap(), "I'm good thanks");
        assert_eq!(keyword_reply("How ARE you").unwrap(), "I'm good thanks");
    }

    #[test]
    fn anything_else_gets_the_fallback() {
        assert_eq!(
            keyword_reply("what is the weather").unwrap(),
            "Sorry, I can't understand you! Please use /help"
        );
    }

    #[test]
    fn the_probe_keyword_raises() {
        assert!(matches!(
            keyword_reply("xxx"),
            Err(BotError::ReportingProbe)
        ));
    }
}
