use std::error::Error;

use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateFilterExt, UpdateHandler},
    dptree,
    types::{Message, Update},
};

use crate::{
    alerts, chat,
    commands::{self, Command},
    exchange::ExchangeApi,
    quiz,
    state::ChatState,
};

pub fn schema() -> UpdateHandler<Box<dyn Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(commands::start))
        .branch(case![Command::Aboutme].endpoint(commands::aboutme))
        .branch(case![Command::Dice].endpoint(commands::dice))
        .branch(case![Command::Help].endpoint(commands::help))
        .branch(case![Command::Exchange].endpoint(commands::exchange))
        .branch(case![Command::Mathquiz].endpoint(quiz::begin))
        .branch(case![Command::Set(seconds)].endpoint(alerts::set_alert::<ExchangeApi>))
        .branch(case![Command::Unset].endpoint(alerts::unset_alert));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(
            dptree::filter(|msg: Message| {
                msg.text()
                    .map(|text| text.contains("Play math quiz"))
                    .unwrap_or(false)
            })
            .endpoint(quiz::begin),
        )
        .endpoint(chat::respond);

    let callback_handler = Update::filter_callback_query()
        .branch(case![ChatState::Answering { round }].endpoint(quiz::take_answer))
        .branch(case![ChatState::Deciding].endpoint(quiz::decide));

    dialogue::enter::<Update, InMemStorage<ChatState>, ChatState, _>()
        .branch(message_handler)
        .branch(callback_handler)
}
