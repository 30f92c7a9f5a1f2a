use rand::seq::SliceRandom;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::quiz::{QUIT, RESTART};
use crate::state::QuizRound;

pub(crate) fn menu_keyboard() -> KeyboardMarkup {
    let keyboard = vec![
        vec![
            KeyboardButton::new("Play Dice"),
            KeyboardButton::new("Play math quiz"),
            KeyboardButton::new("IRR exchange ratio"),
        ],
        vec![KeyboardButton::new("About me"), KeyboardButton::new("Help")],
    ];

    KeyboardMarkup::new(keyboard)
        .one_time_keyboard()
        .input_field_placeholder("Choose one following".to_owned())
}

pub(crate) fn choices_keyboard(round: &QuizRound) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = round
        .choice_rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|value| InlineKeyboardButton::callback(value.to_string(), value.to_string()))
                .collect()
        })
        .collect();
    rows.shuffle(&mut rand::thread_rng());

    InlineKeyboardMarkup::new(rows)
}

pub(crate) fn restart_keyboard() -> InlineKeyboardMarkup {
    let keyboard = vec![
        vec![InlineKeyboardButton::callback("YES", RESTART)],
        vec![InlineKeyboardButton::callback("NO!", QUIT)],
    ];

    InlineKeyboardMarkup::new(keyboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_keyboard_offers_every_candidate() {
        let round = QuizRound::first();
        let markup = choices_keyboard(&round);

        let mut shown: Vec<String> = markup
            .inline_keyboard
            .iter()
            .flatten()
            .map(|button| button.text.clone())
            .collect();
        shown.sort();

        let mut expected: Vec<String> = round
            .choice_rows()
            .iter()
            .flatten()
            .map(|value| value.to_string())
            .collect();
        expected.sort();

        assert_eq!(shown, expected);
    }

    #[test]
    fn restart_keyboard_has_both_choices() {
        let markup = restart_keyboard();
        let data: Vec<_> = markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => {
                    Some(data.clone())
                }
                _ => None,
            })
            .collect();
        assert_eq!(data, vec![RESTART.to_owned(), QUIT.to_owned()]);
    }
}
