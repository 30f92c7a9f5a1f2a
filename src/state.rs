use rand::Rng;

pub(crate) const QUIZ_LEN: u8 = 3;

#[derive(Debug, Clone, Default)]
pub enum ChatState {
    #[default]
    Idle,
    // PART FOR --- MATH QUIZ ---
    Answering {
        round: QuizRound,
    },
    Deciding,
}

/// One question of the math quiz: two random terms and a stage counter.
#[derive(Debug, Clone)]
pub struct QuizRound {
    x: i32,
    y: i32,
    stage: u8,
}

impl QuizRound {
    pub(crate) fn first() -> Self {
        Self::at_stage(1)
    }

    fn at_stage(stage: u8) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: rng.gen_range(0..=100),
            y: rng.gen_range(0..=100),
            stage,
        }
    }

    pub(crate) fn next(&self) -> Self {
        Self::at_stage(self.stage + 1)
    }

    pub(crate) fn answer(&self) -> i32 {
        self.x + self.y
    }

    pub(crate) fn stage(&self) -> u8 {
        self.stage
    }

    pub(crate) fn is_last(&self) -> bool {
        self.stage >= QUIZ_LEN
    }

    pub(crate) fn prompt(&self) -> String {
        format!("{}/{}: What is {} + {} ?", self.stage, QUIZ_LEN, self.x, self.y)
    }

    // Candidate answers, laid out as the two inline keyboard rows.
    pub(crate) fn choice_rows(&self) -> [[i32; 2]; 2] {
        let answer = self.answer();
        [[answer - 2, answer + 1], [answer, answer + 10]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_round_starts_at_stage_one() {
        let round = QuizRound::first();
        assert_eq!(round.stage(), 1);
        assert!(!round.is_last());
    }

    #[test]
    fn terms_stay_in_range() {
        for _ in 0..100 {
            let round = QuizRound::first();
            assert!((0..=100).contains(&round.x));
            assert!((0..=100).contains(&round.y));
            assert_eq!(round.answer(), round.x + round.y);
        }
    }

    #[test]
    fn next_advances_the_stage() {
        let round = QuizRound::first();
        let second = round.next();
        let third = second.next();
        assert_eq!(second.stage(), 2);
        assert_eq!(third.stage(), 3);
        assert!(third.is_last());
    }

    #[test]
    fn choice_rows_hold_the_answer_exactly_once() {
        let round = QuizRound::first();
        let hits = round
            .choice_rows()
            .iter()
            .flatten()
            .filter(|value| **value == round.answer())
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn prompt_shows_the_stage() {
        let round = QuizRound::first();
        assert!(round.prompt().starts_with("1/3: What is"));
        assert!(round.next().prompt().starts_with("2/3: What is"));
    }
}
