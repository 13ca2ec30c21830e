//! Unrestricted-mode `BotHarness`: a direct in-process call, no deadline,
//! no memory ceiling. Used for self-play training against trusted bots
//! (spec §4.5).

use holdem_shared::{Card, PublicGameState};

use crate::bot::{Bot, BotAction};

pub struct UnrestrictedBot {
    bot: Box<dyn Bot>,
}

impl UnrestrictedBot {
    pub fn new(bot: Box<dyn Bot>) -> Self {
        Self { bot }
    }

    pub fn decide(&mut self, state: &PublicGameState, hole_cards: [Card; 2]) -> BotAction {
        self.bot.get_action(state, hole_cards)
    }
}
