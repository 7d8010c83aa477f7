//! Single-deck blackjack against a dealer who stands on 17.
//!
//! Cards are 0-51 (suit = card / 13, rank = card % 13, rank 0 is the ace) and
//! are dealt from the back of a freshly shuffled deck. A natural 21 stands at
//! once and pays like any other win.
//!
//! Moves:
//! - `Hit`: draw a card; 21 stands automatically, over 21 busts.
//! - `Stand`: dealer draws below 17, then the hands are compared.

use super::{CasinoGame, GameError, GameResult, GameRng, Move};

const BLACKJACK: u8 = 21;
const DEALER_STANDS_ON: u8 = 17;

/// Calculate the value of a blackjack hand.
pub fn hand_value(cards: &[u8]) -> (u8, bool) {
    let mut value: u16 = 0;
    let mut aces: u8 = 0;

    for &card in cards {
        let rank = card_rank(card);
        if rank == 1 {
            aces += 1;
            value += 11;
        } else if rank >= 10 {
            value += 10;
        } else {
            value += rank as u16;
        }
    }

    while value > BLACKJACK as u16 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= BLACKJACK as u16;
    (value.min(255) as u8, is_soft)
}

/// 1 = Ace, 2-10, 11 = J, 12 = Q, 13 = K.
fn card_rank(card: u8) -> u8 {
    (card % 13) + 1
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    PlayerTurn,
    Complete,
}

/// How a finished hand was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Bust,
    DealerBust,
    Win,
    Lose,
    Push,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Bust => "Bust! You went over 21!",
            Verdict::DealerBust => "Dealer busts!",
            Verdict::Win => "You win!",
            Verdict::Lose => "Dealer wins!",
            Verdict::Push => "Push! Bet returned.",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Blackjack {
    bet: u64,
    deck: Vec<u8>,
    pub player: Vec<u8>,
    pub dealer: Vec<u8>,
    pub stage: Stage,
    pub verdict: Option<Verdict>,
}

impl Blackjack {
    pub fn player_value(&self) -> u8 {
        hand_value(&self.player).0
    }

    pub fn dealer_value(&self) -> u8 {
        hand_value(&self.dealer).0
    }

    /// The dealer's hole card stays hidden while the player acts.
    pub fn dealer_visible(&self) -> &[u8] {
        match self.stage {
            Stage::PlayerTurn => &self.dealer[..self.dealer.len().min(1)],
            Stage::Complete => &self.dealer,
        }
    }

    fn draw(&mut self) -> Result<u8, GameError> {
        self.deck.pop().ok_or(GameError::DeckExhausted)
    }

    fn hit(&mut self) -> Result<GameResult, GameError> {
        let card = self.draw()?;
        self.player.push(card);
        match self.player_value() {
            value if value > BLACKJACK => Ok(self.settle(Verdict::Bust)),
            BLACKJACK => self.stand(),
            _ => Ok(GameResult::Continue),
        }
    }

    fn stand(&mut self) -> Result<GameResult, GameError> {
        while self.dealer_value() < DEALER_STANDS_ON {
            let card = self.draw()?;
            self.dealer.push(card);
        }

        let player = self.player_value();
        let dealer = self.dealer_value();
        let verdict = if dealer > BLACKJACK {
            Verdict::DealerBust
        } else if player > dealer {
            Verdict::Win
        } else if player < dealer {
            Verdict::Lose
        } else {
            Verdict::Push
        };
        Ok(self.settle(verdict))
    }

    fn settle(&mut self, verdict: Verdict) -> GameResult {
        self.stage = Stage::Complete;
        self.verdict = Some(verdict);
        match verdict {
            Verdict::DealerBust | Verdict::Win => GameResult::Win(self.bet.saturating_mul(2)),
            Verdict::Bust | Verdict::Lose => GameResult::Loss,
            Verdict::Push => GameResult::Push,
        }
    }

    fn deal(bet: u64, mut deck: Vec<u8>) -> Result<(Self, GameResult), GameError> {
        let mut hand = || deck.pop().ok_or(GameError::DeckExhausted);
        let player = vec![hand()?, hand()?];
        let dealer = vec![hand()?, hand()?];
        let mut game = Blackjack {
            bet,
            deck,
            player,
            dealer,
            stage: Stage::PlayerTurn,
            verdict: None,
        };
        let result = if game.player_value() == BLACKJACK {
            game.stand()?
        } else {
            GameResult::Continue
        };
        Ok((game, result))
    }
}

impl CasinoGame for Blackjack {
    type Options = ();

    fn init(bet: u64, _: (), rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        Blackjack::deal(bet, rng.create_deck())
    }

    fn process_move(&mut self, mv: Move, _rng: &mut GameRng) -> Result<GameResult, GameError> {
        if self.stage == Stage::Complete {
            return Err(GameError::GameAlreadyComplete);
        }
        match mv {
            Move::Hit => self.hit(),
            Move::Stand => self.stand(),
            _ => Err(GameError::InvalidMove),
        }
    }

    fn bet(&self) -> u64 {
        self.bet
    }
}
