use super::super::*;
use crate::casino::{
    cases::{self, CaseOpening},
    upgrade::Upgrade,
    CasinoGame, GameRng, Move,
};

impl<S: Store> Layer<S> {
    /// Buys and opens a case. The price is the wager; the prize goes to the
    /// inventory and nothing is recorded in the stats.
    pub fn open_case(&mut self, case_id: u8) -> Result<Vec<Event>, GameError> {
        let case = cases::find(case_id)?;
        self.open_round(GameType::Cases, case.price, |rng| {
            let (opening, result) = CaseOpening::init(case.price, case, rng)?;
            Ok((GameSession::Case(opening), result))
        })
    }

    /// Prices an upgrade for an owned item. Selecting again before attempting
    /// replaces the offer.
    pub fn select_upgrade(&mut self, item_id: u64) -> Result<Vec<Event>, GameError> {
        let game = GameType::Upgrade;
        let phase = self.phase(game);
        if let Phase::Settling(_) = phase {
            return Err(GameError::RoundInProgress(game));
        }
        let item = self
            .ledger
            .item(item_id)
            .cloned()
            .ok_or(GameError::ItemNotFound(item_id))?;

        let round = self.rounds + 1;
        let mut rng = GameRng::new(self.seed, round, 0);
        let (offer, _) = Upgrade::init(0, item, &mut rng)?;
        if let Phase::InRound(previous) = phase {
            debug!(previous, round, "upgrade offer replaced");
        }
        self.rounds = round;

        let message = format!("Ready to upgrade! Success chance: {:.1}%", offer.chance);
        let table = self.table_mut(game);
        table.phase = Phase::InRound(round);
        table.session = Some(GameSession::Upgrade(offer));
        table.moves = 1;

        Ok(vec![
            Event::RoundStarted {
                game,
                round,
                bet: 0,
            },
            Event::status(game, Severity::Info, message),
        ])
    }

    /// Rolls the selected upgrade. The input item is consumed either way.
    pub fn attempt_upgrade(&mut self) -> Result<Vec<Event>, GameError> {
        let game = GameType::Upgrade;
        match self.phase(game) {
            Phase::InRound(_) => {}
            Phase::Settling(_) => return Err(GameError::RoundInProgress(game)),
            Phase::Idle => return Err(GameError::NoSelection),
        }
        if let Some(GameSession::Upgrade(offer)) = self.session(game) {
            let id = offer.input.id;
            if self.ledger.item(id).is_none() {
                return Err(GameError::ItemNotFound(id));
            }
        }
        self.play(game, Move::Attempt)
    }
}
