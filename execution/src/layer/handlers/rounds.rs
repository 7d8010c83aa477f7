use super::super::*;
use crate::casino::{validate_wager, GameRng, Move, Start};

impl<S: Store> Layer<S> {
    /// Opens a wagered round. The stake is validated and debited before the
    /// opening draw; single-draw games settle in the same call.
    pub fn start(&mut self, bet: u64, start: Start) -> Result<Vec<Event>, GameError> {
        start.validate()?;
        self.open_round(start.game_type(), bet, |rng| {
            GameSession::start(bet, start, rng)
        })
    }

    /// Applies a player move to the open round of `game`.
    pub fn play(&mut self, game: GameType, mv: Move) -> Result<Vec<Event>, GameError> {
        let Phase::InRound(round) = self.phase(game) else {
            return Err(GameError::NoActiveRound(game));
        };
        let seed = self.seed;
        let table = self.table_mut(game);
        let session = table
            .session
            .as_mut()
            .ok_or(GameError::NoActiveRound(game))?;
        let mut rng = GameRng::new(seed, round, table.moves);
        let result = session.process_move(mv, &mut rng)?;
        table.moves += 1;
        debug!(%game, round, ?mv, "move applied");

        Ok(self.after_step(game, round, result))
    }

    pub(in crate::layer) fn open_round(
        &mut self,
        game: GameType,
        wager: u64,
        init: impl FnOnce(&mut GameRng) -> Result<(GameSession, GameResult), GameError>,
    ) -> Result<Vec<Event>, GameError> {
        self.ensure_idle(game)?;
        validate_wager(wager, self.ledger.balance())?;

        let round = self.rounds + 1;
        let mut rng = GameRng::new(self.seed, round, 0);
        self.ledger.debit(wager);
        let (session, result) = match init(&mut rng) {
            Ok(opened) => opened,
            Err(e) => {
                self.ledger.credit(wager);
                return Err(e);
            }
        };
        self.rounds = round;

        let table = self.table_mut(game);
        table.phase = Phase::InRound(round);
        table.session = Some(session);
        table.moves = 1;
        debug!(%game, round, wager, "round started");

        let mut events = vec![
            Event::RoundStarted {
                game,
                round,
                bet: wager,
            },
            self.balance_event(),
        ];
        if game == GameType::Crash && result == GameResult::Continue {
            let every = self.crash_tick;
            self.scheduler
                .schedule(game, round, every, TaskKind::Tick { every });
        }
        events.extend(self.after_step(game, round, result));
        Ok(events)
    }

    fn after_step(&mut self, game: GameType, round: u64, result: GameResult) -> Vec<Event> {
        match result {
            GameResult::Continue => self.progress(game, round).into_iter().collect(),
            result => self.settle(game, round, result),
        }
    }
}
