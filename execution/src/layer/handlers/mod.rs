use crate::casino::{blackjack::Verdict, ladder, wheel, GameResult, GameSession};
use royal_types::casino::LADDER_ROWS;

mod inventory;
mod rounds;

/// Status line for a settled round.
pub(super) fn describe(session: &GameSession, result: &GameResult, payout: u64) -> String {
    match (session, result) {
        (GameSession::Slots(_), GameResult::Loss) => "No match. Try again!".to_string(),
        (GameSession::Mines(_), GameResult::Loss) => "BOOM! You hit a bomb!".to_string(),
        (GameSession::Mines(mines), GameResult::Win(_)) => format!(
            "Cashed out {} gems! Won ${payout}!",
            mines.revealed.len()
        ),
        (GameSession::Dice(dice), GameResult::Loss) if dice.roll == 50 => {
            "Rolled 50! House wins!".to_string()
        }
        (GameSession::Dice(dice), GameResult::Loss) => {
            format!("Rolled {}. Better luck next time!", dice.roll)
        }
        (GameSession::Coinflip(flip), GameResult::Win(_)) => {
            format!("{}! You won ${payout}!", flip.landed.name().to_uppercase())
        }
        (GameSession::Coinflip(flip), _) => {
            format!("{}! You lost!", flip.landed.name().to_uppercase())
        }
        (GameSession::Blackjack(hand), _) => match hand.verdict {
            Some(verdict @ (Verdict::DealerBust | Verdict::Win)) => {
                format!("{} You won ${payout}!", verdict.message())
            }
            Some(verdict) => verdict.message().to_string(),
            None => String::new(),
        },
        (GameSession::Crash(crash), GameResult::Win(_)) => {
            format!("Cashed out at {:.2}x! Won ${payout}!", crash.current())
        }
        (GameSession::Crash(crash), _) => format!(
            "Rocket exploded at {:.2}x!",
            crash.crash_point().unwrap_or_else(|| crash.current())
        ),
        (GameSession::Roulette(spin), GameResult::Win(_)) => {
            format!("{}! You won ${payout}!", spin.color().name().to_uppercase())
        }
        (GameSession::Roulette(spin), _) => {
            format!("{}! You lost!", spin.color().name().to_uppercase())
        }
        (GameSession::Wheel(spin), GameResult::Win(_)) => {
            format!("{}! You won ${payout}!", wheel::label(spin.multiplier()))
        }
        (GameSession::Wheel(spin), GameResult::Refund(_)) => {
            format!("{}! Returned ${payout}", wheel::label(spin.multiplier()))
        }
        (GameSession::Wheel(spin), _) => {
            format!("{}! You lost!", wheel::label(spin.multiplier()))
        }
        (GameSession::Plinko(board), GameResult::Win(_)) => {
            format!("{}x! You won ${payout}!", board.multiplier())
        }
        (GameSession::Plinko(board), _) => format!(
            "{}x! Lost ${}",
            board.multiplier(),
            session.bet().saturating_sub(payout)
        ),
        (GameSession::Ladder(climb), GameResult::Win(_)) if climb.row >= LADDER_ROWS => format!(
            "Reached the top! Won ${payout} at {:.2}x!",
            ladder::multiplier(climb.row)
        ),
        (GameSession::Ladder(climb), GameResult::Win(_)) => format!(
            "Cashed out at {:.2}x! Won ${payout}!",
            ladder::multiplier(climb.row)
        ),
        (GameSession::Ladder(_), _) => {
            format!("Wrong choice! You lost ${}", session.bet())
        }
        (GameSession::Case(_), GameResult::Prize(loot)) => {
            format!("You got {} worth ${}!", loot.name, loot.value)
        }
        (GameSession::Upgrade(_), GameResult::Upgrade { prize: Some(loot), .. }) => {
            format!("Success! Got {} worth ${}!", loot.name, loot.value)
        }
        (GameSession::Upgrade(offer), _) => format!("Failed! Lost {}", offer.input.name()),
        (_, GameResult::Win(_)) => format!("You won ${payout}!"),
        (_, GameResult::Push) => "Push! Bet returned.".to_string(),
        _ => "You lost!".to_string(),
    }
}
