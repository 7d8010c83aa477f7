mod constants;
mod event;
mod game;
mod item;
mod ledger;

pub use constants::*;
pub use event::*;
pub use game::*;
pub use item::*;
pub use ledger::*;
