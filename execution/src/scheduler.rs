//! Virtual-time scheduler for presentation sequences.
//!
//! Each game may have at most one pending task, keyed by the round it belongs
//! to. Time only moves when the owner calls [Scheduler::next_due] or
//! [Scheduler::advance_to], which keeps round timing deterministic.

use royal_types::casino::GameType;
use std::{collections::BTreeMap, time::Duration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Fires once when a settled round's presentation has elapsed.
    Reveal,
    /// Fires every `every` until cancelled.
    Tick { every: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Task {
    pub game: GameType,
    pub round: u64,
    pub kind: TaskKind,
    due: Duration,
}

impl Task {
    pub fn due(&self) -> Duration {
        self.due
    }
}

#[derive(Default)]
pub struct Scheduler {
    now: Duration,
    tasks: BTreeMap<GameType, Task>,
}

impl Scheduler {
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules a task for `game`, replacing anything still pending for it.
    /// Returns the replaced task.
    pub fn schedule(
        &mut self,
        game: GameType,
        round: u64,
        delay: Duration,
        kind: TaskKind,
    ) -> Option<Task> {
        let task = Task {
            game,
            round,
            kind,
            due: self.now + delay,
        };
        self.tasks.insert(game, task)
    }

    /// Cancels the pending task of `game` if it belongs to `round`.
    pub fn cancel(&mut self, game: GameType, round: u64) -> bool {
        match self.tasks.get(&game) {
            Some(task) if task.round == round => {
                self.tasks.remove(&game);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn pending(&self, game: GameType) -> Option<&Task> {
        self.tasks.get(&game)
    }

    /// Pops the earliest task due at or before `until`, moving the clock to
    /// its due time. Repeating tasks are re-armed before being returned.
    pub fn next_due(&mut self, until: Duration) -> Option<Task> {
        let (game, task) = self
            .tasks
            .iter()
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(game, task)| (task.due, **game))
            .map(|(game, task)| (*game, *task))?;

        self.now = self.now.max(task.due);
        match task.kind {
            TaskKind::Reveal => {
                self.tasks.remove(&game);
            }
            TaskKind::Tick { every } => {
                if let Some(pending) = self.tasks.get_mut(&game) {
                    pending.due = task.due + every;
                }
            }
        }
        Some(task)
    }

    /// Moves the clock forward to `until` once every due task has been drained.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_reveal_fires_once() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(GameType::Slots, 1, ms(1_100), TaskKind::Reveal);

        assert!(scheduler.next_due(ms(1_000)).is_none());
        let task = scheduler.next_due(ms(2_000)).expect("reveal not due");
        assert_eq!(task.game, GameType::Slots);
        assert_eq!(task.round, 1);
        assert_eq!(scheduler.now(), ms(1_100));
        assert!(scheduler.next_due(ms(10_000)).is_none());
    }

    #[test]
    fn test_tick_repeats_until_cancelled() {
        let mut scheduler = Scheduler::default();
        let every = ms(50);
        scheduler.schedule(GameType::Crash, 3, every, TaskKind::Tick { every });

        let mut fired = 0;
        while scheduler.next_due(ms(500)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 10);
        assert_eq!(scheduler.now(), ms(500));

        assert!(scheduler.cancel(GameType::Crash, 3));
        assert!(!scheduler.cancel(GameType::Crash, 3));
        assert!(scheduler.next_due(ms(5_000)).is_none());
    }

    #[test]
    fn test_cancel_requires_matching_round() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(GameType::Wheel, 8, ms(10), TaskKind::Reveal);
        assert!(!scheduler.cancel(GameType::Wheel, 7));
        assert!(scheduler.pending(GameType::Wheel).is_some());
    }

    #[test]
    fn test_tasks_fire_in_due_order() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(GameType::Roulette, 1, ms(300), TaskKind::Reveal);
        scheduler.schedule(GameType::Dice, 2, ms(100), TaskKind::Reveal);
        scheduler.schedule(GameType::Coinflip, 3, ms(200), TaskKind::Reveal);

        let order: Vec<GameType> = std::iter::from_fn(|| scheduler.next_due(ms(1_000)))
            .map(|task| task.game)
            .collect();
        assert_eq!(
            order,
            vec![GameType::Dice, GameType::Coinflip, GameType::Roulette]
        );

        scheduler.advance_to(ms(1_000));
        assert_eq!(scheduler.now(), ms(1_000));
    }

    #[test]
    fn test_one_task_per_game() {
        let mut scheduler = Scheduler::default();
        assert!(scheduler
            .schedule(GameType::Plinko, 1, ms(10), TaskKind::Reveal)
            .is_none());
        let replaced = scheduler.schedule(GameType::Plinko, 2, ms(20), TaskKind::Reveal);
        assert_eq!(replaced.map(|task| task.round), Some(1));
        assert_eq!(scheduler.pending(GameType::Plinko).unwrap().round, 2);
    }
}
