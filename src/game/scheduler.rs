//! One-shot deferred tasks, checked once per tick against game time.

use crate::audio::Cue;

/// Work to run once its delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Drop a caught obstacle, if it is still alive.
    RemoveObstacle(u64),
    PlayCue(Cue),
    GameOver,
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    due_ms: u64,
    seq: u64,
    task: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, task: Deferred) {
        self.tasks.push(ScheduledTask {
            due_ms: now_ms + delay_ms,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Remove and return every task due at `now_ms`, earliest first.
    /// Tasks due at the same time come out in scheduling order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<Deferred> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due_ms <= now_ms);
        self.tasks = pending;
        due.sort_by_key(|t| (t.due_ms, t.seq));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn contains(&self, task: Deferred) -> bool {
        self.tasks.iter().any(|t| t.task == task)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_delay() {
        let mut s = Scheduler::new();
        s.schedule(1_000, 200, Deferred::GameOver);
        assert!(s.take_due(1_199).is_empty());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_task_fires_exactly_once() {
        let mut s = Scheduler::new();
        s.schedule(0, 100, Deferred::RemoveObstacle(3));
        assert_eq!(s.take_due(100), vec![Deferred::RemoveObstacle(3)]);
        assert!(s.take_due(500).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 200, Deferred::GameOver);
        s.schedule(0, 100, Deferred::PlayCue(Cue::Die));
        s.schedule(50, 50, Deferred::RemoveObstacle(1));
        assert_eq!(
            s.take_due(300),
            vec![
                Deferred::PlayCue(Cue::Die),
                Deferred::RemoveObstacle(1),
                Deferred::GameOver,
            ]
        );
    }

    #[test]
    fn test_contains_and_clear() {
        let mut s = Scheduler::new();
        s.schedule(0, 200, Deferred::GameOver);
        assert!(s.contains(Deferred::GameOver));
        assert!(!s.contains(Deferred::RemoveObstacle(0)));
        s.clear();
        assert!(s.is_empty());
    }
}
