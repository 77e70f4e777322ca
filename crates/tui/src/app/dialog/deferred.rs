use super::kind::{DialogAction, DialogConfig, DialogKind, DialogValue};
use super::pin::PinVerdict;
use std::time::{Duration, Instant};

pub const PIN_EVALUATE_DELAY: Duration = Duration::from_millis(300);
pub const PIN_FEEDBACK_DELAY: Duration = Duration::from_millis(500);
pub const CALLBACK_DEFER: Duration = Duration::from_millis(10);
pub const STEP_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub enum DeferredTask {
    EvaluatePin,
    FinishPin(PinVerdict),
    Invoke {
        kind: DialogKind,
        action: DialogAction,
        value: DialogValue,
    },
    Open {
        kind: DialogKind,
        config: DialogConfig,
    },
}

#[derive(Debug, Clone)]
pub struct Deferred {
    pub due: Instant,
    pub generation: u64,
    pub task: DeferredTask,
}

/// Timer queue drained by the event loop. Entries keep insertion order among
/// equal deadlines.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    entries: Vec<Deferred>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, due: Instant, generation: u64, task: DeferredTask) {
        let index = self.entries.partition_point(|entry| entry.due <= due);
        self.entries.insert(
            index,
            Deferred {
                due,
                generation,
                task,
            },
        );
    }

    pub fn pop_due(&mut self, now: Instant) -> Option<Deferred> {
        if self.entries.first()?.due > now {
            return None;
        }
        Some(self.entries.remove(0))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{DeferredQueue, DeferredTask};
    use std::time::{Duration, Instant};

    #[test]
    fn pops_in_deadline_order() {
        let start = Instant::now();
        let mut queue = DeferredQueue::default();
        queue.schedule(start + Duration::from_millis(30), 1, DeferredTask::EvaluatePin);
        queue.schedule(start + Duration::from_millis(10), 2, DeferredTask::EvaluatePin);
        queue.schedule(start + Duration::from_millis(10), 3, DeferredTask::EvaluatePin);

        assert!(queue.pop_due(start).is_none());
        let later = start + Duration::from_millis(50);
        let order: Vec<u64> = std::iter::from_fn(|| queue.pop_due(later))
            .map(|entry| entry.generation)
            .collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn entries_wait_for_their_deadline() {
        let start = Instant::now();
        let mut queue = DeferredQueue::default();
        queue.schedule(start + Duration::from_millis(500), 1, DeferredTask::EvaluatePin);
        queue.schedule(start + Duration::from_millis(300), 2, DeferredTask::EvaluatePin);
        assert!(queue.pop_due(start + Duration::from_millis(299)).is_none());
        let first = queue.pop_due(start + Duration::from_millis(300)).expect("due");
        assert_eq!(first.generation, 2);
        assert_eq!(queue.len(), 1);
    }
}
