use std::collections::VecDeque;

use super::types::GameEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingEvent {
    pub timestamp_ms: u64,
    pub sequence: u32,
    pub event: GameEvent,
}

/// Bounded buffer of gameplay events waiting for the embedding app to drain them.
pub struct EventQueue {
    pending: VecDeque<PendingEvent>,
    next_sequence: u32,
    max_pending: usize,
    dropped: u64,
}

impl EventQueue {
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(max_pending),
            next_sequence: 0,
            max_pending: max_pending.max(1),
            dropped: 0,
        }
    }

    pub fn push(&mut self, timestamp_ms: u64, event: GameEvent) -> u32 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);

        if self.pending.len() >= self.max_pending {
            self.evict();
        }

        self.pending.push_back(PendingEvent {
            timestamp_ms,
            sequence,
            event,
        });

        sequence
    }

    pub fn drain(&mut self) -> Vec<PendingEvent> {
        self.pending.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingEvent> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Events discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn evict(&mut self) {
        let index = self
            .pending
            .iter()
            .position(|e| e.event.is_transient())
            .unwrap_or(0);
        if self.pending.remove(index).is_some() {
            self.dropped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_drops_transient_first() {
        let mut queue = EventQueue::new(2);

        queue.push(0, GameEvent::PlayerDeath { player_id: 1 });
        queue.push(
            0,
            GameEvent::DamageDealt {
                attacker_id: 2,
                target_id: 1,
                damage: 10,
                remaining_health: 90,
            },
        );
        queue.push(0, GameEvent::PlayerKill {
            killer_id: 2,
            victim_id: 1,
        });

        let events: Vec<_> = queue.drain().into_iter().map(|e| e.event).collect();
        assert_eq!(
            events,
            vec![
                GameEvent::PlayerDeath { player_id: 1 },
                GameEvent::PlayerKill {
                    killer_id: 2,
                    victim_id: 1,
                },
            ]
        );
        assert_eq!(queue.dropped(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn overflow_without_transient_drops_oldest() {
        let mut queue = EventQueue::new(1);
        queue.push(0, GameEvent::PlayerLeft { player_id: 1 });
        queue.push(5, GameEvent::PlayerLeft { player_id: 2 });

        let drained = queue.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].sequence, 1);
        assert_eq!(drained[0].event, GameEvent::PlayerLeft { player_id: 2 });
    }
}
