use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::rc::Rc;

use rkyv::util::AlignedVec;

use crate::input::Intent;
use crate::player::{Loadout, PlayerId};
use crate::replication::{Channel, PlayerKey, ReplicatedValue};

use super::{Message, Network, NetworkError, RosterEvent};

pub const DEFAULT_CAPACITY: usize = 8;

struct Envelope {
    ready_at: u64,
    bytes: AlignedVec,
}

struct PeerSlot {
    loadout: Loadout,
    inbox: VecDeque<Envelope>,
    polls: u64,
}

struct HubState {
    capacity: usize,
    delay_polls: u64,
    next_id: PlayerId,
    host: Option<PlayerId>,
    closed: bool,
    peers: BTreeMap<PlayerId, PeerSlot>,
    store: BTreeMap<(PlayerId, PlayerKey), AlignedVec>,
    shared: BTreeMap<Channel, AlignedVec>,
}

impl HubState {
    fn enqueue(&mut self, to: PlayerId, bytes: AlignedVec) {
        let delay = self.delay_polls;
        if let Some(slot) = self.peers.get_mut(&to) {
            slot.inbox.push_back(Envelope {
                ready_at: slot.polls + delay,
                bytes,
            });
        }
    }

    fn broadcast(&mut self, from: PlayerId, bytes: &AlignedVec) {
        let recipients: Vec<PlayerId> = self.peers.keys().copied().filter(|id| *id != from).collect();
        for id in recipients {
            self.enqueue(id, bytes.clone());
        }
    }
}

/// In-process session transport. Peers share one hub; the first peer to
/// connect becomes the host. Every message crosses the hub encoded, and
/// delivery can be held back by a fixed number of polls.
#[derive(Clone)]
pub struct LoopbackHub {
    state: Rc<RefCell<HubState>>,
}

impl Default for LoopbackHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl LoopbackHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                capacity,
                delay_polls: 0,
                next_id: 1,
                host: None,
                closed: false,
                peers: BTreeMap::new(),
                store: BTreeMap::new(),
                shared: BTreeMap::new(),
            })),
        }
    }

    /// Messages become visible to a peer only after it has polled `polls` more times.
    pub fn with_delay(self, polls: u64) -> Self {
        self.state.borrow_mut().delay_polls = polls;
        self
    }

    pub fn peer_count(&self) -> usize {
        self.state.borrow().peers.len()
    }

    pub fn host(&self) -> Option<PlayerId> {
        self.state.borrow().host
    }

    pub fn connect(&self, loadout: Loadout) -> Result<LoopbackPeer, NetworkError> {
        let mut hub = self.state.borrow_mut();
        if hub.closed {
            return Err(NetworkError::Closed);
        }
        if hub.peers.len() >= hub.capacity {
            return Err(NetworkError::SessionFull {
                capacity: hub.capacity,
            });
        }

        let id = hub.next_id;
        hub.next_id += 1;
        let is_host = hub.host.is_none();
        if is_host {
            hub.host = Some(id);
        }

        let joined = Message::Joined {
            player: id,
            loadout: loadout.clone(),
        }
        .encode()?;

        // Existing peers learn about the newcomer; the newcomer learns about everyone.
        let existing: Vec<(PlayerId, Loadout)> = hub
            .peers
            .iter()
            .map(|(peer, slot)| (*peer, slot.loadout.clone()))
            .collect();
        hub.broadcast(id, &joined);

        hub.peers.insert(
            id,
            PeerSlot {
                loadout,
                inbox: VecDeque::new(),
                polls: 0,
            },
        );

        for (peer, loadout) in existing {
            let bytes = Message::Joined {
                player: peer,
                loadout,
            }
            .encode()?;
            hub.enqueue(id, bytes);
        }
        hub.enqueue(id, joined);

        let baseline: Vec<AlignedVec> = hub
            .store
            .values()
            .chain(hub.shared.values())
            .cloned()
            .collect();
        for bytes in baseline {
            hub.enqueue(id, bytes);
        }

        log::debug!("peer {id} connected (host: {is_host})");

        Ok(LoopbackPeer {
            id,
            is_host,
            hub: self.state.clone(),
            players: HashMap::new(),
            shared: HashMap::new(),
            intents: Vec::new(),
            departed: HashSet::new(),
            connected: true,
        })
    }
}

pub struct LoopbackPeer {
    id: PlayerId,
    is_host: bool,
    hub: Rc<RefCell<HubState>>,
    players: HashMap<(PlayerId, PlayerKey), ReplicatedValue>,
    shared: HashMap<Channel, ReplicatedValue>,
    intents: Vec<(PlayerId, Intent)>,
    departed: HashSet<PlayerId>,
    connected: bool,
}

impl LoopbackPeer {
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Leaves the session. Remaining peers see the departure on their next
    /// poll; when the host leaves the session closes for everyone.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;

        let mut hub = self.hub.borrow_mut();
        hub.peers.remove(&self.id);
        hub.store.retain(|(player, _), _| *player != self.id);

        if hub.host == Some(self.id) {
            hub.closed = true;
            log::info!("host {} left, session closed", self.id);
            return;
        }

        match (Message::Quit { player: self.id }).encode() {
            Ok(bytes) => hub.broadcast(self.id, &bytes),
            Err(err) => log::warn!("failed to announce departure of {}: {err}", self.id),
        }
    }

    fn ensure_open(&self) -> Result<(), NetworkError> {
        if !self.connected || self.hub.borrow().closed {
            return Err(NetworkError::Closed);
        }
        Ok(())
    }

    fn apply(&mut self, message: Message, events: &mut Vec<RosterEvent>) {
        match message {
            Message::Joined { player, loadout } => {
                events.push(RosterEvent::Joined { player, loadout });
            }
            Message::Quit { player } => {
                self.players.retain(|(id, _), _| *id != player);
                self.departed.insert(player);
                events.push(RosterEvent::Left { player });
            }
            // Writes still in flight when the player's Quit arrived.
            Message::PlayerState { player, .. } if self.departed.contains(&player) => {}
            Message::PlayerState { player, key, value } => {
                self.players.insert((player, key), value);
            }
            Message::SharedState { channel, value } => {
                self.shared.insert(channel, value);
            }
            Message::Intent { player, intent } => {
                if self.is_host {
                    self.intents.push((player, intent));
                }
            }
        }
    }
}

impl Drop for LoopbackPeer {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl Network for LoopbackPeer {
    fn is_host(&self) -> bool {
        self.is_host
    }

    fn current_player_id(&self) -> PlayerId {
        self.id
    }

    fn poll(&mut self) -> Result<Vec<RosterEvent>, NetworkError> {
        self.ensure_open()?;

        let delivered: Vec<AlignedVec> = {
            let mut hub = self.hub.borrow_mut();
            let Some(slot) = hub.peers.get_mut(&self.id) else {
                return Err(NetworkError::Closed);
            };
            slot.polls += 1;

            let mut delivered = Vec::new();
            while slot
                .inbox
                .front()
                .is_some_and(|envelope| envelope.ready_at <= slot.polls)
            {
                if let Some(envelope) = slot.inbox.pop_front() {
                    delivered.push(envelope.bytes);
                }
            }
            delivered
        };

        let mut events = Vec::new();
        for bytes in delivered {
            let message = Message::decode(&bytes)?;
            self.apply(message, &mut events);
        }
        Ok(events)
    }

    fn get_state(&self, player: PlayerId, key: PlayerKey) -> Option<&ReplicatedValue> {
        self.players.get(&(player, key))
    }

    fn set_state(
        &mut self,
        player: PlayerId,
        key: PlayerKey,
        value: ReplicatedValue,
    ) -> Result<(), NetworkError> {
        self.ensure_open()?;
        if !self.is_host {
            return Err(NetworkError::NotHost);
        }
        if !self.hub.borrow().peers.contains_key(&player) {
            log::trace!("dropping {key:?} write for departed player {player}");
            return Ok(());
        }

        let bytes = Message::PlayerState {
            player,
            key,
            value: value.clone(),
        }
        .encode()?;

        let mut hub = self.hub.borrow_mut();
        hub.broadcast(self.id, &bytes);
        hub.store.insert((player, key), bytes);
        drop(hub);

        self.players.insert((player, key), value);
        Ok(())
    }

    fn shared_state(&self, channel: Channel) -> Option<&ReplicatedValue> {
        self.shared.get(&channel)
    }

    fn set_shared_state(
        &mut self,
        channel: Channel,
        value: ReplicatedValue,
    ) -> Result<(), NetworkError> {
        self.ensure_open()?;
        if !self.is_host {
            return Err(NetworkError::NotHost);
        }

        let bytes = Message::SharedState {
            channel,
            value: value.clone(),
        }
        .encode()?;

        let mut hub = self.hub.borrow_mut();
        hub.broadcast(self.id, &bytes);
        hub.shared.insert(channel, bytes);
        drop(hub);

        self.shared.insert(channel, value);
        Ok(())
    }

    fn send_intent(&mut self, intent: Intent) -> Result<(), NetworkError> {
        self.ensure_open()?;
        if self.is_host {
            self.intents.push((self.id, intent));
            return Ok(());
        }

        let bytes = Message::Intent {
            player: self.id,
            intent,
        }
        .encode()?;

        let mut hub = self.hub.borrow_mut();
        let host = hub.host.ok_or(NetworkError::Closed)?;
        hub.enqueue(host, bytes);
        Ok(())
    }

    fn take_intents(&mut self) -> Vec<(PlayerId, Intent)> {
        std::mem::take(&mut self.intents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_peer_hosts() {
        let hub = LoopbackHub::default();
        let host = hub.connect(Loadout::named("a")).unwrap();
        let guest = hub.connect(Loadout::named("b")).unwrap();

        assert!(host.is_host());
        assert!(!guest.is_host());
        assert_eq!(hub.host(), Some(host.current_player_id()));
    }

    #[test]
    fn capacity_is_enforced() {
        let hub = LoopbackHub::new(1);
        let _host = hub.connect(Loadout::default()).unwrap();
        assert!(matches!(
            hub.connect(Loadout::default()),
            Err(NetworkError::SessionFull { capacity: 1 })
        ));
    }

    #[test]
    fn everyone_sees_joins_including_their_own() {
        let hub = LoopbackHub::default();
        let mut host = hub.connect(Loadout::named("a")).unwrap();
        let mut guest = hub.connect(Loadout::named("b")).unwrap();

        let host_events = host.poll().unwrap();
        assert_eq!(host_events.len(), 2);

        let guest_events = guest.poll().unwrap();
        assert_eq!(
            guest_events,
            vec![
                RosterEvent::Joined {
                    player: 1,
                    loadout: Loadout::named("a"),
                },
                RosterEvent::Joined {
                    player: 2,
                    loadout: Loadout::named("b"),
                },
            ]
        );
    }

    #[test]
    fn guests_cannot_write() {
        let hub = LoopbackHub::default();
        let _host = hub.connect(Loadout::default()).unwrap();
        let mut guest = hub.connect(Loadout::default()).unwrap();

        assert!(matches!(
            guest.set_state(2, PlayerKey::Health, ReplicatedValue::Health(100)),
            Err(NetworkError::NotHost)
        ));
    }

    #[test]
    fn state_arrives_after_delay() {
        let hub = LoopbackHub::default().with_delay(2);
        let mut host = hub.connect(Loadout::default()).unwrap();
        let mut guest = hub.connect(Loadout::default()).unwrap();

        host.set_state(1, PlayerKey::Health, ReplicatedValue::Health(70))
            .unwrap();
        assert_eq!(
            host.get_state(1, PlayerKey::Health),
            Some(&ReplicatedValue::Health(70))
        );

        guest.poll().unwrap();
        assert_eq!(guest.get_state(1, PlayerKey::Health), None);
        guest.poll().unwrap();
        assert_eq!(
            guest.get_state(1, PlayerKey::Health),
            Some(&ReplicatedValue::Health(70))
        );
    }

    #[test]
    fn late_joiner_receives_current_state() {
        let hub = LoopbackHub::default();
        let mut host = hub.connect(Loadout::default()).unwrap();
        host.set_state(1, PlayerKey::Kills, ReplicatedValue::Kills(4))
            .unwrap();
        host.set_shared_state(Channel::Hits, ReplicatedValue::Hits(Vec::new()))
            .unwrap();

        let mut late = hub.connect(Loadout::default()).unwrap();
        late.poll().unwrap();
        assert_eq!(
            late.get_state(1, PlayerKey::Kills),
            Some(&ReplicatedValue::Kills(4))
        );
        assert_eq!(
            late.shared_state(Channel::Hits),
            Some(&ReplicatedValue::Hits(Vec::new()))
        );
    }

    #[test]
    fn intents_reach_the_host() {
        let hub = LoopbackHub::default();
        let mut host = hub.connect(Loadout::default()).unwrap();
        let mut guest = hub.connect(Loadout::default()).unwrap();

        let intent = Intent {
            fire: true,
            ..Default::default()
        };
        guest.send_intent(intent).unwrap();
        host.poll().unwrap();

        assert_eq!(host.take_intents(), vec![(2, intent)]);
        assert!(host.take_intents().is_empty());
    }

    #[test]
    fn departure_is_broadcast_and_purged() {
        let hub = LoopbackHub::default();
        let mut host = hub.connect(Loadout::default()).unwrap();
        let mut guest = hub.connect(Loadout::default()).unwrap();
        host.set_state(2, PlayerKey::Health, ReplicatedValue::Health(100))
            .unwrap();
        host.poll().unwrap();

        guest.disconnect();
        assert!(matches!(guest.poll(), Err(NetworkError::Closed)));

        let events = host.poll().unwrap();
        assert_eq!(events, vec![RosterEvent::Left { player: 2 }]);
        assert_eq!(hub.peer_count(), 1);
    }

    #[test]
    fn writes_for_departed_players_are_dropped() {
        let hub = LoopbackHub::default().with_delay(1);
        let mut host = hub.connect(Loadout::default()).unwrap();
        let mut guest = hub.connect(Loadout::default()).unwrap();
        let mut other = hub.connect(Loadout::default()).unwrap();

        guest.disconnect();
        host.set_state(2, PlayerKey::Health, ReplicatedValue::Health(40))
            .unwrap();
        assert_eq!(host.get_state(2, PlayerKey::Health), None);

        other.poll().unwrap();
        other.poll().unwrap();
        assert_eq!(other.get_state(2, PlayerKey::Health), None);

        let mut late = hub.connect(Loadout::default()).unwrap();
        late.poll().unwrap();
        late.poll().unwrap();
        assert_eq!(late.get_state(2, PlayerKey::Health), None);
    }

    #[test]
    fn state_arriving_after_quit_is_ignored() {
        let hub = LoopbackHub::default();
        let _host = hub.connect(Loadout::default()).unwrap();
        let mut guest = hub.connect(Loadout::default()).unwrap();
        let mut events = Vec::new();

        guest.apply(Message::Quit { player: 7 }, &mut events);
        guest.apply(
            Message::PlayerState {
                player: 7,
                key: PlayerKey::Position,
                value: ReplicatedValue::Position([1.0, 2.0, 3.0]),
            },
            &mut events,
        );

        assert_eq!(events, vec![RosterEvent::Left { player: 7 }]);
        assert_eq!(guest.get_state(7, PlayerKey::Position), None);
    }

    #[test]
    fn host_departure_closes_session() {
        let hub = LoopbackHub::default();
        let mut host = hub.connect(Loadout::default()).unwrap();
        let mut guest = hub.connect(Loadout::default()).unwrap();

        host.disconnect();
        assert!(matches!(guest.poll(), Err(NetworkError::Closed)));
        assert!(matches!(
            hub.connect(Loadout::default()),
            Err(NetworkError::Closed)
        ));
    }
}
