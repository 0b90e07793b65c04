//! Same-process link between both sides' models.
//!
//! ## Re-entrancy
//!
//! Handling an event can make the receiving model send events of its own
//! (a crash shoots its piece down, which announces a `destroy`). At that
//! moment the original sender is still borrowed in the middle of its own
//! exchange, so those nested events go into a mailbox instead. The mailbox
//! is drained in FIFO order once the outer exchange has returned, and
//! the responses to each queued event are applied to whichever model
//! emitted it.

use std::collections::VecDeque;

use crate::board::GameModel;
use crate::core::{Player, PlayerMap};

use super::{codec, GameRemote, WireEvent, WireResponse};

type Mailbox = VecDeque<(Player, WireEvent)>;

/// Owns both models and routes events between them.
#[derive(Clone, Debug)]
pub struct HotSeat {
    models: PlayerMap<GameModel>,
    mailbox: Mailbox,
    wire_codec: bool,
}

impl HotSeat {
    /// Create a link with two empty boards.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            models: PlayerMap::new(|player| GameModel::new(width, height, player)),
            mailbox: VecDeque::new(),
            wire_codec: false,
        }
    }

    /// Push every delivered event and response batch through the codec.
    #[must_use]
    pub fn with_wire_codec(mut self, enabled: bool) -> Self {
        self.wire_codec = enabled;
        self
    }

    #[must_use]
    pub fn model(&self, player: Player) -> &GameModel {
        &self.models[player]
    }

    /// Direct access, bypassing the link. Nothing sent from here reaches
    /// the opponent.
    pub fn model_mut(&mut self, player: Player) -> &mut GameModel {
        &mut self.models[player]
    }

    #[must_use]
    pub fn models(&self) -> &PlayerMap<GameModel> {
        &self.models
    }

    /// Run `f` on `side`'s model with a remote addressing the opponent,
    /// then deliver everything that was queued along the way.
    pub fn act<R>(&mut self, side: Player, f: impl FnOnce(&mut GameModel, &mut dyn GameRemote) -> R) -> R {
        let (me, peer) = self.models.pair_mut(side);
        let mut remote = HotSeatRemote {
            peer,
            mailbox: &mut self.mailbox,
            wire_codec: self.wire_codec,
        };
        let out = f(me, &mut remote);
        self.drain();
        out
    }

    fn drain(&mut self) {
        while let Some((emitter, event)) = self.mailbox.pop_front() {
            let (sender, peer) = self.models.pair_mut(emitter);
            let mut remote = HotSeatRemote {
                peer,
                mailbox: &mut self.mailbox,
                wire_codec: self.wire_codec,
            };
            let responses = remote.send(event);
            let client = *sender.client();
            let responses = client.translate(responses);
            client.handle_responses(sender, &responses);
        }
    }
}

/// Remote handed to the acting model: delivers straight to the peer.
pub struct HotSeatRemote<'a> {
    peer: &'a mut GameModel,
    mailbox: &'a mut Mailbox,
    wire_codec: bool,
}

impl GameRemote for HotSeatRemote<'_> {
    fn send(&mut self, event: WireEvent) -> Vec<WireResponse> {
        let event = if self.wire_codec {
            match codec::roundtrip_event(&event) {
                Ok(decoded) => decoded,
                Err(e) => {
                    log::error!("wire codec failed on {event:?}: {e}");
                    event
                }
            }
        } else {
            event
        };

        let mut relay = Relay {
            side: self.peer.player(),
            mailbox: &mut *self.mailbox,
        };
        let client = *self.peer.client();
        let responses = client.handle(&mut *self.peer, &mut relay, event);

        if self.wire_codec {
            match codec::roundtrip_responses(&responses) {
                Ok(decoded) => return decoded,
                Err(e) => log::error!("wire codec failed on responses: {e}"),
            }
        }
        responses
    }
}

/// Remote used while a model handles an inbound event: queues.
struct Relay<'a> {
    side: Player,
    mailbox: &'a mut Mailbox,
}

impl GameRemote for Relay<'_> {
    fn send(&mut self, event: WireEvent) -> Vec<WireResponse> {
        log::trace!("queued {event:?} from {}", self.side);
        self.mailbox.push_back((self.side, event));
        Vec::new()
    }
}
