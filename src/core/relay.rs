//! Session relay
//!
//! Once two players are paired, forwards board-state and outcome events
//! between exactly those two until the session ends. The opponent handle is
//! looked up in the registry on every call; there are no per-session
//! forwarding callbacks to leak across repeated pairings.

use chrono::{DateTime, Utc};
use log::{debug, info};
use uuid::Uuid;

use crate::core::matchmaker::Pairing;
use crate::core::message::{GameOutcome, ServerMessage, Side};
use crate::core::queue::TimeBudget;
use crate::core::registry::PlayerRegistry;

/// Observability record for an established session; the pairing itself
/// lives in the two connections' mutual opponent fields.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: String,
    pub white: String,
    pub black: String,
    pub time_budget: TimeBudget,
    pub started_at: DateTime<Utc>,
}

/// Link both players and notify them of the match.
///
/// The waiting player receives White, the newly arriving player Black.
/// Returns `None` if either side disconnected since the pairing was made.
pub fn establish(registry: &mut PlayerRegistry, pairing: &Pairing) -> Option<GameSession> {
    if registry.lookup(&pairing.white).is_none() || registry.lookup(&pairing.black).is_none() {
        debug!("Dropping pairing {:?}: a party disconnected before establishment", pairing);
        return None;
    }

    if let Some(white) = registry.lookup_mut(&pairing.white) {
        white.opponent_id = Some(pairing.black.clone());
        white.side = Some(Side::White);
    }
    if let Some(black) = registry.lookup_mut(&pairing.black) {
        black.opponent_id = Some(pairing.white.clone());
        black.side = Some(Side::Black);
    }

    registry.send_to(
        &pairing.white,
        &ServerMessage::MatchMade {
            side: Side::White,
            time_budget: pairing.time_budget,
        },
    );
    registry.send_to(
        &pairing.black,
        &ServerMessage::MatchMade {
            side: Side::Black,
            time_budget: pairing.time_budget,
        },
    );

    let session = GameSession {
        id: Uuid::new_v4().to_string(),
        white: pairing.white.clone(),
        black: pairing.black.clone(),
        time_budget: pairing.time_budget,
        started_at: Utc::now(),
    };
    info!(
        "Session {} started: {} (w) vs {} (b), {}",
        session.id, session.white, session.black, session.time_budget
    );
    Some(session)
}

/// Forward a board-state snapshot to the sender's opponent.
///
/// Dropped silently when the sender is not in a session or the opponent is
/// gone; the sender will receive a disconnect outcome through the normal
/// cleanup path instead.
pub fn relay_state_update(registry: &PlayerRegistry, from: &str, fen: &str, turn: &str) -> bool {
    let opponent_id = match registry.lookup(from).and_then(|c| c.opponent_id.as_ref()) {
        Some(opponent_id) => opponent_id,
        None => {
            debug!("Dropping state update from unpaired player {}", from);
            return false;
        }
    };

    registry.send_to(
        opponent_id,
        &ServerMessage::SyncStateFromServer {
            fen: fen.to_string(),
            turn: turn.to_string(),
        },
    )
}

/// Forward a terminal outcome to the sender's opponent and end the session.
///
/// Both players' pairing fields are cleared in the same step, so no further
/// state updates can flow for this pairing.
pub fn relay_outcome(registry: &mut PlayerRegistry, from: &str, outcome: GameOutcome) -> bool {
    let opponent_id = match registry.lookup(from).and_then(|c| c.opponent_id.clone()) {
        Some(opponent_id) => opponent_id,
        None => {
            debug!("Dropping outcome from unpaired player {}", from);
            return false;
        }
    };

    let delivered = registry.send_to(
        &opponent_id,
        &ServerMessage::GameOverFromServer { outcome },
    );

    if let Some(opponent) = registry.lookup_mut(&opponent_id) {
        opponent.clear_session();
    }
    if let Some(sender) = registry.lookup_mut(from) {
        sender.clear_session();
    }
    delivered
}

/// Resolve the outcome of a session whose participant disconnected.
///
/// The surviving opponent is declared the winner and receives a single
/// `game_over_from_server` with reason "disconnect"; its pairing fields are
/// cleared. The departed connection has already been removed from the
/// registry, so only the survivor needs clearing.
pub fn resolve_disconnect_outcome(
    registry: &mut PlayerRegistry,
    departed_id: &str,
    departed_opponent: Option<&str>,
) -> bool {
    let opponent_id = match departed_opponent {
        Some(opponent_id) => opponent_id,
        None => return false,
    };

    let opponent = match registry.lookup_mut(opponent_id) {
        Some(opponent) => opponent,
        None => return false,
    };

    let outcome = GameOutcome {
        reason: "disconnect".to_string(),
        winner: opponent.side.map(|side| side.name().to_string()),
        message: "Your opponent disconnected".to_string(),
    };
    let delivered = opponent.send_message(&ServerMessage::GameOverFromServer { outcome });
    opponent.clear_session();

    info!(
        "Session between {} and {} ended by disconnect of {}",
        departed_id, opponent_id, departed_id
    );
    delivered
}
