//! The swipe-session state machine: one batch of cards from load to results.
//!
//! `SwipeSession` is pure and synchronous. It owns the deck, the top-of-stack
//! index, the liked cards, and the phase, and it is the single source of truth
//! for "which card is actually on top". Everything async (fetching, animation,
//! input) lives elsewhere and talks to the session through these methods.

use std::time::{Duration, Instant};

/// Cards per batch.
pub const DECK_SIZE: usize = 10;

const LIKE_PULSE_DURATION: Duration = Duration::from_millis(700);

/// Opaque per-card identifier, unique across batches within one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardId(u64);

#[derive(Clone, Debug)]
pub struct Card {
    pub id: CardId,
    pub image_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }

    /// Horizontal sign of the direction, for offset math.
    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Lifecycle of one batch. Transitions form a strict cycle:
/// `Loading -> Playing -> Results -> Loading -> ...`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Playing,
    Results,
}

/// Handle for one load attempt. A completion carrying a stale token is
/// discarded, so an overlapping reload can never overwrite a newer deck.
#[derive(Clone, Copy, Debug)]
pub struct LoadToken {
    generation: u64,
    n: usize,
}

impl LoadToken {
    pub fn batch_size(&self) -> usize {
        self.n
    }
}

/// Instruction for the gesture surface after a card reports leaving the
/// surface out of order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceCommand {
    Restore,
}

pub struct SwipeSession {
    deck: Vec<Card>,
    current_index: isize,
    liked: Vec<Card>,
    phase: Phase,
    generation: u64,
    batch_size: usize,
    results_reached: bool,
    load_error: Option<String>,
    like_pulse: Option<Instant>,
    next_card_id: u64,
}

impl SwipeSession {
    pub fn new() -> Self {
        Self {
            deck: Vec::new(),
            current_index: -1,
            liked: Vec::new(),
            phase: Phase::Loading,
            generation: 0,
            batch_size: DECK_SIZE,
            results_reached: false,
            load_error: None,
            like_pulse: None,
            next_card_id: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn current_index(&self) -> isize {
        self.current_index
    }

    pub fn liked(&self) -> &[Card] {
        &self.liked
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.deck.get(index)
    }

    /// Start a load attempt for `n` cards. Bumps the generation, so any load
    /// still in flight is invalidated rather than raced against.
    pub fn begin_load(&mut self, n: usize) -> LoadToken {
        self.generation += 1;
        self.batch_size = n;
        self.phase = Phase::Loading;
        self.load_error = None;
        tracing::debug!(n, generation = self.generation, "Load started");
        LoadToken {
            generation: self.generation,
            n,
        }
    }

    /// Install a freshly fetched deck. Returns `false` (and changes nothing)
    /// when the token is stale.
    pub fn complete_load(&mut self, token: LoadToken, image_urls: Vec<String>) -> bool {
        if token.generation != self.generation {
            tracing::debug!(
                stale = token.generation,
                current = self.generation,
                "Ignoring stale load completion"
            );
            return false;
        }

        self.deck = image_urls
            .into_iter()
            .map(|image_url| {
                let id = CardId(self.next_card_id);
                self.next_card_id += 1;
                Card { id, image_url }
            })
            .collect();
        self.current_index = self.deck.len() as isize - 1;
        self.liked.clear();
        self.like_pulse = None;
        self.load_error = None;

        if self.deck.is_empty() {
            self.phase = Phase::Results;
            self.results_reached = true;
        } else {
            self.phase = Phase::Playing;
            self.results_reached = false;
        }
        tracing::info!(
            cards = self.deck.len(),
            generation = self.generation,
            "Deck installed"
        );
        true
    }

    /// Record a batch-level load failure as an observable state. Stale tokens
    /// are ignored. Per-image failures never reach here; a card whose image
    /// cannot be fetched stays in the deck regardless.
    pub fn fail_load(&mut self, token: LoadToken, message: String) -> bool {
        if token.generation != self.generation {
            return false;
        }
        tracing::error!(error = %message, "Batch load failed");
        self.load_error = Some(message);
        true
    }

    /// Whether the user can currently act on a top card.
    pub fn can_swipe(&self) -> bool {
        self.phase == Phase::Playing && self.current_index >= 0
    }

    /// The deck index a programmatic dismissal should target, or `None` when
    /// there is nothing left to dismiss.
    pub fn dismiss_target(&self) -> Option<usize> {
        if !self.can_swipe() {
            return None;
        }
        let index = self.current_index as usize;
        if index >= self.deck.len() {
            return None;
        }
        Some(index)
    }

    /// Resolve a swipe for the card at `index`. Only the current top card can
    /// resolve; anything else (duplicate delivery, racing callbacks) is a
    /// logged no-op, so the operation is idempotent per logical swipe.
    pub fn resolve_swipe(&mut self, index: usize, direction: SwipeDirection) -> bool {
        if self.phase != Phase::Playing {
            tracing::debug!(index, phase = ?self.phase, "Swipe outside play ignored");
            return false;
        }
        if self.current_index < 0 || index as isize != self.current_index {
            tracing::debug!(
                index,
                current = self.current_index,
                "Out-of-order swipe ignored"
            );
            return false;
        }

        let card = self.deck[index].clone();
        if direction == SwipeDirection::Right {
            tracing::info!(index, url = %card.image_url, "Liked");
            self.liked.push(card);
            self.like_pulse = Some(Instant::now());
        } else {
            tracing::info!(index, url = %card.image_url, "Disliked");
        }
        self.current_index -= 1;

        if self.current_index < 0 && !self.deck.is_empty() && !self.results_reached {
            self.results_reached = true;
            self.phase = Phase::Results;
            tracing::info!(liked = self.liked.len(), total = self.deck.len(), "Deck exhausted");
        }
        true
    }

    /// A card finished its exit animation. When the session still considers
    /// that card on top (`current_index >= index`), the swipe it belonged to
    /// was never resolved here, so the surface must snap it back rather than
    /// leave the stack visually out of step with the index bookkeeping.
    pub fn reconcile_left_surface(&self, index: usize) -> Option<SurfaceCommand> {
        if self.current_index >= index as isize {
            tracing::warn!(index, current = self.current_index, "Restoring unresolved card");
            Some(SurfaceCommand::Restore)
        } else {
            None
        }
    }

    /// A new batch may be requested from the results screen, or as a retry
    /// after a failed load.
    pub fn can_restart(&self) -> bool {
        self.phase == Phase::Results || self.load_error.is_some()
    }

    /// Whether the transient "liked" pulse is currently showing.
    pub fn like_pulse_active(&self) -> bool {
        self.like_pulse
            .is_some_and(|since| since.elapsed() < LIKE_PULSE_DURATION)
    }

    /// Drops the pulse once its duration has passed. Called from the UI tick.
    pub fn expire_like_pulse(&mut self) {
        if let Some(since) = self.like_pulse {
            if since.elapsed() >= LIKE_PULSE_DURATION {
                self.like_pulse = None;
            }
        }
    }
}

impl Default for SwipeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://cataas.com/cat?test-{i}")).collect()
    }

    fn loaded_session(n: usize) -> SwipeSession {
        let mut session = SwipeSession::new();
        let token = session.begin_load(n);
        assert!(session.complete_load(token, urls(n)));
        session
    }

    #[test]
    fn load_initializes_deck_index_and_phase() {
        let session = loaded_session(5);
        assert_eq!(session.deck().len(), 5);
        assert_eq!(session.current_index(), 4);
        assert!(session.liked().is_empty());
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn empty_batch_goes_straight_to_results() {
        let session = loaded_session(0);
        assert_eq!(session.phase(), Phase::Results);
        assert!(session.liked().is_empty());
        assert_eq!(session.current_index(), -1);
    }

    #[test]
    fn swipes_decrement_index_by_one_and_stop_at_minus_one() {
        let mut session = loaded_session(3);
        assert!(session.resolve_swipe(2, SwipeDirection::Left));
        assert_eq!(session.current_index(), 1);
        assert!(session.resolve_swipe(1, SwipeDirection::Left));
        assert!(session.resolve_swipe(0, SwipeDirection::Left));
        assert_eq!(session.current_index(), -1);
        // Nothing left to resolve; index never goes below -1.
        assert!(!session.resolve_swipe(0, SwipeDirection::Left));
        assert_eq!(session.current_index(), -1);
    }

    #[test]
    fn liked_set_preserves_swipe_order() {
        let mut session = loaded_session(3);
        let top = session.card_at(2).unwrap().clone();
        let bottom = session.card_at(0).unwrap().clone();

        session.resolve_swipe(2, SwipeDirection::Right);
        session.resolve_swipe(1, SwipeDirection::Left);
        session.resolve_swipe(0, SwipeDirection::Right);

        assert_eq!(session.current_index(), -1);
        assert_eq!(session.phase(), Phase::Results);
        let liked: Vec<_> = session.liked().iter().map(|c| c.id).collect();
        assert_eq!(liked, vec![top.id, bottom.id]);
    }

    #[test]
    fn out_of_order_swipes_are_idempotent_no_ops() {
        let mut session = loaded_session(3);
        // Not the top card.
        assert!(!session.resolve_swipe(0, SwipeDirection::Right));
        assert!(!session.resolve_swipe(1, SwipeDirection::Right));
        assert_eq!(session.current_index(), 2);
        assert!(session.liked().is_empty());

        assert!(session.resolve_swipe(2, SwipeDirection::Right));
        // Duplicate delivery of the same swipe.
        assert!(!session.resolve_swipe(2, SwipeDirection::Right));
        assert_eq!(session.liked().len(), 1);
    }

    #[test]
    fn swipes_outside_play_are_rejected() {
        let mut session = loaded_session(3);
        assert!(session.resolve_swipe(2, SwipeDirection::Right));

        // A reload starts while the old deck is still in place. Late swipe
        // deliveries must not touch the liked set or force Results.
        session.begin_load(3);
        assert!(!session.resolve_swipe(1, SwipeDirection::Right));
        assert_eq!(session.liked().len(), 1);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.phase(), Phase::Loading);
    }

    #[test]
    fn results_transition_fires_exactly_once() {
        let mut session = loaded_session(1);
        session.resolve_swipe(0, SwipeDirection::Left);
        assert_eq!(session.phase(), Phase::Results);
        // Repeated exhausted-deck events cannot re-trigger it.
        assert!(!session.resolve_swipe(0, SwipeDirection::Left));
        assert_eq!(session.phase(), Phase::Results);

        let token = session.begin_load(1);
        assert_eq!(session.phase(), Phase::Loading);
        session.complete_load(token, urls(1));
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn left_surface_reconciliation() {
        let mut session = loaded_session(3);
        session.resolve_swipe(2, SwipeDirection::Left);
        // Already resolved in order: no-op.
        assert_eq!(session.reconcile_left_surface(2), None);
        // Logically still on top (or below the top): restore.
        assert_eq!(
            session.reconcile_left_surface(1),
            Some(SurfaceCommand::Restore)
        );
        assert_eq!(
            session.reconcile_left_surface(0),
            Some(SurfaceCommand::Restore)
        );
    }

    #[test]
    fn stale_completion_cannot_overwrite_newer_deck() {
        let mut session = SwipeSession::new();
        let stale = session.begin_load(3);
        let fresh = session.begin_load(2);
        assert!(session.complete_load(fresh, urls(2)));
        let top_id = session.card_at(1).unwrap().id;

        assert!(!session.complete_load(stale, urls(3)));
        assert_eq!(session.deck().len(), 2);
        assert_eq!(session.card_at(1).unwrap().id, top_id);
        assert!(!session.fail_load(stale, "late failure".into()));
        assert!(session.load_error().is_none());
    }

    #[test]
    fn load_failure_is_observable_and_retryable() {
        let mut session = SwipeSession::new();
        let token = session.begin_load(3);
        assert!(session.fail_load(token, "connection refused".into()));
        assert_eq!(session.load_error(), Some("connection refused"));
        assert!(session.can_restart());

        // Retry clears the error before the next outcome lands.
        let retry = session.begin_load(3);
        assert!(session.load_error().is_none());
        assert!(session.complete_load(retry, urls(3)));
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn dismiss_target_is_top_card_or_nothing() {
        let mut session = loaded_session(2);
        assert_eq!(session.dismiss_target(), Some(1));
        session.resolve_swipe(1, SwipeDirection::Left);
        assert_eq!(session.dismiss_target(), Some(0));
        session.resolve_swipe(0, SwipeDirection::Left);
        assert_eq!(session.dismiss_target(), None);
    }

    #[test]
    fn like_pulse_arms_on_right_swipes_only() {
        let mut session = loaded_session(2);
        session.resolve_swipe(1, SwipeDirection::Left);
        assert!(!session.like_pulse_active());
        session.resolve_swipe(0, SwipeDirection::Right);
        assert!(session.like_pulse_active());
    }

    #[test]
    fn card_ids_are_unique_across_batches() {
        let mut session = loaded_session(2);
        let first: Vec<_> = session.deck().iter().map(|c| c.id).collect();
        let token = session.begin_load(2);
        session.complete_load(token, urls(2));
        for card in session.deck() {
            assert!(!first.contains(&card.id));
        }
    }
}
