//! Gesture surface: per-card drag tracking and dismissal animation.
//!
//! Each card in the deck gets one `CardSurface`. The surface recognizes only
//! horizontal movement (vertical drags are ignored at the input layer), turns
//! a released drag into a committed swipe when it passes the distance
//! threshold (or, with flick-on-swipe enabled, the velocity threshold), and
//! animates committed cards off the surface. It reports back through
//! `SurfaceEvent`s drained on the UI tick; the session decides what they mean.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::model::session::SwipeDirection;

/// Thresholds and animation speeds, in terminal cells and cells/second.
#[derive(Clone, Copy, Debug)]
pub struct SwipeConfig {
    /// Drag distance at which a release commits the swipe.
    pub distance_threshold: f32,
    /// Release velocity at which a flick commits even below the distance
    /// threshold.
    pub flick_velocity: f32,
    /// Whether a quick flick auto-completes a swipe.
    pub flick_on_swipe: bool,
    /// How fast a committed card flies out.
    pub exit_speed: f32,
    /// Offset at which the card counts as having left the surface.
    pub exit_distance: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 10.0,
            flick_velocity: 45.0,
            flick_on_swipe: true,
            exit_speed: 180.0,
            exit_distance: 70.0,
        }
    }
}

/// Events a surface delivers to the session controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A swipe committed (drag release past threshold, flick, or programmatic
    /// dismissal).
    Resolved {
        index: usize,
        direction: SwipeDirection,
    },
    /// The exit animation finished and the card is off the surface.
    LeftSurface { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SurfaceState {
    Resting,
    Dragging,
    Exiting(SwipeDirection),
    Gone,
}

/// Drag-and-dismiss state for one card.
pub struct CardSurface {
    index: usize,
    config: SwipeConfig,
    state: SurfaceState,
    offset: f32,
    samples: VecDeque<(Instant, f32)>,
    pending: Vec<SurfaceEvent>,
}

// Velocity is measured over the trailing samples inside this window.
const VELOCITY_WINDOW: Duration = Duration::from_millis(120);

// Below this span the samples carry no usable velocity signal.
const MIN_VELOCITY_WINDOW: Duration = Duration::from_millis(30);

impl CardSurface {
    pub fn new(index: usize, config: SwipeConfig) -> Self {
        Self {
            index,
            config,
            state: SurfaceState::Resting,
            offset: 0.0,
            samples: VecDeque::new(),
            pending: Vec::new(),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_gone(&self) -> bool {
        self.state == SurfaceState::Gone
    }

    /// Badge direction while a drag is past the commit threshold.
    pub fn committed_direction(&self) -> Option<SwipeDirection> {
        match self.state {
            SurfaceState::Dragging => {
                commit_decision(self.offset, self.release_velocity(), &self.config)
            }
            SurfaceState::Exiting(direction) => Some(direction),
            _ => None,
        }
    }

    pub fn begin_drag(&mut self) {
        if self.state != SurfaceState::Resting {
            return;
        }
        self.state = SurfaceState::Dragging;
        self.samples.clear();
        self.record_sample(Instant::now(), 0.0);
    }

    pub fn drag_to(&mut self, offset: f32) {
        self.drag_sample(Instant::now(), offset);
    }

    /// Drag update with an explicit timestamp. Separated from `drag_to` so
    /// velocity behavior is testable without real sleeps.
    pub fn drag_sample(&mut self, at: Instant, offset: f32) {
        if self.state != SurfaceState::Dragging {
            return;
        }
        self.offset = offset;
        self.record_sample(at, offset);
    }

    /// End the drag: commit the swipe or snap back to rest.
    pub fn release(&mut self) {
        if self.state != SurfaceState::Dragging {
            return;
        }
        match commit_decision(self.offset, self.release_velocity(), &self.config) {
            Some(direction) => self.dismiss(direction),
            None => self.restore_to_rest(),
        }
    }

    /// Programmatic dismissal, as bound to the like/dislike keys. A card that
    /// is already exiting or gone ignores the request.
    pub fn trigger_dismiss(&mut self, direction: SwipeDirection) {
        match self.state {
            SurfaceState::Resting | SurfaceState::Dragging => self.dismiss(direction),
            SurfaceState::Exiting(_) | SurfaceState::Gone => {}
        }
    }

    /// Snap back to the neutral resting position, including from a dismissed
    /// visual state when the session rules the dismissal invalid.
    pub fn restore_to_rest(&mut self) {
        self.state = SurfaceState::Resting;
        self.offset = 0.0;
        self.samples.clear();
    }

    /// Advance the exit animation; fires `LeftSurface` once the card has
    /// flown past the exit distance.
    pub fn advance(&mut self, dt: Duration) {
        if let SurfaceState::Exiting(direction) = self.state {
            self.offset += direction.sign() * self.config.exit_speed * dt.as_secs_f32();
            if self.offset.abs() >= self.config.exit_distance {
                self.state = SurfaceState::Gone;
                self.pending.push(SurfaceEvent::LeftSurface { index: self.index });
            }
        }
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.pending)
    }

    fn dismiss(&mut self, direction: SwipeDirection) {
        self.state = SurfaceState::Exiting(direction);
        // Start the fly-out from at least the threshold so a keyed dismissal
        // still reads as a swipe.
        if self.offset.abs() < self.config.distance_threshold {
            self.offset = direction.sign() * self.config.distance_threshold;
        }
        self.samples.clear();
        self.pending.push(SurfaceEvent::Resolved {
            index: self.index,
            direction,
        });
        tracing::debug!(index = self.index, direction = direction.as_str(), "Card dismissed");
    }

    fn record_sample(&mut self, at: Instant, offset: f32) {
        self.samples.push_back((at, offset));
        while let Some(&(oldest, _)) = self.samples.front() {
            if at.duration_since(oldest) > VELOCITY_WINDOW && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    fn release_velocity(&self) -> f32 {
        let (Some(&(first_at, first)), Some(&(last_at, last))) =
            (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };
        let dt = last_at.duration_since(first_at);
        if dt < MIN_VELOCITY_WINDOW {
            return 0.0;
        }
        (last - first) / dt.as_secs_f32()
    }
}

/// Whether a release at `offset` with `velocity` commits a swipe, and in
/// which direction. A pure function so the threshold rules are testable.
pub fn commit_decision(
    offset: f32,
    velocity: f32,
    config: &SwipeConfig,
) -> Option<SwipeDirection> {
    let distance_hit = offset.abs() >= config.distance_threshold;
    let flick_hit = config.flick_on_swipe && velocity.abs() >= config.flick_velocity;
    if !distance_hit && !flick_hit {
        return None;
    }
    // Distance wins on direction; a pure flick follows the velocity sign.
    let signed = if distance_hit { offset } else { velocity };
    if signed < 0.0 {
        Some(SwipeDirection::Left)
    } else {
        Some(SwipeDirection::Right)
    }
}
