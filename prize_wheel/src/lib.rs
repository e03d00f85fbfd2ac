pub mod builder;
mod config;
pub mod manual;
mod parser;
mod session;

use log::{debug, info};
use rand::Rng;
use std::f64::consts::TAU;
use std::time::Duration;

pub use crate::config::*;
pub use crate::parser::{parse_delimited_text, parse_tabular_rows};
pub use crate::session::*;

// **** Private structures ****

#[derive(PartialEq, Debug, Clone)]
struct ActiveSpin {
    outcome: SpinOutcome,
    // Scheduler time at which the spin started. Frames are computed from it.
    started_at: Duration,
}

#[derive(PartialEq, Debug, Clone)]
enum SpinState {
    Idle,
    Spinning(ActiveSpin),
}

/// Cubic ease-out: fast at the start, slowing down to a stop.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Computes the outcome of a spin from its two random draws, both in `[0, 1)`.
///
/// The wheel makes `min_turns + extra_turns * rotations_fraction` turns, plus
/// `angle_fraction` of a turn. The winner only depends on `angle_fraction`.
pub fn outcome_from_draws(
    rotations_fraction: f64,
    angle_fraction: f64,
    participant_count: usize,
    rules: &SpinRules,
) -> SpinOutcome {
    let turns = rules.min_turns as f64 + rules.extra_turns as f64 * rotations_fraction;
    let target_angle = angle_fraction * TAU;
    let total_rotation = turns * TAU + target_angle;
    let slice_angle = TAU / participant_count as f64;
    let selected_index = (target_angle / slice_angle).floor() as usize % participant_count;
    SpinOutcome {
        selected_index,
        total_rotation,
    }
}

/// The rotation of the wheel, `elapsed` after the start of a spin.
pub fn rotation_at(outcome: &SpinOutcome, elapsed: Duration, duration: Duration) -> f64 {
    outcome.total_rotation * ease_out_cubic(progress(elapsed, duration))
}

fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }
}

/// The slice passing under the pointer for a given rotation.
///
/// This is only meant for display purposes: the winner of a spin is the
/// `selected_index` of its outcome.
pub fn pointer_index(rotation: f64, participant_count: usize) -> usize {
    let slice_angle = TAU / participant_count as f64;
    (rotation.rem_euclid(TAU) / slice_angle).floor() as usize % participant_count
}

/// Picks winners and drives the animation of the wheel.
///
/// The winner is drawn when the spin starts. The frames that follow only animate the
/// wheel toward the rotation that was drawn together with it.
///
/// ```
/// use prize_wheel::{Frame, SpinRules, SpinSelector};
/// use rand::{rngs::StdRng, SeedableRng};
/// use std::time::Duration;
///
/// let mut selector = SpinSelector::new(StdRng::seed_from_u64(3), SpinRules::DEFAULT_RULES);
/// let outcome = selector.start_spin(4, Duration::ZERO).unwrap();
/// assert!(outcome.selected_index < 4);
///
/// let last = selector.on_frame(Duration::from_secs(60));
/// assert_eq!(
///     last,
///     Some(Frame::Finished {
///         rotation: outcome.total_rotation,
///         selected_index: outcome.selected_index
///     })
/// );
/// assert!(!selector.is_spinning());
/// ```
pub struct SpinSelector<R: Rng> {
    rng: R,
    rules: SpinRules,
    state: SpinState,
}

impl<R: Rng> SpinSelector<R> {
    pub fn new(rng: R, rules: SpinRules) -> SpinSelector<R> {
        SpinSelector {
            rng,
            rules,
            state: SpinState::Idle,
        }
    }

    pub fn rules(&self) -> &SpinRules {
        &self.rules
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning(_))
    }

    /// The outcome of the spin in flight, if any.
    pub fn current_outcome(&self) -> Option<SpinOutcome> {
        match &self.state {
            SpinState::Idle => None,
            SpinState::Spinning(spin) => Some(spin.outcome),
        }
    }

    /// Starts a spin at scheduler time `now` and returns its outcome.
    ///
    /// Returns None if a spin is already in flight. The caller must guarantee that
    /// `participant_count` is at least 2.
    pub fn start_spin(&mut self, participant_count: usize, now: Duration) -> Option<SpinOutcome> {
        debug_assert!(participant_count >= 2);
        if self.is_spinning() {
            debug!("start_spin: a spin is already in flight, ignoring");
            return None;
        }
        let rotations_fraction: f64 = self.rng.gen();
        let angle_fraction: f64 = self.rng.gen();
        let outcome =
            outcome_from_draws(rotations_fraction, angle_fraction, participant_count, &self.rules);
        info!(
            "start_spin: {} participants, draws ({:.6}, {:.6}) -> {:?}",
            participant_count, rotations_fraction, angle_fraction, outcome
        );
        self.state = SpinState::Spinning(ActiveSpin {
            outcome,
            started_at: now,
        });
        Some(outcome)
    }

    /// Advances the animation to scheduler time `now`.
    ///
    /// Returns `Frame::Finished` exactly once, on the first frame at or after the end of
    /// the animation, and goes back to idle. Returns None when idle.
    pub fn on_frame(&mut self, now: Duration) -> Option<Frame> {
        let spin = match &self.state {
            SpinState::Idle => return None,
            SpinState::Spinning(spin) => spin.clone(),
        };
        let elapsed = now.saturating_sub(spin.started_at);
        if progress(elapsed, self.rules.duration) < 1.0 {
            let rotation = rotation_at(&spin.outcome, elapsed, self.rules.duration);
            return Some(Frame::Rotating { rotation });
        }
        debug!("on_frame: spin finished after {:?}", elapsed);
        self.state = SpinState::Idle;
        Some(Frame::Finished {
            rotation: spin.outcome.total_rotation,
            selected_index: spin.outcome.selected_index,
        })
    }
}
