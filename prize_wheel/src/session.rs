use log::{debug, info, warn};
use rand::Rng;
use std::time::Duration;

use crate::builder::PoolBuilder;
use crate::config::*;
use crate::SpinSelector;

/// Source of time and frames for the animation.
pub trait Scheduler {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;
    /// Returns when the next frame is due.
    fn wait_for_frame(&mut self);
}

/// Presentation of the wheel.
pub trait Renderer {
    fn draw_wheel(&mut self, participants: &[Participant], rotation: f64);
    fn announce_winner(&mut self, winner: &Participant);
}

/// The state of one raffle: the pool of participants still in the game, the winner
/// waiting to be removed, and the draws made so far.
///
/// The pool never changes while the wheel is spinning.
pub struct RaffleSession<R: Rng> {
    pool: Vec<Participant>,
    from_file: bool,
    selector: SpinSelector<R>,
    winner: Option<Participant>,
    history: Vec<Draw>,
}

impl<R: Rng> RaffleSession<R> {
    /// Starts a raffle with the given participants. Participants repeating an id are
    /// dropped.
    pub fn new(
        participants: Vec<Participant>,
        from_file: bool,
        selector: SpinSelector<R>,
    ) -> RaffleSession<R> {
        RaffleSession {
            pool: unique_pool(participants),
            from_file,
            selector,
            winner: None,
            history: Vec::new(),
        }
    }

    /// Starts a raffle with `count` numbered participants.
    pub fn from_count(
        count: usize,
        selector: SpinSelector<R>,
    ) -> Result<RaffleSession<R>, SessionError> {
        if count < 2 {
            return Err(SessionError::NotEnoughParticipants { count });
        }
        Ok(RaffleSession::new(
            PoolBuilder::numbered(count).build(),
            false,
            selector,
        ))
    }

    pub fn pool(&self) -> &[Participant] {
        &self.pool
    }

    /// True if the participants were loaded from a file (as opposed to a plain count).
    pub fn is_from_file(&self) -> bool {
        self.from_file
    }

    pub fn winner(&self) -> Option<&Participant> {
        self.winner.as_ref()
    }

    pub fn history(&self) -> &[Draw] {
        &self.history
    }

    pub fn is_spinning(&self) -> bool {
        self.selector.is_spinning()
    }

    /// True if a new spin may start.
    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && self.pool.len() >= 2
    }

    /// Starts a spin at scheduler time `now`.
    ///
    /// A winner that was not removed stays in the pool and is forgotten.
    pub fn start_spin(&mut self, now: Duration) -> Result<SpinOutcome, SessionError> {
        if self.is_spinning() {
            return Err(SessionError::SpinInProgress);
        }
        if self.pool.len() < 2 {
            return Err(SessionError::NotEnoughParticipants {
                count: self.pool.len(),
            });
        }
        if let Some(w) = self.winner.take() {
            info!("start_spin: {} was not removed and stays in the raffle", w);
        }
        self.selector
            .start_spin(self.pool.len(), now)
            .ok_or(SessionError::SpinInProgress)
    }

    /// Advances the spin in flight to scheduler time `now`.
    ///
    /// When the spin finishes, its pre-selected participant becomes the current winner.
    pub fn advance(&mut self, now: Duration) -> Option<Frame> {
        let frame = self.selector.on_frame(now)?;
        if let Frame::Finished { selected_index, .. } = &frame {
            let winner = self.pool[*selected_index].clone();
            info!("advance: winner: {}", winner);
            self.winner = Some(winner);
        }
        Some(frame)
    }

    /// Runs a whole spin, from the first frame to the announcement of the winner.
    pub fn spin<S: Scheduler, D: Renderer>(
        &mut self,
        scheduler: &mut S,
        renderer: &mut D,
    ) -> Result<Participant, SessionError> {
        let outcome = self.start_spin(scheduler.now())?;
        debug!("spin: outcome: {:?}", outcome);
        renderer.draw_wheel(&self.pool, 0.0);
        loop {
            scheduler.wait_for_frame();
            match self.advance(scheduler.now()) {
                Some(Frame::Rotating { rotation }) => renderer.draw_wheel(&self.pool, rotation),
                Some(Frame::Finished { rotation, .. }) => {
                    renderer.draw_wheel(&self.pool, rotation);
                    let winner = self.winner.clone().ok_or(SessionError::NoWinnerPending)?;
                    renderer.announce_winner(&winner);
                    return Ok(winner);
                }
                None => return Err(SessionError::NoWinnerPending),
            }
        }
    }

    /// Removes the current winner from the pool and records the draw.
    pub fn remove_winner(&mut self) -> Result<Draw, SessionError> {
        if self.is_spinning() {
            return Err(SessionError::SpinInProgress);
        }
        let winner = self.winner.take().ok_or(SessionError::NoWinnerPending)?;
        self.pool.retain(|p| p.id != winner.id);
        let draw = Draw {
            round: self.history.len() as u32 + 1,
            participant: winner,
            remaining: self.pool.len(),
        };
        info!(
            "remove_winner: round {}: {} removed, {} remaining",
            draw.round, draw.participant, draw.remaining
        );
        self.history.push(draw.clone());
        Ok(draw)
    }

    /// Starts a new raffle with other participants. The history is cleared.
    pub fn reset(
        &mut self,
        participants: Vec<Participant>,
        from_file: bool,
    ) -> Result<(), SessionError> {
        if self.is_spinning() {
            return Err(SessionError::SpinInProgress);
        }
        self.pool = unique_pool(participants);
        self.from_file = from_file;
        self.winner = None;
        self.history.clear();
        Ok(())
    }
}

fn unique_pool(participants: Vec<Participant>) -> Vec<Participant> {
    let count = participants.len();
    let mut builder = PoolBuilder::new();
    for p in participants {
        builder.add_participant(p);
    }
    if builder.len() != count {
        warn!(
            "unique_pool: {} invalid or duplicate participants dropped",
            count - builder.len()
        );
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Jumps forward by a fixed step at every frame.
    struct FastForward {
        now: Duration,
        step: Duration,
        frames: usize,
    }

    impl Scheduler for FastForward {
        fn now(&self) -> Duration {
            self.now
        }

        fn wait_for_frame(&mut self) {
            self.frames += 1;
            self.now += self.step;
        }
    }

    #[derive(Default)]
    struct Recorder {
        rotations: Vec<f64>,
        winners: Vec<Participant>,
    }

    impl Renderer for Recorder {
        fn draw_wheel(&mut self, _participants: &[Participant], rotation: f64) {
            self.rotations.push(rotation);
        }

        fn announce_winner(&mut self, winner: &Participant) {
            self.winners.push(winner.clone());
        }
    }

    fn selector(seed: u64) -> SpinSelector<StdRng> {
        SpinSelector::new(StdRng::seed_from_u64(seed), SpinRules::DEFAULT_RULES)
    }

    fn fast_forward() -> FastForward {
        FastForward {
            now: Duration::from_secs(100),
            step: Duration::from_millis(250),
            frames: 0,
        }
    }

    #[test]
    fn manual_count() {
        let session = RaffleSession::from_count(3, selector(0)).unwrap();
        let ids: Vec<&str> = session.pool().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(!session.is_from_file());
        assert!(matches!(
            RaffleSession::from_count(1, selector(0)),
            Err(SessionError::NotEnoughParticipants { count: 1 })
        ));
    }

    #[test]
    fn winner_is_the_preselected_participant() {
        for seed in 0..20 {
            let mut session = RaffleSession::from_count(7, selector(seed)).unwrap();
            let mut scheduler = fast_forward();
            let start = scheduler.now();
            let outcome = session.start_spin(start).unwrap();
            let expected = session.pool()[outcome.selected_index].clone();

            let mut finished = 0;
            while session.is_spinning() {
                scheduler.wait_for_frame();
                if let Some(Frame::Finished { selected_index, .. }) =
                    session.advance(scheduler.now())
                {
                    assert_eq!(selected_index, outcome.selected_index);
                    assert!(scheduler.now() - start >= SpinRules::DEFAULT_RULES.duration);
                    finished += 1;
                }
            }
            assert_eq!(finished, 1);
            assert_eq!(session.winner(), Some(&expected));
            assert_eq!(session.advance(scheduler.now()), None);
        }
    }

    #[test]
    fn spin_drives_the_collaborators() {
        let mut session = RaffleSession::from_count(5, selector(11)).unwrap();
        let mut scheduler = fast_forward();
        let mut renderer = Recorder::default();
        let winner = session.spin(&mut scheduler, &mut renderer).unwrap();

        // 5 seconds at 4 frames per second.
        assert_eq!(scheduler.frames, 20);
        assert_eq!(renderer.winners, vec![winner.clone()]);
        assert_eq!(session.winner(), Some(&winner));
        let last_rotation = *renderer.rotations.last().unwrap();
        assert!(renderer.rotations.windows(2).all(|w| w[0] <= w[1]));
        assert!(last_rotation >= 5.0 * std::f64::consts::TAU);
        assert!(last_rotation < 11.0 * std::f64::consts::TAU);
    }

    #[test]
    fn remove_winner_keeps_order() {
        let mut session = RaffleSession::from_count(5, selector(5)).unwrap();
        let before: Vec<Participant> = session.pool().to_vec();
        let winner = session
            .spin(&mut fast_forward(), &mut Recorder::default())
            .unwrap();

        let draw = session.remove_winner().unwrap();
        assert_eq!(draw.round, 1);
        assert_eq!(draw.participant, winner);
        assert_eq!(draw.remaining, 4);
        let expected: Vec<Participant> = before.into_iter().filter(|p| p.id != winner.id).collect();
        assert_eq!(session.pool(), expected.as_slice());
        assert_eq!(session.winner(), None);
        assert_eq!(session.remove_winner(), Err(SessionError::NoWinnerPending));
    }

    #[test]
    fn draws_until_two_remain() {
        let mut session = RaffleSession::from_count(4, selector(8)).unwrap();
        let mut scheduler = fast_forward();
        let mut renderer = Recorder::default();
        while session.can_spin() {
            session.spin(&mut scheduler, &mut renderer).unwrap();
            session.remove_winner().unwrap();
        }
        assert_eq!(session.pool().len(), 1);
        assert_eq!(session.history().len(), 3);
        let rounds: Vec<u32> = session.history().iter().map(|d| d.round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);
        assert_eq!(
            session.start_spin(scheduler.now()),
            Err(SessionError::NotEnoughParticipants { count: 1 })
        );
    }

    #[test]
    fn pool_is_frozen_while_spinning() {
        let mut session = RaffleSession::from_count(3, selector(4)).unwrap();
        session.start_spin(Duration::ZERO).unwrap();
        assert!(!session.can_spin());
        assert_eq!(
            session.start_spin(Duration::from_millis(10)),
            Err(SessionError::SpinInProgress)
        );
        assert_eq!(session.remove_winner(), Err(SessionError::SpinInProgress));
        assert_eq!(
            session.reset(vec![Participant::numbered(9)], false),
            Err(SessionError::SpinInProgress)
        );
        assert_eq!(session.pool().len(), 3);
    }

    #[test]
    fn reset_starts_over() {
        let mut session = RaffleSession::from_count(3, selector(4)).unwrap();
        session
            .spin(&mut fast_forward(), &mut Recorder::default())
            .unwrap();
        session.remove_winner().unwrap();

        let people = vec![
            Participant {
                id: "a".to_string(),
                name: "Ann".to_string(),
            },
            Participant {
                id: "a".to_string(),
                name: "Another Ann".to_string(),
            },
            Participant {
                id: "b".to_string(),
                name: "Ben".to_string(),
            },
        ];
        session.reset(people, true).unwrap();
        assert!(session.is_from_file());
        assert!(session.history().is_empty());
        let names: Vec<&str> = session.pool().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Ben"]);
    }
}
