// The wheel, as seen from a terminal.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use crate::raffle::*;

/// Real time scheduler: one frame every `frame_interval`.
pub struct ClockScheduler {
    origin: Instant,
    frame_interval: Duration,
}

impl ClockScheduler {
    pub fn new(frame_interval: Duration) -> ClockScheduler {
        ClockScheduler {
            origin: Instant::now(),
            frame_interval,
        }
    }
}

impl Scheduler for ClockScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wait_for_frame(&mut self) {
        thread::sleep(self.frame_interval);
    }
}

/// Writes the wheel to the standard error, so that the summary on the standard output
/// stays clean.
pub struct TerminalRenderer {
    // Participants from a file get a full table, numbered ones only a count.
    show_table: bool,
    last_shown: Option<usize>,
}

impl TerminalRenderer {
    pub fn new(show_table: bool) -> TerminalRenderer {
        TerminalRenderer {
            show_table,
            last_shown: None,
        }
    }

    pub fn show_pool(&mut self, participants: &[Participant]) {
        eprintln!("{} participants", participants.len());
        if self.show_table {
            print_table(participants);
        }
    }

    pub fn show_remaining(&mut self, participants: &[Participant]) {
        match participants {
            [] => eprintln!("No participant left"),
            [last] => eprintln!("Last participant left: {}", last),
            _ => {
                eprintln!("{} participants left", participants.len());
                if self.show_table {
                    print_table(participants);
                }
            }
        }
    }
}

fn print_table(participants: &[Participant]) {
    let width = participants
        .iter()
        .map(|p| p.id.chars().count())
        .max()
        .unwrap_or(0)
        .max(2);
    eprintln!("  {:<width$}  Name", "ID", width = width);
    for p in participants {
        eprintln!("  {:<width$}  {}", p.id, p.name, width = width);
    }
}

impl Renderer for TerminalRenderer {
    fn draw_wheel(&mut self, participants: &[Participant], rotation: f64) {
        if participants.is_empty() {
            return;
        }
        let idx = pointer_index(rotation, participants.len());
        // Only redraw when the pointer moves to another participant.
        if self.last_shown == Some(idx) {
            return;
        }
        self.last_shown = Some(idx);
        let mut err = std::io::stderr();
        // Write errors are ignored.
        let _ = write!(err, "\r\x1b[2K> {}", participants[idx].name);
        let _ = err.flush();
    }

    fn announce_winner(&mut self, winner: &Participant) {
        self.last_shown = None;
        eprintln!("\r\x1b[2K*** Winner: {} ***", winner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_moves_forward() {
        let mut scheduler = ClockScheduler::new(Duration::from_millis(1));
        let before = scheduler.now();
        scheduler.wait_for_frame();
        assert!(scheduler.now() >= before + Duration::from_millis(1));
    }

    #[test]
    fn redraws_only_on_change() {
        let participants: Vec<Participant> = (1..=4).map(Participant::numbered).collect();
        let mut renderer = TerminalRenderer::new(false);
        renderer.draw_wheel(&participants, 0.0);
        assert_eq!(renderer.last_shown, Some(pointer_index(0.0, 4)));
        renderer.draw_wheel(&participants, 0.01);
        assert_eq!(renderer.last_shown, Some(pointer_index(0.01, 4)));
        renderer.announce_winner(&participants[0]);
        assert_eq!(renderer.last_shown, None);
        renderer.draw_wheel(&[], 1.0);
        assert_eq!(renderer.last_shown, None);
    }
}
