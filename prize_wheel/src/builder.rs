use log::warn;
use std::collections::HashSet;

pub use crate::config::*;

/// A builder for participant pools.
///
/// It keeps the insertion order and guarantees that all the ids are unique and that
/// neither the id nor the name is empty.
///
/// ```
/// use prize_wheel::builder::PoolBuilder;
///
/// let mut builder = PoolBuilder::new();
/// builder.add("001", "John");
/// builder.add("002", "Jane");
/// // Rejected: same id as John.
/// builder.add("001", "Johnny");
///
/// assert_eq!(builder.len(), 2);
/// let pool = builder.build();
/// assert_eq!(pool[1].name, "Jane");
/// ```
#[derive(Debug, Default)]
pub struct PoolBuilder {
    seen_ids: HashSet<String>,
    participants: Vec<Participant>,
}

impl PoolBuilder {
    pub fn new() -> PoolBuilder {
        PoolBuilder::default()
    }

    /// A pool of `count` synthesized participants, numbered from 1.
    pub fn numbered(count: usize) -> PoolBuilder {
        let mut builder = PoolBuilder::new();
        for number in 1..=count {
            builder.add_participant(Participant::numbered(number));
        }
        builder
    }

    /// Adds a participant, after trimming both fields.
    ///
    /// Returns false (and leaves the pool untouched) if the id or the name is empty,
    /// or if the id is already taken.
    pub fn add(&mut self, id: &str, name: &str) -> bool {
        self.add_participant(Participant {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
        })
    }

    pub fn add_participant(&mut self, participant: Participant) -> bool {
        if participant.id.is_empty() || participant.name.is_empty() {
            return false;
        }
        if !self.seen_ids.insert(participant.id.clone()) {
            warn!(
                "PoolBuilder: skipping {:?}: the id {:?} is already used",
                participant.name, participant.id
            );
            return false;
        }
        self.participants.push(participant);
        true
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn build(self) -> Vec<Participant> {
        self.participants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_pool() {
        let pool = PoolBuilder::numbered(3).build();
        assert_eq!(
            pool,
            vec![
                Participant::numbered(1),
                Participant::numbered(2),
                Participant::numbered(3)
            ]
        );
        assert_eq!(pool[2].id, "3");
        assert_eq!(pool[2].name, "Participant 3");
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut builder = PoolBuilder::new();
        assert!(!builder.add("  ", "Alice"));
        assert!(!builder.add("1", " "));
        assert!(builder.is_empty());
    }

    #[test]
    fn first_id_wins() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut builder = PoolBuilder::new();
        assert!(builder.add(" 7 ", "Alice"));
        assert!(!builder.add("7", "Bob"));
        assert!(builder.add("8", "Bob"));
        let pool = builder.build();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].id, "7");
        assert_eq!(pool[0].name, "Alice");
    }
}
