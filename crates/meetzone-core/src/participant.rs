//! Participant registry.
//!
//! The registry is an ordered list of [`Participant`]s owned by whoever
//! drives the session. Insertion order is display and message order.
//! Ids come from a per-registry monotonic counter, so they never collide
//! within a session even when names and zones repeat.

use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::time::parse_timezone;

/// Unique identifier of a participant within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(u64);

impl ParticipantId {
    /// Wraps a raw id value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A meeting participant: a display name and the zone they live in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub timezone: Tz,
}

impl Participant {
    /// Returns the IANA identifier of the participant's zone.
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }
}

/// Ordered, mutable list of participants.
#[derive(Debug, Clone)]
pub struct Registry {
    participants: Vec<Participant>,
    next_id: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a registry seeded with the two sample teams the form starts with.
    pub fn with_samples() -> Self {
        let mut registry = Self::new();
        registry.push("Equipo Buenos Aires".to_string(), chrono_tz::America::Buenos_Aires);
        registry.push("Equipo New York".to_string(), chrono_tz::America::New_York);
        registry
    }

    /// Appends a participant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyParticipantName`] if `name` is blank;
    /// the registry is left unchanged.
    pub fn add(&mut self, name: &str, timezone: Tz) -> Result<Participant, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyParticipantName);
        }
        Ok(self.push(name.to_string(), timezone))
    }

    /// Appends a participant, parsing the zone from its IANA identifier.
    ///
    /// The name is checked before the zone.
    pub fn add_named(
        &mut self,
        name: &str,
        timezone: &str,
    ) -> Result<Participant, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyParticipantName);
        }
        let tz = parse_timezone(timezone)
            .map_err(|_| ValidationError::UnknownTimezone(timezone.trim().to_string()))?;
        self.add(name, tz)
    }

    /// Removes the participant with the given id. Absent ids are a no-op.
    pub fn remove(&mut self, id: ParticipantId) -> Option<Participant> {
        let pos = self.participants.iter().position(|p| p.id == id)?;
        let removed = self.participants.remove(pos);
        debug!(id = %removed.id, name = %removed.name, "removed participant");
        Some(removed)
    }

    /// Current participants in insertion order.
    pub fn list(&self) -> &[Participant] {
        &self.participants
    }

    /// Looks up a participant by id.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Removes every participant. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.participants.clear();
    }

    fn push(&mut self, name: String, timezone: Tz) -> Participant {
        let participant = Participant {
            id: ParticipantId(self.next_id),
            name,
            timezone,
        };
        self.next_id += 1;
        debug!(id = %participant.id, name = %participant.name, tz = %timezone, "added participant");
        self.participants.push(participant.clone());
        participant
    }
}
