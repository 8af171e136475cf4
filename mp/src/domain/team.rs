//! Teams and participants

use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// One participant with a number of topics to present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub topics: u32,
}

impl Participant {
    pub fn new(name: impl Into<String>, topics: u32) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            topics,
        }
    }

    /// Parse a `Name:count` participant spec from the CLI
    pub fn parse_spec(spec: &str) -> Result<Self> {
        let (name, count) = spec
            .rsplit_once(':')
            .ok_or_else(|| eyre!("Invalid participant spec '{}'. Use Name:count, e.g. 'Alice:3'", spec))?;
        let topics: u32 = count
            .trim()
            .parse()
            .map_err(|_| eyre!("Invalid topic count in participant spec '{}'", spec))?;
        Ok(Self::new(name.trim(), topics))
    }
}

/// A named group with topics to be scheduled
///
/// Either carries a participant breakdown or a flat topic total. Meetings
/// reference teams by name string only; there is no referential integrity
/// after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Flat total-count mode, used when no per-participant breakdown exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_topics: Option<u32>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            participants: Vec::new(),
            total_topics: None,
        }
    }

    /// Total topics across the roster, or the flat total
    pub fn total_topics(&self) -> u32 {
        if self.participants.is_empty() {
            self.total_topics.unwrap_or(0)
        } else {
            self.participants.iter().map(|p| p.topics).sum()
        }
    }

    /// Input-time checks: non-empty names, positive topic counts
    pub fn validate(&self) -> Result<()> {
        debug!(team = %self.name, "Team::validate");
        if self.name.trim().is_empty() {
            return Err(eyre!("The team name is required."));
        }
        if self.participants.is_empty() && self.total_topics.is_none() {
            return Err(eyre!("Add at least one participant or a total topic count."));
        }
        if self
            .participants
            .iter()
            .any(|p| p.name.trim().is_empty() || p.topics == 0)
        {
            return Err(eyre!("Every participant needs a name and at least one topic."));
        }
        if let Some(total) = self.total_topics
            && total == 0
        {
            return Err(eyre!("The total topic count must be positive."));
        }
        Ok(())
    }
}

/// Resolve a team by unique id prefix
pub fn find_team<'a>(teams: &'a [Team], id_prefix: &str) -> Result<&'a Team> {
    let matches: Vec<&Team> = teams.iter().filter(|t| t.id.starts_with(id_prefix)).collect();
    match matches.len() {
        0 => Err(eyre!("No team matches id '{}'", id_prefix)),
        1 => Ok(matches[0]),
        n => Err(eyre!("Id '{}' is ambiguous ({} teams match)", id_prefix, n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_with(participants: Vec<Participant>) -> Team {
        Team {
            participants,
            ..Team::new("Marketing")
        }
    }

    #[test]
    fn test_valid_team() {
        let team = team_with(vec![Participant::new("Alice", 3), Participant::new("Bob", 1)]);
        assert!(team.validate().is_ok());
        assert_eq!(team.total_topics(), 4);
    }

    #[test]
    fn test_rejects_empty_team_name() {
        let mut team = team_with(vec![Participant::new("Alice", 3)]);
        team.name = "   ".to_string();
        assert!(team.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_participant_name() {
        let team = team_with(vec![Participant::new("", 3)]);
        assert!(team.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_topic_count() {
        let team = team_with(vec![Participant::new("Alice", 0)]);
        assert!(team.validate().is_err());
    }

    #[test]
    fn test_flat_total_mode() {
        let mut team = Team::new("Ops");
        team.total_topics = Some(6);
        assert!(team.validate().is_ok());
        assert_eq!(team.total_topics(), 6);
    }

    #[test]
    fn test_rejects_zero_flat_total() {
        let mut team = Team::new("Ops");
        team.total_topics = Some(0);
        assert!(team.validate().is_err());
    }

    #[test]
    fn test_rejects_team_without_roster_or_total() {
        let team = Team::new("Ops");
        assert!(team.validate().is_err());
    }

    #[test]
    fn test_parse_spec() {
        let p = Participant::parse_spec("Alice:3").unwrap();
        assert_eq!(p.name, "Alice");
        assert_eq!(p.topics, 3);

        // Names may contain colons; the count is the last segment
        let p = Participant::parse_spec("Dr. X: the second:2").unwrap();
        assert_eq!(p.name, "Dr. X: the second");
        assert_eq!(p.topics, 2);

        assert!(Participant::parse_spec("Alice").is_err());
        assert!(Participant::parse_spec("Alice:lots").is_err());
    }

    #[test]
    fn test_find_team_by_prefix() {
        let mut a = Team::new("A");
        a.id = "0198aaaa-1111".to_string();
        let mut b = Team::new("B");
        b.id = "0198bbbb-2222".to_string();
        let teams = vec![a, b];

        assert_eq!(find_team(&teams, "0198b").unwrap().name, "B");
        assert!(find_team(&teams, "0198").is_err());
        assert!(find_team(&teams, "ffff").is_err());
    }
}
