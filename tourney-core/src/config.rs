//! Configuration types for a tournament
//!
//! Level 4 - Utilities and configuration

/// Default number of rounds
pub const DEFAULT_ROUNDS_COUNT: usize = 4;

/// Tournament configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TournamentConfig {
    /// Tournament name
    pub name: String,
    /// Venue
    pub location: String,
    /// First day (YYYY-MM-DD)
    pub start_date: String,
    /// Last day (YYYY-MM-DD)
    pub end_date: String,
    /// Number of rounds to play
    pub rounds_count: usize,
    /// Free-form notes from the organizer
    pub description: String,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            rounds_count: DEFAULT_ROUNDS_COUNT,
            description: String::new(),
        }
    }
}

impl TournamentConfig {
    /// Create config with a name and default round count
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_dates(mut self, start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self.end_date = end_date.into();
        self
    }

    pub fn with_rounds(mut self, rounds_count: usize) -> Self {
        self.rounds_count = rounds_count;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
