//! Player records - the participants of a tournament

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TournamentError};

/// Date format for birth dates (ISO 8601)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stable player identifier (national chess ID, e.g. "AB12345")
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Player sex as recorded by the federation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl FromStr for Sex {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Sex::Male),
            "F" | "FEMALE" => Ok(Sex::Female),
            other => Err(TournamentError::InvalidParticipant(format!(
                "unknown sex '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("M"),
            Sex::Female => f.write_str("F"),
        }
    }
}

/// A registered participant with a running score
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    chess_id: PlayerId,
    first_name: String,
    last_name: String,
    birth_date: String,
    sex: Sex,
    #[serde(default)]
    points: f32,
}

impl Player {
    /// Create a validated player with zero points
    pub fn new(
        chess_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: impl Into<String>,
        sex: Sex,
    ) -> Result<Self> {
        let (chess_id, first_name, last_name, birth_date): (String, String, String, String) = (
            chess_id.into(),
            first_name.into(),
            last_name.into(),
            birth_date.into(),
        );
        let player = Self {
            chess_id: PlayerId::new(chess_id.trim()),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            birth_date: birth_date.trim().to_string(),
            sex,
            points: 0.0,
        };
        player.validate()?;
        Ok(player)
    }

    /// Check the record is well formed
    ///
    /// Deserialized players bypass `new`, so loading calls this as well.
    pub fn validate(&self) -> Result<()> {
        let id = self.chess_id.as_str();
        if id.is_empty() {
            return Err(invalid("chess ID is empty"));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid(format!("chess ID '{}' must be alphanumeric", id)));
        }
        if self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(invalid(format!("player {} has an empty name", id)));
        }
        if NaiveDate::parse_from_str(&self.birth_date, DATE_FORMAT).is_err() {
            return Err(invalid(format!(
                "birth date '{}' of player {} is not YYYY-MM-DD",
                self.birth_date, id
            )));
        }
        if !self.points.is_finite() || self.points < 0.0 {
            return Err(invalid(format!("player {} has invalid points", id)));
        }
        Ok(())
    }

    pub fn id(&self) -> &PlayerId {
        &self.chess_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// Cumulative score
    pub fn points(&self) -> f32 {
        self.points
    }

    /// Full display name ("First Last")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn add_points(&mut self, delta: f32) {
        self.points = (self.points + delta).max(0.0);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}), born {}, {}, {} pts",
            self.first_name, self.last_name, self.chess_id, self.birth_date, self.sex, self.points
        )
    }
}

fn invalid(reason: impl Into<String>) -> TournamentError {
    TournamentError::InvalidParticipant(reason.into())
}
