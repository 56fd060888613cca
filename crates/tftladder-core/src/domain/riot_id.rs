use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Human-facing player handle, `game_name#tag_line`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiotId {
    game_name: String,
    tag_line: String,
}

impl RiotId {
    pub fn new(game_name: &str, tag_line: &str) -> Result<Self, ValidationError> {
        let game_name = game_name.trim();
        if game_name.is_empty() {
            return Err(ValidationError::EmptyGameName);
        }

        let tag_line = tag_line.trim();
        if tag_line.is_empty() {
            return Err(ValidationError::EmptyTagLine);
        }

        Ok(Self {
            game_name: game_name.to_owned(),
            tag_line: tag_line.to_owned(),
        })
    }

    /// Parse `name#tag`. The split happens on the last `#`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let (game_name, tag_line) =
            input
                .rsplit_once('#')
                .ok_or_else(|| ValidationError::MalformedRiotId {
                    value: input.to_owned(),
                })?;
        Self::new(game_name, tag_line)
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn tag_line(&self) -> &str {
        &self.tag_line
    }
}

impl Display for RiotId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

impl FromStr for RiotId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Non-empty player UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Puuid(String);

impl Puuid {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyPuuid);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Puuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Puuid {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Puuid> for String {
    fn from(value: Puuid) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_tag() {
        let id = RiotId::parse(" Some Player #EUW").expect("valid");
        assert_eq!(id.game_name(), "Some Player");
        assert_eq!(id.tag_line(), "EUW");
        assert_eq!(id.to_string(), "Some Player#EUW");
    }

    #[test]
    fn rejects_missing_separator() {
        let err = RiotId::parse("nohash").expect_err("must fail");
        assert!(matches!(err, ValidationError::MalformedRiotId { .. }));
    }

    #[test]
    fn rejects_empty_parts() {
        assert_eq!(RiotId::parse("#EUW"), Err(ValidationError::EmptyGameName));
        assert_eq!(RiotId::parse("name# "), Err(ValidationError::EmptyTagLine));
    }

    #[test]
    fn puuid_rejects_blank() {
        assert_eq!(Puuid::parse("  "), Err(ValidationError::EmptyPuuid));
        assert_eq!(Puuid::parse("abc").expect("valid").as_str(), "abc");
    }
}
