use thiserror::Error;

/// Validation errors for domain inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid tier '{value}', expected one of IRON, BRONZE, SILVER, GOLD, PLATINUM, DIAMOND")]
    InvalidTier { value: String },
    #[error("invalid division '{value}', divisions can only go from 1 to 4 (I to IV)")]
    InvalidDivision { value: String },
    #[error("invalid platform '{value}'")]
    InvalidPlatform { value: String },

    #[error("riot id must look like 'name#tag': '{value}'")]
    MalformedRiotId { value: String },
    #[error("game name cannot be empty")]
    EmptyGameName,
    #[error("tag line cannot be empty")]
    EmptyTagLine,

    #[error("puuid cannot be empty")]
    EmptyPuuid,
    #[error("match id cannot be empty")]
    EmptyMatchId,
    #[error("match count must be between 1 and {max}, got {value}")]
    InvalidMatchCount { value: u32, max: u32 },
    #[error("ladder pages start at 1")]
    InvalidPage,
}
