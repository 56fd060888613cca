use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Platform routing value; league entries are served per platform.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Br1,
    Eun1,
    #[default]
    Euw1,
    Jp1,
    Kr,
    La1,
    La2,
    Na1,
    Oc1,
    Ru,
    Tr1,
}

/// Regional routing value; account and match data are served per region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionalRoute {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Platform {
    pub const ALL: [Platform; 11] = [
        Self::Br1,
        Self::Eun1,
        Self::Euw1,
        Self::Jp1,
        Self::Kr,
        Self::La1,
        Self::La2,
        Self::Na1,
        Self::Oc1,
        Self::Ru,
        Self::Tr1,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Br1 => "br1",
            Self::Eun1 => "eun1",
            Self::Euw1 => "euw1",
            Self::Jp1 => "jp1",
            Self::Kr => "kr",
            Self::La1 => "la1",
            Self::La2 => "la2",
            Self::Na1 => "na1",
            Self::Oc1 => "oc1",
            Self::Ru => "ru",
            Self::Tr1 => "tr1",
        }
    }

    pub const fn regional(self) -> RegionalRoute {
        match self {
            Self::Br1 | Self::La1 | Self::La2 | Self::Na1 => RegionalRoute::Americas,
            Self::Jp1 | Self::Kr => RegionalRoute::Asia,
            Self::Eun1 | Self::Euw1 | Self::Ru | Self::Tr1 => RegionalRoute::Europe,
            Self::Oc1 => RegionalRoute::Sea,
        }
    }

    pub fn base_url(self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidPlatform {
                value: input.to_owned(),
            })
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl RegionalRoute {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }

    pub fn base_url(self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }
}

impl Display for RegionalRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
