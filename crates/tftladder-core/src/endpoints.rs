//! URL builders for the upstream endpoints.
//!
//! Callers pass validated domain values; every path segment is percent-encoded.

use urlencoding::encode;

use crate::{Division, Puuid, RiotId, Tier};

/// Queue identifier used for ranked ladder pages.
pub const RANKED_QUEUE: &str = "RANKED_TFT";

/// Base hosts for one platform and its regional route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    platform_base: String,
    regional_base: String,
}

impl Endpoints {
    pub fn new(platform_base: impl Into<String>, regional_base: impl Into<String>) -> Self {
        Self {
            platform_base: trim_base(platform_base.into()),
            regional_base: trim_base(regional_base.into()),
        }
    }

    pub fn account_by_riot_id(&self, riot_id: &RiotId) -> String {
        format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.regional_base,
            encode(riot_id.game_name()),
            encode(riot_id.tag_line())
        )
    }

    pub fn match_ids_by_puuid(&self, puuid: &Puuid, start: u32, count: u32) -> String {
        format!(
            "{}/tft/match/v1/matches/by-puuid/{}/ids?start={start}&count={count}",
            self.regional_base,
            encode(puuid.as_str())
        )
    }

    pub fn match_detail(&self, match_id: &str) -> String {
        format!(
            "{}/tft/match/v1/matches/{}",
            self.regional_base,
            encode(match_id)
        )
    }

    pub fn league_entries(&self, tier: Tier, division: Division, page: u32) -> String {
        format!(
            "{}/tft/league/v1/entries/{tier}/{division}?queue={RANKED_QUEUE}&page={page}",
            self.platform_base
        )
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new(
            "https://euw1.api.riotgames.com/",
            "https://europe.api.riotgames.com",
        )
    }

    #[test]
    fn account_url_encodes_path_segments() {
        let riot_id = RiotId::new("Some Player", "EUW").expect("valid");

        assert_eq!(
            endpoints().account_by_riot_id(&riot_id),
            "https://europe.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Some%20Player/EUW"
        );
    }

    #[test]
    fn match_ids_url_carries_start_and_count() {
        let puuid = Puuid::parse("abc123").expect("valid");

        assert_eq!(
            endpoints().match_ids_by_puuid(&puuid, 0, 5),
            "https://europe.api.riotgames.com/tft/match/v1/matches/by-puuid/abc123/ids?start=0&count=5"
        );
    }

    #[test]
    fn league_url_uses_platform_host() {
        assert_eq!(
            endpoints().league_entries(Tier::Gold, Division::II, 3),
            "https://euw1.api.riotgames.com/tft/league/v1/entries/GOLD/II?queue=RANKED_TFT&page=3"
        );
    }

    #[test]
    fn match_detail_url() {
        assert_eq!(
            endpoints().match_detail("EUW1_123"),
            "https://europe.api.riotgames.com/tft/match/v1/matches/EUW1_123"
        );
    }
}
