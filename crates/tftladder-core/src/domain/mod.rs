//! # Domain Types
//!
//! Validated inputs for the upstream endpoints.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Tier`] | Ranked tier with a paginated ladder (IRON to DIAMOND) |
//! | [`Division`] | Division inside a tier (I to IV) |
//! | [`RiotId`] | `game_name#tag_line` player handle |
//! | [`Puuid`] | Permanent player identifier |
//! | [`Platform`] | Platform host for league data |
//! | [`RegionalRoute`] | Regional host for account and match data |
//!
//! Construction rejects invalid input with a [`ValidationError`](crate::ValidationError):
//!
//! ```rust
//! use tftladder_core::{Division, Tier};
//!
//! assert_eq!(Tier::parse("gold").unwrap(), Tier::Gold);
//! assert!(Division::from_number(5).is_err());
//! ```

mod platform;
mod riot_id;
mod tier;

pub use platform::{Platform, RegionalRoute};
pub use riot_id::{Puuid, RiotId};
pub use tier::{Division, Tier};
