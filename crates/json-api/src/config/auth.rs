//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Lifetime of issued API tokens, in hours
    #[arg(
        long,
        env = "TOKEN_TTL_HOURS",
        default_value_t = 12,
        value_parser = clap::value_parser!(i64).range(1..=8_760)
    )]
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(self.token_ttl_hours)
    }
}
