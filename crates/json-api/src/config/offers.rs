//! Offers Config

use clap::Args;

use cartoffer::resolver::ResolutionPolicy;

/// Tie-break policy for overlapping offers.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ResolutionPolicyArg {
    /// Most recently registered offer wins.
    Latest,

    /// First registered offer wins.
    Earliest,
}

impl From<ResolutionPolicyArg> for ResolutionPolicy {
    fn from(policy: ResolutionPolicyArg) -> Self {
        match policy {
            ResolutionPolicyArg::Latest => ResolutionPolicy::LatestRegistered,
            ResolutionPolicyArg::Earliest => ResolutionPolicy::EarliestRegistered,
        }
    }
}

/// Offer resolution settings.
#[derive(Debug, Args)]
pub struct OffersConfig {
    /// Which offer applies when several target the same restaurant and segment (latest, earliest)
    #[arg(
        long,
        env = "OFFER_RESOLUTION_POLICY",
        value_enum,
        default_value_t = ResolutionPolicyArg::Latest
    )]
    pub offer_resolution_policy: ResolutionPolicyArg,
}
