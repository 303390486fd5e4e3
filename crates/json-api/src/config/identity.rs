//! Identity Provider Config

use clap::Args;
use pcm_app::auth::IdentityConfig;

/// Hosted identity provider settings.
#[derive(Debug, Args)]
pub struct IdentityProviderConfig {
    /// Identity provider base URL
    #[arg(
        long = "identity-base-url",
        env = "IDENTITY_BASE_URL",
        default_value = "https://identitytoolkit.googleapis.com"
    )]
    pub base_url: String,

    /// Identity provider API key
    #[arg(long = "identity-api-key", env = "IDENTITY_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

impl From<IdentityProviderConfig> for IdentityConfig {
    fn from(config: IdentityProviderConfig) -> Self {
        IdentityConfig {
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }
}
