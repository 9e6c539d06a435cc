//! Build-time client configuration.
//!
//! Values come from environment variables read at compile time, the same way
//! `PUBLIC_URL` sets the router base:
//!
//! - `PW_API_BASE`: backend base URL (default `/api`)
//! - `PW_PAYMENT_GATE`: `password_required` to ask for the payment password
//! - `PW_DISCOUNT_RATIO`: active campaign ratio in `(0, 1]`; unset quotes full price
//! - `PW_DEBUG`: `1` renders the state trace panel
//! - `PUBLIC_URL`: sub-path the app is served under, used as the router base
use once_cell::sync::Lazy;
use pw_market::{ClientConfig, DiscountRatio, GateMode};

static CONFIG: Lazy<ClientConfig> = Lazy::new(|| {
    config_from(
        option_env!("PW_API_BASE"),
        option_env!("PW_PAYMENT_GATE"),
        option_env!("PW_DISCOUNT_RATIO"),
        option_env!("PW_DEBUG"),
    )
});

/// Configuration baked into this build.
#[must_use]
pub fn client_config() -> ClientConfig {
    CONFIG.clone()
}

/// Router basename, `None` when the app is served from the site root.
#[must_use]
pub fn router_base() -> Option<String> {
    basename_from(option_env!("PUBLIC_URL"))
}

fn basename_from(public_url: Option<&str>) -> Option<String> {
    let trimmed = public_url?.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn config_from(
    api_base: Option<&str>,
    gate: Option<&str>,
    ratio: Option<&str>,
    debug: Option<&str>,
) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(base) = api_base.filter(|b| !b.trim().is_empty()) {
        config = config.with_api_base(base);
    }
    config.gate = match gate.map(str::trim) {
        Some("password_required" | "password") => GateMode::PasswordRequired,
        _ => GateMode::ConfirmOnly,
    };
    config.campaign = ratio.and_then(|raw| match raw.trim().parse::<f64>() {
        Ok(value) => DiscountRatio::new(value).ok(),
        Err(_) => None,
    });
    if ratio.is_some() && config.campaign.is_none() {
        log::warn!("ignoring invalid PW_DISCOUNT_RATIO; quoting full price");
    }
    config.debug = matches!(debug.map(str::trim), Some("1" | "true"));
    config
}
