//! Country hint from the process locale.
//!
//! The inference services accept an optional `country_id` to localize their
//! estimates. Unless one is configured, it is taken from the POSIX locale
//! variables (`LC_ALL`, then `LC_MESSAGES`, then `LANG`).

use crate::config::LookupConfig;

/// The configured country, or the one from the system locale.
pub fn country_hint(config: &LookupConfig) -> Option<String> {
    config
        .country
        .as_ref()
        .map(|c| c.to_ascii_uppercase())
        .or_else(system_country)
}

/// Country code of the current locale, if it names one.
pub fn system_country() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty())
        .and_then(|v| parse_locale_country(&v))
}

/// Extract the territory from a locale string such as `en_US.UTF-8@euro`.
pub fn parse_locale_country(locale: &str) -> Option<String> {
    let base = locale.split(['.', '@']).next().unwrap_or_default();
    let territory = base.split(['_', '-']).nth(1)?;
    if territory.len() == 2 && territory.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(territory.to_ascii_uppercase())
    } else {
        None
    }
}
