use std::env;
use std::str::FromStr;

use tracing::warn;

/// Trimmed, non-empty value of `name`
pub fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `name`, falling back to `default` when unset or unparseable
pub fn parse_env_or_default<T: FromStr>(name: &str, default: T) -> T {
    match env_string(name) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value for {}: {}", name, raw);
            default
        }),
        None => default,
    }
}

/// Parse `primary`, then the legacy `fallback` name, then `default`
pub fn parse_env_with_fallback<T: FromStr>(primary: &str, fallback: &str, default: T) -> T {
    if env_string(primary).is_some() {
        parse_env_or_default(primary, default)
    } else {
        parse_env_or_default(fallback, default)
    }
}

/// Boolean flag accepting true/false, 1/0, yes/no, on/off
pub fn env_flag(name: &str, default: bool) -> bool {
    match env_string(name).map(|v| v.to_lowercase()) {
        Some(v) if matches!(v.as_str(), "true" | "1" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "false" | "0" | "no" | "off") => false,
        Some(v) => {
            warn!("Ignoring invalid boolean for {}: {}", name, v);
            default
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.

    #[test]
    fn test_env_string_trims_and_drops_empty() {
        env::set_var("SKZ_TEST_STRING", "  value ");
        env::set_var("SKZ_TEST_STRING_EMPTY", "   ");
        assert_eq!(env_string("SKZ_TEST_STRING").as_deref(), Some("value"));
        assert_eq!(env_string("SKZ_TEST_STRING_EMPTY"), None);
        assert_eq!(env_string("SKZ_TEST_STRING_UNSET"), None);
    }

    #[test]
    fn test_parse_with_fallback_order() {
        env::set_var("SKZ_TEST_LEGACY_PORT", "5000");
        assert_eq!(
            parse_env_with_fallback::<u16>("SKZ_TEST_PRIMARY_PORT", "SKZ_TEST_LEGACY_PORT", 4010),
            5000
        );
        env::set_var("SKZ_TEST_PRIMARY_PORT", "6000");
        assert_eq!(
            parse_env_with_fallback::<u16>("SKZ_TEST_PRIMARY_PORT", "SKZ_TEST_LEGACY_PORT", 4010),
            6000
        );
        env::set_var("SKZ_TEST_BAD_PORT", "not-a-port");
        assert_eq!(parse_env_or_default::<u16>("SKZ_TEST_BAD_PORT", 4010), 4010);
    }

    #[test]
    fn test_env_flag() {
        env::set_var("SKZ_TEST_FLAG_ON", "Yes");
        env::set_var("SKZ_TEST_FLAG_OFF", "0");
        env::set_var("SKZ_TEST_FLAG_BAD", "maybe");
        assert!(env_flag("SKZ_TEST_FLAG_ON", false));
        assert!(!env_flag("SKZ_TEST_FLAG_OFF", true));
        assert!(env_flag("SKZ_TEST_FLAG_BAD", true));
        assert!(!env_flag("SKZ_TEST_FLAG_UNSET", false));
    }
}
