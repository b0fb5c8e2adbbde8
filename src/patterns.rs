//! Anchored per-token parameter patterns for common variable fields.
//!
//! These are classification sources for
//! [`MinerConfig::new`](crate::config::MinerConfig::new); each is anchored
//! with `^...$` so it only accepts a whole token.

pub const IPV4: (&str, &str) = (
    "{ip}",
    r"^(?:(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)$",
);

pub const IPV6: (&str, &str) = ("{ipv6}", r"^(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$");

pub const UUID: (&str, &str) = (
    "{uuid}",
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
);

pub const HEX: (&str, &str) = ("{hex}", r"^0x[0-9a-fA-F]+$");

pub const EMAIL: (&str, &str) = ("{email}", r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$");

pub const NUM: (&str, &str) = ("{num}", r"^-?\d+(?:\.\d+)?$");

/// Most-specific-first ordering suitable for `MinerConfig::new`.
pub fn common_patterns() -> Vec<(&'static str, &'static str)> {
    vec![IPV4, IPV6, UUID, HEX, EMAIL, NUM]
}
