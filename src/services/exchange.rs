//! Exchange classification by ticker suffix
//!
//! Codes look like `000001.SZ`. Only the trailing `.XX` is inspected, with an
//! exact, case-sensitive match.

use serde::Serialize;
use std::fmt;

/// Listing exchange derived from a ticker suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Exchange {
    Shenzhen,
    Shanghai,
    Beijing,
    Other,
}

impl Exchange {
    /// Fixed enumeration order, used to break ties in distributions
    pub const ALL: [Exchange; 4] = [
        Exchange::Shenzhen,
        Exchange::Shanghai,
        Exchange::Beijing,
        Exchange::Other,
    ];

    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Exchange::Shenzhen => Some(".SZ"),
            Exchange::Shanghai => Some(".SH"),
            Exchange::Beijing => Some(".BJ"),
            Exchange::Other => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Exchange::Shenzhen => "Shenzhen",
            Exchange::Shanghai => "Shanghai",
            Exchange::Beijing => "Beijing",
            Exchange::Other => "Other",
        }
    }

    /// Shenzhen and Shanghai listings. Beijing is deliberately not included.
    pub fn is_a_share(self) -> bool {
        matches!(self, Exchange::Shenzhen | Exchange::Shanghai)
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a ticker code by its last three bytes
pub fn classify(code: &str) -> Exchange {
    let bytes = code.as_bytes();
    if bytes.len() < 3 {
        return Exchange::Other;
    }

    match &bytes[bytes.len() - 3..] {
        b".SZ" => Exchange::Shenzhen,
        b".SH" => Exchange::Shanghai,
        b".BJ" => Exchange::Beijing,
        _ => Exchange::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_suffixes() {
        assert_eq!(classify("000001.SZ"), Exchange::Shenzhen);
        assert_eq!(classify("600000.SH"), Exchange::Shanghai);
        assert_eq!(classify("430001.BJ"), Exchange::Beijing);
        assert_eq!(classify("00700.HK"), Exchange::Other);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(classify("000001.sz"), Exchange::Other);
        assert_eq!(classify("000001.Sz"), Exchange::Other);
        assert_eq!(classify("600000.sH"), Exchange::Other);
    }

    #[test]
    fn test_short_and_odd_input() {
        assert_eq!(classify(""), Exchange::Other);
        assert_eq!(classify("SZ"), Exchange::Other);
        assert_eq!(classify(".SZ"), Exchange::Shenzhen);
        assert_eq!(classify("000001.SZ "), Exchange::Other);
        assert_eq!(classify("平安银行"), Exchange::Other);
        assert_eq!(classify("银.SZ"), Exchange::Shenzhen);
    }

    #[test]
    fn test_suffix_round_trips_through_classify() {
        for exchange in Exchange::ALL {
            if let Some(suffix) = exchange.suffix() {
                assert_eq!(classify(&format!("123456{}", suffix)), exchange);
            }
        }
    }

    #[test]
    fn test_a_share_membership() {
        assert!(Exchange::Shenzhen.is_a_share());
        assert!(Exchange::Shanghai.is_a_share());
        assert!(!Exchange::Beijing.is_a_share());
        assert!(!Exchange::Other.is_a_share());
    }
}
