//! Ticket codes
//!
//! A ticket code is the sole credential a participant presents at the door.
//! The wire format is `GENESIS:<version>:<uuid-v4>` — random, collision-free
//! and free of any participant identity.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::{GenesisError, Result};

/// Prefix shared by every ticket code
pub const TICKET_PREFIX: &str = "GENESIS";

/// Format version stamped into newly generated codes
pub const TICKET_VERSION: &str = "1.0";

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // strict v4 shape so garbage scans are rejected before any lookup
        Regex::new(
            r"^GENESIS:[\d.]+:[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
        )
        .expect("ticket code pattern is valid")
    })
}

/// Opaque ticket credential
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct TicketCode(String);

impl TicketCode {
    /// Generate a fresh ticket code
    pub fn generate() -> Self {
        Self(format!(
            "{}:{}:{}",
            TICKET_PREFIX,
            TICKET_VERSION,
            Uuid::new_v4()
        ))
    }

    /// Parse a scanned string, rejecting anything outside the exact shape
    pub fn parse(raw: &str) -> Result<Self> {
        let candidate = raw.trim();
        if !code_pattern().is_match(candidate) {
            return Err(GenesisError::InvalidTicketCode);
        }
        Ok(Self(candidate.to_string()))
    }

    /// The random identifier embedded in the code
    pub fn token(&self) -> &str {
        // the pattern guarantees two separators
        self.0.rsplit(':').next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_codes_parse_back() {
        let code = TicketCode::generate();
        let parsed = TicketCode::parse(code.as_str()).unwrap();
        assert_eq!(code, parsed);
    }

    #[test]
    fn test_generated_codes_are_unique() {
        let codes: HashSet<_> = (0..10_000).map(|_| TicketCode::generate()).collect();
        assert_eq!(codes.len(), 10_000);
    }

    #[test]
    fn test_garbage_scans_rejected() {
        for raw in [
            "",
            "GENESIS",
            "GENESIS:1.0",
            "GENESIS:1.0:not-a-uuid",
            "GENESIS:1.0:123e4567-e89b-12d3-a456-426614174000", // v1, not v4
            "OTHERFEST:1.0:6fa459ea-ee8a-4ca4-894e-db77e160355e",
            "GENESIS:1.0:6FA459EA-EE8A-4CA4-894E-DB77E160355E", // uppercase
            "genesis:1.0:6fa459ea-ee8a-4ca4-894e-db77e160355e",
        ] {
            assert!(TicketCode::parse(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_scanner_whitespace_tolerated() {
        let code = TicketCode::generate();
        let scanned = format!("  {}\n", code);
        assert_eq!(TicketCode::parse(&scanned).unwrap(), code);
    }

    #[test]
    fn test_token_extraction() {
        let code = TicketCode::parse("GENESIS:1.0:6fa459ea-ee8a-4ca4-894e-db77e160355e").unwrap();
        assert_eq!(code.token(), "6fa459ea-ee8a-4ca4-894e-db77e160355e");
    }
}
