//! Verdict and outcome enumerations.

use serde::{Deserialize, Serialize};

/// Trust classification of an inbound signed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationVerdict {
    /// The signature matches the recomputed one.
    Verified,
    /// A signature was supplied but does not match.
    Tampered,
    /// The payload carried no signature at all.
    Absent,
}

impl VerificationVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Tampered => "tampered",
            Self::Absent => "absent",
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl std::fmt::Display for VerificationVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business classification of a transaction.
///
/// `Succeeded` is only ever produced from a [`VerificationVerdict::Verified`]
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionOutcome {
    Succeeded,
    Failed,
    /// Approved by response code but not trustworthy yet; query again later.
    Pending,
}

impl TransactionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Pending => "pending",
        }
    }

    /// Whether the outcome can change on a later status query.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_serialization() {
        let json = serde_json::to_string(&VerificationVerdict::Tampered).unwrap();
        assert_eq!(json, "\"tampered\"");
        let back: VerificationVerdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VerificationVerdict::Tampered);
    }

    #[test]
    fn test_outcome_finality() {
        assert!(TransactionOutcome::Succeeded.is_final());
        assert!(TransactionOutcome::Failed.is_final());
        assert!(!TransactionOutcome::Pending.is_final());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(VerificationVerdict::Absent.to_string(), "absent");
        assert_eq!(TransactionOutcome::Pending.to_string(), "pending");
    }
}
