use crate::domain::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    /// Case-insensitive match on `low`/`medium`; anything else maps to `High`.
    /// Surrounding whitespace is not stripped, so `" low "` is `High`.
    pub fn lenient(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for RiskTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownRiskTier(s.to_string())),
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How risk strings outside `low`/`medium`/`high` are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RiskTierPolicy {
    /// Unrecognized input resolves to [`RiskTier::High`].
    #[default]
    Lenient,
    /// Unrecognized input is a validation error.
    Strict,
}

impl RiskTierPolicy {
    pub fn resolve(self, raw: &str) -> Result<RiskTier, ValidationError> {
        match self {
            Self::Strict => raw.parse(),
            Self::Lenient => {
                let tier = RiskTier::lenient(raw);
                if raw.parse::<RiskTier>().is_err() {
                    tracing::warn!(
                        risk = raw,
                        resolved = %tier,
                        "unrecognized risk tier; defaulting"
                    );
                }
                Ok(tier)
            }
        }
    }
}

impl FromStr for RiskTierPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => {
                anyhow::bail!("unsupported RISK_TIER_POLICY `{other}` (expected lenient or strict)")
            }
        }
    }
}

/// Investment horizon handed to the advisor. Not yet used by the allocation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

impl Horizon {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_is_case_insensitive() {
        assert_eq!(RiskTier::lenient("LOW"), RiskTier::Low);
        assert_eq!(RiskTier::lenient("Medium"), RiskTier::Medium);
        assert_eq!(RiskTier::lenient("high"), RiskTier::High);
    }

    #[test]
    fn lenient_maps_typos_to_high() {
        assert_eq!(RiskTier::lenient("meduim"), RiskTier::High);
        assert_eq!(RiskTier::lenient(""), RiskTier::High);
        assert_eq!(
            RiskTierPolicy::Lenient.resolve("conservative").unwrap(),
            RiskTier::High
        );
    }

    #[test]
    fn padded_input_is_not_trimmed() {
        assert_eq!(RiskTier::lenient(" low "), RiskTier::High);
        assert_eq!(RiskTierPolicy::Lenient.resolve(" low ").unwrap(), RiskTier::High);
        assert_eq!(
            RiskTierPolicy::Strict.resolve(" low ").unwrap_err(),
            ValidationError::UnknownRiskTier(" low ".to_string())
        );
    }

    #[test]
    fn strict_rejects_typos() {
        assert_eq!(RiskTierPolicy::Strict.resolve("High").unwrap(), RiskTier::High);
        assert_eq!(
            RiskTierPolicy::Strict.resolve("meduim").unwrap_err(),
            ValidationError::UnknownRiskTier("meduim".to_string())
        );
    }

    #[test]
    fn policy_parses_from_config_values() {
        assert_eq!("Strict".parse::<RiskTierPolicy>().unwrap(), RiskTierPolicy::Strict);
        assert!("sometimes".parse::<RiskTierPolicy>().is_err());
    }
}
