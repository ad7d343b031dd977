//! Configuration loading and representation.

use core::str::FromStr;

use rust_decimal::Decimal;

use storefront_promotions::TransactionFee;

use crate::error::{InfraError, InfraResult};

pub const BUSINESS_ID_VAR: &str = "STOREFRONT_BUSINESS_ID";
pub const ANALYTICS_ENABLED_VAR: &str = "STOREFRONT_ANALYTICS_ENABLED";
pub const TRANSACTION_FEE_RATE_VAR: &str = "STOREFRONT_TRANSACTION_FEE_RATE";
pub const INCLUDE_TRANSACTION_FEE_VAR: &str = "STOREFRONT_INCLUDE_TRANSACTION_FEE";

/// Process configuration for a storefront instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Document id of the business profile this instance serves.
    pub business_id: String,
    pub analytics_enabled: bool,
    pub transaction_fee: TransactionFee,
}

impl StorefrontConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> InfraResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (environment-like key/value source).
    pub fn from_lookup<F>(lookup: F) -> InfraResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let business_id = lookup(BUSINESS_ID_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| InfraError::Config(format!("{BUSINESS_ID_VAR} is required")))?;

        let analytics_enabled = parse_flag(ANALYTICS_ENABLED_VAR, lookup(ANALYTICS_ENABLED_VAR))?;
        let include_fee = parse_flag(
            INCLUDE_TRANSACTION_FEE_VAR,
            lookup(INCLUDE_TRANSACTION_FEE_VAR),
        )?;
        let rate = parse_rate(lookup(TRANSACTION_FEE_RATE_VAR))?;

        let transaction_fee = TransactionFee {
            rate,
            enabled: include_fee,
        };

        tracing::debug!(
            business_id = %business_id,
            analytics_enabled,
            fee_enabled = transaction_fee.enabled,
            fee_rate = %transaction_fee.rate,
            "loaded storefront configuration"
        );

        Ok(Self {
            business_id,
            analytics_enabled,
            transaction_fee,
        })
    }
}

fn parse_flag(key: &str, raw: Option<String>) -> InfraResult<bool> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(InfraError::Config(format!("{key}: expected a boolean, got {other:?}"))),
    }
}

fn parse_rate(raw: Option<String>) -> InfraResult<Decimal> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(Decimal::ZERO);
    };
    let rate = Decimal::from_str(raw.trim()).map_err(|e| {
        InfraError::Config(format!("{TRANSACTION_FEE_RATE_VAR}: {e}"))
    })?;
    if rate.is_sign_negative() || rate >= Decimal::ONE {
        return Err(InfraError::Config(format!(
            "{TRANSACTION_FEE_RATE_VAR} must be a fraction in [0, 1), got {rate}"
        )));
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_only_business_id_is_set() {
        let config = StorefrontConfig::from_lookup(lookup(&[(BUSINESS_ID_VAR, "biz-1")])).unwrap();
        assert_eq!(config.business_id, "biz-1");
        assert!(!config.analytics_enabled);
        assert_eq!(config.transaction_fee, TransactionFee::none());
    }

    #[test]
    fn reads_fee_and_flags() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            (BUSINESS_ID_VAR, "biz-1"),
            (ANALYTICS_ENABLED_VAR, "TRUE"),
            (TRANSACTION_FEE_RATE_VAR, "0.029"),
            (INCLUDE_TRANSACTION_FEE_VAR, "yes"),
        ]))
        .unwrap();
        assert!(config.analytics_enabled);
        assert_eq!(config.transaction_fee, TransactionFee::new(Decimal::new(29, 3)));
    }

    #[test]
    fn missing_business_id_is_a_config_error() {
        let err = StorefrontConfig::from_lookup(lookup(&[(BUSINESS_ID_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, InfraError::Config(msg) if msg.contains(BUSINESS_ID_VAR)));
    }

    #[test]
    fn rejects_bad_values() {
        for (key, value) in [
            (ANALYTICS_ENABLED_VAR, "maybe"),
            (TRANSACTION_FEE_RATE_VAR, "three percent"),
            (TRANSACTION_FEE_RATE_VAR, "1.5"),
            (TRANSACTION_FEE_RATE_VAR, "-0.01"),
        ] {
            let result = StorefrontConfig::from_lookup(lookup(&[(BUSINESS_ID_VAR, "biz"), (key, value)]));
            assert!(matches!(result, Err(InfraError::Config(_))), "{key}={value}");
        }
    }
}
