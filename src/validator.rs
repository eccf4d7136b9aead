use std::fmt;
use std::net::IpAddr;

use ipnet::IpNet;

use crate::{Error, Result};

/// Extra validation for the free-form string fields of a policy.
///
/// Called while serializing, after the built-in checks on the time window
/// have passed.
pub trait PolicyValidator {
    fn validate(&self, field: Field, value: &str) -> Result<()>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Resource,
    IpAddress,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Resource => f.write_str("url"),
            Field::IpAddress => f.write_str("ipAddress"),
        }
    }
}

/// Accepts every value. Source IP restrictions are passed through unchecked.
#[derive(Debug, Default, Copy, Clone)]
pub struct DefaultValidator;

impl PolicyValidator for DefaultValidator {
    fn validate(&self, _field: Field, _value: &str) -> Result<()> {
        Ok(())
    }
}

/// Requires the source IP restriction to be a single address
/// (`192.0.2.10`) or a network in CIDR notation (`192.0.2.0/24`).
#[derive(Debug, Default, Copy, Clone)]
pub struct SourceIpValidator;

impl PolicyValidator for SourceIpValidator {
    fn validate(&self, field: Field, value: &str) -> Result<()> {
        match field {
            Field::IpAddress => {
                if value.parse::<IpAddr>().is_ok() || value.parse::<IpNet>().is_ok() {
                    Ok(())
                } else {
                    Err(Error::Validation {
                        field,
                        reason: format!("'{}' is not an IP address or CIDR block", value),
                    })
                }
            }
            Field::Resource => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_case::test_case;

    #[test_case("192.0.2.10" ; "ipv4 address")]
    #[test_case("192.0.2.0/24" ; "ipv4 network")]
    #[test_case("2001:db8::1" ; "ipv6 address")]
    #[test_case("2001:db8::/32" ; "ipv6 network")]
    fn source_ip_validator_accepts(value: &str) {
        assert_matches!(SourceIpValidator.validate(Field::IpAddress, value), Ok(()));
    }

    #[test_case("localhost" ; "hostname")]
    #[test_case("192.0.2.0/33" ; "prefix too long")]
    #[test_case("300.1.1.1" ; "octet out of range")]
    #[test_case("" ; "empty")]
    fn source_ip_validator_rejects(value: &str) {
        assert_matches!(
            SourceIpValidator.validate(Field::IpAddress, value),
            Err(Error::Validation {
                field: Field::IpAddress,
                ..
            })
        );
    }

    #[test]
    fn source_ip_validator_ignores_resource() {
        assert_matches!(
            SourceIpValidator.validate(Field::Resource, "not an ip"),
            Ok(())
        );
    }

    #[test]
    fn default_validator_accepts_anything() {
        assert_matches!(DefaultValidator.validate(Field::IpAddress, "garbage"), Ok(()));
        assert_matches!(DefaultValidator.validate(Field::Resource, ""), Ok(()));
    }

    #[test]
    fn field_names_match_document_keys() {
        assert_eq!("url", Field::Resource.to_string());
        assert_eq!("ipAddress", Field::IpAddress.to_string());
    }
}
