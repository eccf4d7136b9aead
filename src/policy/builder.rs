use serde::Deserialize;

use crate::{Clock, DefaultValidator, Error, Policy, PolicyValidator, Result, SystemClock};

/// Optional constraints of a policy, as supplied by the caller.
///
/// Times are in milliseconds since the Unix epoch.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub start_time: Option<i64>,
    pub ip_address: Option<String>,
}

impl Options {
    /// Reads options from a JSON object such as
    /// `{"startTime": 1600000000000, "ipAddress": "192.0.2.0/24"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Deserializing)
    }
}

/// Collects the constraints of a `Policy`.
///
/// Building never fails: nothing is checked until the policy is serialized.
#[derive(Debug)]
pub struct PolicyBuilder<C, V> {
    url: String,
    expire_time: Option<i64>,
    start_time: Option<i64>,
    ip_address: Option<String>,
    clock: C,
    validator: V,
}

impl PolicyBuilder<SystemClock, DefaultValidator> {
    pub fn new(url: impl Into<String>, expire_time_ms: impl Into<Option<i64>>) -> Self {
        Self {
            url: url.into(),
            expire_time: to_epoch_secs(expire_time_ms.into()),
            start_time: None,
            ip_address: None,
            clock: SystemClock,
            validator: DefaultValidator,
        }
    }
}

impl<C, V> PolicyBuilder<C, V>
where
    C: Clock,
    V: PolicyValidator,
{
    pub fn with_start_time(mut self, start_time_ms: impl Into<Option<i64>>) -> Self {
        self.start_time = to_epoch_secs(start_time_ms.into());
        self
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        let ip_address = ip_address.into();
        self.ip_address = if ip_address.is_empty() {
            None
        } else {
            Some(ip_address)
        };
        self
    }

    pub fn with_options(self, options: Options) -> Self {
        let builder = self.with_start_time(options.start_time);
        match options.ip_address {
            Some(ip_address) => builder.with_ip_address(ip_address),
            None => builder,
        }
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> PolicyBuilder<C2, V> {
        PolicyBuilder {
            url: self.url,
            expire_time: self.expire_time,
            start_time: self.start_time,
            ip_address: self.ip_address,
            clock,
            validator: self.validator,
        }
    }

    pub fn with_validator<V2: PolicyValidator>(self, validator: V2) -> PolicyBuilder<C, V2> {
        PolicyBuilder {
            url: self.url,
            expire_time: self.expire_time,
            start_time: self.start_time,
            ip_address: self.ip_address,
            clock: self.clock,
            validator,
        }
    }

    pub fn build(self) -> Policy<C, V> {
        Policy {
            url: self.url,
            expire_time: self.expire_time,
            start_time: self.start_time,
            ip_address: self.ip_address,
            clock: self.clock,
            validator: self.validator,
        }
    }
}

/// Milliseconds to whole seconds, halves rounding up.
/// A value that rounds to zero counts as missing.
fn to_epoch_secs(millis: Option<i64>) -> Option<i64> {
    millis
        .map(|millis| millis.saturating_add(500).div_euclid(1000))
        .filter(|secs| *secs != 0)
}
