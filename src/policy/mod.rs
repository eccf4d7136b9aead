mod builder;
pub use builder::{Options, PolicyBuilder};

use log::{debug, trace};
use serde::{ser, Serialize, Serializer};

use crate::errors::Result;
use crate::{Clock, DefaultValidator, Error, Field, PolicyValidator, SystemClock};

/// Exclusive upper bound for every epoch time in a policy.
/// 2038-01-19T03:14:08Z, the end of signed 32-bit UNIX time.
pub const MAX_EPOCH_TIME: i64 = 2_147_483_647;

/// Access policy for a single resource: the window in which the resource
/// may be requested and, optionally, the source IP the request must come from.
///
/// A policy is validated every time it is serialized, against the current time
/// of its `Clock`. A policy that serialized fine a moment ago may be rejected
/// once its expiration time has passed.
#[derive(Debug, Clone)]
pub struct Policy<C = SystemClock, V = DefaultValidator> {
    url: String,
    expire_time: Option<i64>,
    start_time: Option<i64>,
    ip_address: Option<String>,
    clock: C,
    validator: V,
}

impl Policy {
    /// Creates a policy checked against the system clock.
    ///
    /// Times are in milliseconds since the Unix epoch and are stored as whole
    /// seconds. No validation happens here.
    pub fn create(
        url: impl Into<String>,
        expire_time_ms: impl Into<Option<i64>>,
        options: Option<Options>,
    ) -> Self {
        let builder = PolicyBuilder::new(url, expire_time_ms);
        match options {
            Some(options) => builder.with_options(options).build(),
            None => builder.build(),
        }
    }
}

impl<C, V> Policy<C, V> {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Expiration time in epoch seconds.
    pub fn expire_time(&self) -> Option<i64> {
        self.expire_time
    }

    /// Start time in epoch seconds.
    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }
}

impl<C, V> Policy<C, V>
where
    C: Clock,
    V: PolicyValidator,
{
    /// Validates the policy and renders it as compact JSON, ready to be signed.
    pub fn to_json(&self) -> Result<String> {
        let document = self.document()?;
        let json = serde_json::to_string(&document).map_err(Error::Serializing)?;
        trace!("serialized policy {}", json);
        Ok(json)
    }

    fn document(&self) -> Result<PolicyDocument<'_>> {
        let expire_time = match self.validate() {
            Ok(expire_time) => expire_time,
            Err(e) => {
                debug!("rejected policy for {:?}: {}", self.url, e);
                return Err(e);
            }
        };

        Ok(PolicyDocument {
            statement: [Statement {
                resource: &self.url,
                condition: Condition {
                    date_less_than: EpochTime {
                        epoch_time: expire_time,
                    },
                    date_greater_than: self.start_time.map(|epoch_time| EpochTime { epoch_time }),
                    ip_address: self
                        .ip_address
                        .as_deref()
                        .map(|source_ip| SourceIp { source_ip }),
                },
            }],
        })
    }

    /// Checks every constraint and returns the expiration time.
    fn validate(&self) -> Result<i64> {
        if self.url.is_empty() {
            return Err(Error::MissingParameter("url"));
        }

        let expire_time = validate_time("expireTime", self.expire_time)?;
        if expire_time <= self.clock.now_secs() {
            return Err(Error::Expired);
        }

        if let Some(start_time) = self.start_time {
            validate_time("startTime", Some(start_time))?;
            if start_time >= expire_time {
                return Err(Error::OrderingViolation);
            }
        }

        self.validator.validate(Field::Resource, &self.url)?;
        if let Some(ip_address) = &self.ip_address {
            self.validator.validate(Field::IpAddress, ip_address)?;
        }

        Ok(expire_time)
    }
}

fn validate_time(name: &'static str, value: Option<i64>) -> Result<i64> {
    let value = value.ok_or(Error::MissingParameter(name))?;
    if value >= MAX_EPOCH_TIME {
        return Err(Error::OutOfRange(name));
    }
    Ok(value)
}

/// Serializes the same document as `Policy::to_json`, so a policy can be
/// embedded into a larger serde structure. Validation errors are reported
/// through the serializer.
impl<C, V> Serialize for Policy<C, V>
where
    C: Clock,
    V: PolicyValidator,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.document()
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}

#[derive(Serialize)]
struct PolicyDocument<'a> {
    #[serde(rename = "Statement")]
    statement: [Statement<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Statement<'a> {
    resource: &'a str,
    condition: Condition<'a>,
}

// Field order is part of the signed output.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Condition<'a> {
    date_less_than: EpochTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_greater_than: Option<EpochTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_address: Option<SourceIp<'a>>,
}

#[derive(Serialize)]
struct EpochTime {
    #[serde(rename = "AWS:EpochTime")]
    epoch_time: i64,
}

#[derive(Serialize)]
struct SourceIp<'a> {
    #[serde(rename = "AWS:SourceIp")]
    source_ip: &'a str,
}
