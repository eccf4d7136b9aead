use chrono::{Duration, Utc};
use custom_policy::{Options, Policy, PolicyBuilder, Result, SourceIpValidator};

fn main() -> Result<()> {
    let now = Utc::now();
    let expire_time = (now + Duration::hours(1)).timestamp_millis();

    // Options as they might arrive from a request.
    let options = Options::from_json(r#"{"ipAddress": "192.0.2.0/24"}"#)?;

    let policy = Policy::create("https://example.com/videos/*", expire_time, Some(options));
    println!("{}", policy.to_json()?);

    // Same policy, opting into source IP checking.
    let strict = PolicyBuilder::new("https://example.com/videos/*", expire_time)
        .with_start_time(now.timestamp_millis())
        .with_ip_address("192.0.2.0/33")
        .with_validator(SourceIpValidator)
        .build();

    match strict.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => println!("Rejected: {}", e),
    };

    Ok(())
}
