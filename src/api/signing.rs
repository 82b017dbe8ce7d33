use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// hex(HMAC-SHA1(secret, "{method} {path} {unix_seconds}"))
pub fn sign(secret: &str, method: &str, path: &str, timestamp: i64) -> String {
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(format!("{} {} {}", method, path, timestamp).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Value of the `Date` header sent alongside a signature made at `now`.
pub fn date_header(now: &DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}
