//! Disk cache for downloaded delegation files.
//!
//! Each URL is stored under the hex SHA-256 of the URL, next to a small JSON
//! entry `<hash>.cache` holding the expiration time taken from the response
//! headers.

use crate::config;
use crate::error::Result;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use regex::Regex;
use reqwest::header::{HeaderMap, CACHE_CONTROL, EXPIRES};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Regex picking the `max-age` directive out of a Cache-Control header.
static MAX_AGE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_max_age_regex() -> &'static Regex {
    MAX_AGE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[,\s])max-age\s*=\s*(\d+)").expect("Invalid Regex")
    })
}

/// Metadata stored next to a cached body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub expiration: DateTime<Utc>,
    pub path: PathBuf,
}

/// Hex SHA-256 of the URL.
pub fn cache_key(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

pub fn cache_path(cache_dir: &Path, url: &str) -> PathBuf {
    cache_dir.join(cache_key(url))
}

pub fn cache_entry_path(cache_dir: &Path, url: &str) -> PathBuf {
    cache_dir.join(format!("{}.cache", cache_key(url)))
}

/// Write the metadata entry for `url`.
pub fn save_cache_entry(cache_dir: &Path, url: &str, expiration: DateTime<Utc>) -> Result<()> {
    let entry = CacheEntry {
        expiration,
        path: cache_path(cache_dir, url),
    };
    std::fs::create_dir_all(cache_dir)?;
    let json = serde_json::to_string(&entry)?;
    std::fs::write(cache_entry_path(cache_dir, url), json)?;
    Ok(())
}

/// Read the metadata entry for `url`.
pub fn load_cache_entry(cache_dir: &Path, url: &str) -> Result<CacheEntry> {
    let json = std::fs::read_to_string(cache_entry_path(cache_dir, url))?;
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let entry: CacheEntry = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::warn!("bad cache entry for {url}: path={} error={e}", e.path());
        e.into_inner()
    })?;
    Ok(entry)
}

/// True when an entry exists, has not expired at `now` and its body is on disk.
pub fn cache_is_valid(cache_dir: &Path, url: &str, now: DateTime<Utc>) -> bool {
    match load_cache_entry(cache_dir, url) {
        Ok(entry) => now < entry.expiration && entry.path.exists(),
        Err(_) => false,
    }
}

/// Expiration for a response received at `now`.
///
/// `Cache-Control: max-age` wins, then `Expires`, then the default TTL.
pub fn parse_cache_headers(headers: &HeaderMap, now: DateTime<Utc>) -> DateTime<Utc> {
    if let Some(cache_control) = headers.get(CACHE_CONTROL).and_then(|v| v.to_str().ok()) {
        let expiration = get_max_age_regex()
            .captures(cache_control)
            .and_then(|c| c[1].parse::<i64>().ok())
            .and_then(Duration::try_seconds)
            .and_then(|max_age| now.checked_add_signed(max_age));
        if let Some(expiration) = expiration {
            log::debug!("{cache_control} -> {expiration}");
            return expiration;
        }
    }

    if let Some(expires) = headers.get(EXPIRES).and_then(|v| v.to_str().ok()) {
        if let Some(expires) = parse_http_date(expires) {
            log::debug!("Expires={expires}");
            return expires;
        }
    }

    log::debug!("default expiry {}h", config::DEFAULT_TTL_HOURS);
    now + Duration::hours(config::DEFAULT_TTL_HOURS)
}

/// Parse an HTTP date in any of its three forms: IMF-fixdate
/// (`Sun, 06 Nov 1994 08:49:37 GMT`), RFC 850
/// (`Sunday, 06-Nov-94 08:49:37 GMT`) or asctime (`Sun Nov  6 08:49:37 1994`).
pub fn parse_http_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }
    // asctime pads single-digit days with a space
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    [
        "%A, %d-%b-%y %H:%M:%S GMT",
        "%A, %d-%b-%Y %H:%M:%S GMT",
        "%a %b %d %H:%M:%S %Y",
    ]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
    .map(|naive| naive.and_utc())
}

/// Return the body of `url`, from the cache while it is valid, otherwise
/// downloaded and written back to the cache.
pub async fn open_url(url: &str, cache_dir: &Path) -> Result<String> {
    let body_path = cache_path(cache_dir, url);

    if cache_is_valid(cache_dir, url, Utc::now()) {
        log::info!("Reading {url} from cache file: {}", body_path.display());
        return Ok(std::fs::read_to_string(&body_path)?);
    }

    log::info!("Fetching {url}");
    let response = reqwest::get(url).await?.error_for_status()?;
    let expiration = parse_cache_headers(response.headers(), Utc::now());
    let body = response.text().await?;

    std::fs::create_dir_all(cache_dir)?;
    log::info!(
        "Writing {} bytes to cache file: {} (expires {expiration})",
        body.len(),
        body_path.display()
    );
    std::fs::write(&body_path, &body)?;
    save_cache_entry(cache_dir, url, expiration)?;

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use tempfile::TempDir;

    const URL: &str = "https://ftp.apnic.net/pub/stats/apnic/delegated-apnic-extended-latest";

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_cache_key() {
        let key = cache_key(URL);
        assert_eq!(key.len(), 64);
        assert!(key.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(key, cache_key(URL));
        assert_ne!(key, cache_key("https://example.com/"));
        assert_eq!(
            cache_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_cache_paths() {
        let dir = Path::new("/tmp/cache");
        let key = cache_key(URL);
        assert_eq!(cache_path(dir, URL), dir.join(&key));
        assert_eq!(cache_entry_path(dir, URL), dir.join(format!("{key}.cache")));
    }

    #[test]
    fn test_headers_max_age() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
        headers.insert(
            EXPIRES,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_cache_headers(&headers, now()), now() + Duration::hours(1));
    }

    #[test]
    fn test_headers_s_maxage_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("s-maxage=60, no-cache"));
        assert_eq!(
            parse_cache_headers(&headers, now()),
            now() + Duration::hours(config::DEFAULT_TTL_HOURS)
        );
    }

    #[test]
    fn test_headers_expires() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(
            EXPIRES,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        let expected = DateTime::parse_from_rfc3339("2015-10-21T07:28:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parse_cache_headers(&headers, now()), expected);
    }

    fn expires_at(expires: &'static str) -> DateTime<Utc> {
        let mut headers = HeaderMap::new();
        headers.insert(EXPIRES, HeaderValue::from_static(expires));
        parse_cache_headers(&headers, now())
    }

    fn nov_6_1994() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("1994-11-06T08:49:37Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_headers_expires_imf_fixdate() {
        assert_eq!(expires_at("Sun, 06 Nov 1994 08:49:37 GMT"), nov_6_1994());
    }

    #[test]
    fn test_headers_expires_rfc850() {
        assert_eq!(expires_at("Sunday, 06-Nov-94 08:49:37 GMT"), nov_6_1994());
        assert_eq!(expires_at("Sunday, 06-Nov-1994 08:49:37 GMT"), nov_6_1994());
    }

    #[test]
    fn test_headers_expires_asctime() {
        assert_eq!(expires_at("Sun Nov  6 08:49:37 1994"), nov_6_1994());
        assert_eq!(
            expires_at("Wed Oct 21 07:28:00 2015").to_rfc3339(),
            "2015-10-21T07:28:00+00:00"
        );
    }

    #[test]
    fn test_parse_http_date_rejects() {
        assert!(parse_http_date("not a date").is_none());
        assert!(parse_http_date("Sun Nov 6 1994").is_none());
        assert!(parse_http_date("").is_none());
    }

    #[test]
    fn test_headers_default() {
        let mut headers = HeaderMap::new();
        headers.insert(EXPIRES, HeaderValue::from_static("not a date"));
        assert_eq!(
            parse_cache_headers(&headers, now()),
            now() + Duration::hours(24)
        );
        assert_eq!(
            parse_cache_headers(&HeaderMap::new(), now()),
            now() + Duration::hours(24)
        );
    }

    #[test]
    fn test_cache_entry_validity() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        assert!(!cache_is_valid(dir, URL, now()));

        save_cache_entry(dir, URL, now() + Duration::hours(1)).unwrap();
        // entry without a body is not usable
        assert!(!cache_is_valid(dir, URL, now()));

        std::fs::write(cache_path(dir, URL), "body").unwrap();
        assert!(cache_is_valid(dir, URL, now()));
        assert!(!cache_is_valid(dir, URL, now() + Duration::hours(2)));

        let entry = load_cache_entry(dir, URL).unwrap();
        assert_eq!(entry.path, cache_path(dir, URL));
        assert_eq!(entry.expiration, now() + Duration::hours(1));
    }

    #[test]
    fn test_load_cache_entry_corrupt() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        std::fs::write(cache_entry_path(dir, URL), r#"{"expiration": 42}"#).unwrap();
        assert!(matches!(
            load_cache_entry(dir, URL),
            Err(crate::error::Error::Json(_))
        ));
        assert!(!cache_is_valid(dir, URL, now()));
    }

    #[tokio::test]
    async fn test_open_url_served_from_cache() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let url = "http://127.0.0.1:9/never-fetched";
        std::fs::write(cache_path(dir, url), "apnic|JP|ipv4|1.0.16.0|4096|x|allocated\n").unwrap();
        save_cache_entry(dir, url, Utc::now() + Duration::hours(1)).unwrap();

        let body = open_url(url, dir).await.unwrap();
        assert!(body.starts_with("apnic|JP|ipv4"));
    }
}
