//! Static configuration.

/// Delegated "extended" statistics published by the five RIRs.
pub const RIR_URLS: [&str; 5] = [
    "https://ftp.arin.net/pub/stats/arin/delegated-arin-extended-latest",
    "https://ftp.ripe.net/pub/stats/ripencc/delegated-ripencc-extended-latest",
    "https://ftp.apnic.net/pub/stats/apnic/delegated-apnic-extended-latest",
    "https://ftp.lacnic.net/pub/stats/lacnic/delegated-lacnic-extended-latest",
    "https://ftp.afrinic.net/pub/stats/afrinic/delegated-afrinic-extended-latest",
];

/// Directory for cached registry files, relative to the working directory.
pub const CACHE_DIR: &str = "./cache";

/// Validity of a cached response when the server sends no caching headers.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Logging config read at start-up.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";
