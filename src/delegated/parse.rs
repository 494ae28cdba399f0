//! Delegation file parsing.
//!
//! Lines look like `registry|cc|type|start|value|date|status[|...]`. Only
//! IPv4 lines with a country code and a valid start address become records;
//! header, summary and other address-family lines are skipped.

use crate::error::{Error, Result};
use crate::models::{parse_addr, AllocationRecord};

/// Minimum number of `|` separated fields in a usable line.
const MIN_FIELDS: usize = 5;

/// Parse a single line.
///
/// # Returns
/// * `Ok(Some(record))` - an IPv4 allocation
/// * `Ok(None)` - a comment, blank, header, summary or non-IPv4 line
/// * `Err(Error::LineFormat)` - too few fields, or a host count that is not a
///   non-negative integer
pub fn parse_line(line: &str) -> Result<Option<AllocationRecord>> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < MIN_FIELDS {
        return Err(Error::LineFormat(format!(
            "expected at least {MIN_FIELDS} fields, got {}",
            parts.len()
        )));
    }

    let (registry, cc, kind, start, value) = (parts[0], parts[1], parts[2], parts[3], parts[4]);
    if kind != "ipv4" || cc.is_empty() {
        return Ok(None);
    }
    let start = match parse_addr(start) {
        Ok(start) => start,
        Err(e) => {
            log::trace!("not an allocation: {e}");
            return Ok(None);
        }
    };

    let host_count = value
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| Error::LineFormat(format!("invalid number of hosts '{value}'")))?;

    Ok(Some(AllocationRecord::new(registry, cc, start, host_count)))
}

/// Parse a whole delegation file. Malformed lines are logged and skipped.
pub fn parse_delegated(text: &str) -> Vec<AllocationRecord> {
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => log::warn!("line:{} {e}", i + 1),
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parse_line_record() {
        let record = parse_line("apnic|JP|ipv4|192.168.0.0|768|20110412|allocated|A92E1062")
            .unwrap()
            .unwrap();
        assert_eq!(record.registry, "apnic");
        assert_eq!(record.country_code, "JP");
        assert_eq!(record.start, Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(record.host_count, 768);
    }

    #[test]
    fn test_parse_line_crlf() {
        let record = parse_line("arin|US|ipv4|8.8.8.0|256|19920301|assigned\r")
            .unwrap()
            .unwrap();
        assert_eq!(record.host_count, 256);
    }

    #[test]
    fn test_parse_line_skipped() {
        for line in [
            "",
            "# comment",
            "2.3|apnic|20240101|48|19830613|20231231|+1000",
            "apnic|*|ipv4|*|14|summary",
            "apnic|JP|asn|173|1|20020801|allocated",
            "apnic|AU|ipv6|2001:200::|35|19990813|allocated",
            "apnic||ipv4|1.0.128.0|32768|||available",
            "apnic|TH|ipv4|1.0.300.0|256|20110408|allocated",
        ] {
            assert!(parse_line(line).unwrap().is_none(), "'{line}'");
        }
    }

    #[test]
    fn test_parse_line_errors() {
        for line in [
            "apnic|KR|ipv4",
            "apnic|AU|ipv4|1.0.64.0|not-a-number|20110412|allocated",
            "apnic|AU|ipv4|1.0.64.0|-256|20110412|allocated",
            "apnic|AU|ipv4|1.0.64.0||20110412|allocated",
        ] {
            assert!(
                matches!(parse_line(line), Err(Error::LineFormat(_))),
                "'{line}'"
            );
        }
    }

    #[test]
    fn test_parse_delegated_sample() {
        let text = std::fs::read_to_string("src/tests/test_data/delegated_sample.txt")
            .expect("Error reading test sample");
        let records = parse_delegated(&text);
        assert_eq!(records.len(), 9);
        assert_eq!(records[0].country_code, "JP");
        assert_eq!(records[8].country_code, "TH");
        assert_eq!(records[8].host_count, 32768);
        assert!(records.iter().all(|r| r.registry == "apnic"));
    }
}
