//! Utility functions and helpers

use std::collections::BTreeSet;

/// Fractional digits of the chain's fixed-point decimal type
pub const DEC_PRECISION: usize = 18;

/// Render an 18-decimal fixed-point integer string (`sdk.Dec` wire form)
///
/// `"2000000000000000"` becomes `"0.002"`. Input that is not a plain
/// integer is returned unchanged.
pub fn format_dec(raw: &str) -> String {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }

    let padded = format!("{:0>width$}", digits, width = DEC_PRECISION + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - DEC_PRECISION);
    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = frac_part.trim_end_matches('0');

    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{}", sign, int_part, frac_part)
    }
}

/// Parse a comma-separated list of pool ids (`"1, 2,678"`)
pub fn parse_pool_ids(input: &str) -> Result<BTreeSet<u64>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u64>().map_err(|e| format!("invalid pool id {:?}: {}", s, e)))
        .collect()
}

/// Parse a `--max-pages` value, which must be at least 1
pub fn parse_page_limit(input: &str) -> Result<usize, String> {
    match input.trim().parse::<usize>() {
        Ok(0) => Err("page limit must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid page limit {:?}: {}", input, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dec() {
        assert_eq!(format_dec("2000000000000000"), "0.002");
        assert_eq!(format_dec("1000000000000000000"), "1");
        assert_eq!(format_dec("1500000000000000000"), "1.5");
        assert_eq!(format_dec("0"), "0");
        assert_eq!(format_dec("-250000000000000000"), "-0.25");
        assert_eq!(format_dec("1073741824000000"), "0.001073741824");
        assert_eq!(format_dec("0.5"), "0.5");
        assert_eq!(format_dec(""), "");
    }

    #[test]
    fn test_parse_pool_ids() {
        let ids = parse_pool_ids("1, 2,678,").unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2, 678]);
        assert!(parse_pool_ids("1,x").is_err());
        assert!(parse_pool_ids("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_page_limit() {
        assert_eq!(parse_page_limit("3"), Ok(3));
        assert_eq!(parse_page_limit(" 40 "), Ok(40));
        assert!(parse_page_limit("0").is_err());
        assert!(parse_page_limit("-1").is_err());
        assert!(parse_page_limit("18446744073709551616000").is_err());
    }
}
