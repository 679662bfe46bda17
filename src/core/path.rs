//! Header path parsing.
//!
//! A header such as `orders[0].items[1].sku` is split on `.` into segments,
//! and each segment may carry one trailing `[N]` array marker. There is no
//! escaping: keys can never contain a literal `.`, `[` or `]`.

use crate::domain::model::{HeaderPath, Segment};
use crate::utils::error::{ConvertError, Result};

pub fn parse_header(header: &str) -> Result<HeaderPath> {
    let segments = header
        .split('.')
        .map(|raw| parse_segment(header, raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(HeaderPath {
        header: header.to_string(),
        segments,
    })
}

/// Parses every header of a table up front so that a malformed header fails
/// the conversion before any row is touched.
pub fn parse_headers(headers: &[String]) -> Result<Vec<HeaderPath>> {
    headers.iter().map(|h| parse_header(h)).collect()
}

fn parse_segment(header: &str, raw: &str) -> Result<Segment> {
    let invalid = |reason: String| ConvertError::HeaderParse {
        header: header.to_string(),
        reason,
    };

    let Some(open) = raw.find('[') else {
        if raw.contains(']') {
            return Err(invalid(format!("'{}' has ']' without a matching '['", raw)));
        }
        return Ok(Segment::key(raw));
    };

    let close = raw[open..]
        .find(']')
        .map(|offset| open + offset)
        .ok_or_else(|| invalid(format!("'{}' has '[' without a matching ']'", raw)))?;

    let key = &raw[..open];
    if key.contains(']') {
        return Err(invalid(format!("'{}' has ']' without a matching '['", raw)));
    }

    let trailing = &raw[close + 1..];
    if !trailing.is_empty() {
        return Err(invalid(format!(
            "'{}' has unexpected text '{}' after the array index",
            raw, trailing
        )));
    }

    let digits = &raw[open + 1..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!(
            "'{}' is not a valid array index in '{}'",
            digits, raw
        )));
    }
    let index = digits
        .parse::<usize>()
        .map_err(|e| invalid(format!("array index '{}' in '{}': {}", digits, raw, e)))?;

    Ok(Segment::indexed(key, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(header: &str) -> Vec<Segment> {
        parse_header(header).unwrap().segments
    }

    #[test]
    fn test_plain_key() {
        assert_eq!(segments("name"), vec![Segment::key("name")]);
    }

    #[test]
    fn test_dotted_and_indexed_path() {
        assert_eq!(
            segments("a.b[0].c"),
            vec![Segment::key("a"), Segment::indexed("b", 0), Segment::key("c")]
        );
    }

    #[test]
    fn test_multi_digit_index() {
        assert_eq!(segments("tags[12]"), vec![Segment::indexed("tags", 12)]);
    }

    #[test]
    fn test_empty_segments_are_kept() {
        assert_eq!(segments(""), vec![Segment::key("")]);
        assert_eq!(
            segments("a..b"),
            vec![Segment::key("a"), Segment::key(""), Segment::key("b")]
        );
    }

    #[test]
    fn test_empty_key_with_index() {
        assert_eq!(segments("[3]"), vec![Segment::indexed("", 3)]);
    }

    #[test]
    fn test_header_is_retained() {
        assert_eq!(parse_header("a.b").unwrap().header, "a.b");
    }

    #[test]
    fn test_malformed_brackets_fail() {
        for header in [
            "a[", "a]", "a[x]", "a[]", "a[-1]", "a[1.5]", "a[0]b", "a[0][1]", "a]0[",
            "a[ 1]", "a[+1]",
        ] {
            let err = parse_header(header).unwrap_err();
            assert!(
                matches!(err, ConvertError::HeaderParse { header: ref h, .. } if h == header),
                "expected parse error for {:?}, got {:?}",
                header,
                err
            );
        }
    }

    #[test]
    fn test_index_overflow_fails() {
        assert!(parse_header("a[99999999999999999999999]").is_err());
    }

    #[test]
    fn test_parse_headers_stops_at_first_error() {
        let headers = vec!["ok".to_string(), "bad[".to_string(), "also.ok".to_string()];
        let err = parse_headers(&headers).unwrap_err();
        assert!(err.to_string().contains("bad["));
    }
}
