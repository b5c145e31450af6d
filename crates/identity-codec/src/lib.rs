//! Invisible identity marker codec.
//!
//! Encodes a correspondent id into a string of zero-width code points so it
//! can ride along inside human-readable relayed text without altering what
//! the reader sees. Each decimal digit `d` becomes `d` copies of the unit
//! code point followed by one digit terminator, so the marker round-trips
//! exactly and never contains a visible character.

mod error;

pub use error::CodecError;

/// Unit code point: ZERO WIDTH SPACE. A digit `d` is a run of `d` units.
pub const UNIT: char = '\u{200B}';

/// Digit terminator code point: NOMINAL DIGIT SHAPES. Ends every digit run.
pub const TERMINATOR: char = '\u{206F}';

/// Separator between relayed text and its trailing marker. Alternating
/// SOFT HYPHEN / NATIONAL DIGIT SHAPES, a sequence that cannot occur in
/// ordinary typed text and renders zero width.
pub const SEPARATOR: &str = "\u{00AD}\u{206E}\u{00AD}\u{206E}";

/// Longest unit run that still maps to a single decimal digit.
const MAX_DIGIT_RUN: usize = 9;

/// Encode an id as an invisible marker.
///
/// The digit `0` produces an empty run, i.e. a bare terminator.
pub fn encode(id: u64) -> String {
    let mut marker = String::new();
    for digit in id.to_string().bytes().map(|b| b - b'0') {
        for _ in 0..digit {
            marker.push(UNIT);
        }
        marker.push(TERMINATOR);
    }
    marker
}

/// Decode a marker back into the id it encodes.
///
/// Rejects any character outside the two-symbol alphabet and any unit run of
/// ten or more (ambiguous under this scheme), rather than guessing.
pub fn decode(marker: &str) -> Result<u64, CodecError> {
    if marker.is_empty() {
        return Err(CodecError::Empty);
    }
    if let Some(c) = marker.chars().find(|&c| c != UNIT && c != TERMINATOR) {
        return Err(CodecError::UnsupportedCharacter(c as u32));
    }

    let mut segments: Vec<&str> = marker.split(TERMINATOR).collect();
    if segments.last() == Some(&"") {
        // A trailing terminator produces one empty segment; it is not a digit.
        segments.pop();
    }

    let mut digits = String::with_capacity(segments.len());
    for segment in segments {
        let run = segment.chars().count();
        if run > MAX_DIGIT_RUN {
            return Err(CodecError::DigitRunTooLong(run));
        }
        digits.push((b'0' + run as u8) as char);
    }

    digits.parse().map_err(|_| CodecError::Overflow)
}

/// Append the separator and the encoded id to a piece of relayed text.
pub fn tag(text: &str, id: u64) -> String {
    format!("{text}{SEPARATOR}{}", encode(id))
}

/// Recover the id from relayed text carrying a trailing marker.
///
/// Only the segment after the last separator occurrence is trusted, and it
/// must decode strictly; text whose tail is not a well-formed marker yields
/// an error instead of a fabricated destination.
pub fn extract_id(text: &str) -> Result<u64, CodecError> {
    let start = text.rfind(SEPARATOR).ok_or(CodecError::MissingMarker)?;
    decode(&text[start + SEPARATOR.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_representative_ids() {
        let ids = [
            0u64,
            5,
            9,
            10,
            100,
            555,
            777,
            90210,
            1_000_000,
            1_203_040_506,
            999_999_999_999,
            1_000_000_000_000,
        ];
        for id in ids {
            assert_eq!(decode(&encode(id)), Ok(id), "id {id} failed round trip");
        }
    }

    #[test]
    fn test_encode_is_invisible() {
        let marker = encode(4821);
        assert!(marker.chars().all(|c| c == UNIT || c == TERMINATOR));
    }

    #[test]
    fn test_encode_zero_digit_is_bare_terminator() {
        assert_eq!(encode(0), TERMINATOR.to_string());

        // 101 -> run(1), empty run, run(1)
        let expected: String = [
            UNIT.to_string(),
            TERMINATOR.to_string(),
            TERMINATOR.to_string(),
            UNIT.to_string(),
            TERMINATOR.to_string(),
        ]
        .concat();
        assert_eq!(encode(101), expected);
    }

    #[test]
    fn test_decode_rejects_visible_character() {
        let mut marker = encode(42);
        marker.push('x');
        assert_eq!(
            decode(&marker),
            Err(CodecError::UnsupportedCharacter('x' as u32))
        );
    }

    #[test]
    fn test_decode_rejects_long_digit_run() {
        let mut marker: String = std::iter::repeat(UNIT).take(11).collect();
        marker.push(TERMINATOR);
        assert_eq!(decode(&marker), Err(CodecError::DigitRunTooLong(11)));

        let mut marker: String = std::iter::repeat(UNIT).take(10).collect();
        marker.push(TERMINATOR);
        assert_eq!(decode(&marker), Err(CodecError::DigitRunTooLong(10)));
    }

    #[test]
    fn test_decode_rejects_empty_marker() {
        assert_eq!(decode(""), Err(CodecError::Empty));
    }

    #[test]
    fn test_decode_max_digit_run() {
        let mut marker: String = std::iter::repeat(UNIT).take(9).collect();
        marker.push(TERMINATOR);
        assert_eq!(decode(&marker), Ok(9));
    }

    #[test]
    fn test_tag_then_extract() {
        let relayed = tag("[alice#555] - hello", 555);
        assert_eq!(extract_id(&relayed), Ok(555));
        assert!(relayed.starts_with("[alice#555] - hello"));
    }

    #[test]
    fn test_extract_uses_last_separator_occurrence() {
        // A reply whose visible text itself contains the separator token:
        // only the trailing segment is trusted.
        let text = format!("prefix{SEPARATOR}middle");
        let relayed = tag(&text, 90210);
        assert_eq!(extract_id(&relayed), Ok(90210));
    }

    #[test]
    fn test_extract_rejects_text_without_marker() {
        assert_eq!(
            extract_id("just a plain reply"),
            Err(CodecError::MissingMarker)
        );
    }

    #[test]
    fn test_extract_rejects_garbage_after_separator() {
        let text = format!("header{SEPARATOR}not-a-marker");
        assert!(matches!(
            extract_id(&text),
            Err(CodecError::UnsupportedCharacter(_))
        ));
    }
}
