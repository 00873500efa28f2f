//! Text encoding of fragments for display as QR codes.
//!
//! A fragment travels as `UR:BYTES/<seq>-<count>/<body>`. `seq` is the
//! one-based sequence number, `count` the number of plain parts, and `body`
//! unpadded RFC 4648 base32 of:
//!
//! `[bincode FragmentHeader][data][u32 big-endian CRC-32 of the preceding bytes]`
//!
//! Every character belongs to the QR alphanumeric set. Receivers match the
//! scheme and type case-insensitively.

use std::num::NonZeroUsize;

use bincode::{config, decode_from_slice, encode_to_vec, error::EncodeError};
use data_encoding::BASE32_NOPAD;

use super::{Checksum, Fragment, FragmentError, FragmentHeader};

/// Scheme tag that marks a string as part of an animated transfer.
pub const SCHEME: &str = "ur";

/// Transfer type carried by this codec.
pub const TRANSFER_TYPE: &str = "bytes";

const FRAME_CHECKSUM_LEN: usize = std::mem::size_of::<u32>();

/// Largest bincode encoding of a [`FragmentHeader`]: five varint `u32` fields.
const MAX_HEADER_LEN: usize = 5 * 5;

/// `UR:BYTES/` followed by two ten-digit numbers and their separators.
const MAX_ROUTE_LEN: usize = 9 + 10 + 1 + 10 + 1;

/// Upper bound on the length of an encoded fragment carrying `data_len` bytes.
#[must_use]
pub fn encoded_len_ceiling(data_len: usize) -> usize {
    MAX_ROUTE_LEN + BASE32_NOPAD.encode_len(MAX_HEADER_LEN + data_len + FRAME_CHECKSUM_LEN)
}

/// Largest part length whose encoded fragment never exceeds `max_chars`.
///
/// Returns `None` when the fixed overhead alone does not fit.
#[must_use]
pub fn max_data_len(max_chars: usize) -> Option<NonZeroUsize> {
    let body_chars = max_chars.checked_sub(MAX_ROUTE_LEN)?;
    let body_bytes = body_chars / 8 * 5 + body_chars % 8 * 5 / 8;
    NonZeroUsize::new(body_bytes.checked_sub(MAX_HEADER_LEN + FRAME_CHECKSUM_LEN)?)
}

/// Report whether `raw` carries the animated-transfer scheme tag.
///
/// Strings without the tag are single-shot payloads.
///
/// # Examples
///
/// ```
/// use qrstream::fragment::is_fragment_string;
/// assert!(is_fragment_string("UR:BYTES/1-3/AEBAGBA"));
/// assert!(is_fragment_string("ur:crypto-psbt/1-2/abc"));
/// assert!(!is_fragment_string("lightning:lnbc1..."));
/// ```
#[must_use]
pub fn is_fragment_string(raw: &str) -> bool {
    raw.trim_start()
        .split_once(':')
        .is_some_and(|(scheme, _)| scheme.eq_ignore_ascii_case(SCHEME))
}

/// Encode a fragment as a QR-ready string.
///
/// # Errors
///
/// Returns an [`EncodeError`] if the header cannot be encoded.
pub fn encode_fragment(fragment: &Fragment) -> Result<String, EncodeError> {
    let header = fragment.header();
    let mut body = encode_to_vec(header, config::standard())?;
    body.extend_from_slice(fragment.data());
    let frame_checksum = crc32fast::hash(&body);
    body.extend_from_slice(&frame_checksum.to_be_bytes());

    Ok(format!(
        "{}:{}/{}-{}/{}",
        SCHEME.to_ascii_uppercase(),
        TRANSFER_TYPE.to_ascii_uppercase(),
        header.sequence_index().sequence_number(),
        header.sequence_count(),
        BASE32_NOPAD.encode(&body),
    ))
}

/// Parse a scanned string into a [`Fragment`].
///
/// # Errors
///
/// Returns [`FragmentError::Unsupported`] for well-formed strings of another
/// transfer type and a syntax variant of [`FragmentError`] for anything else
/// that is not a valid fragment.
pub fn decode_fragment(raw: &str) -> Result<Fragment, FragmentError> {
    let raw = raw.trim();
    let Some((scheme, route)) = raw.split_once(':') else {
        return Err(FragmentError::MissingScheme);
    };
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return Err(FragmentError::MissingScheme);
    }

    let mut components = route.split('/');
    let kind = components.next().unwrap_or_default();
    if !kind.eq_ignore_ascii_case(TRANSFER_TYPE) {
        return Err(if is_well_formed_type(kind) {
            FragmentError::Unsupported {
                kind: kind.to_ascii_lowercase(),
            }
        } else {
            FragmentError::MalformedRoute
        });
    }
    let (Some(sequence), Some(body), None) =
        (components.next(), components.next(), components.next())
    else {
        return Err(FragmentError::MalformedRoute);
    };

    let (sequence_number, sequence_count) = parse_sequence(sequence)?;
    let bytes = BASE32_NOPAD
        .decode(body.to_ascii_uppercase().as_bytes())
        .map_err(|err| FragmentError::InvalidBody(err.to_string()))?;
    let fragment = decode_body(&bytes)?;

    let header = fragment.header();
    if header.sequence_index().sequence_number() != sequence_number
        || header.sequence_count() != sequence_count
    {
        return Err(FragmentError::RouteMismatch);
    }
    Ok(fragment)
}

fn is_well_formed_type(kind: &str) -> bool {
    !kind.is_empty()
        && kind
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
}

fn parse_sequence(sequence: &str) -> Result<(u64, u32), FragmentError> {
    let invalid = || FragmentError::InvalidSequence(sequence.to_owned());
    let (number, count) = sequence.split_once('-').ok_or_else(invalid)?;
    if !is_decimal(number) || !is_decimal(count) {
        return Err(invalid());
    }
    let number: u64 = number.parse().map_err(|_| invalid())?;
    let count: u32 = count.parse().map_err(|_| invalid())?;

    if count == 0 {
        return Err(FragmentError::ZeroCount);
    }
    if number == 0 || number > u64::from(u32::MAX) + 1 {
        return Err(FragmentError::IndexOutOfRange(number));
    }
    Ok((number, count))
}

fn is_decimal(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}

fn decode_body(bytes: &[u8]) -> Result<Fragment, FragmentError> {
    let Some(split_at) = bytes.len().checked_sub(FRAME_CHECKSUM_LEN) else {
        return Err(FragmentError::InvalidBody("body shorter than its checksum".to_owned()));
    };
    let (content, trailer) = bytes.split_at(split_at);
    let mut expected = [0_u8; FRAME_CHECKSUM_LEN];
    expected.copy_from_slice(trailer);
    let expected = Checksum::new(u32::from_be_bytes(expected));
    let found = Checksum::of(content);
    if expected != found {
        return Err(FragmentError::FrameChecksum { expected, found });
    }

    let (header, consumed) = decode_from_slice::<FragmentHeader, _>(content, config::standard())
        .map_err(|err| FragmentError::InvalidBody(err.to_string()))?;
    let data = content.get(consumed..).unwrap_or_default();
    validate_lengths(&header, data.len())?;
    Ok(Fragment::new(header, data.to_vec()))
}

fn validate_lengths(header: &FragmentHeader, data_len: usize) -> Result<(), FragmentError> {
    let part_len = u64::from(header.data_len());
    let message_len = u64::from(header.message_len());
    let count = u64::from(header.sequence_count());
    let consistent = count > 0
        && part_len > 0
        && usize::try_from(header.data_len()).is_ok_and(|len| len == data_len)
        && message_len > (count - 1) * part_len
        && message_len <= count * part_len;
    if consistent {
        Ok(())
    } else {
        Err(FragmentError::InconsistentLength)
    }
}
