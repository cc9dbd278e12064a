//! Share code format
//!
//! `base64url( lz4(json) ++ sha256(lz4(json))[..4] )`, unpadded. The LZ4
//! block carries its uncompressed size as a little-endian u32 prefix.
//!
//! Links from the browser page predate this format and carry LZ-String
//! `compressToEncodedURIComponent` output. Those are only ever read.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use sha2::{Digest, Sha256};

use super::error::ShareError;
use super::state::{parse_share_json, ShareState};

/// Bytes of the truncated SHA-256 tag.
pub const CHECKSUM_LEN: usize = 4;

/// Upper bound on the declared uncompressed payload.
pub const MAX_SHARE_PAYLOAD: usize = 64 * 1024;

const SIZE_PREFIX_LEN: usize = 4;

/// Encode a share state into a URL-safe code.
pub fn encode_share_state(state: &ShareState) -> Result<String, ShareError> {
    // 1. Serialize to the keyed JSON shape
    let json = serde_json::to_vec(&state.to_wire()).map_err(ShareError::Serialization)?;

    // 2. Compress with LZ4 (size prepended)
    let mut bytes = compress_prepend_size(&json);

    // 3. Append truncated checksum
    let tag = checksum(&bytes);
    bytes.extend_from_slice(&tag);

    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decode a share code produced by [`encode_share_state`], or a legacy
/// LZ-String link.
///
/// Accepts percent-encoded input, standard base64 alphabet, and trailing
/// padding, since links get mangled by chat clients. When the tagged format
/// does not check out, the LZ-String reading is tried before the original
/// error is returned.
pub fn decode_share_state(code: &str) -> Result<ShareState, ShareError> {
    let decoded = urlencoding::decode(code)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| code.to_string());
    let raw = decoded.trim();

    match decode_tagged(raw) {
        Ok(state) => Ok(state),
        Err(ShareError::Empty) => Err(ShareError::Empty),
        Err(err) => match decode_lz_string(raw) {
            Some(state) => {
                log::debug!("Read legacy LZ-String share code");
                Ok(state)
            }
            None => Err(err),
        },
    }
}

fn decode_tagged(raw: &str) -> Result<ShareState, ShareError> {
    let normalized: String = raw
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(ShareError::Empty);
    }

    let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes())?;
    if bytes.len() < SIZE_PREFIX_LEN + CHECKSUM_LEN {
        return Err(ShareError::TooShort { len: bytes.len() });
    }

    // Split payload and checksum
    let (payload, tag) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if checksum(payload).as_slice() != tag {
        return Err(ShareError::ChecksumMismatch);
    }

    let mut declared = [0u8; SIZE_PREFIX_LEN];
    declared.copy_from_slice(&payload[..SIZE_PREFIX_LEN]);
    let size = u32::from_le_bytes(declared) as usize;
    if size > MAX_SHARE_PAYLOAD {
        return Err(ShareError::PayloadTooLarge { size });
    }

    let json = decompress_size_prepended(payload)?;
    parse_share_json(&json)
}

/// LZ-String URI-component payload. `None` unless it yields share JSON.
fn decode_lz_string(raw: &str) -> Option<ShareState> {
    if raw.is_empty() || raw.len() > MAX_SHARE_PAYLOAD {
        return None;
    }
    let units = lz_str::decompress_from_encoded_uri_component(raw)?;
    if units.is_empty() || units.len() > MAX_SHARE_PAYLOAD {
        return None;
    }
    let json = String::from_utf16(&units).ok()?;
    parse_share_json(json.as_bytes()).ok()
}

fn checksum(bytes: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(bytes);
    let mut tag = [0u8; CHECKSUM_LEN];
    tag.copy_from_slice(&digest[..CHECKSUM_LEN]);
    tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerSlot;
    use crate::names::NameRecord;

    fn sample() -> ShareState {
        let mut names = NameRecord::new();
        names.insert(PlayerSlot::home(0), "ALPHA");
        names.insert(PlayerSlot::home(9), "JOSÉ");
        names.insert(PlayerSlot::away(3), "BRAVO");
        ShareState::new("4231", "352", names)
    }

    /// Hand-assemble a code around arbitrary JSON.
    fn code_for_json(json: &str) -> String {
        let mut bytes = compress_prepend_size(json.as_bytes());
        let tag = checksum(&bytes);
        bytes.extend_from_slice(&tag);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    #[test]
    fn test_roundtrip() {
        let state = sample();
        let code = encode_share_state(&state).unwrap();
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode_share_state(&code).unwrap(), state);
    }

    #[test]
    fn test_tolerates_mangled_transport() {
        let state = sample();
        let code = encode_share_state(&state).unwrap();

        let standard = code.replace('-', "+").replace('_', "/");
        assert_eq!(decode_share_state(&format!(" {standard}== ")).unwrap(), state);

        let escaped = urlencoding::encode(&standard).into_owned();
        assert_eq!(decode_share_state(&escaped).unwrap(), state);
    }

    #[test]
    fn test_checksum_validation() {
        let code = encode_share_state(&sample()).unwrap();
        let mut bytes = URL_SAFE_NO_PAD.decode(&code).unwrap();

        // Corrupt one payload byte
        bytes[SIZE_PREFIX_LEN] ^= 0xFF;
        let tampered = URL_SAFE_NO_PAD.encode(&bytes);

        assert!(matches!(decode_share_state(&tampered), Err(ShareError::ChecksumMismatch)));
    }

    #[test]
    fn test_declared_size_is_bounded() {
        let mut bytes = ((MAX_SHARE_PAYLOAD + 1) as u32).to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0u8; 8]);
        let tag = checksum(&bytes);
        bytes.extend_from_slice(&tag);

        let result = decode_share_state(&URL_SAFE_NO_PAD.encode(bytes));
        assert!(matches!(result, Err(ShareError::PayloadTooLarge { .. })));
    }

    #[test]
    fn test_malformed_codes() {
        assert!(matches!(decode_share_state(""), Err(ShareError::Empty)));
        assert!(matches!(decode_share_state("  ==  "), Err(ShareError::Empty)));
        assert!(matches!(decode_share_state("***"), Err(ShareError::Base64(_))));
        assert!(matches!(decode_share_state("AAAA"), Err(ShareError::TooShort { len: 3 })));

        for code in ["", "***", "AAAA", "not a code at all"] {
            assert!(decode_share_state(code).unwrap_err().is_malformed());
        }
    }

    #[test]
    fn test_legacy_positional_payload() {
        let code = code_for_json(r#"["442","433",["A","B"],["C"]]"#);
        let state = decode_share_state(&code).unwrap();

        assert_eq!(state.home_key, "442");
        assert_eq!(state.away_key, "433");
        let names = state.names.unwrap();
        assert_eq!(names.get(PlayerSlot::home(1)), Some("B"));
        assert_eq!(names.get(PlayerSlot::away(0)), Some("C"));
    }

    #[test]
    fn test_lz_string_link_from_browser_page() {
        // {"h":"442","a":"433","n":{"my-team_0":"ALPHA"}} as written by the page
        let code = "N4IgFiBcICwwTCANCAhlWBmTyQDspQBbATwFoAXAU1SIH0AGDAQQBkAFACWZAF9egA";
        let state = decode_share_state(code).unwrap();

        assert_eq!(state.home_key, "442");
        assert_eq!(state.away_key, "433");
        let names = state.names.unwrap();
        assert_eq!(names.get(PlayerSlot::home(0)), Some("ALPHA"));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_lz_string_positional_payload() {
        let code = lz_str::compress_to_encoded_uri_component(r#"["352","4231",["KANE"],[null,"RICE"]]"#);
        let state = decode_share_state(&code).unwrap();

        assert_eq!(state.home_key, "352");
        assert_eq!(state.away_key, "4231");
        let names = state.names.unwrap();
        assert_eq!(names.get(PlayerSlot::home(0)), Some("KANE"));
        assert_eq!(names.get(PlayerSlot::away(1)), Some("RICE"));
    }

    #[test]
    fn test_lz_string_non_share_text_keeps_tagged_error() {
        let code = lz_str::compress_to_encoded_uri_component("hello there");
        assert!(decode_share_state(&code).unwrap_err().is_malformed());
    }

    #[test]
    fn test_wrong_json_shape() {
        let code = code_for_json(r#"{"h":["442"]}"#);
        assert!(matches!(decode_share_state(&code), Err(ShareError::UnsupportedShape)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_names() -> impl Strategy<Value = NameRecord> {
            prop::collection::btree_map(
                (prop::bool::ANY, 0usize..11),
                "[A-Z][A-Z .'-]{0,15}",
                0..22,
            )
            .prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|((home, index), name)| {
                        let slot = if home { PlayerSlot::home(index) } else { PlayerSlot::away(index) };
                        (slot, name)
                    })
                    .collect::<NameRecord>()
            })
        }

        proptest! {
            #[test]
            fn prop_roundtrip(
                home in "[0-9]{2,4}d?",
                away in "[0-9]{2,4}",
                names in arb_names(),
            ) {
                let state = ShareState::new(home, away, names);
                let code = encode_share_state(&state).unwrap();
                prop_assert_eq!(decode_share_state(&code).unwrap(), state);
            }

            #[test]
            fn prop_garbage_never_panics(code in "\\PC{0,64}") {
                let _ = decode_share_state(&code);
            }
        }
    }
}
