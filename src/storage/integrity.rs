//! Integrity envelope for user files
//!
//! A sealed document is the plain content followed by one last line
//! `HASH*<hex sha256 of the content>`. Verification runs on the revealed
//! text before any record is decoded.

use sha2::{Digest, Sha256};

use crate::crypto::{reveal, LINE_TERMINATOR};
use crate::error::IntegrityError;

pub const HASH_TAG: &str = "HASH";

const HASH_PREFIX: &str = "HASH*";

/// Hex SHA-256 of the plain content
pub fn content_hash(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}

/// Append the hash line to `plain`
pub fn seal(plain: &str) -> String {
    format!("{}{}{}{}", plain, LINE_TERMINATOR, HASH_PREFIX, content_hash(plain))
}

/// Split a sealed document into its content and stored hash
///
/// Trailing line terminators are ignored. The content is everything before
/// the terminator that precedes the hash line.
pub fn unseal(sealed: &str) -> Result<(&str, &str), IntegrityError> {
    let sealed = sealed.trim_end_matches([LINE_TERMINATOR, '\r']);

    let (content, last) = match sealed.rsplit_once(LINE_TERMINATOR) {
        Some((content, last)) => (content, last),
        None => ("", sealed),
    };

    let stored = last
        .strip_prefix(HASH_PREFIX)
        .ok_or(IntegrityError::MissingHash)?;

    Ok((content, stored))
}

/// Verify a revealed document
pub fn verify_plain(sealed: &str) -> Result<(), IntegrityError> {
    let (content, stored) = unseal(sealed)?;
    let actual = content_hash(content);

    if stored != actual {
        return Err(IntegrityError::Mismatch {
            expected: stored.to_string(),
            actual,
        });
    }

    Ok(())
}

/// Reveal an obfuscated document with `key` and verify it
pub fn verify(obfuscated: &str, key: i64) -> Result<(), IntegrityError> {
    verify_plain(&reveal(obfuscated, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::obfuscate;

    const CONTENT: &str = "CPT*Compte A\nCPT*Compte B\nBUD*Logement*800.00*Compte A";

    #[test]
    fn test_hash_is_sha256_hex() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_seal_appends_hash_line() {
        let sealed = seal(CONTENT);
        let last = sealed.lines().last().unwrap();
        assert_eq!(last, format!("HASH*{}", content_hash(CONTENT)));
        assert!(sealed.starts_with(CONTENT));
    }

    #[test]
    fn test_seal_then_verify() {
        for content in [CONTENT, "", "\n", "\nleading", "single"] {
            assert_eq!(verify_plain(&seal(content)), Ok(()), "{:?}", content);
        }
    }

    #[test]
    fn test_verify_obfuscated() {
        for key in [0, 3, 23, -1000] {
            let stored = obfuscate(&seal(CONTENT), key);
            assert_eq!(verify(&stored, key), Ok(()));
        }
    }

    #[test]
    fn test_trailing_newline_ignored() {
        let sealed = format!("{}\n", seal(CONTENT));
        assert_eq!(verify_plain(&sealed), Ok(()));
    }

    #[test]
    fn test_missing_hash_fails_closed() {
        assert_eq!(verify_plain(CONTENT), Err(IntegrityError::MissingHash));
        assert_eq!(verify_plain(""), Err(IntegrityError::MissingHash));
    }

    #[test]
    fn test_any_single_character_flip_detected() {
        let key = 23;
        let stored = obfuscate(&seal(CONTENT), key);
        let chars: Vec<char> = stored.chars().collect();

        for i in 0..chars.len() {
            let mut tampered = chars.clone();
            tampered[i] = if chars[i] == 'Z' { 'Y' } else { 'Z' };
            let tampered: String = tampered.into_iter().collect();
            assert!(verify(&tampered, key).is_err(), "flip at {} undetected", i);
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let stored = obfuscate(&seal(CONTENT), 23);
        assert!(verify(&stored, 22).is_err());
    }

    #[test]
    fn test_unseal() {
        let sealed = seal(CONTENT);
        let (content, hash) = unseal(&sealed).unwrap();
        assert_eq!(content, CONTENT);
        assert_eq!(hash, content_hash(CONTENT));
    }
}
