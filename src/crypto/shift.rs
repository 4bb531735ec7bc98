//! Keyed character-shift obfuscation
//!
//! Every character except the record separator `*` and the line terminator
//! `\n` is moved `key` code points forward. Arithmetic wraps modulo the
//! number of Unicode scalar values and steps over the surrogate range, so
//! the result is always a valid `char`.
//!
//! A shifted character can land on `*` or `\n` (a space with key 10 becomes
//! `*`). Such a character does not survive [`reveal`]. Writers check for it
//! with [`obfuscation_collision`] before putting anything on disk.
//!
//! This is obfuscation, not encryption.

/// Characters that are never shifted
pub const RECORD_SEPARATOR: char = '*';
pub const LINE_TERMINATOR: char = '\n';

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;

/// Number of Unicode scalar values, the modulus of the shift
pub const ALPHABET_SIZE: u32 = char::MAX as u32 + 1 - SURROGATE_LEN;

/// Obfuscate `text` by shifting each character forward by `key`
pub fn obfuscate(text: &str, key: i64) -> String {
    shift_str(text, forward_offset(key))
}

/// Reverse [`obfuscate`] with the same key
pub fn reveal(text: &str, key: i64) -> String {
    shift_str(text, backward_offset(key))
}

/// First character of `text` that [`obfuscate`] would turn into `*` or `\n`
pub fn obfuscation_collision(text: &str, key: i64) -> Option<char> {
    find_collision(text, forward_offset(key))
}

/// First character of `text` that [`reveal`] would turn into `*` or `\n`
pub fn reveal_collision(text: &str, key: i64) -> Option<char> {
    find_collision(text, backward_offset(key))
}

fn forward_offset(key: i64) -> u32 {
    key.rem_euclid(ALPHABET_SIZE as i64) as u32
}

fn backward_offset(key: i64) -> u32 {
    (ALPHABET_SIZE - forward_offset(key)) % ALPHABET_SIZE
}

fn is_structural(c: char) -> bool {
    c == RECORD_SEPARATOR || c == LINE_TERMINATOR
}

fn shift_str(text: &str, offset: u32) -> String {
    text.chars()
        .map(|c| if is_structural(c) { c } else { shift_char(c, offset) })
        .collect()
}

fn find_collision(text: &str, offset: u32) -> Option<char> {
    text.chars()
        .find(|&c| !is_structural(c) && is_structural(shift_char(c, offset)))
}

fn shift_char(c: char, offset: u32) -> char {
    // offset < ALPHABET_SIZE, so the sum cannot overflow u32
    let index = (to_index(c) + offset) % ALPHABET_SIZE;

    // from_index never yields a surrogate or a value above char::MAX
    char::from_u32(from_index(index)).unwrap_or(c)
}

fn to_index(c: char) -> u32 {
    let v = c as u32;
    if v < SURROGATE_START {
        v
    } else {
        v - SURROGATE_LEN
    }
}

fn from_index(i: u32) -> u32 {
    if i < SURROGATE_START {
        i
    } else {
        i + SURROGATE_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "CPT*Compte A",
        "OPE*05/01/2024*loyer*Compte A*-750.00*VIR*True*logement\n",
        "Compte Épargne*santé*€ 12,50",
        "line one\nline two\n\n",
        "\u{D7FF}\u{E000}\u{FFFF}\u{10000}\u{10FFFF}",
        "emoji 💸 and tabs",
    ];

    #[test]
    fn test_round_trip_various_keys() {
        for key in [0, 1, 23, 25, -1, 1_000_003, i64::MAX, i64::MIN] {
            for text in SAMPLES {
                assert_eq!(obfuscation_collision(text, key), None, "key {}", key);
                assert_eq!(reveal(&obfuscate(text, key), key), *text, "key {}", key);
            }
        }
    }

    #[test]
    fn test_plain_code_point_shift() {
        assert_eq!(obfuscate("Compte A", 23), "Z\u{86}\u{84}\u{87}\u{8b}|7X");
        assert_eq!(obfuscate("abc", 23), "xyz");
        assert_eq!(reveal("Z\u{86}\u{84}\u{87}\u{8b}|7X", 23), "Compte A");
        assert_eq!(obfuscate("Marie", 0), "Marie");
    }

    #[test]
    fn test_separators_unchanged() {
        let hidden = obfuscate("a*b\nc", 23);
        let chars: Vec<char> = hidden.chars().collect();
        assert_eq!(chars[1], '*');
        assert_eq!(chars[3], '\n');
        assert_ne!(chars[0], 'a');
    }

    #[test]
    fn test_collisions_detected() {
        // ')' + 1 and ' ' + 10 both land on '*'
        assert_eq!(obfuscate(")", 1), "*");
        assert_eq!(obfuscation_collision(")", 1), Some(')'));
        assert_eq!(obfuscation_collision("Compte A", 10), Some(' '));
        assert_eq!(obfuscation_collision("\t", 1), Some('\t'));
        assert_eq!(reveal_collision("+", 1), Some('+'));

        assert_eq!(obfuscation_collision("Compte A", 23), None);
        assert_eq!(obfuscation_collision("a*b\nc", 1), None);
    }

    #[test]
    fn test_wraps_at_end_of_alphabet() {
        let top = obfuscate("\u{10FFFF}", 1);
        assert_eq!(top, "\u{0}");
        assert_eq!(reveal("\u{0}", 1), "\u{10FFFF}");

        let below_surrogates = obfuscate("\u{D7FF}", 1);
        assert_eq!(below_surrogates, "\u{E000}");
        assert_eq!(reveal("\u{E000}", 1), "\u{D7FF}");
    }

    #[test]
    fn test_key_congruence() {
        let text = "Compte B";
        assert_eq!(
            obfuscate(text, 5),
            obfuscate(text, 5 + ALPHABET_SIZE as i64)
        );
        assert_eq!(reveal(text, -5), obfuscate(text, 5));
    }
}
