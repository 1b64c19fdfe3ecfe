// libs/appointment-cell/src/services/hasher.rs

use doctor_cell::models::ConsultationType;

use crate::models::UrgencyLevel;

/// Returned in place of a code until both date and time are chosen.
pub const TBD_SENTINEL: &str = "TBD";

/// Doctor segment used when no doctor is selected.
pub const GENERAL_DOCTOR_SEGMENT: &str = "GEN";

const TOKEN_WIDTH: usize = 5;
const HASH_CHARS_IN_CODE: usize = 4;
const DOCTOR_SEGMENT_WIDTH: usize = 3;
const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 32-bit rolling hash (`h = h * 31 + unit`) over the UTF-16 code units of
/// `input`, wrapping as a signed 32-bit integer at every step.
pub fn rolling_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

/// Fixed width base-36 rendering of `|hash|`.
pub fn render_token(hash: i32) -> String {
    let mut value = hash.unsigned_abs();
    let mut digits = Vec::with_capacity(7);
    loop {
        digits.push(BASE36_DIGITS[(value % 36) as usize] as char);
        value /= 36;
        if value == 0 {
            break;
        }
    }

    let rendered: String = digits.into_iter().rev().collect();
    format!("{:0>width$}", rendered, width = TOKEN_WIDTH)
        .chars()
        .take(TOKEN_WIDTH)
        .collect()
}

pub fn hash_token(input: &str) -> String {
    render_token(rolling_hash(input))
}

/// `"{IP|VC}-{U}{HASH4}-{DOC3}"`, or [`TBD_SENTINEL`] when date or time is
/// missing. The hash seed is `date|time|doctor|patient` exactly as given.
pub fn appointment_code(
    appointment_type: ConsultationType,
    urgency: UrgencyLevel,
    date: Option<&str>,
    time: Option<&str>,
    doctor_id: Option<&str>,
    patient_id: Option<&str>,
) -> String {
    // blank means missing, but the seed keeps the values byte for byte
    let date = date.filter(|d| !d.trim().is_empty());
    let time = time.filter(|t| !t.trim().is_empty());
    let (Some(date), Some(time)) = (date, time) else {
        return TBD_SENTINEL.to_string();
    };

    let doctor_id = doctor_id.unwrap_or_default();
    let seed = format!("{}|{}|{}|{}", date, time, doctor_id, patient_id.unwrap_or_default());
    let token = hash_token(&seed);

    let prefix = match appointment_type {
        ConsultationType::Physical => "IP",
        ConsultationType::Video => "VC",
    };

    format!(
        "{}-{}{}-{}",
        prefix,
        urgency.initial(),
        &token[..HASH_CHARS_IN_CODE],
        doctor_segment(doctor_id),
    )
}

fn doctor_segment(doctor_id: &str) -> String {
    let doctor_id = doctor_id.trim();
    if doctor_id.is_empty() {
        return GENERAL_DOCTOR_SEGMENT.to_string();
    }

    let chars: Vec<char> = doctor_id.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(DOCTOR_SEGMENT_WIDTH)..]
        .iter()
        .collect();
    format!("{:0>width$}", tail.to_uppercase(), width = DOCTOR_SEGMENT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tokens() {
        assert_eq!(hash_token(""), "00000");
        assert_eq!(hash_token("a"), "0002P");
        assert_eq!(hash_token("hello"), "1N1E4");
        assert_eq!(hash_token("Hello"), "15FZ5");
        assert_eq!(hash_token("héllo 🩺"), "6JEYK");
    }

    #[test]
    fn test_hash_wraps_as_signed_32_bit() {
        assert_eq!(rolling_hash("hello"), 99162322);
        assert_eq!(rolling_hash("2026-10-20|10:30 AM||"), -1989582609);
        assert_eq!(hash_token("2026-10-20|10:30 AM||"), "WWJNR");
    }

    #[test]
    fn test_render_token_extremes() {
        assert_eq!(render_token(0), "00000");
        assert_eq!(render_token(35), "0000Z");
        assert_eq!(render_token(-36), "00010");
        assert_eq!(render_token(i32::MAX), "ZIK0Z");
        assert_eq!(render_token(i32::MIN), "ZIK0Z");
    }

    #[test]
    fn test_input_equality_is_exact() {
        assert_ne!(hash_token("chest pain"), hash_token("chest pain "));
        assert_ne!(hash_token("Chest pain"), hash_token("chest pain"));
        assert_eq!(hash_token("chest pain"), hash_token("chest pain"));
    }

    #[test]
    fn test_appointment_code_layout() {
        let code = appointment_code(
            ConsultationType::Physical,
            UrgencyLevel::Critical,
            Some("2026-10-20"),
            Some("10:30 AM"),
            Some("doc_8f3kq29"),
            Some("patient-77"),
        );
        assert_eq!(code, "IP-CRQHU-Q29");

        let code = appointment_code(
            ConsultationType::Video,
            UrgencyLevel::Standard,
            Some("2026-10-20"),
            Some("10:30 AM"),
            None,
            None,
        );
        assert_eq!(code, "VC-SWWJN-GEN");
    }

    #[test]
    fn test_code_hashes_untrimmed_values() {
        let padded = appointment_code(
            ConsultationType::Video,
            UrgencyLevel::Standard,
            Some(" 2026-10-20"),
            Some("10:30 AM"),
            None,
            None,
        );
        assert_eq!(hash_token(" 2026-10-20|10:30 AM||"), "P09EB");
        assert_eq!(padded, "VC-SP09E-GEN");
    }

    #[test]
    fn test_short_doctor_ids_are_padded() {
        assert_eq!(doctor_segment("7"), "007");
        assert_eq!(doctor_segment("ab"), "0AB");
        assert_eq!(doctor_segment("   "), "GEN");
    }

    #[test]
    fn test_missing_date_or_time_yields_sentinel() {
        for (date, time) in [(None, Some("9:00 AM")), (Some("2026-10-20"), None), (Some(" "), Some("9:00 AM"))] {
            let code = appointment_code(
                ConsultationType::Physical,
                UrgencyLevel::Routine,
                date,
                time,
                Some("doc-1"),
                Some("p-1"),
            );
            assert_eq!(code, TBD_SENTINEL);
        }
    }
}
