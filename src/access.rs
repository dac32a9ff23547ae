/// Checks a caller-supplied access code against the configured one.
///
/// Runs in time dependent only on the lengths, not on where the codes first
/// differ. A missing or empty code never matches.
pub fn verify_access_code(configured: &str, supplied: Option<&str>) -> bool {
    let Some(supplied) = supplied.filter(|s| !s.is_empty()) else {
        return false;
    };

    let (a, b) = (configured.as_bytes(), supplied.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("correct", Some("correct"), true)]
    #[case("correct", Some("Correct"), false)]
    #[case("correct", Some("correct "), false)]
    #[case("correct", Some("correc"), false)]
    #[case("correct", Some(""), false)]
    #[case("correct", None, false)]
    #[case("暗号", Some("暗号"), true)]
    fn test_verify_access_code(
        #[case] configured: &str,
        #[case] supplied: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(verify_access_code(configured, supplied), expected);
    }
}
