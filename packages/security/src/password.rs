use subtle::ConstantTimeEq;

/// Compares a submitted password with the configured one in constant time.
/// Length differences are rejected without comparing contents.
pub fn verify_admin_password(submitted: &str, configured: &str) -> bool {
    let submitted = submitted.as_bytes();
    let configured = configured.as_bytes();
    if submitted.len() != configured.len() {
        return false;
    }
    submitted.ct_eq(configured).unwrap_u8() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("s3nha-forte", "s3nha-forte", true)]
    #[case("s3nha-fortE", "s3nha-forte", false)]
    #[case("s3nha", "s3nha-forte", false)]
    #[case("", "s3nha-forte", false)]
    fn test_verify_admin_password(#[case] submitted: &str, #[case] configured: &str, #[case] expected: bool) {
        assert_eq!(verify_admin_password(submitted, configured), expected);
    }
}
