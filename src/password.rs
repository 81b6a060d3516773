use rand::distributions::Alphanumeric;
use rand::Rng;

const TEMP_PASSWORD_LEN: usize = 24;

/// Random temporary password for a provisioned account. Generated fresh per
/// user and never written to any log or report; operators are told to force
/// a reset on first login instead.
pub fn generate() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passwords_are_long_alphanumerics() {
        let password = generate();
        assert_eq!(password.len(), TEMP_PASSWORD_LEN);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn passwords_differ_between_calls() {
        assert_ne!(generate(), generate());
    }
}
