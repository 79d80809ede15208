use uuid::Uuid;

/// One-time confirmation code generator.
///
/// Codes prove control of an email address during account sign-up. Each
/// code is the leading segment of a random v4 UUID: eight lowercase hex
/// characters drawn from the operating system RNG, with no relation to
/// the account email or the current time.
pub struct CodeGenerator;

impl CodeGenerator {
    /// Create a new code generator instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh confirmation code.
    ///
    /// # Returns
    /// Eight-character lowercase hex string
    pub fn generate(&self) -> String {
        let id = Uuid::new_v4().to_string();

        match id.split_once('-') {
            Some((prefix, _)) => prefix.to_string(),
            None => id,
        }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        let generator = CodeGenerator::new();
        let code = generator.generate();

        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!code.contains(|c: char| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_codes_are_random() {
        let generator = CodeGenerator::new();

        let first = generator.generate();
        let second = generator.generate();

        assert_ne!(first, second);
    }
}
