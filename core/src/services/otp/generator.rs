//! Numeric code generation

use rand::{rngs::OsRng, Rng};

/// Generates numeric codes from the operating system CSPRNG
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
    allow_leading_zero: bool,
}

impl CodeGenerator {
    /// `length` must already be validated against the supported range
    pub fn new(length: usize, allow_leading_zero: bool) -> Self {
        Self {
            length,
            allow_leading_zero,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Inclusive numeric range codes are drawn from
    pub fn range(&self) -> (u64, u64) {
        let upper = 10u64.pow(self.length as u32) - 1;
        let lower = if self.allow_leading_zero {
            0
        } else {
            10u64.pow(self.length as u32 - 1)
        };
        (lower, upper)
    }

    /// Draws a uniformly distributed code of exactly `length` digits
    pub fn generate(&self) -> String {
        let (lower, upper) = self.range();
        let value = OsRng.gen_range(lower..=upper);
        format!("{:0width$}", value, width = self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_has_no_leading_zero() {
        let generator = CodeGenerator::new(6, false);
        assert_eq!(generator.range(), (100_000, 999_999));

        for _ in 0..200 {
            let code = generator.generate();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.chars().next(), Some('0'));
        }
    }

    #[test]
    fn test_leading_zero_range_is_padded() {
        let generator = CodeGenerator::new(4, true);
        assert_eq!(generator.range(), (0, 9_999));

        for _ in 0..200 {
            assert_eq!(generator.generate().len(), 4);
        }
    }

    #[test]
    fn test_codes_vary() {
        let generator = CodeGenerator::new(6, false);
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| generator.generate()).collect();
        assert!(codes.len() > 1);
    }
}
