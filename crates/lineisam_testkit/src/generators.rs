//! Property-based test generators using proptest.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

/// Strategy for a single data line: printable ASCII, no line feed.
pub fn line_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~]{0,40}").expect("Invalid regex")
}

/// Strategy for a line drawn from a small alphabet, so keys collide often.
pub fn narrow_line_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ab]{0,6}(,[0-9]{1,3})?").expect("Invalid regex")
}

/// Strategy for the lines of a data file.
pub fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        prop::collection::vec(line_strategy(), 0..64),
        prop::collection::vec(narrow_line_strategy(), 0..64),
    ]
}

/// Strategy for a key length.
pub fn key_length_strategy() -> impl Strategy<Value = usize> {
    1usize..12
}

/// Strategy for raw data file bytes: lines joined by `\n`, with or without
/// a final newline.
pub fn data_file_strategy() -> impl Strategy<Value = Vec<u8>> {
    (lines_strategy(), any::<bool>()).prop_map(|(lines, trailing_newline)| {
        let mut data = lines.join("\n").into_bytes();
        if trailing_newline && !lines.is_empty() {
            data.push(b'\n');
        }
        data
    })
}

/// Configuration for property-based tests.
#[derive(Debug, Clone, Copy)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Few cases; for tests that touch the filesystem on every case.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 48,
            max_shrink_iters: 200,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn lines_have_no_line_feed(line in line_strategy()) {
            prop_assert!(!line.contains('\n'));
            prop_assert!(line.is_ascii());
        }

        #[test]
        fn data_file_is_ascii(data in data_file_strategy()) {
            prop_assert!(data.is_ascii());
        }
    }
}
