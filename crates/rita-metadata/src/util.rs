//! Literal-escaping for the hand-built SQL strings in this crate. Dataset
//! names and paths come from config/operator input, not untrusted remote
//! callers, but every string still goes through this before landing in a
//! query.

pub(crate) fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_quotes_and_backslashes() {
        assert_eq!(escape("o'brien"), "o\\'brien");
        assert_eq!(escape(r"a\b"), r"a\\b");
    }
}
