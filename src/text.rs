//! Transcript cleanup for shell command input.

/// Dash substitutions for common command mishearings:
/// `"ls - la"` -> `"ls-la"`, `"git -- help"` -> `"git--help"`.
const SUBSTITUTIONS: [(&str, &str); 2] = [(" - ", "-"), (" -- ", "--")];

/// Clean a primary-backend hypothesis: trim, apply dash substitutions,
/// lowercase. Shell commands are case-sensitive.
pub fn normalize_command(text: &str) -> String {
    let mut text = text.trim().to_string();
    for (from, to) in SUBSTITUTIONS {
        text = text.replace(from, to);
    }
    text.to_lowercase()
}

/// Clean a fallback-backend hypothesis. The offline engine gets no dash
/// substitutions, only trim and lowercase.
pub fn normalize_plain(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dash_joined() {
        assert_eq!(normalize_command("ls - la"), "ls-la");
    }

    #[test]
    fn test_double_dash_joined_and_lowercased() {
        assert_eq!(normalize_command("  Git -- Help  "), "git--help");
    }

    #[test]
    fn test_mixed_case_lowercased() {
        assert_eq!(normalize_command("Echo Hello World"), "echo hello world");
    }

    #[test]
    fn test_already_clean_text_unchanged() {
        assert_eq!(normalize_command("grep -rn foo"), "grep -rn foo");
    }

    #[test]
    fn test_idempotent_on_processed_output() {
        let once = normalize_command("  Git -- Help  ");
        assert_eq!(normalize_command(&once), once);

        let once = normalize_command("ls - la");
        assert_eq!(normalize_command(&once), once);
    }

    #[test]
    fn test_plain_skips_substitutions() {
        assert_eq!(normalize_plain("  Git -- Help  "), "git -- help");
        assert_eq!(normalize_plain("ls - la"), "ls - la");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(normalize_command("   "), "");
        assert_eq!(normalize_plain(""), "");
    }
}
