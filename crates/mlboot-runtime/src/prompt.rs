//! Terminal prompt.

/// Interpret a typed answer; empty or unrecognized input yields `default`.
pub fn parse_answer(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// CLI prompt using stdin/stdout for interactive confirmation.
///
/// This is only available with the `cli` feature flag.
#[cfg(feature = "cli")]
mod cli_prompt {
    use std::io::{self, BufRead, Write};

    use mlboot_core::{InstallPrompt, PromptError};

    use super::parse_answer;

    /// CLI prompt that reads from stdin.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct CliPrompt;

    impl CliPrompt {
        pub const fn new() -> Self {
            Self
        }
    }

    impl InstallPrompt for CliPrompt {
        fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
            let suffix = if default { "[Y/n]" } else { "[y/N]" };
            print!("{message} {suffix}: ");
            io::stdout().flush()?;

            let mut input = String::new();
            // EOF reads zero bytes and falls through to the default
            io::stdin().lock().read_line(&mut input)?;
            Ok(parse_answer(&input, default))
        }

        fn info(&self, message: &str) {
            println!("{message}");
        }

        fn warn(&self, message: &str) {
            eprintln!("Warning: {message}");
        }
    }
}

#[cfg(feature = "cli")]
pub use cli_prompt::CliPrompt;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_answers() {
        assert!(parse_answer("y\n", false));
        assert!(parse_answer("YES", false));
        assert!(!parse_answer("n", true));
        assert!(!parse_answer(" No \r\n", true));
    }

    #[test]
    fn test_empty_or_unknown_uses_default() {
        assert!(parse_answer("\n", true));
        assert!(!parse_answer("", false));
        assert!(parse_answer("maybe", true));
        assert!(!parse_answer("maybe", false));
    }
}
