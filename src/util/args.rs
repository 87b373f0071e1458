//! Splitting a command line into arguments.

/// Split on whitespace. Double quotes group words and are removed; there is
/// no escape syntax.
pub fn split(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_whitespace() {
        assert_eq!(split("  ls   a/b "), vec!["ls", "a/b"]);
        assert!(split("   ").is_empty());
    }

    #[test]
    fn test_quotes_group_words() {
        assert_eq!(
            split(r#"attach details "my bank/login""#),
            vec!["attach", "details", "my bank/login"]
        );
    }

    #[test]
    fn test_empty_quotes_yield_empty_arg() {
        assert_eq!(split(r#"cd """#), vec!["cd", ""]);
    }
}
