//! Path and argument helpers shared by conditions and executors.

/// Expand environment variables in a user-supplied path.
///
/// Recognises `%VAR%`, `${VAR}`, `$VAR` and a leading `~`. Unknown variables
/// are left untouched.
#[must_use]
pub fn expand_env(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// [`expand_env`] with an explicit variable lookup.
pub fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    if let Some(after) = rest.strip_prefix('~')
        && (after.is_empty() || after.starts_with(['/', '\\']))
        && let Some(home) = lookup("HOME").or_else(|| lookup("USERPROFILE"))
    {
        out.push_str(&home);
        rest = after;
    }

    while let Some(pos) = rest.find(['%', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match variable_at(tail).and_then(|(name, len)| lookup(name).map(|value| (value, len))) {
            Some((value, len)) => {
                out.push_str(&value);
                rest = &tail[len..];
            }
            None => {
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Variable name referenced at the start of `tail` and the length of the reference.
fn variable_at(tail: &str) -> Option<(&str, usize)> {
    if let Some(body) = tail.strip_prefix('%') {
        let end = body.find('%')?;
        let name = &body[..end];
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '(' | ')'));
        return valid.then_some((name, end + 2));
    }
    if let Some(body) = tail.strip_prefix("${") {
        let end = body.find('}')?;
        let name = &body[..end];
        return is_identifier(name).then_some((name, end + 3));
    }
    let body = tail.strip_prefix('$')?;
    let len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let name = &body[..len];
    is_identifier(name).then_some((name, len + 1))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split an argument string on whitespace, keeping double-quoted groups together.
///
/// Quotes are removed; `""` yields an empty argument.
#[must_use]
pub fn split_arguments(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
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

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/player".to_string()),
            "APPDATA" => Some(r"C:\Users\player\AppData".to_string()),
            "GAME_DIR" => Some("/games".to_string()),
            _ => None,
        }
    }

    #[test]
    fn should_expand_percent_variables() {
        assert_eq!(
            expand_with(r"%APPDATA%\app\config.ini", lookup),
            r"C:\Users\player\AppData\app\config.ini"
        );
    }

    #[test]
    fn should_expand_dollar_variables() {
        assert_eq!(expand_with("$GAME_DIR/bin", lookup), "/games/bin");
        assert_eq!(expand_with("${GAME_DIR}bin", lookup), "/gamesbin");
    }

    #[test]
    fn should_expand_leading_tilde() {
        assert_eq!(expand_with("~/scripts/run.sh", lookup), "/home/player/scripts/run.sh");
        assert_eq!(expand_with("~other", lookup), "~other");
    }

    #[test]
    fn should_leave_unknown_variables_untouched() {
        assert_eq!(expand_with("%NOPE%/x", lookup), "%NOPE%/x");
        assert_eq!(expand_with("$NOPE and ${NOPE}", lookup), "$NOPE and ${NOPE}");
        assert_eq!(expand_with("100% sure $", lookup), "100% sure $");
    }

    #[test]
    fn should_split_on_whitespace() {
        assert_eq!(split_arguments("  -a  -b c "), vec!["-a", "-b", "c"]);
        assert!(split_arguments("   ").is_empty());
    }

    #[test]
    fn should_keep_quoted_groups_together() {
        assert_eq!(
            split_arguments(r#"--profile "My Profile" -x"#),
            vec!["--profile", "My Profile", "-x"]
        );
        assert_eq!(split_arguments(r#"a "" b"#), vec!["a", "", "b"]);
    }
}
