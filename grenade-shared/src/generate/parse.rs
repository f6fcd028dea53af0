/// Splitting model output into suggestions

fn is_list_marker(c: char) -> bool {
    matches!(c, '-' | '*' | '.' | ')') || c.is_ascii_digit()
}

/// One suggestion per non-empty line
///
/// Leading whitespace and the run of list-marker characters after it
/// (`-`, `*`, `.`, `)` and ASCII digits) are stripped before trimming.
/// Lines that end up empty are dropped.
///
/// ```
/// use grenade_shared::generate::parse::parse_suggestions;
///
/// assert_eq!(parse_suggestions("1. First\n\n- Second"), vec!["First", "Second"]);
/// ```
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_start().trim_start_matches(is_list_marker).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
