//! Identifier case conversions used to turn Figma layer names into file and
//! symbol names.

/// `arrow_left` -> `arrow-left`
pub fn snake_to_kebab(s: &str) -> String {
    s.replace('_', "-")
}

/// `arrow_left` -> `arrowLeft`
pub fn snake_to_camel(s: &str) -> String {
    upper_after(s, '_')
}

/// `arrow_left` -> `ArrowLeft`
pub fn snake_to_pascal(s: &str) -> String {
    upper_first(&snake_to_camel(s))
}

/// `arrow-left` -> `arrowLeft`
pub fn kebab_to_camel(s: &str) -> String {
    upper_after(s, '-')
}

/// `arrow-left` -> `ArrowLeft`
pub fn kebab_to_pascal(s: &str) -> String {
    upper_first(&kebab_to_camel(s))
}

// Drops each separator that precedes a lowercase ASCII letter and uppercases
// that letter. Separators in any other position are kept.
fn upper_after(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == sep {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut out = String::with_capacity(s.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => s.to_string(),
    }
}
