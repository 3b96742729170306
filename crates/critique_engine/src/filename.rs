/// Stem used when the candidate name sanitizes to nothing.
const FALLBACK_STEM: &str = "Resume_Analysis";
const MAX_STEM_CHARS: usize = 80;

/// Filesystem-safe `{candidate}_Critique.{extension}` for a snapshot.
pub fn snapshot_filename(candidate_name: &str, extension: &str) -> String {
    format!("{}_Critique.{extension}", sanitize_stem(candidate_name))
}

fn sanitize_stem(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    let mut compacted = String::with_capacity(replaced.len());
    let mut prev_underscore = false;
    for c in replaced.trim_matches(&['_', ' ', '.'][..]).chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    let mut stem: String = compacted.chars().take(MAX_STEM_CHARS).collect();
    if stem.is_empty() {
        return FALLBACK_STEM.to_string();
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
