//! Text helpers shared by all correction rules.

/// Line placed between alternative remediation options.
pub const OR_SEPARATOR: &str = "\nOR\n";

/// Formats an ASCII-whitespace-separated list of involved names for use inside a sentence.
///
/// - `""` -> `""`
/// - `"A"` -> `"A"` (quoted)
/// - `"A B"` -> `"A" and "B"`
/// - `"A B C"` -> `"A", B, and "C"`
///
/// With three or more names only the first and last are quoted; middle names are emitted bare.
pub fn format_involved(involved: &str) -> String {
    let names: Vec<&str> = involved.split_ascii_whitespace().collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => quoted(only),
        [first, second] => format!("{} and {}", quoted(first), quoted(second)),
        [first, middle @ .., last] => {
            let mut out = quoted(first);
            for name in middle {
                out.push_str(", ");
                out.push_str(name);
            }
            out.push_str(", and ");
            out.push_str(&quoted(last));
            out
        }
    }
}

/// Like [`format_involved`], treating an absent list as empty.
pub fn format_optional(involved: Option<&str>) -> String {
    involved.map(format_involved).unwrap_or_default()
}

/// Joins remediation options with [`OR_SEPARATOR`].
pub fn join_alternatives<I>(options: I) -> String
where
    I: IntoIterator<Item = String>,
{
    options
        .into_iter()
        .collect::<Vec<_>>()
        .join(OR_SEPARATOR)
}

fn quoted(name: &str) -> String {
    format!("\"{name}\"")
}
