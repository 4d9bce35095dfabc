//! Identifier conversion from camel-case to hyphen-case.

/// Convert a camel-case identifier into its hyphenated lowercase form.
///
/// The identifier is split before every ASCII uppercase letter, joined with `-`,
/// and lowercased. An identifier that starts with an uppercase letter gets an
/// extra leading `-`, so `Hover` becomes `-hover`.
///
/// ```
/// use nestcss_core::hyphenate;
///
/// assert_eq!(hyphenate("backgroundColor"), "background-color");
/// assert_eq!(hyphenate("Hover"), "-hover");
/// ```
pub fn hyphenate(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);

    for (i, ch) in identifier.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            // A capital at position 0 starts the first segment; the leading
            // dash for it is added below.
            if i > 0 {
                out.push('-');
            }
        }
        out.extend(ch.to_lowercase());
    }

    if identifier.starts_with(|c: char| c.is_ascii_uppercase()) {
        out.insert(0, '-');
    }

    out
}
