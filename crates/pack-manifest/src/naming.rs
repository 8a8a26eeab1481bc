//! Registry-name synthesis and entry-point symbol derivation.

/// Synthesize the registry package name for a local extension:
/// `"{prefix}-{name}"`.
pub fn registry_name(prefix: &str, name: &str) -> String {
    format!("{prefix}-{name}")
}

/// Camel-case a package name for use as an identifier stem.
///
/// Splits on any non-alphanumeric character, lowercases the first word,
/// and capitalizes the rest: `"@o2/extension-doctor"` becomes
/// `"o2ExtensionDoctor"`.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut first_word = true;
    for word in name.split(|c: char| !c.is_ascii_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        let lowered = word.to_ascii_lowercase();
        if first_word {
            out.push_str(&lowered);
            first_word = false;
        } else {
            let mut chars = lowered.chars();
            if let Some(head) = chars.next() {
                out.push(head.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}
