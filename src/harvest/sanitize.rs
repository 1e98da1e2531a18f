/// Characters replaced in file and folder names
const UNSAFE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Turns a document title into a file-system safe name
///
/// Each run of whitespace becomes a single `_`, then every character in
/// `< > : " / \ | ? *` becomes `_`. Names that would not denote a folder
/// of their own (empty, `.` and `..`) become `_`.
///
/// # Example
///
/// ```
/// use camara_scraper::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Lei nº 1/2024"), "Lei_nº_1_2024");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if UNSAFE_CHARS.contains(&c) {
            sanitized.push('_');
        } else {
            sanitized.push(c);
        }
    }

    match sanitized.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => sanitized,
    }
}
