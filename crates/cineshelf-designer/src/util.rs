//! Small formatting helpers shared by the compiler, the schema and the exporter.

use deunicode::deunicode;

/// Formats a style number the way it appears in CSS and in control labels.
///
/// Integral values print without a fractional part (`16`, `-8`), everything
/// else uses the shortest representation that round-trips (`0.12`, `1.02`).
/// Non-finite values never reach a stylesheet; they print as `0`.
///
/// # Example
///
/// ```rust
/// use cineshelf_designer::format_number;
///
/// assert_eq!(format_number(16.0), "16");
/// assert_eq!(format_number(0.25), "0.25");
/// assert_eq!(format_number(-8.0), "-8");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Returns `true` when a number serializes as a JSON integer.
pub(crate) fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15
}

/// Turns a product name into a lowercase, dash-separated file-name stem.
///
/// Non-ASCII text is transliterated first, so `"Ciné Shelf"` becomes
/// `"cine-shelf"`. An empty result falls back to `"styles"`.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "styles".to_string()
    } else {
        slug
    }
}
