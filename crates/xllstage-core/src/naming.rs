//! Bit-width file naming.
//!
//! A descriptor may be named generically (`Book.dna`) or already carry a
//! bit-width suffix (`Book64.dna`). Deriving a variant name first cuts the base
//! name at every known suffix, then appends the target one:
//!
//! | Input | Suffixes | Target | Output |
//! |-------|----------|--------|--------|
//! | `Book.dna` | `32`, `64` | `32` | `Book32.dna` |
//! | `Book64.dna` | `32`, `64` | `32` | `Book32.dna` |
//! | `sub/Book32.dna` | `32`, `64` | `64` | `sub/Book64.dna` |
//! | `Book.dna` | (blank), `64` | (blank) | `Book.dna` |
//!
//! Suffix matching ignores ASCII case. A suffix found at the very start of
//! the base name is part of the name and is never stripped.

use std::path::Path;

/// Cut `base` at the last occurrence of `suffix`, ignoring ASCII case.
///
/// Everything from the match onwards is dropped. Blank suffixes and matches at
/// position 0 leave `base` untouched.
///
/// # Examples
///
/// ```
/// use xllstage_core::naming::strip_suffix;
///
/// assert_eq!(strip_suffix("Book64", "64"), "Book");
/// assert_eq!(strip_suffix("Book64Tools", "64"), "Book");
/// assert_eq!(strip_suffix("64Book", "64"), "64Book");
/// assert_eq!(strip_suffix("Book", " "), "Book");
/// ```
pub fn strip_suffix(base: &str, suffix: &str) -> String {
    if suffix.trim().is_empty() {
        return base.to_string();
    }

    // ASCII folding keeps byte offsets identical between both strings
    let haystack = base.to_ascii_lowercase();
    let needle = suffix.to_ascii_lowercase();

    match haystack.rfind(&needle) {
        Some(index) if index > 0 => base[..index].to_string(),
        _ => base.to_string(),
    }
}

/// Derive the name of `file_name` for the bit-width identified by `suffix`.
///
/// Each of `known_suffixes` is stripped from the base name in order, then
/// `suffix` and the original extension are appended. The directory part of
/// `file_name` is kept.
///
/// # Examples
///
/// ```
/// use xllstage_core::naming::with_bitness_suffix;
///
/// let suffixes = ["32", "64"];
/// assert_eq!(with_bitness_suffix("Book.dna", "32", suffixes), "Book32.dna");
/// assert_eq!(with_bitness_suffix("Book32.dna", "64", suffixes), "Book64.dna");
/// assert_eq!(with_bitness_suffix("App.config", "64", suffixes), "App64.config");
/// ```
pub fn with_bitness_suffix(file_name: &str, suffix: &str, known_suffixes: [&str; 2]) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    let base = known_suffixes
        .iter()
        .fold(stem.into_owned(), |base, known| strip_suffix(&base, known));

    let mut derived = base;
    derived.push_str(suffix);
    if let Some(extension) = path.extension() {
        derived.push('.');
        derived.push_str(&extension.to_string_lossy());
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(derived).to_string_lossy().into_owned()
        }
        _ => derived,
    }
}

/// Insert `suffix` between the file stem and `extension`.
///
/// Used to name the packed loader (`Book32.xll` -> `Book32-packed.xll`).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use xllstage_core::naming::with_stem_suffix;
///
/// assert_eq!(
///     with_stem_suffix(Path::new("out/Book32.xll"), "-packed", "xll"),
///     Path::new("out/Book32-packed.xll")
/// );
/// ```
pub fn with_stem_suffix(path: &Path, suffix: &str, extension: &str) -> std::path::PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let file_name = format!("{stem}{suffix}.{extension}");

    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => file_name.into(),
    }
}
