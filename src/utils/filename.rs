//! Filesystem-safe filename generation

/// Characters that are invalid in filenames on at least one supported
/// filesystem.
const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace every reserved character with `_`, one for one.
///
/// Length-preserving and idempotent; everything outside the reserved set
/// (including Unicode) passes through untouched. No truncation.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}
