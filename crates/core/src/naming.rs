//! Artifact naming convention engine.
//!
//! Generates unique filenames for transformed images. Convention:
//! `{sanitized_label}_{uuid}.jpg` -- the label ties the artifact back to
//! its product row, the UUID guarantees uniqueness across runs.

use uuid::Uuid;

/// Characters other than these are replaced during label sanitization.
fn is_safe_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Sanitize a row label for use in a filename.
///
/// Replaces anything outside `[A-Za-z0-9._-]` with `_`. A label is caller
/// input; without this a label like `../x` would escape the output
/// directory.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if is_safe_label_char(c) { c } else { '_' })
        .collect()
}

/// Generate the artifact filename for one transformed image.
///
/// # Examples
///
/// ```
/// use imgbatch_core::naming::artifact_filename;
/// use uuid::Uuid;
///
/// let token = Uuid::nil();
/// assert_eq!(
///     artifact_filename("Widget", token),
///     "Widget_00000000-0000-0000-0000-000000000000.jpg"
/// );
/// assert_eq!(
///     artifact_filename("Blue Mug", token),
///     "Blue_Mug_00000000-0000-0000-0000-000000000000.jpg"
/// );
/// ```
pub fn artifact_filename(label: &str, token: Uuid) -> String {
    format!("{}_{token}.jpg", sanitize_label(label))
}
