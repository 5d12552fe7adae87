use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use uuid::Uuid;

/// Length of the public short ids in shareable links.
const ID_LEN: usize = 8;

/// Generate a short shareable id for a paste or file record.
pub fn generate_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

/// Generate an opaque storage key for an upload, keeping a sanitized copy
/// of the original extension. The result never contains path separators.
pub fn generate_stored_name(original_name: &str) -> String {
    let extension: String = match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => {
            let ext: String = ext
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            if ext.is_empty() {
                String::new()
            } else {
                format!(".{ext}")
            }
        }
        _ => String::new(),
    };
    format!(
        "{}-{}{extension}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4()
    )
}

/// Lowercased extension of a file name, if it has one.
pub fn file_extension(name: &str) -> Option<String> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            Some(ext.to_ascii_lowercase())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_short_and_alphanumeric() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn stored_names_have_no_separators() {
        let name = generate_stored_name("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));

        let name = generate_stored_name("report.pdf");
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn extension_extraction() {
        assert_eq!(file_extension("photo.JPG"), Some("jpg".into()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".into()));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".bashrc"), None);
    }
}
