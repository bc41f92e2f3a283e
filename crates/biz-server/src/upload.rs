//! Persisting uploaded CSV files under the uploads directory.

use std::path::PathBuf;

use biz_core::RequestId;

/// Name used when the client sends none, or nothing usable survives
/// sanitizing.
pub const FALLBACK_NAME: &str = "upload.csv";

/// Reduce a client-supplied file name to a safe single path component.
///
/// Keeps the final component (either separator style), replaces anything
/// outside `[A-Za-z0-9._-]` with `_` and strips leading dots.
pub fn sanitize_filename(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Writes each upload to `<dir>/<request id>-<sanitized name>`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store `bytes` and return the written path.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory or file cannot be written.
    pub fn save(
        &self,
        id: &RequestId,
        client_name: Option<&str>,
        bytes: &[u8],
    ) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let name = sanitize_filename(client_name.unwrap_or(FALLBACK_NAME));
        let path = self.dir.join(id.prefixed(&name));
        std::fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "stored upload");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("sales.csv", "sales.csv")]
    #[case("../../etc/passwd", "passwd")]
    #[case("..\\..\\boot.ini", "boot.ini")]
    #[case("/abs/path/q1 report.csv", "q1_report.csv")]
    #[case(".hidden.csv", "hidden.csv")]
    #[case("...", FALLBACK_NAME)]
    #[case("", FALLBACK_NAME)]
    #[case("dir/", FALLBACK_NAME)]
    #[case("ventes-été.csv", "ventes-_t_.csv")]
    fn sanitizes_client_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(raw), expected);
    }

    #[test]
    fn uploads_stay_inside_store_dir() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        let store = UploadStore::new(&uploads);
        let id = RequestId::generate().unwrap();

        let path = store
            .save(&id, Some("../../outside.csv"), b"Sales\n1\n")
            .unwrap();

        assert_eq!(path.parent().unwrap(), uploads);
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("{id}-outside.csv")
        );
        assert_eq!(std::fs::read(&path).unwrap(), b"Sales\n1\n");
    }

    #[test]
    fn same_name_from_two_requests_does_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let a = store
            .save(&RequestId::generate().unwrap(), Some("data.csv"), b"a")
            .unwrap();
        let b = store
            .save(&RequestId::generate().unwrap(), Some("data.csv"), b"b")
            .unwrap();
        assert_ne!(a, b);
    }
}
