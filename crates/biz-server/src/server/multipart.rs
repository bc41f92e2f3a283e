//! Extracting the uploaded file from a request body.
//!
//! Browsers send `multipart/form-data` with the CSV in a `file` field. Other
//! clients may post the raw CSV and name it with `?filename=` or an
//! `X-Filename` header.

use bytes::Bytes;
use futures_util::stream;

use crate::error::ServiceError;
use crate::service::Upload;

/// Form field carrying the CSV.
pub const FILE_FIELD: &str = "file";

/// Request metadata relevant to locating the upload.
#[derive(Debug, Clone, Default)]
pub struct UploadMeta {
    pub content_type: Option<String>,
    pub header_filename: Option<String>,
    pub query_filename: Option<String>,
}

pub fn is_multipart(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
}

/// Turn a request body into an [`Upload`].
pub async fn extract_upload(meta: UploadMeta, body: Vec<u8>) -> Result<Upload, ServiceError> {
    match meta.content_type.as_deref() {
        Some(content_type) if is_multipart(content_type) => file_field(content_type, body).await,
        _ => Ok(Upload {
            filename: meta.query_filename.or(meta.header_filename),
            bytes: body,
        }),
    }
}

async fn file_field(content_type: &str, body: Vec<u8>) -> Result<Upload, ServiceError> {
    let boundary = multer::parse_boundary(content_type).map_err(bad_multipart)?;
    let body = stream::once(async move { Ok::<Bytes, std::io::Error>(Bytes::from(body)) });
    let mut multipart = multer::Multipart::new(body, boundary);

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(bad_multipart)?;
        return Ok(Upload {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Err(ServiceError::BadRequest(format!(
        "multipart body has no '{FILE_FIELD}' field"
    )))
}

fn bad_multipart(error: multer::Error) -> ServiceError {
    ServiceError::BadRequest(format!("invalid multipart body: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BOUNDARY: &str = "X-AUTOBIZ-BOUNDARY";

    fn form(parts: &[(&str, Option<&str>, &str)]) -> Vec<u8> {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body.into_bytes()
    }

    fn multipart_meta() -> UploadMeta {
        UploadMeta {
            content_type: Some(format!("multipart/form-data; boundary={BOUNDARY}")),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn takes_file_field_from_form() {
        let body = form(&[
            ("note", None, "ignored"),
            ("file", Some("sales.csv"), "Product,Sales\nA,1\n"),
        ]);

        let upload = extract_upload(multipart_meta(), body).await.unwrap();

        assert_eq!(upload.filename.as_deref(), Some("sales.csv"));
        assert_eq!(upload.bytes, b"Product,Sales\nA,1\n");
    }

    #[tokio::test]
    async fn form_without_file_field_is_bad_request() {
        let body = form(&[("other", Some("x.csv"), "a")]);

        let err = extract_upload(multipart_meta(), body).await.unwrap_err();

        assert_eq!(err.status(), 400);
    }

    #[tokio::test]
    async fn missing_boundary_is_bad_request() {
        let meta = UploadMeta {
            content_type: Some("multipart/form-data".into()),
            ..Default::default()
        };
        let err = extract_upload(meta, b"x".to_vec()).await.unwrap_err();
        assert_eq!(err.status(), 400);
    }

    #[tokio::test]
    async fn raw_body_prefers_query_filename() {
        let meta = UploadMeta {
            content_type: Some("text/csv".into()),
            header_filename: Some("header.csv".into()),
            query_filename: Some("query.csv".into()),
        };

        let upload = extract_upload(meta, b"Sales\n1\n".to_vec()).await.unwrap();

        assert_eq!(upload.filename.as_deref(), Some("query.csv"));
        assert_eq!(upload.bytes, b"Sales\n1\n");
    }
}
