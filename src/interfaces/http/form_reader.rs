use crate::domain::form::FormData;
use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::debug;
use url::form_urlencoded;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

#[derive(Error, Debug)]
enum FormReadError {
    #[error("unsupported content type {0:?}")]
    UnsupportedContentType(String),
    #[error(transparent)]
    Body(#[from] BytesRejection),
    #[error(transparent)]
    Multipart(#[from] MultipartRejection),
    #[error(transparent)]
    Field(#[from] MultipartError),
}

/// Reads the text fields of a form body.
///
/// Accepts url-encoded and multipart bodies. File parts of a multipart body
/// are skipped. A body that cannot be read as a form yields an empty
/// `FormData`, which the pipeline then rejects on the missing photo count.
pub async fn read_form(request: Request) -> FormData {
    match try_read_form(request).await {
        Ok(form) => form,
        Err(e) => {
            debug!("request body is not a readable form: {e}");
            FormData::new()
        }
    }
}

async fn try_read_form(request: Request) -> Result<FormData, FormReadError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with(MULTIPART) {
        read_multipart(request).await
    } else if content_type.starts_with(URLENCODED) {
        read_urlencoded(request).await
    } else {
        Err(FormReadError::UnsupportedContentType(content_type))
    }
}

async fn read_urlencoded(request: Request) -> Result<FormData, FormReadError> {
    let body = Bytes::from_request(request, &()).await?;
    Ok(form_urlencoded::parse(&body).into_owned().collect())
}

async fn read_multipart(request: Request) -> Result<FormData, FormReadError> {
    let mut multipart = Multipart::from_request(request, &()).await?;
    let mut form = FormData::new();
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        form.insert(name, field.text().await?);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;

    fn request(content_type: &str, body: &'static str) -> Request {
        http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_urlencoded_body() {
        let form = read_form(request(
            URLENCODED,
            "title=Beach+Day&date=2024-01-01&caption0=Sunset%21&title=ignored",
        ))
        .await;

        assert_eq!(form.value("title"), "Beach Day");
        assert_eq!(form.value("date"), "2024-01-01");
        assert_eq!(form.value("caption0"), "Sunset!");
    }

    #[tokio::test]
    async fn test_reads_multipart_text_fields_and_skips_files() {
        let body = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"title\"\r\n\r\n\
            Beach Day\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"photo0\"; filename=\"a.jpg\"\r\n\
            Content-Type: image/jpeg\r\n\r\n\
            binary\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"caption0\"\r\n\r\n\
            Sunset\r\n\
            --XYZ--\r\n";
        let form = read_form(request("multipart/form-data; boundary=XYZ", body)).await;

        assert_eq!(form.value("title"), "Beach Day");
        assert_eq!(form.value("caption0"), "Sunset");
        assert!(form.get("photo0").is_none());
    }

    #[tokio::test]
    async fn test_unknown_content_type_reads_as_empty() {
        let form = read_form(request("text/plain", "title=Beach")).await;
        assert!(form.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_multipart_reads_as_empty() {
        let form = read_form(request("multipart/form-data", "no boundary here")).await;
        assert!(form.is_empty());
    }
}
