//! Multipart form reading with size and count limits

use crate::utils::error::{GatewayError, Result};
use actix_multipart::{Field, Multipart};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use std::collections::HashMap;
use tracing::debug;

/// Limits applied while reading a form
#[derive(Debug, Clone, Copy)]
pub struct FormLimits {
    /// Largest accepted file part
    pub max_file_size: usize,
    /// Largest accepted text part
    pub max_text_size: usize,
    /// Most file parts accepted in one form
    pub max_files: usize,
}

/// An uploaded file part
#[derive(Debug, Clone)]
pub struct FormFile {
    pub field: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A fully read multipart form
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: Vec<FormFile>,
}

impl FormData {
    /// Text field value
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// First file uploaded under any of `names`, in the order given
    pub fn file(&self, names: &[&str]) -> Option<&FormFile> {
        names
            .iter()
            .find_map(|name| self.files.iter().find(|file| file.field == *name))
    }

    /// Every file uploaded under `name`, in upload order
    pub fn files_named(&self, name: &str) -> Vec<&FormFile> {
        self.files.iter().filter(|file| file.field == name).collect()
    }
}

/// Read every part of a multipart payload into memory
///
/// Parts carrying a filename are files; everything else is a UTF-8 text
/// field. Unnamed parts are drained and ignored.
pub async fn read_form(mut payload: Multipart, limits: FormLimits) -> Result<FormData> {
    let mut form = FormData::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;

        let Some(name) = field.name().map(str::to_string) else {
            drain(&mut field).await?;
            continue;
        };

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match filename {
            Some(filename) => {
                if form.files.len() >= limits.max_files {
                    return Err(GatewayError::bad_request(format!(
                        "Too many files (max {})",
                        limits.max_files
                    )));
                }
                let content_type = field.content_type().map(|mime| mime.to_string());
                let bytes = read_field(&mut field, limits.max_file_size, &name).await?;
                debug!(field = %name, filename = %filename, bytes = bytes.len(), "Read file part");
                form.files.push(FormFile {
                    field: name,
                    filename: Some(filename).filter(|f| !f.is_empty()),
                    content_type,
                    bytes,
                });
            }
            None => {
                let bytes = read_field(&mut field, limits.max_text_size, &name).await?;
                let value = String::from_utf8(bytes.to_vec()).map_err(|_| {
                    GatewayError::bad_request(format!("Field '{}' is not valid UTF-8", name))
                })?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field, limit: usize, name: &str) -> Result<Bytes> {
    let mut data = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if data.len() + chunk.len() > limit {
            return Err(GatewayError::payload_too_large(format!(
                "Field '{}' exceeds {} bytes",
                name, limit
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data.freeze())
}

async fn drain(field: &mut Field) -> Result<()> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}
