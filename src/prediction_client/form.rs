/// Transport-independent `multipart/form-data` body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.fields.push(FormField::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, mime: &str, bytes: Vec<u8>) -> Self {
        self.fields.push(FormField::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            bytes,
        });
        self
    }
}

pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
