#[cfg(test)]
mod snapshot_test {
    use crate::capture_client::snapshot::encode_snapshot;
    use crate::capture_client::upload_form::UploadForm;
    use crate::config::Config;
    use crate::prediction_client::form::FormField;
    use crate::prediction_client::interface::SubmitError;
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

    #[test]
    fn test_snapshot_keeps_native_resolution() {
        let frame = DynamicImage::ImageRgb8(RgbImage::from_pixel(1280, 720, Rgb([10, 200, 30])));

        let payload = encode_snapshot(&frame, &Config::default()).unwrap();

        assert_eq!(payload.fields.len(), 1);
        let FormField::File {
            name,
            file_name,
            mime,
            bytes,
        } = &payload.fields[0]
        else {
            panic!("expected a file field");
        };
        assert_eq!(name, "file");
        assert_eq!(file_name, "webcam.jpg");
        assert_eq!(mime, "image/jpeg");
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(bytes).unwrap();
        assert_eq!(decoded.dimensions(), (1280, 720));
    }

    #[test]
    fn test_rgba_frames_are_flattened() {
        let frame = DynamicImage::new_rgba8(16, 9);

        let payload = encode_snapshot(&frame, &Config::default()).unwrap();

        assert!(matches!(
            payload.fields.as_slice(),
            [FormField::File { mime, .. }] if mime == "image/jpeg"
        ));
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        let err = encode_snapshot(&DynamicImage::new_rgb8(0, 0), &Config::default()).unwrap_err();

        assert_eq!(err, SubmitError::Capture("video frame is empty".to_string()));
    }

    #[test]
    fn test_upload_form_fields_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Can.JPG");
        std::fs::write(&path, b"not really a jpeg").unwrap();

        let form = UploadForm {
            file: Some(path),
            fields: vec![("location".to_string(), "kitchen".to_string())],
        };
        let payload = form.to_payload(&Config::default()).unwrap();

        assert_eq!(
            payload.fields,
            vec![
                FormField::File {
                    name: "file".to_string(),
                    file_name: "Can.JPG".to_string(),
                    mime: "image/jpeg".to_string(),
                    bytes: b"not really a jpeg".to_vec(),
                },
                FormField::Text {
                    name: "location".to_string(),
                    value: "kitchen".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_file_input_sends_empty_part() {
        let payload = UploadForm::default()
            .to_payload(&Config::default())
            .unwrap();

        assert_eq!(
            payload.fields,
            vec![FormField::File {
                name: "file".to_string(),
                file_name: String::new(),
                mime: "application/octet-stream".to_string(),
                bytes: Vec::new(),
            }]
        );
    }
}
