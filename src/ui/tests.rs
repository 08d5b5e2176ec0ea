//! Tests for the command-line interface

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::cloud::models::UploadResponse;
    use crate::uploader::{UploadError, UploadErrorKind};

    #[test]
    fn test_args_parsing() {
        use clap::CommandFactory;
        let app = Args::command();
        app.debug_assert();
    }

    fn test_cli() -> Cli {
        Cli {
            args: Args {
                cloud_name: Some("demo-cloud".to_string()),
                api_key: None,
                upload_preset: None,
                config: None,
                command: Command::Url {
                    public_id: "sample".to_string(),
                    video: false,
                    width: None,
                    height: None,
                    crop: None,
                    quality: None,
                    format: None,
                    effect: vec![],
                    gravity: None,
                },
            },
        }
    }

    #[test]
    fn test_display_upload_result() {
        let cli = test_cli();

        let response = UploadResponse {
            secure_url: "https://res.cloudinary.com/demo-cloud/video/upload/v1/clip.mp4"
                .to_string(),
            public_id: "clip".to_string(),
            bytes: 1024,
            resource_type: "video".to_string(),
            original_filename: Some("clip".to_string()),
            created_at: None,
            format: Some("mp4".to_string()),
            width: Some(1280),
            height: Some(720),
            duration: Some(4.2),
        };

        cli.display_upload_result(&response);
    }

    #[test]
    fn test_display_upload_failure() {
        let cli = test_cli();
        let error = UploadError::new(UploadErrorKind::SizeExceeded, "File size exceeds 10MB limit");
        cli.display_upload_failure(&error);
    }

    #[test]
    fn test_upload_progress_bar() {
        let cli = test_cli();
        let bar = cli.upload_progress_bar("clip.mp4");
        bar.set_position(50);
        bar.finish_and_clear();
    }
}
