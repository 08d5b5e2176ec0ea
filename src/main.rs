use mediacli::cloud::{
    transform, CloudClient, CropMode, FileSource, Quality, ResourceType, Transformation,
    UploadParams,
};
use mediacli::config::Settings;
use mediacli::init_app_dirs;
use mediacli::ui::{Cli, Command};
use mediacli::uploader::{UploadLimits, UploadStateUpdate, Uploader};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Parse command-line arguments and initialize CLI
    let cli = Cli::new();
    let args = &cli.args;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    // Initialize application directories
    init_app_dirs()?;

    // Load configuration from file or create default
    let config_path = match &args.config {
        Some(path) => Path::new(path).to_path_buf(),
        None => Settings::default_path(),
    };

    let mut settings = Settings::load(&config_path)?;

    // Override settings with command-line arguments or environment variables
    // (clap already folds the env vars into the args)
    settings.cloud_name = args.cloud_name.clone().unwrap_or(settings.cloud_name);
    settings.api_key = args.api_key.clone().or(settings.api_key);
    settings.upload_preset = args.upload_preset.clone().unwrap_or(settings.upload_preset);

    // Validate settings
    settings.validate()?;

    // Initialize the cloud client
    let mut client = CloudClient::new(&settings.cloud_name, &settings.upload_preset);
    if let Some(api_key) = &settings.api_key {
        client = client.with_api_key(api_key);
    }

    match &cli.args.command {
        Command::Upload {
            file,
            folder,
            public_id,
            tags,
        } => {
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or("Invalid file name")?
                .to_string();
            let mime_type = guess_mime_type(file);
            let data = tokio::fs::read(file).await?;
            let source = FileSource::new(data, &file_name, &mime_type);

            let mut params = UploadParams::new(resource_type_for_mime(&mime_type));
            params.folder = folder.clone().or_else(|| settings.folder.clone());
            params.public_id = public_id.clone();
            if let Some(tags) = tags {
                params.tags = tags.split(',').map(|t| t.trim().to_string()).collect();
            }

            let mut uploader = Uploader::new(
                Arc::new(client),
                UploadLimits::from_settings(&settings),
            );
            let mut updates = uploader.subscribe_updates();

            if let Err(rejection) = uploader.submit(source, params).await {
                cli.display_error(&rejection);
                return Err(rejection.to_string().into());
            }

            let bar = cli.upload_progress_bar(&file_name);
            loop {
                match updates.recv().await {
                    Ok(UploadStateUpdate::Progress { percent }) => {
                        bar.set_position(u64::from(percent));
                    }
                    Ok(UploadStateUpdate::Succeeded { response }) => {
                        bar.finish_and_clear();
                        cli.display_upload_result(&response);
                        break;
                    }
                    Ok(UploadStateUpdate::Failed { error }) => {
                        bar.finish_and_clear();
                        cli.display_upload_failure(&error);
                        return Err(error.to_string().into());
                    }
                    Ok(_) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }
        Command::Url {
            public_id,
            video,
            width,
            height,
            crop,
            quality,
            format,
            effect,
            gravity,
        } => {
            let transformation = Transformation {
                width: *width,
                height: *height,
                crop: crop.as_deref().map(str::parse::<CropMode>).transpose()?,
                quality: quality.as_deref().map(str::parse::<Quality>).transpose()?,
                format: format.clone(),
                effects: effect.clone(),
                gravity: gravity.clone(),
                ..Transformation::default()
            };
            let resource_type = if *video {
                ResourceType::Video
            } else {
                ResourceType::Image
            };

            let url = transform::delivery_url(
                &settings.cloud_name,
                resource_type,
                &transformation,
                public_id,
            )?;
            println!("{}", url);
        }
    }

    Ok(())
}

/// Minimal extension-based mime lookup covering the media types the
/// service accepts; anything unknown uploads as an opaque blob.
fn guess_mime_type(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let mime = match extension.as_deref() {
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("webm") => "video/webm",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };
    mime.to_string()
}

fn resource_type_for_mime(mime_type: &str) -> ResourceType {
    if mime_type.starts_with("video/") {
        ResourceType::Video
    } else if mime_type.starts_with("image/") {
        ResourceType::Image
    } else {
        ResourceType::Auto
    }
}
