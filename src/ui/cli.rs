//! Command-line interface implementation

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::path::PathBuf;

use crate::cloud::models::UploadResponse;
use crate::uploader::UploadError;

/// Command-line arguments for mediacli
#[derive(Parser, Debug)]
#[command(author, version, about = "Media cloud upload and delivery CLI", long_about = None)]
pub struct Args {
    /// Cloud account name
    #[arg(short = 'n', long, env = "MEDIACLI_CLOUD_NAME")]
    pub cloud_name: Option<String>,

    /// API key for signed operations
    #[arg(short, long, env = "MEDIACLI_API_KEY")]
    pub api_key: Option<String>,

    /// Unsigned upload preset
    #[arg(short = 'p', long, env = "MEDIACLI_UPLOAD_PRESET")]
    pub upload_preset: Option<String>,

    /// Config file path
    #[arg(short, long, env = "MEDIACLI_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a file to the media cloud
    Upload {
        /// File to upload
        file: PathBuf,

        /// Folder to upload into
        #[arg(short, long)]
        folder: Option<String>,

        /// Public id to assign to the asset
        #[arg(long)]
        public_id: Option<String>,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Build a transformation delivery URL for a stored asset
    Url {
        /// Public id of the asset
        public_id: String,

        /// Treat the asset as a video instead of an image
        #[arg(long)]
        video: bool,

        #[arg(short, long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        /// Crop mode (fill, fit, scale, crop, thumb, limit, pad)
        #[arg(short, long)]
        crop: Option<String>,

        /// Quality: "auto" or 1-100
        #[arg(short, long)]
        quality: Option<String>,

        /// Target format, e.g. webp or mp4
        #[arg(short, long)]
        format: Option<String>,

        /// Effect, repeatable
        #[arg(short, long)]
        effect: Vec<String>,

        /// Gravity, e.g. auto or face
        #[arg(short, long)]
        gravity: Option<String>,
    },
}

/// CLI user interface for interacting with the application
pub struct Cli {
    pub args: Args,
}

impl Cli {
    /// Create a new CLI instance
    pub fn new() -> Self {
        Cli {
            args: Args::parse(),
        }
    }

    /// Progress bar tracking upload percent
    pub fn upload_progress_bar(&self, file_name: &str) -> ProgressBar {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template(
                "{msg} [{bar:40.cyan/blue}] {pos:>3}%",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
        );
        bar.set_message(file_name.to_string());
        bar
    }

    /// Display a successful upload result
    pub fn display_upload_result(&self, response: &UploadResponse) {
        println!("\nUpload complete:");
        println!("  {:<18} {}", "Locator:", response.secure_url);
        println!("  {:<18} {}", "Public id:", response.public_id);
        println!("  {:<18} {}", "Size (bytes):", response.bytes);
        println!("  {:<18} {}", "Resource type:", response.resource_type);
        if let (Some(width), Some(height)) = (response.width, response.height) {
            println!("  {:<18} {}x{}", "Dimensions:", width, height);
        }
        if let Some(duration) = response.duration {
            println!("  {:<18} {:.1}s", "Duration:", duration);
        }
        println!();
    }

    /// Display an upload failure
    pub fn display_upload_failure(&self, error: &UploadError) {
        eprintln!("\nUpload failed ({:?}): {}", error.kind, error.message);
    }

    /// Display an error message to the user
    pub fn display_error(&self, error: &dyn Error) {
        eprintln!("Error: {}", error);
    }
}
