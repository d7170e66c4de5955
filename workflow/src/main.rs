//! imgupload CLI - upload an image, or an image with its collection
//!
//! ```bash
//! imgupload image cat.png                     # POST /api/upload-image
//! imgupload collection cat.png cats.zip       # POST /api/upload-image-collection
//! imgupload config                            # Show effective configuration
//! ```
//!
//! `IMGUPLOAD_BACKEND_URL` and `IMGUPLOAD_TIMEOUT_SECS` (or a `.env` file)
//! set the defaults; flags override them. `RUST_LOG=debug` shows the
//! response body.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use imgupload::{
    matches_accept, submit, HttpTransport, LocalFile, SessionHandle, UploadConfig, UploadError,
    UploadFile, UploadMode, UploadSession, COLLECTION_ACCEPT, IMAGE_ACCEPT,
};

#[derive(Parser)]
#[command(name = "imgupload")]
#[command(about = "Upload an image, or an image with its archive collection", long_about = None)]
struct Cli {
    /// Backend base URL (default: $IMGUPLOAD_BACKEND_URL or http://localhost:3000)
    #[arg(short, long, global = true)]
    backend_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a single image
    Image {
        /// Image file
        image: PathBuf,
    },

    /// Upload an image together with an archive collection
    Collection {
        /// Image file
        image: PathBuf,

        /// Archive (.zip, .rar, .7zip)
        collection: PathBuf,
    },

    /// Print the effective configuration as JSON
    Config,
}

/// Session handle that redraws the progress line whenever it changes.
#[derive(Clone)]
struct ConsoleSession {
    session: Rc<RefCell<UploadSession<LocalFile>>>,
    shown: Rc<Cell<u8>>,
}

impl ConsoleSession {
    fn new() -> Self {
        Self {
            session: Rc::new(RefCell::new(UploadSession::new())),
            shown: Rc::new(Cell::new(0)),
        }
    }

    fn render(&self) {
        let progress = self.session.borrow().progress();
        if progress.percent() != self.shown.get() {
            self.shown.set(progress.percent());
            if progress.is_visible() {
                print!("\r⏫ Uploading... {:>4}", progress);
                let _ = std::io::stdout().flush();
            }
        }
    }
}

impl SessionHandle for ConsoleSession {
    type File = LocalFile;
    type Preview = ();

    fn update<R>(&self, f: impl FnOnce(&mut UploadSession<LocalFile>) -> R) -> Option<R> {
        let result = f(&mut self.session.borrow_mut());
        self.render();
        Some(result)
    }

    fn with<R>(&self, f: impl FnOnce(&UploadSession<LocalFile>) -> R) -> Option<R> {
        Some(f(&self.session.borrow()))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = UploadConfig::from_env()?;
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs.max(1);
    }

    let (mode, image, collection) = match cli.command {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        Commands::Image { image } => (UploadMode::SingleImage, image, None),
        Commands::Collection { image, collection } => {
            (UploadMode::ImageWithCollection, image, Some(collection))
        }
    };

    let session = ConsoleSession::new();
    session.update(|s| s.select_mode(mode));

    let image = LocalFile::open(&image)?;
    warn_if_unaccepted(IMAGE_ACCEPT, &image);
    println!("🖼️  Image: {} ({} bytes)", image.name(), image.size());
    session.update(|s| s.choose_image(image, None));

    if let Some(collection) = collection {
        let collection = LocalFile::open(&collection)?;
        warn_if_unaccepted(COLLECTION_ACCEPT, &collection);
        println!("📦 Selected collection: {}", collection.name());
        session.update(|s| s.choose_collection(collection));
    }

    let transport = HttpTransport::new(config.timeout());
    let result = submit(&session, &transport, &config).await;
    println!();

    let status = session.with(|s| s.status().cloned()).flatten();
    match (status, result) {
        (Some(status), result) => {
            if status.is_success() {
                println!("✅ {}", status.message());
                Ok(())
            } else {
                eprintln!("❌ {}", status.message());
                if let Err(UploadError::TransportFailed(cause)) = result {
                    log::debug!("Cause: {}", cause);
                }
                std::process::exit(1);
            }
        }
        (None, Err(e)) => Err(e.into()),
        (None, Ok(_)) => Ok(()),
    }
}

/// The accept filters are advisory: warn, never block.
fn warn_if_unaccepted(accept: &str, file: &LocalFile) {
    if !matches_accept(accept, &file.name(), &file.mime_type()) {
        eprintln!("⚠️  {} does not match {}, uploading anyway", file.name(), accept);
    }
}
