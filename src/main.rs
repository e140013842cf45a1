//! # genmedia CLI
//!
//! Command-line entry point. Takes a JSON array of generation specs, writes
//! each artifact and prints its path to stdout as soon as it exists. Logs go
//! to stderr and to `genmedia.log` in the log directory.
//!
//! ```text
//! genmedia image '[{"filePath":"logo.svg","mime":"image/svg+xml","prompt":"a fox","mode":"fast"}]'
//! genmedia video '[{"filePath":"clip.mp4","prompt":"waves","mode":"quality","durationSeconds":8}]'
//! ```

mod telemetry;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use genmedia::backend::GenerativeBackend;
use genmedia::clock::SystemClock;
use genmedia::config::Config;
use genmedia::executor::Generator;
use genmedia::gemini::types::HttpOptions;
use genmedia::materializer::Materializer;
use genmedia::pipeline::Pipeline;
use genmedia::transcoder::{Ffmpeg, Transcoder};
use genmedia::wal::Context;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about = "Quota-aware image and video generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: GlobalArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate SVG or binary images
    Image {
        /// JSON array of image specs
        specs: String,
    },

    /// Generate MP4 or GIF videos
    Video {
        /// JSON array of video specs
        specs: String,
    },
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Directory for the request log and debug files
    #[arg(long, global = true, default_value = ".logs")]
    log_dir: PathBuf,

    /// ffmpeg executable used for video post-processing
    #[arg(long, global = true, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// Maximum attempts per spec
    #[arg(long, global = true, default_value = "3")]
    max_attempts: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::builder()
        .log_dir(cli.options.log_dir)
        .transcoder_program(cli.options.ffmpeg)
        .max_attempts(cli.options.max_attempts)
        .build();

    let _guard = telemetry::init_tracing_subscriber(&config.log_dir)?;

    // fail before any request log entry is written
    let api_key = config.api_key()?;
    let client = genmedia::gemini::Client::with_options(
        api_key,
        HttpOptions {
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
        },
    )?;
    let backend: Arc<dyn GenerativeBackend> = Arc::new(client);

    let generator = Generator::new(&config, backend.clone(), Arc::new(SystemClock));
    let mut ctx = Context::load(&config).await?;
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Image { specs } => {
            let pipeline = Pipeline::new(generator, Materializer::new(None), backend);
            let written = pipeline.run_images(&specs, &mut ctx, &mut stdout).await?;
            info!("Generated {} image(s)", written.len());
        }
        Commands::Video { specs } => {
            let transcoder = match Ffmpeg::probe(&config.transcoder_program).await {
                Some(ffmpeg) => Some(Arc::new(ffmpeg) as Arc<dyn Transcoder>),
                None => {
                    warn!(
                        "{} not found, videos will not be post-processed",
                        config.transcoder_program.display()
                    );
                    None
                }
            };
            let pipeline = Pipeline::new(generator, Materializer::new(transcoder), backend);
            let written = pipeline.run_videos(&specs, &mut ctx, &mut stdout).await?;
            info!("Generated {} video(s)", written.len());
        }
    }

    Ok(())
}
