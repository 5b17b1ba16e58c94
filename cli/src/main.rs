//! video-analyzer CLI - submit hiking videos to the scene analyzer
//!
//! # Commands
//!
//! ```bash
//! video-analyzer analyze climb.mp4             # Upload, analyze, print scenes
//! video-analyzer analyze climb.mp4 --json      # Same, raw analysis JSON
//! video-analyzer analyze climb.mp4 --stream    # Show agent progress over WebSocket
//! video-analyzer upload climb.mp4              # Upload only, print the filepath token
//! video-analyzer render analysis.json          # Render a saved analysis offline
//! ```
//!
//! The server defaults to `http://localhost:8000` and can be set with
//! `--server` or `VIDEO_ANALYZER_URL` (also read from `.env`).

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use video_analyzer::{
    check_selection, render, AnalysisApi, AnalysisResult, ClientConfig, UploadAnalyzeController,
};
use video_analyzer_cli::{
    write_output, LocalVideo, ReqwestAnalysisApi, TerminalSink, DEFAULT_SERVER_URL,
    SERVER_URL_ENV,
};

#[derive(Parser)]
#[command(name = "video-analyzer")]
#[command(about = "Upload a video, run scene analysis and print the detected scenes", long_about = None)]
struct Cli {
    /// Analysis server URL
    #[arg(long, global = true, env = SERVER_URL_ENV, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Reject files larger than this many bytes
    #[arg(long, global = true)]
    max_size: Option<u64>,

    /// Log requests and state changes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a video, analyze it and print the scenes
    Analyze {
        /// Video file
        input: PathBuf,

        /// Print the analysis as JSON instead of the scene list
        #[arg(long)]
        json: bool,

        /// Analyze over the streaming endpoint and print agent progress
        #[arg(long)]
        stream: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a video and print the server-side filepath
    Upload {
        /// Video file
        input: PathBuf,
    },

    /// Render a saved analysis JSON file
    Render {
        /// Analysis JSON file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = ClientConfig::new(cli.server);
    if let Some(limit) = cli.max_size {
        config = config.with_max_file_size(limit);
    }

    let result = match cli.command {
        Commands::Analyze { input, json, stream, output } => {
            let config = config.with_streaming(stream);
            cmd_analyze(&config, &input, json, output.as_deref()).await
        }

        Commands::Upload { input } => cmd_upload(&config, &input).await,

        Commands::Render { input, output } => cmd_render(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_analyze(
    config: &ClientConfig,
    input: &Path,
    json: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let video = LocalVideo::open(input).await?;
    eprintln!("🎬 Analyzing: {}", video.path().display());
    eprintln!("   Server: {}", config.base_url);
    if config.streaming {
        eprintln!("   Mode: streaming");
    }

    let api = ReqwestAnalysisApi::new(config);
    let controller = UploadAnalyzeController::new(api, TerminalSink, config);

    let result = controller.submit(Some(video)).await?;

    let content = if json {
        format!("{}\n", serde_json::to_string_pretty(&result)?)
    } else {
        render(&result).to_string()
    };
    write_output(&content, output)?;

    Ok(())
}

async fn cmd_upload(config: &ClientConfig, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📤 Uploading: {}", input.display());

    let video = LocalVideo::open(input).await?;
    let video = check_selection(Some(&video), config.max_file_size)?;

    let api = ReqwestAnalysisApi::new(config);
    let uploaded = api.upload(video).await?;

    eprintln!("✅ Uploaded");
    println!("{}", uploaded.filepath);
    Ok(())
}

fn cmd_render(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let result = AnalysisResult::from_json(&content)?;
    write_output(&render(&result).to_string(), output)?;
    Ok(())
}
