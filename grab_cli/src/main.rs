use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use grab_core::progress::format_bytes;
use grab_core::FileDownloader;

mod terminal_observer;
use terminal_observer::TerminalProgressObserver;

#[derive(Parser)]
#[command(name = "grab", about = "Download a single file with progress")]
struct Args {
    /// URL to download
    #[arg(short, long)]
    url: String,

    /// Directory to put the downloaded file into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut downloader = FileDownloader::new();
    downloader.add_observer(Box::new(TerminalProgressObserver::new()));

    println!("Starting download: {}", args.url);
    let start = Instant::now();

    match downloader.download(&args.url, &args.out_dir).await {
        Ok(downloaded) => {
            let elapsed = start.elapsed().as_secs_f64();
            println!(
                "Saved {} ({}) in {:.2}s",
                downloaded.path.display(),
                format_bytes(downloaded.bytes_received),
                elapsed
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Download failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
