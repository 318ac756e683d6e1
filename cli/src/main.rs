use std::{net::IpAddr, path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use server::{ServerOpts, serve};

#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve `/metrics` and the dashboard page.
    Server {
        /// Address to bind. The default listens on all interfaces.
        #[arg(long, env = "HOSTPULSE_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on.
        #[arg(long, env = "HOSTPULSE_PORT", default_value_t = 5000)]
        port: u16,

        /// Directory whose files are served as-is.
        /// Example: `./ui` or `/var/www/hostpulse`
        #[arg(long, env = "HOSTPULSE_STATIC_DIR", default_value = "ui")]
        static_dir: PathBuf,

        /// Page served at `/`, relative to `--static-dir`.
        #[arg(long, env = "HOSTPULSE_INDEX", default_value = "index.html")]
        index: PathBuf,

        /// How long CPU usage is measured for each `/metrics` request.
        /// Values below the OS minimum (200ms on most platforms) are raised to it.
        #[arg(long, env = "HOSTPULSE_SAMPLE_WINDOW_MS", default_value_t = server::DEFAULT_SAMPLE_WINDOW.as_millis() as u64)]
        sample_window_ms: u64,

        /// Log at debug level unless `RUST_LOG` says otherwise.
        #[arg(long, env = "HOSTPULSE_DEBUG")]
        debug: bool,
    },
}

fn init_tracing(debug: bool) {
    let default_level = match debug {
        true => "debug",
        false => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    match Args::parse().cmd {
        Command::Server {
            host,
            port,
            static_dir,
            index,
            sample_window_ms,
            debug,
        } => {
            init_tracing(debug);

            serve(ServerOpts {
                host,
                port,
                static_dir,
                index,
                sample_window: Duration::from_millis(sample_window_ms),
            })
            .await?
        }
    }

    Ok(())
}
