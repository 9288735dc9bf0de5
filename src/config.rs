//! Command line surface and the runtime configuration derived from it.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::image::ImagePolicy;
use crate::store::DEFAULT_BASE_URL;

/// Terminal client for a REST collection of songs.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Collection endpoint of the song backend.
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Attach a random picture URL to every saved song.
    #[arg(long)]
    pub random_images: bool,

    /// Give up on a backend request after this many seconds. Without it
    /// requests wait indefinitely.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Directory for log files. Defaults to the platform data directory.
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

/// Settings consumed by `main` once the CLI has been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub images: ImagePolicy,
    pub timeout: Option<Duration>,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            images: if cli.random_images {
                ImagePolicy::Random
            } else {
                ImagePolicy::Omit
            },
            timeout: cli.timeout.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cli = Cli::parse_from(["song-shelf"]);
        let config = Config::from(&cli);
        assert_eq!(config.base_url, "http://localhost:3030/songs");
        assert_eq!(config.images, ImagePolicy::Omit);
        assert_eq!(config.timeout, None);
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "song-shelf",
            "--base-url",
            "http://example.test/api/songs",
            "--random-images",
            "--timeout",
            "5",
            "--log-dir",
            "/tmp/song-shelf",
        ]);
        let config = Config::from(&cli);
        assert_eq!(config.base_url, "http://example.test/api/songs");
        assert_eq!(config.images, ImagePolicy::Random);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/song-shelf")));
    }
}
