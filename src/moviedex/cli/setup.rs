use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

/// On-disk layout of the data file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageFormat {
    Json,
    Csv,
}

impl StorageFormat {
    /// `.csv` files use the CSV backend, everything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => StorageFormat::Csv,
            _ => StorageFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "moviedex", bin_name = "moviedex", version = get_version())]
#[command(about = "Keep track of the movies you've watched", long_about = None)]
pub struct Cli {
    /// Data file holding the collection (created if missing)
    #[arg(short, long, env = "MOVIEDEX_FILE", default_value = "movies.json")]
    pub file: PathBuf,

    /// Storage format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<StorageFormat>,

    /// HTML template for the generated website
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn storage_format(&self) -> StorageFormat {
        self.format
            .unwrap_or_else(|| StorageFormat::from_path(&self.file))
    }
}
