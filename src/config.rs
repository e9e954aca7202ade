use clap::Parser;

/// Command-line arguments for converting Pascal VOC XML to Label Studio JSON.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory containing Pascal VOC XML annotation files
    #[arg(short = 'd', long = "file_dir")]
    pub file_dir: String,

    /// Directory to write the converted JSON files into
    #[arg(short = 's', long = "save_dir", default_value = "output/")]
    pub save_dir: String,

    /// File the final success message is appended to
    #[arg(long = "log_file", default_value = "log/success.log")]
    pub log_file: String,

    /// Abort on the first file that fails to convert instead of skipping it
    #[arg(long = "strict")]
    pub strict: bool,
}
