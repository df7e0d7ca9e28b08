use clap::Parser;

#[derive(Parser)]
#[command(name = "tf", about = concat!("[*] taskflow v", env!("CARGO_PKG_VERSION"), " - tasks in your terminal"), version)]
pub struct Cli {
    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir")]
    pub data_dir: Option<String>,
}
