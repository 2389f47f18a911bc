use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wl",
    about = concat!("[>] worklist v", env!("CARGO_PKG_VERSION"), " - your tasks, one table"),
    version
)]
pub struct Cli {
    /// Store the task file in a different directory
    #[arg(long = "data-dir")]
    pub data_dir: Option<String>,
}
