// CLI application
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mips_cli::commands::{decode_words, flash, simulate, synthesize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mips")]
#[command(about = "MIPS datapath model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Perform a simulation of the datapath
    Sim {
        /// Path to the JSON simulation config
        #[arg(short, long)]
        config: PathBuf,

        /// Output file to store the simulation trace
        #[arg(long, default_value = "simulation.json")]
        out: PathBuf,
    },
    /// Decode and disassemble instruction words
    Decode {
        /// Instruction words (0x-prefixed hex or decimal)
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Synthesize the core and save to file
    Synth,
    /// Synthesize and flash the core to a device
    Flash,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sim { config, out } => {
            let pb = create_progress_bar("Simulating...")?;
            simulate(&config, &out)?;
            pb.finish_with_message("Simulation complete");
        }
        Commands::Decode { words } => decode_words(&words)?,
        Commands::Synth => synthesize()?,
        Commands::Flash => flash()?,
    }

    Ok(())
}

fn create_progress_bar(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}
