use clap::Parser;
use tailwind_linter::bridge::worker;
use tailwind_linter::{check, Cli, Commands, Result, TailwindVersion};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check(args) => {
            let result = check(args)?;
            // Remaining violations make the run fail, the usual linter contract
            if result.total_diagnostics > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Worker(args) => {
            let version = TailwindVersion::from_major(args.major)?;
            worker::serve(version)
        }
    }
}
