use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "glasskit",
    version,
    about = "Liquid Glass design-token and plugin manifest tooling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Liquid Glass stylesheet from design tokens
    #[command(alias = "gen")]
    Generate {
        /// Path to the design-token JSON document
        #[arg(long, default_value = "design/tokens/liquid_glass.json")]
        src: PathBuf,
        /// Path to write the generated stylesheet
        #[arg(long, default_value = "resources/ui/liquid_glass.qss")]
        out: PathBuf,
    },
    /// Validate a plugin manifest file
    Validate {
        /// Path to the manifest JSON file
        manifest: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { src, out } => match glasskit::write_stylesheet(&src, &out) {
            Ok(()) => println!("Generated {} from {}", out.display(), src.display()),
            Err(e) => {
                eprintln!("glasskit generate: {e}");
                std::process::exit(1);
            }
        },
        Commands::Validate { manifest } => match glasskit::validate_manifest_file(&manifest) {
            Ok(()) => println!("Manifest '{}' is valid.", manifest.display()),
            Err(e) => {
                eprintln!("ERROR: {e}");
                std::process::exit(1);
            }
        },
    }
}
