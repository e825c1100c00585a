// stubgen CLI entry point
use anyhow::Result;
use clap::Parser;

use stubgen_cli::{commands, get_version, init_project, Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { name }) => {
            let project_name = init_project(&name)?;
            println!("Created stubgen project '{}'", project_name);
            println!("Next steps:");
            println!("  cd {}", if name == "." { "." } else { &name });
            println!("  stubgen generate");
        }
        Some(Commands::Generate {
            project,
            output,
            format,
            clean,
            digests,
        }) => {
            commands::generate::run(project.as_deref(), output, format, clean, digests)?;
        }
        Some(Commands::Check { project }) => {
            commands::check::run(project.as_deref())?;
        }
        Some(Commands::Version) | None => {
            println!("{}", get_version());
        }
    }

    Ok(())
}
