mod cli;
mod fields_cmd;
#[cfg(feature = "ollama")]
mod generate_cmd;
mod lines_cmd;
mod shared;
mod skeleton_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Skeleton {
            ref file,
            ref output,
            ref format,
        } => skeleton_cmd::run(file, output.as_deref(), format),
        cli::Commands::Lines {
            ref file,
            page,
            ref format,
        } => lines_cmd::run(file, page, format),
        cli::Commands::Fields {
            ref file,
            ref format,
        } => fields_cmd::run(file, format),
        #[cfg(feature = "ollama")]
        cli::Commands::Generate {
            ref file,
            ref image,
            ref mime,
            ref memory,
            ref model,
            ref ollama_url,
            ref output,
            ref format,
        } => generate_cmd::run(
            file,
            image,
            mime,
            memory.as_deref(),
            model,
            ollama_url,
            output.as_deref(),
            format,
        ),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
