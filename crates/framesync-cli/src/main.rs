mod cli;
mod replay;

use std::io::Read;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use framesync_codec::Decoded;

fn read_input(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("framesync=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "framesync=info".parse().unwrap()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match &args.command {
        cli::Command::Compress { input } => read_input(input.as_ref()).map(|text| {
            println!("{}", framesync_codec::compress(text.trim_end()));
        }),
        cli::Command::Decompress { input } => read_input(input.as_ref()).map(|text| {
            match framesync_codec::safe_decompress(text.trim_end()) {
                Decoded::Object(value) => println!("{value}"),
                Decoded::Text(text) => println!("{text}"),
            }
        }),
        cli::Command::Replay { input } => read_input(input.as_ref()).map(|transcript| {
            replay::run(&transcript);
        }),
    };

    if let Err(err) = result {
        tracing::error!(%err, "input read failed");
        std::process::exit(1);
    }
}
