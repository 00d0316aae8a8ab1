use clap::Parser;
use layerkit::cli::CliArgs;
use layerkit::{app, init_json_logging, init_logging};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.log_json {
        init_json_logging()?;
    } else {
        init_logging()?;
    }

    let summary = app::run(&args)?;
    println!("{}", summary);

    Ok(())
}
