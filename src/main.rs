// main.rs - CLI entry point

use std::io;

use configsetup::output;
use configsetup::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_main() -> Result<(), EditError> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let options = validate_args(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if options.verbose {
        output::write_options(&mut out, &options)?;
    }

    let store = IniFileStore::new(&options.filename);
    let (document, report) = run_edit_with(&store, &options, |section, plan| {
        if options.verbose {
            output::write_plan(&mut out, section, plan)?;
        }
        Ok(())
    })?;

    if options.verbose {
        let location = store.location().display().to_string();
        output::write_report(&mut out, &report, &location)?;
    }

    if options.dry_run {
        output::write_document(&mut out, &document)?;
    }

    Ok(())
}
