use std::env;
use std::fs::File;
use std::process::ExitCode;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use zoo_donation::csv::{CsvError, read_submissions, write_history};
use zoo_donation::{Catalog, ConsoleSink, DonationPage};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: zoo-donation <submissions.csv> [history.csv]");
        return ExitCode::from(2);
    };
    let history_path = args.next();

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let submissions = match read_submissions(&path) {
        Ok(submissions) => submissions,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut page = DonationPage::launch(Catalog::standard(), ConsoleSink::stdout());

    for result in submissions {
        let inputs = match result {
            Ok(inputs) => inputs,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        page.fill(inputs);
        if let Err(e) = page.submit() {
            warn!("submission skipped: {e}");
            continue;
        }
        if let Err(e) = page.settle().await {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    }

    print!("{}", page.render());

    if let Some(history_path) = history_path {
        let state = page.state();
        let written = File::create(&history_path)
            .map_err(CsvError::from)
            .and_then(|file| write_history(file, state.transactions()));
        if let Err(e) = written {
            error!(path = %history_path, "{e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
