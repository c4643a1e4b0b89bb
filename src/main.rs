use std::io;
use std::process::ExitCode;
use wordle_filter::cli::{CliInterface, parse_cli};
use wordle_filter::logging::init_logging;
use wordle_filter::tui::TuiInterface;
use wordle_filter::wordbank::{WordList, load_wordbank};
use wordle_filter::{GameInterface, game_loop, info_log};

fn main() -> ExitCode {
    let cli = parse_cli();

    if cli.logs_enabled()
        && let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref())
    {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    let (path, wordbank) = match load_wordbank(
        cli.wordbank_path.as_deref(),
        WordList::from_wide_flag(cli.wide),
        cli.data_dir.as_deref(),
        cli.word_length,
    ) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load word list: {e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!("loaded {} words from {}", wordbank.len(), path.display());

    let mut interface: Box<dyn GameInterface> = if cli.tui {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Box::new(CliInterface::new(io::stdin().lock()).with_max_display(cli.show))
    };

    match game_loop(&wordbank, interface.as_mut()) {
        Ok(outcome) => {
            info_log!("session ended: {:?}", outcome);
            ExitCode::SUCCESS
        }
        // Only `MixedWordLengths` reaches here, and the loader keeps a single
        // length, so this covers lists handed in by other callers.
        Err(e) => {
            drop(interface);
            eprintln!("Word list rejected: {e}");
            ExitCode::FAILURE
        }
    }
}
