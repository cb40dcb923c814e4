//! # zen

use zen::{Config, Editor, Error};

/// Parse the command line, initialize the editor and run the program, optionally opening a file
/// if a path argument was given.
///
/// # Errors
///
/// Any error that occurs during the execution of the program is returned by this function.
fn main() -> Result<(), Error> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        return Err(Error::TooManyArguments(args));
    }
    match args.get(1) {
        Some(arg) if arg == "--version" => {
            println!("zen {}", env!("ZEN_VERSION"));
            Ok(())
        }
        Some(arg) if arg.starts_with('-') => Err(Error::UnrecognizedOption(arg.clone())),
        file_name => {
            Editor::new(Config::default())?.run(file_name.cloned())?;
            Ok(())
        }
    }
}
