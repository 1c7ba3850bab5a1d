use inispect::{GrepMatches, ParseOptions, QualifiedKey, ValueLookup};

use super::error::{CliError, ExecuteStatus};
use super::types::{Args, Operation, ParseArgError};

impl Args {
    /// Load the INI file, then run the selected operation against it.
    /// Listing a nonexistent section prints nothing and still succeeds;
    /// only -e and -p report a missing name through the exit code.
    pub fn execute(&self) -> Result<ExecuteStatus, CliError> {
        let path = self.file.as_ref().ok_or(ParseArgError::MissingInputFile)?;
        let options = ParseOptions {
            strict: self.strict,
        };
        let store = inispect::load_ini(path, &options)?;

        let Some(ref operation) = self.operation else {
            return Ok(ExecuteStatus::Ok);
        };

        match *operation {
            Operation::ListSections => {
                for name in store.section_names() {
                    println!("{name}");
                }
            }
            Operation::ListKeys { ref section } => {
                if let Ok(keys) = store.keys_in(section) {
                    for key in keys {
                        println!("{key}");
                    }
                }
            }
            Operation::ListAllKeys => {
                for key in store.all_keys() {
                    println!("{key}");
                }
            }
            Operation::Exists { ref key } => {
                let qk = QualifiedKey::parse(key);
                if !inispect::exists(&store, &qk) {
                    return Ok(ExecuteStatus::NotFound);
                }
            }
            Operation::Print { ref key } => {
                let qk = QualifiedKey::parse(key);
                match inispect::get_value(&store, &qk) {
                    ValueLookup::Found(value) => println!("{value}"),
                    ValueLookup::NoValue => {}
                    ValueLookup::NotFound => return Ok(ExecuteStatus::NotFound),
                }
            }
            Operation::GrepKeys {
                ref pattern,
                dialect,
            } => print_matches(inispect::grep_keys(&store, pattern, dialect)),
            Operation::GrepValues {
                ref pattern,
                dialect,
            } => print_matches(inispect::grep_values(&store, pattern, dialect)),
        }

        Ok(ExecuteStatus::Ok)
    }
}

/// A malformed pattern is diagnosed on stderr but does not fail the
/// process; the query just yields nothing, matching the classic tool.
fn print_matches(matches: Result<GrepMatches<'_>, regex::Error>) {
    match matches {
        Ok(matches) => {
            for key in matches {
                println!("{key}");
            }
        }
        Err(e) => eprintln!("{e}"),
    }
}
