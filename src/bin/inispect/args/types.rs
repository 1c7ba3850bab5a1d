use std::path::PathBuf;

use inispect::RegexDialect;

pub(super) const USAGE: &str = "\
Invocation forms:
  inispect -h
  inispect [OPTION] [--strict] INI-FILE
Where:
  -a, --list-all-keys  List all keys
  -e, --exists KEY     Test if the entry at KEY exists, return 0
                       if it does, otherwise return 2
  -G, --egrep RE       List all keys matching the given extended regex
  -g, --grep RE        List all keys matching the given basic regex
  -h                   Print this message and exit
  -k, --list-keys SEC  List keys in section SEC
  -p, --print KEY      Print the value associated with KEY and
                       return 0, otherwise print nothing and return 2
  -s, --list-sections  List INI sections
  -V, --egrep-values RE
                       List all keys whose value matches the given
                       extended regex
  -v, --grep-values RE
                       List all keys whose value matches the given
                       basic regex
  --strict             Fail on malformed INI lines instead of ignoring
                       them

In the case that the INI-FILE doesn't exist, return 1. A KEY is a
string of the format section:key, completely lowercased. Colons in
section and key must be escaped with a backslash. Regexes are
case-insensitive and don't have captures enabled.
";

/// The closed set of query operations. Exactly one runs per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListSections,
    ListKeys { section: String },
    ListAllKeys,
    Exists { key: String },
    Print { key: String },
    GrepKeys { pattern: String, dialect: RegexDialect },
    GrepValues { pattern: String, dialect: RegexDialect },
}

#[derive(Debug, Default)]
pub struct Args {
    pub operation: Option<Operation>,
    pub file: Option<PathBuf>,
    pub strict: bool,
    pub help: bool,
}

#[derive(Debug)]
pub enum ParseArgError {
    MissingInputFile,
    InvalidOption(String),
    MissingValue(String),
    UnexpectedArgument(String),
}

impl std::fmt::Display for ParseArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInputFile => write!(f, "missing input file"),
            Self::InvalidOption(s) => write!(f, "invalid option: {s}"),
            Self::MissingValue(s) => write!(f, "missing value for {s}"),
            Self::UnexpectedArgument(s) => write!(f, "unexpected argument: {s}"),
        }
    }
}

impl std::error::Error for ParseArgError {}

impl Args {
    pub fn parse() -> Result<Self, ParseArgError> {
        Self::parse_from(std::env::args().skip(1).collect())
    }

    pub fn parse_from(args: Vec<String>) -> Result<Self, ParseArgError> {
        super::parse::parse_args(&args)
    }
}
