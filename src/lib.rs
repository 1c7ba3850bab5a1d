pub mod error;
pub mod key;
pub mod parse;
pub mod query;
pub mod store;

pub use error::Error;
pub use key::QualifiedKey;
pub use parse::{ParseError, ParseOptions, load_ini, parse_ini};
pub use query::{
    GrepMatches, RegexDialect, ValueLookup, compile_pattern, exists, get_value, grep_keys,
    grep_values,
};
pub use store::{Entry, Section, Store, StoreError};
