use std::path::PathBuf;

use inispect::RegexDialect;

use super::types::{Args, Operation, ParseArgError};

pub(super) fn parse_args(args: &[String]) -> Result<Args, ParseArgError> {
    let mut result = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(rest) = arg.strip_prefix("--") {
            parse_long(&mut result, rest, &mut iter)?;
            continue;
        }
        if let Some(rest) = arg.strip_prefix('-')
            && !rest.is_empty()
        {
            parse_short(&mut result, rest, &mut iter)?;
            continue;
        }
        // positional: the INI file, always the trailing argument
        if result.file.is_some() {
            return Err(ParseArgError::UnexpectedArgument(arg.clone()));
        }
        result.file = Some(PathBuf::from(arg));
    }

    Ok(result)
}

/// First recognized query option wins; later ones are parsed but ignored.
fn set_operation(args: &mut Args, operation: Operation) {
    if args.operation.is_none() {
        args.operation = Some(operation);
    }
}

fn take_short_value<'a>(
    attached: &str,
    iter: &mut impl Iterator<Item = &'a String>,
    opt: char,
) -> Result<String, ParseArgError> {
    if !attached.is_empty() {
        return Ok(attached.to_string());
    }
    iter.next()
        .cloned()
        .ok_or_else(|| ParseArgError::MissingValue(format!("-{opt}")))
}

/// Parse one short-option argument. Flags cluster (`-sa`) and value options
/// accept the value attached (`-kdb`) or as the next argument (`-k db`).
fn parse_short<'a>(
    args: &mut Args,
    opts: &str,
    iter: &mut impl Iterator<Item = &'a String>,
) -> Result<(), ParseArgError> {
    let mut chars = opts.chars();
    while let Some(opt) = chars.next() {
        let attached = chars.as_str();
        match opt {
            'h' => args.help = true,
            's' => set_operation(args, Operation::ListSections),
            'a' => set_operation(args, Operation::ListAllKeys),
            'k' => {
                let section = take_short_value(attached, iter, opt)?;
                set_operation(args, Operation::ListKeys { section });
                return Ok(());
            }
            'e' => {
                let key = take_short_value(attached, iter, opt)?;
                set_operation(args, Operation::Exists { key });
                return Ok(());
            }
            'p' => {
                let key = take_short_value(attached, iter, opt)?;
                set_operation(args, Operation::Print { key });
                return Ok(());
            }
            'g' => {
                let pattern = take_short_value(attached, iter, opt)?;
                set_operation(
                    args,
                    Operation::GrepKeys {
                        pattern,
                        dialect: RegexDialect::Basic,
                    },
                );
                return Ok(());
            }
            'G' => {
                let pattern = take_short_value(attached, iter, opt)?;
                set_operation(
                    args,
                    Operation::GrepKeys {
                        pattern,
                        dialect: RegexDialect::Extended,
                    },
                );
                return Ok(());
            }
            'v' => {
                let pattern = take_short_value(attached, iter, opt)?;
                set_operation(
                    args,
                    Operation::GrepValues {
                        pattern,
                        dialect: RegexDialect::Basic,
                    },
                );
                return Ok(());
            }
            'V' => {
                let pattern = take_short_value(attached, iter, opt)?;
                set_operation(
                    args,
                    Operation::GrepValues {
                        pattern,
                        dialect: RegexDialect::Extended,
                    },
                );
                return Ok(());
            }
            _ => return Err(ParseArgError::InvalidOption(format!("-{opt}"))),
        }
    }
    Ok(())
}

fn take_long_value<'a>(
    inline: Option<&str>,
    iter: &mut impl Iterator<Item = &'a String>,
    name: &str,
) -> Result<String, ParseArgError> {
    if let Some(value) = inline {
        return Ok(value.to_string());
    }
    iter.next()
        .cloned()
        .ok_or_else(|| ParseArgError::MissingValue(format!("--{name}")))
}

/// Parse one long-option argument; values come inline (`--print=db:host`)
/// or as the next argument.
fn parse_long<'a>(
    args: &mut Args,
    rest: &str,
    iter: &mut impl Iterator<Item = &'a String>,
) -> Result<(), ParseArgError> {
    let (name, inline) = match rest.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (rest, None),
    };

    match name {
        "help" => args.help = true,
        "strict" => args.strict = true,
        "list-sections" => set_operation(args, Operation::ListSections),
        "list-all-keys" => set_operation(args, Operation::ListAllKeys),
        "list-keys" => {
            let section = take_long_value(inline, iter, name)?;
            set_operation(args, Operation::ListKeys { section });
        }
        "exists" => {
            let key = take_long_value(inline, iter, name)?;
            set_operation(args, Operation::Exists { key });
        }
        "print" => {
            let key = take_long_value(inline, iter, name)?;
            set_operation(args, Operation::Print { key });
        }
        "grep" => {
            let pattern = take_long_value(inline, iter, name)?;
            set_operation(
                args,
                Operation::GrepKeys {
                    pattern,
                    dialect: RegexDialect::Basic,
                },
            );
        }
        "egrep" => {
            let pattern = take_long_value(inline, iter, name)?;
            set_operation(
                args,
                Operation::GrepKeys {
                    pattern,
                    dialect: RegexDialect::Extended,
                },
            );
        }
        "grep-values" => {
            let pattern = take_long_value(inline, iter, name)?;
            set_operation(
                args,
                Operation::GrepValues {
                    pattern,
                    dialect: RegexDialect::Basic,
                },
            );
        }
        "egrep-values" => {
            let pattern = take_long_value(inline, iter, name)?;
            set_operation(
                args,
                Operation::GrepValues {
                    pattern,
                    dialect: RegexDialect::Extended,
                },
            );
        }
        _ => return Err(ParseArgError::InvalidOption(format!("--{name}"))),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Result<Args, ParseArgError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&args)
    }

    #[test]
    fn test_parse_flag_then_file() {
        let args = parse(&["-s", "conf.ini"]).unwrap();
        assert_eq!(args.operation, Some(Operation::ListSections));
        assert_eq!(args.file, Some(PathBuf::from("conf.ini")));
    }

    #[test]
    fn test_parse_short_value_attached_and_separate() {
        let attached = parse(&["-kdb", "conf.ini"]).unwrap();
        let separate = parse(&["-k", "db", "conf.ini"]).unwrap();
        let expected = Some(Operation::ListKeys {
            section: "db".to_string(),
        });
        assert_eq!(attached.operation, expected);
        assert_eq!(separate.operation, expected);
    }

    #[test]
    fn test_parse_long_value_inline_and_separate() {
        let inline = parse(&["--print=db:host", "conf.ini"]).unwrap();
        let separate = parse(&["--print", "db:host", "conf.ini"]).unwrap();
        let expected = Some(Operation::Print {
            key: "db:host".to_string(),
        });
        assert_eq!(inline.operation, expected);
        assert_eq!(separate.operation, expected);
    }

    #[test]
    fn test_parse_first_operation_wins() {
        let args = parse(&["-s", "-k", "db", "-a", "conf.ini"]).unwrap();
        assert_eq!(args.operation, Some(Operation::ListSections));
        assert_eq!(args.file, Some(PathBuf::from("conf.ini")));
    }

    #[test]
    fn test_parse_later_value_option_is_consumed() {
        // "-p db:host" is ignored as an operation but its value must not be
        // mistaken for the input file
        let args = parse(&["-e", "db:host", "-p", "other:key", "conf.ini"]).unwrap();
        assert_eq!(
            args.operation,
            Some(Operation::Exists {
                key: "db:host".to_string()
            })
        );
        assert_eq!(args.file, Some(PathBuf::from("conf.ini")));
    }

    #[test]
    fn test_parse_grep_dialects() {
        let basic = parse(&["-g", "^ho", "conf.ini"]).unwrap();
        assert_eq!(
            basic.operation,
            Some(Operation::GrepKeys {
                pattern: "^ho".to_string(),
                dialect: RegexDialect::Basic,
            })
        );
        let extended = parse(&["-G", "^ho", "conf.ini"]).unwrap();
        assert_eq!(
            extended.operation,
            Some(Operation::GrepKeys {
                pattern: "^ho".to_string(),
                dialect: RegexDialect::Extended,
            })
        );
        let values = parse(&["-V", "redis", "conf.ini"]).unwrap();
        assert_eq!(
            values.operation,
            Some(Operation::GrepValues {
                pattern: "redis".to_string(),
                dialect: RegexDialect::Extended,
            })
        );
    }

    #[test]
    fn test_parse_help_and_strict() {
        assert!(parse(&["-h"]).unwrap().help);
        assert!(parse(&["--help"]).unwrap().help);
        let args = parse(&["--strict", "-s", "conf.ini"]).unwrap();
        assert!(args.strict);
        assert_eq!(args.operation, Some(Operation::ListSections));
    }

    #[test]
    fn test_parse_clustered_flags() {
        let args = parse(&["-hs", "conf.ini"]).unwrap();
        assert!(args.help);
        assert_eq!(args.operation, Some(Operation::ListSections));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse(&["-x", "conf.ini"]),
            Err(ParseArgError::InvalidOption(ref s)) if s == "-x"
        ));
        assert!(matches!(
            parse(&["--bogus", "conf.ini"]),
            Err(ParseArgError::InvalidOption(ref s)) if s == "--bogus"
        ));
        assert!(matches!(
            parse(&["-k"]),
            Err(ParseArgError::MissingValue(ref s)) if s == "-k"
        ));
        assert!(matches!(
            parse(&["a.ini", "b.ini"]),
            Err(ParseArgError::UnexpectedArgument(ref s)) if s == "b.ini"
        ));
    }

    #[test]
    fn test_parse_no_arguments() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.operation, None);
        assert_eq!(args.file, None);
    }
}
