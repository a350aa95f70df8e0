use rfq::{
    lang::{self, Grouping, ParseError},
    ParseOptions,
};

use clap::{Parser, Subcommand};
use colored::*;
use human_panic::setup_panic;

#[derive(Parser, Debug)]
#[command(about, version)]
struct Arguments {
    #[command(subcommand)]
    command: Command,

    /// Print intermediate data structures
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    Check(Check),
}

/// Checks syntax of a filter query without binding it to any row type
#[derive(clap::Args, Debug)]
struct Check {
    /// Filter query, e.g. "Age gt 20 _And Fullname cn 'John D'"
    filter: String,

    /// Print the parsed grouping as JSON
    #[arg(long)]
    json: bool,

    /// Reject filters with more clauses than this
    #[arg(long)]
    max_clauses: Option<usize>,
}

fn main() {
    setup_panic!();
    env_logger::init();

    let mut eprint = ErrorPrinter::new();

    let args = Arguments::parse();
    match args.command {
        Command::Check(check) => {
            let options = ParseOptions {
                max_clauses: check.max_clauses,
            };

            let grouping = match parse_filter(&mut eprint, &check.filter, &options, args.debug) {
                Ok(grouping) => grouping,
                Err(()) => std::process::exit(1),
            };

            if check.json {
                match serde_json::to_string_pretty(&grouping) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        eprint.error(&err.to_string());
                        std::process::exit(1);
                    },
                }
            }

            println!("{}", "Filter is valid".bold().green());
        },
    }
}

fn parse_filter(eprint: &mut ErrorPrinter, src: &str, options: &ParseOptions, debug: bool) -> Result<Grouping, ()> {
    eprint.set_src(src);

    let grouping = match lang::parse_with(src, options) {
        Ok(grouping) => grouping,
        Err(error) => {
            eprint.parser_error(&error);
            return Err(());
        },
    };

    if debug {
        println!("{}", "Grouping:".bold());
        println!("{:#?}\n", grouping);

        if grouping.is_match_all() {
            println!("{}\n", "Empty filter matches every row".dimmed());
        }
    }

    Ok(grouping)
}

struct ErrorPrinter {
    first_error: bool,
    src: Option<String>,
}

impl ErrorPrinter {
    fn new() -> ErrorPrinter {
        ErrorPrinter {
            first_error: true,
            src: None,
        }
    }

    fn set_src(&mut self, src: &str) {
        self.src = Some(src.to_string());
    }

    fn check_line(&mut self) {
        if self.first_error {
            self.first_error = false;
        } else {
            eprintln!();
        }
    }

    fn error(&mut self, msg: &str) {
        self.first_error = false;

        eprintln!(
            "{}{}",
            "error: ".bold().red(),
            msg.bold(),
        );
    }

    fn error_span(&mut self, msg: &str, offset: usize, len: usize) {
        self.check_line();

        if let Some(src) = &self.src {
            let prefix = "filter:  ";
            eprintln!("{}{}", prefix.bold().dimmed(), src);

            let column = src.get(..offset).map(|s| s.chars().count()).unwrap_or(0);
            let width = src.get(offset..offset + len).map(|s| s.chars().count()).unwrap_or(0);
            eprintln!(
                "{}{}",
                " ".repeat(prefix.len() + column),
                "^".repeat(width.max(1)).yellow(),
            );
        }

        self.error(msg);
    }

    fn parser_error(&mut self, error: &ParseError) {
        match error {
            ParseError::MalformedClause { span, .. } => {
                self.error_span(&error.to_string(), span.offset, span.len);
            },
            ParseError::EmptyExpression | ParseError::TooManyClauses { .. } => {
                self.error(&error.to_string());
            },
        }
    }
}
