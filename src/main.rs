use clap::{Args, Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use uql::cli::{self, CheckOptions, CheckResult, CliError, Command};

#[derive(ClapParser)]
#[command(name = "uql")]
#[command(about = "UQL - tokenize and parse filter queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a query
    Check {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Print the tokens of a query
    Tokens {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the parse tree of a query
    Tree {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// The query (reads from stdin if not provided)
    query: Option<String>,

    /// Reject unknown characters, unterminated literals and incomplete input
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Default)]
struct OutputArgs {
    /// Emit JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let (command, query, output) = match cli.command {
        Commands::Check { query } => (Command::Check, query, OutputArgs::default()),
        Commands::Tokens { query, output } => (Command::Tokens, query, output),
        Commands::Tree { query, output } => (Command::Tree, query, output),
    };

    if let Err(e) = run(command, query, output) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, query: QueryArgs, output: OutputArgs) -> Result<(), CliError> {
    let text = match query.query {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            buffer
        }
        None => return Err(CliError::NoQuery),
    };

    let options = CheckOptions {
        query: text,
        command,
        json: output.json,
        pretty: output.pretty,
        strict: query.strict,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Rendered(rendered) => println!("{}", rendered),
    }
    Ok(())
}
