use clap::{Parser as ClapParser, Subcommand};
use scim_filter::cli::{self, CheckOptions, CliError, SqlOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "scimfilter")]
#[command(about = "scimfilter - parse SCIM filter expressions and compile them to SQL")]
#[command(version)]
struct Cli {
    /// Log parser and compiler activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a filter and print its syntax tree
    Check {
        /// The filter (reads from stdin if not provided)
        filter: Option<String>,

        /// Parse as a PATCH path (allows `attr[filter].subAttr`)
        #[arg(long)]
        patch: bool,

        /// Print the canonical filter text instead of the tree
        #[arg(long)]
        canonical: bool,
    },

    /// Print the tokens of a filter with their positions
    Tokens {
        /// The filter (reads from stdin if not provided)
        filter: Option<String>,

        /// Scan with the PATCH path dialect
        #[arg(long)]
        patch: bool,
    },

    /// Compile a filter to a parameterized SQL query
    Sql {
        /// The filter (reads from stdin if not provided)
        filter: Option<String>,

        /// Root table to select from
        #[arg(short, long, default_value = "users")]
        table: String,

        /// SQL dialect (postgres, sqlite)
        #[arg(short, long, default_value = "postgres")]
        dialect: String,

        /// Map an attribute to a column, e.g. `userName=user_name`
        #[arg(short, long = "map", value_name = "ATTR=COLUMN")]
        mappings: Vec<String>,

        /// Reject attributes that have no --map entry
        #[arg(long)]
        strict: bool,

        /// Parse as a PATCH path
        #[arg(long)]
        patch: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            filter,
            patch,
            canonical,
        } => run_check(filter, patch, canonical),
        Commands::Tokens { filter, patch } => run_tokens(filter, patch),
        Commands::Sql {
            filter,
            table,
            dialect,
            mappings,
            strict,
            patch,
            pretty,
        } => read_filter(filter).and_then(|filter| {
            run_sql(
                SqlOptions {
                    filter,
                    table,
                    dialect,
                    mappings,
                    strict,
                    patch,
                },
                pretty,
            )
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_filter(filter: Option<String>) -> Result<String, CliError> {
    match filter {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(filter: Option<String>, patch: bool, canonical: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        filter: read_filter(filter)?,
        patch,
    };
    let stmt = cli::execute_check(&options)?;
    if canonical {
        println!("{}", stmt);
    } else {
        println!("{:#?}", stmt.expr);
    }
    Ok(())
}

fn run_tokens(filter: Option<String>, patch: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        filter: read_filter(filter)?,
        patch,
    };
    let tokens = cli::execute_tokens(&options)?;
    print!("{}", cli::render_tokens(&tokens));
    Ok(())
}

fn run_sql(options: SqlOptions, pretty: bool) -> Result<(), CliError> {
    let output = cli::execute_sql(&options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }?;
    println!("{}", json);
    Ok(())
}
