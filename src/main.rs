//! Route Template CLI
//!
//! Usage:
//!   route-template parse <TEMPLATE>
//!   route-template sanitize [--style braces|colon] [--keep-query] <TEMPLATE>
//!   route-template emit [--holder NAME] <TEMPLATE>
//!   route-template generate [-o DIR] [--keep-going] <MANIFEST>
//!   route-template grammar

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use route_template::generate::{generate_all, GeneratedFile};
use route_template::{
    compile_with_config, parse, sanitize_with, CompileConfig, EmitConfig, Manifest,
    PlaceholderStyle, QueryMode, SanitizeOptions,
};

#[derive(Parser)]
#[command(name = "route-template")]
#[command(about = "Compile typed route templates into router paths and parameter parsers")]
struct Cli {
    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the parameters a template declares
    Parse {
        /// The route template
        template: String,
    },

    /// Print the router registration path
    Sanitize {
        /// The route template
        template: String,

        /// Placeholder style of the output
        #[arg(long, value_enum, default_value_t = StyleArg::Braces)]
        style: StyleArg,

        /// Keep the query section instead of stripping it
        #[arg(long)]
        keep_query: bool,
    },

    /// Print the holder declaration and extraction statements
    Emit {
        /// The route template
        template: String,

        /// Name of the holder record
        #[arg(long, default_value = "Params")]
        holder: String,
    },

    /// Generate parameter parser classes for every route in a manifest
    Generate {
        /// Manifest file (TOML)
        manifest: PathBuf,

        /// Directory to write .java files to (prints to stdout if not provided)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Report failing routes and continue with the rest
        #[arg(long)]
        keep_going: bool,
    },

    /// Show the template grammar reference
    Grammar,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Braces,
    Colon,
}

impl From<StyleArg> for PlaceholderStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Braces => PlaceholderStyle::Braces,
            StyleArg::Colon => PlaceholderStyle::Colon,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse { template } => match parse(&template) {
            Ok(result) => {
                if result.is_empty() {
                    println!("(no parameters)");
                }
                for param in result.params() {
                    println!("{}", param);
                }
            }
            Err(e) => fail(&e.format(&template, "template")),
        },

        Command::Sanitize {
            template,
            style,
            keep_query,
        } => {
            let query = if keep_query {
                QueryMode::Keep
            } else {
                QueryMode::Strip
            };
            let options = SanitizeOptions::new()
                .with_style(style.into())
                .with_query(query);
            match sanitize_with(&template, &options) {
                Ok(path) => println!("{}", path),
                Err(e) => fail(&e.format(&template, "template")),
            }
        }

        Command::Emit { template, holder } => {
            let config = CompileConfig::new().with_emit(EmitConfig::new().with_holder_name(holder));
            match compile_with_config(&template, &config) {
                Ok(route) => {
                    for statement in &route.code.extractions {
                        println!("{}", statement);
                    }
                    if !route.code.extractions.is_empty() {
                        println!();
                    }
                    println!("{}", route.code.holder_decl);
                }
                Err(e) => fail(&e.format(&template, "template")),
            }
        }

        Command::Generate {
            manifest,
            out_dir,
            keep_going,
        } => run_generate(&manifest, out_dir.as_deref(), keep_going),

        Command::Grammar => print_grammar(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: &str) -> ! {
    eprint!("{}", message);
    std::process::exit(1);
}

fn run_generate(manifest_path: &Path, out_dir: Option<&Path>, keep_going: bool) {
    let manifest = match Manifest::from_file(manifest_path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading manifest '{}': {}", manifest_path.display(), e);
            std::process::exit(1);
        }
    };

    if let Some(dir) = out_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Error creating '{}': {}", dir.display(), e);
            std::process::exit(1);
        }
    }

    let mut failed = 0;
    for outcome in generate_all(&manifest) {
        match outcome.result {
            Ok(file) => write_file(&file, out_dir),
            Err(e) => {
                let label = outcome.route.label();
                tracing::warn!(route = %label, "route failed");
                eprint!("{}", e.format(&outcome.route.path, &label));
                failed += 1;
                if !keep_going {
                    std::process::exit(1);
                }
            }
        }
    }

    if failed > 0 {
        eprintln!("{} of {} routes failed", failed, manifest.routes.len());
        std::process::exit(1);
    }
}

fn write_file(file: &GeneratedFile, out_dir: Option<&Path>) {
    match out_dir {
        Some(dir) => {
            let target = dir.join(&file.file_name);
            if let Err(e) = fs::write(&target, &file.source) {
                eprintln!("Error writing '{}': {}", target.display(), e);
                std::process::exit(1);
            }
            tracing::info!(file = %target.display(), path = %file.path, "wrote");
        }
        None => {
            println!("// {}", file.file_name);
            print!("{}", file.source);
            println!();
        }
    }
}

fn print_grammar() {
    println!(
        r#"ROUTE TEMPLATE GRAMMAR
======================

TEMPLATE
--------
/literal/{{type:name}}/{{type:name=default}}?name={{type}}&name={{type=default}}

    template      := path ("?" query)?
    path          := ("/" (literal | placeholder)*)+
    placeholder   := "{{" type ":" name ("=" default)? "}}"
    query         := query_param ("&" query_param)*
    query_param   := name "=" "{{" type ("=" default)? "}}"

TYPES
-----
int        Integer         default: 42
long       Long            default: 42
string     String          default: any text (quoted in output)
boolean    Boolean         default: true | false
float      Float           default: 1.5
double     Double          default: 1.5
timestamp  Instant         default: 2024-01-01T00:00:00Z

Type tags are lowercase. Names match [A-Za-z_][A-Za-z0-9_]* and must be
unique across path and query.

NOTE: the query form name={{type[=default]}} is this tool's own convention;
path placeholders follow the established {{type:name[=default]}} syntax.

EXAMPLE
-------
/users/{{int:id}}/posts/{{string:slug=latest}}?limit={{int=20}}

    registration path:  /users/{{id}}/posts/{{slug}}   (--style colon: /users/:id/posts/:slug)"#
    );
}
