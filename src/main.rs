use anyhow::Result;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use lnk::linker::LinkOptions;
use lnk::npm::Npm;
use std::path::PathBuf;

/// lnk - link global npm modules into a project
///
/// Links <global root>/<module> to ./node_modules/<module>, installing the
/// module globally first when it is missing, and records "^<version>" in
/// package.json.
///
/// Examples:
///   lnk typescript     # Link the global typescript into ./node_modules
///   lnk -D eslint      # Same, recorded under devDependencies
///   lnk '*'            # Link everything listed in dependencies
///   lnk -D -L '*'      # Include devDependencies, installing latest versions
#[derive(Parser, Debug)]
#[command(author, version = env!("LNK_VERSION"), about)]
struct Cli {
    /// Module to link, or `*` for every dependency in package.json
    #[arg(value_name = "MODULE", value_parser = NonEmptyStringValueParser::new())]
    pub module: String,

    /// Target devDependencies (new entries, and `*` selection)
    #[arg(short = 'D', long = "dev")]
    pub dev: bool,

    /// Install `latest` even for modules with a recorded range
    #[arg(short = 'L', long = "latest")]
    pub latest: bool,

    /// Leave already linked modules and their recorded range untouched
    #[arg(long = "no-refresh")]
    pub no_refresh: bool,

    /// Project directory (defaults to the current directory; also via LNK_PROJECT)
    #[arg(short = 'C', long = "project", env = "LNK_PROJECT", value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// npm executable to use (also via LNK_NPM)
    #[arg(long = "npm", env = "LNK_NPM", value_name = "PROGRAM")]
    pub npm: Option<PathBuf>,
}

impl Cli {
    fn link_options(&self) -> LinkOptions {
        LinkOptions {
            target_dev: self.dev,
            force_latest: self.latest,
            refresh_version_on_existing_link: !self.no_refresh,
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let runtime = lnk::runtime::RealRuntime;
    let npm = Npm::new(cli.npm.clone().map(PathBuf::into_os_string));
    let options = cli.link_options();
    lnk::commands::link(runtime, npm, &cli.module, cli.project, options).await
}

/// Parse the command line, reporting argument errors like any other failure.
///
/// `--help` and `--version` keep clap's own output and exit status.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprintln!("⚠️ {}", e.to_string().trim_end());
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = parse_cli();

    if let Err(e) = run(cli).await {
        eprintln!("⚠️ {:#}", e);
        std::process::exit(1);
    }
}
