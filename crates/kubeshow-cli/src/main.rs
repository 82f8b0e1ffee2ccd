//! Kubeshow CLI - render a chart offline and show the manifests it would apply

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use kubeshow_core::{DEFAULT_NAMESPACE, DEFAULT_RELEASE_NAME, RenderOptions};

mod commands;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "kubeshow")]
#[command(author = "Kubeshow Contributors")]
#[command(version)]
#[command(about = "Render a chart without a cluster and print its manifests", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render chart manifests locally
    Template {
        /// Chart directory
        chart: PathBuf,

        /// Serialized template engine output (manifest + hooks)
        #[arg(long, env = "KUBESHOW_RENDERED")]
        rendered: PathBuf,

        /// Target namespace
        #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
        namespace: String,

        /// Release name (for template context)
        #[arg(long, default_value = DEFAULT_RELEASE_NAME)]
        release_name: String,

        /// Only show manifests rendered from the given templates (path or glob)
        #[arg(short = 's', long = "show-only")]
        show_only: Vec<String>,

        /// Write each manifest to a file under this directory instead of stdout
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Kubernetes API versions available to capability checks
        #[arg(short = 'a', long = "api-versions")]
        api_versions: Vec<String>,

        /// Leave out test hooks
        #[arg(long)]
        skip_tests: bool,

        /// Leave out all hooks
        #[arg(long)]
        no_hooks: bool,
    },
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    match cli.command {
        Commands::Template {
            chart,
            rendered,
            namespace,
            release_name,
            show_only,
            output_dir,
            api_versions,
            skip_tests,
            no_hooks,
        } => {
            let options = RenderOptions {
                api_versions,
                ..RenderOptions::default()
            }
            .with_namespace(namespace)
            .with_release_name(release_name)
            .skip_tests(skip_tests)
            .disable_hooks(no_hooks);

            commands::template::run(&chart, &rendered, &options, &show_only, output_dir.as_deref())
        }
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
