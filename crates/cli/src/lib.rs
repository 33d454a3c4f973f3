use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flags::{DecisionFlag, EdgeFlag, EnergyFlag, PhysicsFlag};
use pipeline::RunContext;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use teamnet_graph::{DocumentAssembler, EdgeToggles, NetworkConfig};
use teamnet_protocol::{document_schema, serialize_json, serialize_json_pretty, SimilarPerson};
use teamnet_roster::SAMPLE_ROSTER_CSV;

mod config;
mod flags;
mod pipeline;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

/// Write to `--out` when given, stdout otherwise
fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
            Ok(())
        }
        None => print_stdout(text),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serialize_json_pretty(value)
    } else {
        serialize_json(value)
    }
}

#[derive(Parser)]
#[command(name = "teamnet")]
#[command(about = "Relationship graph of a team from a people table", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file (overrides TEAMNET_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph document (JSON) for the renderer
    Graph(GraphArgs),

    /// Render a Markdown report of the network and team composition
    Report(ReportArgs),

    /// List the people most similar to one person (JSON)
    Similar(SimilarArgs),

    /// Print the built-in sample table (CSV)
    Sample,

    /// Print the JSON Schema of the graph document
    Schema,
}

#[derive(Args)]
struct EdgeArgs {
    /// Edge kinds to compare (comma separated); replaces the configured set
    #[arg(long, value_enum, value_delimiter = ',')]
    edges: Vec<EdgeFlag>,

    /// Compare on every edge kind
    #[arg(long)]
    all_edges: bool,
}

impl EdgeArgs {
    fn apply(&self, config: &mut NetworkConfig) {
        if !self.edges.is_empty() {
            config.edges = EdgeToggles::only(self.edges.iter().map(|e| e.as_domain()));
        }
        if self.all_edges {
            config.edges.all = true;
        }
    }
}

#[derive(Args)]
struct ViewArgs {
    /// People table (CSV); the built-in sample when omitted
    csv: Option<PathBuf>,

    #[command(flatten)]
    edges: EdgeArgs,

    /// Keep people on one side of the E/I axis
    #[arg(long, value_enum)]
    ei: Option<EnergyFlag>,

    /// Keep people on one side of the T/F axis
    #[arg(long, value_enum)]
    tf: Option<DecisionFlag>,

    /// Keep only one personality code, e.g. INTP
    #[arg(long)]
    mbti: Option<String>,

    /// Focus the person whose name or handle contains this text
    #[arg(long)]
    search: Option<String>,

    /// Directory with person pictures
    #[arg(long)]
    images: Option<PathBuf>,

    /// Hide names on nodes
    #[arg(long)]
    no_labels: bool,

    /// Force model hint for the renderer
    #[arg(long, value_enum)]
    physics: Option<PhysicsFlag>,

    /// Base node size (5..=60)
    #[arg(long)]
    base_size: Option<u32>,

    /// Extra size per connection (0..=40)
    #[arg(long)]
    degree_scale: Option<u32>,
}

impl ViewArgs {
    fn apply(&self, config: &mut NetworkConfig) {
        self.edges.apply(config);
        if self.no_labels {
            config.show_labels = false;
        }
        if let Some(physics) = self.physics {
            config.physics = physics.as_domain();
        }
        if let Some(size) = self.base_size {
            config.sizing.base_node_size = size;
        }
        if let Some(scale) = self.degree_scale {
            config.sizing.degree_scale = scale;
        }
    }

    fn into_context(self, mut config: NetworkConfig) -> Result<RunContext> {
        self.apply(&mut config);
        config.validate().context("Invalid options")?;

        let roster = pipeline::load_roster(self.csv.as_deref(), &config)?;
        let filter = pipeline::build_filter(
            self.ei.map(EnergyFlag::as_str),
            self.tf.map(DecisionFlag::as_str),
            self.mbti.as_deref(),
        )?;
        let images = pipeline::resolve_images(self.images.as_deref(), &roster);

        Ok(RunContext {
            config,
            roster,
            filter,
            search: self.search,
            images,
        })
    }
}

#[derive(Args)]
struct GraphArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Write the document here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Write the report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct SimilarArgs {
    /// Handle, or text contained in a name or handle
    person: String,

    /// People table (CSV); the built-in sample when omitted
    csv: Option<PathBuf>,

    #[command(flatten)]
    edges: EdgeArgs,

    /// Number of people to list
    #[arg(long)]
    limit: Option<usize>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct SimilarOutput {
    handle: String,
    name: String,
    similar: Vec<SimilarPerson>,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Graph(args) => {
            let config = config::load_config(cli.config.as_deref())?;
            let ctx = args.view.into_context(config)?;
            let network = ctx.assemble()?;
            let json = to_json(&network.document, args.pretty)?;
            emit(&json, args.out.as_deref())
        }
        Commands::Report(args) => {
            let config = config::load_config(cli.config.as_deref())?;
            let ctx = args.view.into_context(config)?;
            let network = ctx.assemble()?;
            let md = report::render_network_report(&network)?;
            emit(&md, args.out.as_deref())
        }
        Commands::Similar(args) => {
            let mut config = config::load_config(cli.config.as_deref())?;
            args.edges.apply(&mut config);
            if let Some(limit) = args.limit {
                config.similar_limit = limit;
            }

            let roster = pipeline::load_roster(args.csv.as_deref(), &config)?;
            let person = pipeline::find_person(&roster, &args.person)?;
            let assembler = DocumentAssembler::new(&config)?;
            let output = SimilarOutput {
                handle: person.handle.clone(),
                name: person.name().to_string(),
                similar: assembler.similar_to(&roster, &person.handle)?,
            };
            print_stdout(&to_json(&output, args.pretty)?)
        }
        Commands::Sample => print_stdout(SAMPLE_ROSTER_CSV.trim_end()),
        Commands::Schema => print_stdout(&document_schema()?),
    }
}
