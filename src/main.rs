use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use glreg::{emit, resolve, Config};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write typed bindings
    Generate(Generate),
    /// List the API levels, with their Cargo feature names
    Levels(Source),
    /// Print the `[features]` table for a crate using generated bindings
    Features(Source),
    /// List the extensions supported by the API
    Extensions(Source),
}

#[derive(Args)]
struct Source {
    /// TOML config file
    #[arg(short, long, env = "GLREG_CONFIG")]
    config: Option<PathBuf>,

    /// Path to gl.xml, instead of the bundled registry
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Registry api (gl, gles1, gles2, glsc2)
    #[arg(short, long)]
    api: Option<String>,
}

#[derive(Args)]
struct Generate {
    #[command(flatten)]
    source: Source,

    /// Only this level, e.g. GL_VERSION_4_5_core. Every level when absent
    #[arg(short, long)]
    level: Option<String>,

    /// Extension to merge into every level. Replaces the configured list
    #[arg(short, long = "extension")]
    extensions: Vec<String>,

    /// Typed bindings output ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Also write the raw gl_generator layer here
    #[arg(long)]
    raw: Option<PathBuf>,
}

impl Source {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        if let Some(registry) = &self.registry {
            config.registry = Some(registry.clone());
        }
        if let Some(api) = &self.api {
            config.api = api.clone();
        }
        Ok(config)
    }
}

fn create(path: &Path) -> anyhow::Result<Box<dyn Write>> {
    Ok(if path == Path::new("-") {
        Box::new(std::io::stdout().lock())
    } else {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        Box::new(std::io::BufWriter::new(file))
    })
}

fn generate(args: Generate) -> anyhow::Result<()> {
    let mut config = args.source.config()?;
    if args.level.is_some() {
        config.level = args.level;
    }
    if !args.extensions.is_empty() {
        config.extensions = args.extensions;
    }

    let registry = config.load_registry().context("loading registry")?;
    let plan = glreg::plan(&registry, &config).context("planning bindings")?;
    let options = config.options()?;

    let mut out = create(&args.output)?;
    glreg::Emitter::new(&plan, &options)
        .write(&mut out)
        .context("writing typed bindings")?;
    out.flush()?;

    if let Some(raw) = &args.raw {
        let mut out = create(raw)?;
        glreg::generate_raw(&plan, &config, &mut out).context("writing raw bindings")?;
        out.flush()?;
        info!("Wrote raw bindings to {}", raw.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Levels(source) => {
            let config = source.config()?;
            let registry = config.load_registry()?;
            let resolution = resolve::resolve(&registry, &config.api, &[])?;
            let mut out = std::io::stdout().lock();
            for level in resolution.levels() {
                writeln!(out, "{}\t{}", level.ident(), level.cargo_feature())?;
            }
            Ok(())
        }
        Command::Features(source) => {
            let config = source.config()?;
            let registry = config.load_registry()?;
            let resolution = resolve::resolve(&registry, &config.api, &[])?;
            emit::features::write_table(resolution.levels(), &mut std::io::stdout().lock())?;
            Ok(())
        }
        Command::Extensions(source) => {
            let config = source.config()?;
            let registry = config.load_registry()?;
            let mut out = std::io::stdout().lock();
            for extension in registry.extensions.iter().filter(|e| e.supports(&config.api)) {
                writeln!(out, "{}", extension.name)?;
            }
            Ok(())
        }
    }
}
