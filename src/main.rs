use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Url;

use force_curves::data::filter::filter_by_kind;
use force_curves::data::source::DEFAULT_ORIGIN;
use force_curves::{get_curve_data, get_switch_meta_data, HttpSettings, HttpSource, SwitchKind};

#[derive(Debug, Parser)]
#[command(name = "force-curves", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct App {
    /// Scheme and host the dataset is served from.
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    origin: String,

    #[arg(long = "proxy")]
    proxies: Vec<Url>,

    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List switches from switchmeta.csv.
    #[command(alias = "m")]
    Meta {
        /// Only show these switch kinds.
        #[arg(long = "kind", value_enum)]
        kinds: Vec<KindArg>,
    },
    /// Fetch the force curves of one switch.
    #[command(alias = "c")]
    Curve {
        name: String,
        #[arg(long)]
        upstroke: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Linear,
    Tactile,
    Clicky,
    Unknown,
}

impl From<KindArg> for SwitchKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Linear => SwitchKind::Linear,
            KindArg::Tactile => SwitchKind::Tactile,
            KindArg::Clicky => SwitchKind::Clicky,
            KindArg::Unknown => SwitchKind::Unknown,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let app = App::parse();

    let mut settings = HttpSettings::new(&app.origin).context("parsing --origin")?;
    if !app.proxies.is_empty() {
        settings.proxies = Some(app.proxies);
    }
    settings.timeout = app.timeout_secs.map(Duration::from_secs);
    let source = HttpSource::new(settings).context("building HTTP client")?;

    let json = match app.cmd {
        Commands::Meta { kinds } => {
            let metas = get_switch_meta_data(&source)
                .await
                .context("loading switch metadata")?;
            log::info!("Loaded {} switches", metas.len());

            let filter = (!kinds.is_empty())
                .then(|| kinds.into_iter().map(SwitchKind::from).collect::<BTreeSet<_>>());
            serde_json::to_string_pretty(&filter_by_kind(&metas, &filter))?
        }
        Commands::Curve { name, upstroke } => {
            let curves = get_curve_data(&source, &name, upstroke)
                .await
                .with_context(|| format!("loading curves for {name}"))?;
            serde_json::to_string_pretty(&curves)?
        }
    };

    println!("{json}");
    Ok(())
}
