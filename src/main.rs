use std::path::PathBuf;

use anyhow::{bail, Context};
use pcbkit::script::{load_script, Replayer};
use pcbkit::{init_logging, EditorConfig, Project, SettingsPersistence, BUILD_DATE, VERSION};

const USAGE: &str = "usage: pcbkit replay <script.json> [--config <file>]";

struct Args {
    script: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("replay") => {}
        Some("--version") | Some("-V") => {
            println!("pcbkit {} ({})", VERSION, BUILD_DATE);
            return Ok(None);
        }
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(None);
        }
        Some(other) => bail!("Unknown command '{}'\n{}", other, USAGE),
        None => bail!("{}", USAGE),
    }

    let mut script = None;
    let mut config = None;
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().context("--config needs a file")?;
            config = Some(PathBuf::from(path));
        } else if script.is_none() {
            script = Some(PathBuf::from(arg));
        } else {
            bail!("Unexpected argument '{}'\n{}", arg, USAGE);
        }
    }

    let script = script.with_context(|| format!("Missing script\n{}", USAGE))?;
    Ok(Some(Args { script, config }))
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => SettingsPersistence::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?
            .into_config(),
        None => EditorConfig::default(),
    };

    let steps = load_script(&args.script)?;
    let name = args
        .script
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("board");

    let mut replayer = Replayer::new(Project::new(name), config);
    replayer.run(&steps)?;

    println!("{}", serde_json::to_string_pretty(&replayer.summary())?);
    Ok(())
}
