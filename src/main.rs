mod cli;

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use emoji::{Catalog, Codec};
use html::Document;
use log::debug;
use net::{HttpSource, TextSource};
use picker::{CatalogLoader, Page, PageConfig, spawn_load};

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let config = load_config(cli.config.as_deref())?;
    let source: Arc<dyn TextSource> = Arc::new(HttpSource::new());
    let dataset = cli.dataset.clone().unwrap_or_else(|| config.json_url.clone());
    let loader = Arc::new(CatalogLoader::new(Arc::clone(&source), dataset));
    // the dataset loads while the input is read
    let pending = spawn_load(loader);

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Render {
            input,
            fragment,
            styles,
        } => {
            let text = read_input(&input)?;
            let catalog = receive(pending)?;
            if fragment {
                let codec = Codec::new(catalog, config.codec.clone());
                writeln!(out, "{}", codec.render_html(&text)?)?;
            } else {
                let mut page = Page::new(Document::parse(&text), config)?;
                let rewritten = page.attach_catalog(catalog);
                debug!("{rewritten} regions rewritten");
                if styles {
                    page.load_stylesheet(source.as_ref())?;
                }
                writeln!(out, "{}", page.html())?;
            }
        }
        Command::Plain { input } => {
            let text = read_input(&input)?;
            let codec = Codec::new(receive(pending)?, config.codec.clone());
            writeln!(out, "{}", codec.plain_html(&text))?;
        }
        Command::Groups => {
            let catalog = receive(pending)?;
            for group in catalog.groups() {
                writeln!(out, "{}\t{}\t{}", group.name(), group.icon(), group.count())?;
            }
        }
        Command::Shorthand { text } => {
            let codec = Codec::new(receive(pending)?, config.codec.clone());
            writeln!(out, "{}", codec.to_shorthand_text(&text.join(" ")))?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PageConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str::<PageConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => PageConfig::default(),
    };
    Ok(config.validate()?)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn receive(
    pending: std::sync::mpsc::Receiver<Result<Arc<Catalog>, picker::LoadError>>,
) -> Result<Arc<Catalog>> {
    let catalog = pending
        .recv()
        .map_err(|_| anyhow!("dataset loader stopped"))?
        .context("loading the emoji dataset")?;
    Ok(catalog)
}
