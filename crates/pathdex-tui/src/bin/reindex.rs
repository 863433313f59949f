//! Merges new text files under `ROOT/<scan_dir>` into `ROOT/<index file>`.
//!
//! Usage: `reindex [ROOT]` (defaults to the current directory). Settings are
//! read from `ROOT/config/pathdex.toml` or `$HOME/.config/pathdex/config.toml`.

use std::path::PathBuf;

use anyhow::Context;
use pathdex_core::config::find_config;
use pathdex_core::config::settings::Config;
use pathdex_core::reindex;

fn main() -> anyhow::Result<()> {
    let root = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir().context("failed to get current directory")?,
    };

    let home = std::env::var_os("HOME").map(PathBuf::from);
    let config = match find_config(&root, home.as_deref()) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log.level_filter())
        .init();

    let index_path = root.join(&config.index.file);
    let out = reindex(&root, &config.index.scan_dir, &index_path)
        .with_context(|| format!("failed to reindex {}", index_path.display()))?;

    println!(
        "{}: {} added, {} non-text skipped, {} rows",
        index_path.display(),
        out.added.len(),
        out.skipped_non_text,
        out.table.row_count()
    );
    Ok(())
}
