#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::{fs, io};

use anyhow::{bail, Context, Result};
use camino::Utf8PathBuf;
use cbz::Unrar;
use cbz_poster::{
    build_poster, expand_home, extract_covers, move_to_poster_dir, PosterOptions,
    POSTER_FILE_NAME, SCRATCH_DIR_NAME,
};
use clap::Parser;
use dialoguer::Input;
use tracing::{debug, info, warn, Level};

use crate::args::Args;

mod args;

/// `None` when the prompt is interrupted
fn prompt_source_dir() -> Result<Option<Utf8PathBuf>> {
    let path = match Input::<String>::new()
        .with_prompt("Directory with .cbr files")
        .interact_text()
    {
        Ok(path) => path,
        Err(err) if err.kind() == io::ErrorKind::Interrupted => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    Ok(Some(expand_home(path.trim().trim_matches('"'))))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let source_dir = match args.path {
        Some(path) => path,
        None => match prompt_source_dir()? {
            Some(path) => path,
            None => {
                info!("cancelled");
                return Ok(());
            }
        },
    };
    if !source_dir.is_dir() {
        bail!("{source_dir} is not a directory");
    }
    let source_dir = source_dir
        .canonicalize_utf8()
        .with_context(|| format!("couldn't resolve {source_dir}"))?;

    let unrar = match args.unrar {
        Some(path) if path.is_file() => Unrar::new(path),
        Some(path) => bail!("UnRAR not found at {path}"),
        None => Unrar::locate().context("UnRAR not found, install it or use --unrar")?,
    };
    info!("using UnRAR at {}", unrar.program().display());

    let scratch_dir = source_dir.join(SCRATCH_DIR_NAME);
    let covers = extract_covers(&source_dir, &scratch_dir, &unrar)?;

    let poster_path = source_dir.join(POSTER_FILE_NAME);
    let built = if covers.is_empty() {
        warn!("no cover extracted, poster not created");
        Ok(false)
    } else {
        build_poster(
            &covers,
            &poster_path,
            PosterOptions {
                height: args.height,
                padding: args.padding,
            },
        )
    };

    if !args.keep_covers {
        if let Err(err) = fs::remove_dir_all(&scratch_dir) {
            debug!("couldn't remove {scratch_dir}: {err}");
        }
    }

    if built.context("couldn't build the poster")? {
        let final_path = move_to_poster_dir(&poster_path, &source_dir)?;
        info!("moved poster to {final_path}");
    }

    info!("done");

    Ok(())
}
