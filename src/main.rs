#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod assumptions;
mod cli;
mod compatibility;
mod dataset;
mod error;
mod estimator;
mod export;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    dataset::Dataset,
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let dataset = Dataset::new(args.dataset.path);
    let index = dataset
        .load()
        .with_context(|| format!("failed to load the dataset from `{}`", dataset.path().display()))?;

    match args.command {
        Command::Services => cli::services(index),
        Command::Check(args) => cli::check(index, &args)?,
        Command::Stack(args) => cli::stack(index, &args)?,
        Command::Matrix(args) => cli::matrix(index, &args)?,
        Command::Requirements(args) => cli::requirements(index, &args),
        Command::Estimate(args) => cli::estimate(index, &args)?,
    }

    info!("done!");
    Ok(())
}
