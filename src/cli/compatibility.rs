use clap::Parser;
use enumset::EnumSet;
use itertools::Itertools;

use crate::{
    compatibility::{CompatibilityIndex, CompatibilityStatus, PairRecord, StackingMode},
    prelude::*,
    tables::{
        build_matrix_table,
        build_metadata_table,
        build_records_table,
        build_requirements_table,
        build_services_table,
    },
};

#[derive(Parser)]
pub struct CheckArgs {
    /// Service name, abbreviation or alias.
    pub first: String,

    pub second: String,

    /// Check only this mode instead of all of them.
    #[clap(long, env = "STACKING_MODE")]
    pub mode: Option<StackingMode>,
}

#[derive(Parser)]
pub struct StackArgs {
    #[clap(num_args = 2.., required = true)]
    pub services: Vec<String>,

    /// Check only this mode instead of all of them.
    #[clap(long, env = "STACKING_MODE")]
    pub mode: Option<StackingMode>,
}

#[derive(Parser)]
pub struct MatrixArgs {
    #[clap(num_args = 1.., required = true)]
    pub services: Vec<String>,

    #[clap(long, env = "STACKING_MODE", default_value = "co-delivery")]
    pub mode: StackingMode,
}

#[derive(Parser)]
pub struct RequirementsArgs {
    pub service: String,
}

pub fn services(index: &CompatibilityIndex) {
    println!("{}", build_metadata_table(index.metadata()));
    println!("{}", build_services_table(index.list_services()));
}

#[instrument(skip_all, fields(first = %args.first, second = %args.second))]
pub fn check(index: &CompatibilityIndex, args: &CheckArgs) -> Result {
    let records = match args.mode {
        Some(mode) => vec![PairRecord {
            first: index.resolve(&args.first)?,
            second: index.resolve(&args.second)?,
            mode,
            record: index.get_compatibility(&args.first, &args.second, mode)?,
        }],
        None => index.check_pair(&args.first, &args.second)?,
    };
    println!("{}", build_records_table(&records));
    Ok(())
}

#[instrument(skip_all, fields(n_services = args.services.len()))]
pub fn stack(index: &CompatibilityIndex, args: &StackArgs) -> Result {
    let modes = args.mode.map_or_else(EnumSet::all, EnumSet::only);
    let mut records = Vec::new();
    for mode in modes {
        records.extend(index.check_multiple(&args.services, mode)?);
    }
    println!("{}", build_records_table(&records));

    for (mode, records) in &records.iter().chunk_by(|record| record.mode) {
        let counts = records.counts_by(|record| record.record.status);
        let n_compatible = counts.get(&CompatibilityStatus::Yes).copied().unwrap_or_default();
        let n_pairs: usize = counts.values().sum();
        if n_compatible == n_pairs {
            info!(%mode, n_pairs, "every pair is compatible");
        } else {
            warn!(
                %mode,
                n_pairs,
                n_compatible,
                n_incompatible = counts.get(&CompatibilityStatus::No).copied().unwrap_or_default(),
                "not every pair is compatible",
            );
        }
    }
    Ok(())
}

pub fn matrix(index: &CompatibilityIndex, args: &MatrixArgs) -> Result {
    let matrix = index.matrix(&args.services, args.mode)?;
    println!("{}: {}", args.mode, args.mode.summary());
    println!("{}", build_matrix_table(&matrix));
    Ok(())
}

pub fn requirements(index: &CompatibilityIndex, args: &RequirementsArgs) {
    let found = index
        .resolve(&args.service)
        .ok()
        .zip(index.get_technical_requirements(&args.service))
        .filter(|(_, requirements)| !requirements.is_empty());
    match found {
        Some((service, requirements)) => {
            println!("{}", build_requirements_table(service, requirements));
            info!(service = %service, n_fields = requirements.len(), "technical requirements");
        }
        None => {
            println!("No technical requirements found for `{}`.", args.service);
        }
    }
}
