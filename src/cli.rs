mod compatibility;
mod estimate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use self::{
    compatibility::{
        CheckArgs,
        MatrixArgs,
        RequirementsArgs,
        StackArgs,
        check,
        matrix,
        requirements,
        services,
        stack,
    },
    estimate::{EstimateArgs, estimate},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub dataset: DatasetArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the services known to the dataset.
    #[clap(name = "services")]
    Services,

    /// Check whether two services can be stacked.
    #[clap(name = "check")]
    Check(CheckArgs),

    /// Check every pair of the selected services.
    #[clap(name = "stack")]
    Stack(StackArgs),

    /// Print the compatibility matrix of the selected services.
    #[clap(name = "matrix")]
    Matrix(MatrixArgs),

    /// Print the technical requirements of a service.
    #[clap(name = "requirements")]
    Requirements(RequirementsArgs),

    /// Estimate the annual value of flexibility.
    #[clap(name = "estimate")]
    Estimate(Box<EstimateArgs>),
}

#[derive(Parser)]
pub struct DatasetArgs {
    /// Revenue stacking compatibility dataset.
    #[clap(
        long = "dataset",
        env = "STACKING_DATA_PATH",
        default_value = "data/stacking_data.json"
    )]
    pub path: PathBuf,
}
