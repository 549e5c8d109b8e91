//! Healthcare cost predictor CLI.
//!
//! The interactive surface of the estimator: patient attributes come in as
//! flags, one estimate runs, and the report prints to stdout.
//!
//! ```text
//! chargecast --age 52 --bmi 31.2 --sex female --children 2 --smoker yes --region southeast
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chargecast::report::render_report;
use chargecast::{estimate, AppConfig, AppContext, PatientProfile, Region, Sex, Smoker};

#[derive(Debug, Parser)]
#[command(
    name = "chargecast",
    about = "Estimate annual healthcare charges for a patient profile"
)]
struct Args {
    /// Patient age in years (18-100)
    #[arg(long, default_value_t = 30)]
    age: u32,

    /// Body mass index (10.0-50.0)
    #[arg(long, default_value_t = 25.0)]
    bmi: f32,

    /// Sex: male or female
    #[arg(long, default_value = "male")]
    sex: Sex,

    /// Number of children (0-5)
    #[arg(long, default_value_t = 0)]
    children: u32,

    /// Smoker: yes or no
    #[arg(long, default_value = "no")]
    smoker: Smoker,

    /// Region: northeast, northwest, southeast, or southwest
    #[arg(long, default_value = "northeast")]
    region: Region,

    /// Directory holding the model artifacts
    #[arg(long, default_value = "models")]
    models_dir: PathBuf,

    /// Path to the reference dataset CSV
    #[arg(long, default_value = "data/insurance_cleaned.csv")]
    data: PathBuf,

    /// Skip the three-model comparison chart
    #[arg(long)]
    no_compare: bool,
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let profile = PatientProfile::new(
        args.age,
        args.bmi,
        args.sex,
        args.children,
        args.smoker,
        args.region,
    )?;

    let config = AppConfig {
        models_dir: args.models_dir,
        data_path: args.data,
    };
    let ctx = AppContext::load(&config)?;

    let report = estimate(&ctx, &profile)?;
    print!("{}", render_report(&report, !args.no_compare));
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
