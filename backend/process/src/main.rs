use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use clap::Parser;
use process::{models::Batch, utils::format_report};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value_t = 10)]
    users: usize,

    #[arg(long, default_value_t = 10)]
    interests_per_user: usize,

    #[arg(long, default_value_t = 0.3)]
    threshold: f64,

    #[arg(long, default_value_t = 3)]
    top_n: usize,

    #[arg(long, default_value = "users_large.csv")]
    data: PathBuf,

    #[arg(long, default_value = "recommendations_large.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let batch = Batch {
        users: args.users,
        interests_per_user: args.interests_per_user,
        threshold: args.threshold,
        top_n: args.top_n,
        data: args.data,
        output: args.output,
    };

    let start = Instant::now();
    let recommendations = process::run(&batch)?;

    println!("Execution time: {:.2} seconds", start.elapsed().as_secs_f64());
    print!("{}", format_report(&recommendations));

    Ok(())
}
