//! # Batch Recommendations
//!
//! Offline run of the recommender over a synthetic roster, handy for eyeballing
//! how the threshold and list length play together.
//!
//! ## Steps
//! 1. Generate `user1..userN`, each with distinct interests drawn from [`models::INTEREST_POOL`].
//!
//! 2. Write them to the data file through the same CSV store the server uses, replacing
//!    whatever was there.
//!
//! 3. Read the roster back and rank peers per user. Only users sharing at least one
//!    interest are considered, anything under the threshold is dropped, best `top_n` kept.
//!
//! 4. Save the result as pretty JSON, `user -> [[peer, similarity], ...]`.
//!
//! ## Notes
//! - Reading back from the file instead of using the generated list directly means the
//!   run also exercises the store round trip.
use std::fs;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use roster::{Recommendations, Recommender, Store};
use tracing::info;

pub mod models;
pub mod utils;

use models::Batch;
use utils::generate_users;

pub fn run(batch: &Batch) -> Result<Recommendations> {
    let users = generate_users(batch.users, batch.interests_per_user, &mut rand::thread_rng());

    let store = Store::new(&batch.data);
    store.reset()?;
    for user in &users {
        store.append(user)?;
    }
    info!(
        "Generated synthetic data for {} users with {} interests each",
        users.len(),
        batch.interests_per_user
    );

    let recommender = Recommender::new(&store.load_users()?);
    let recommendations = rank(&recommender, batch.threshold, batch.top_n)?;

    fs::write(&batch.output, serde_json::to_string_pretty(&recommendations)?)
        .with_context(|| format!("write {}", batch.output.display()))?;
    info!("Recommendations saved to {}", batch.output.display());

    Ok(recommendations)
}

fn rank(recommender: &Recommender, threshold: f64, top_n: usize) -> Result<Recommendations> {
    let pb = ProgressBar::new(recommender.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    let mut recommendations = Recommendations::new();
    for name in recommender.names() {
        pb.set_message(format!("Ranking {name}"));

        recommendations.insert(
            name.to_string(),
            recommender.recommend_for(name, threshold, top_n),
        );

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    Ok(recommendations)
}
