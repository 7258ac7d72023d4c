#![forbid(unsafe_code)]

use plateful_storage::SqliteStore;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Opens (or creates) the store and loads the reference catalog:
/// quiz questions, taste profiles, achievements and the meal library.
fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plateful_setup=info,plateful_storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let storage_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let mut store = match SqliteStore::open(&storage_dir) {
        Ok(store) => store,
        Err(err) => {
            error!(dir = %storage_dir.display(), "failed to open store: {err}");
            std::process::exit(1);
        }
    };

    match store.seed_reference_data() {
        Ok(summary) => {
            info!(
                dir = %store.storage_dir().display(),
                questions = summary.questions,
                profiles = summary.profiles,
                achievements = summary.achievements,
                meals = summary.meals,
                "catalog ready"
            );
        }
        Err(err) => {
            error!("seeding failed: {err}");
            std::process::exit(1);
        }
    }
}
