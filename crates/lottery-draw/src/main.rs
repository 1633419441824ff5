//! lottery-draw: runs the configured draw and prints the winner indices

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lottery_draw::{draw, DrawConfig, DrawError};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DrawConfig::load().context("failed to load draw configuration")?;
    info!(
        participants = config.participants,
        draws = config.draws,
        first_draw = ?config.first_draw,
        "Starting draw"
    );

    let winners = draw(&config.params())?;

    if let Some(published) = &config.published {
        if *published != winners {
            let e = DrawError::PublishedMismatch {
                published: published.clone(),
                computed: winners,
            };
            error!("Draw error: {}", e);
            return Err(e.into());
        }
        info!("Result matches the published list");
    }

    println!("{:?}", winners);
    Ok(())
}
