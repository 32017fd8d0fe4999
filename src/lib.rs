use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod cli;
pub mod s3;
pub mod upload;

#[macro_use]
extern crate tracing;

pub fn setup() {
    if cfg!(debug_assertions) {
        for (key, value) in &[
            ("RUST_SPANTRACE", "full"),
            ("RUST_LIB_BACKTRACE", "full"),
            ("RUST_BACKTRACE", "full"),
            ("RUST_LOG", "info"),
        ] {
            if std::env::var(key).is_err() {
                //safety: runs before the tokio runtime spawns any threads
                unsafe { std::env::set_var(key, value) };
            }
        }
    }

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Error finding env vars: {e:?}");
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    color_eyre::install().expect("unable to install color-eyre");
}
