//! `obumbra coordinates` command

use anyhow::{bail, Result};

use obumbra::core::{Bucket, Implementation};
use obumbra::resolver::templates::coordinates_in;
use obumbra::util::diagnostic::suggestions;

use super::Session;
use crate::cli::CoordinatesArgs;

pub fn execute(session: &Session, args: CoordinatesArgs) -> Result<()> {
    let config = &session.config;
    let Some(platform) = config.platform else {
        bail!("no platform selected\nhelp: {}", suggestions::NO_CONFIG);
    };

    let implementations: Vec<Implementation> = match args.only {
        Some(only) => vec![only],
        None if config.implementations.is_empty() => {
            bail!("no implementation selected\nhelp: {}", suggestions::NO_CONFIG)
        }
        None => config.implementations.clone(),
    };

    let versions = config.versions.to_version_set();
    for (i, implementation) in implementations.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} on {}:", implementation.display_name(), platform.display_name());
        if !implementation.supported_on(platform) {
            println!("  (not supported)");
            continue;
        }
        for bucket in Bucket::ALL {
            for coordinate in coordinates_in(platform, *implementation, &versions, bucket) {
                println!("  {:<14} {}", bucket.as_str(), coordinate);
            }
        }
    }

    Ok(())
}
