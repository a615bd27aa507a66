//! CLI command implementations.
//!
//! Each `run_*` function backs one `nameinfo` subcommand. They open the
//! SQLite cache, drive a [`ViewController`] the same way an interactive
//! front-end would, and print to stdout (JSON with `--json`).

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::config::{parse_country, Config};
use crate::controller::{Resolution, ViewController};
use crate::locale;
use crate::lookup::HttpLookupClient;
use crate::normalize::normalize;
use crate::render;
use crate::store::{NameStore, SqliteNameStore};

/// Wire a controller to the configured cache and the HTTP services.
pub async fn open_controller(
    config: &Config,
    country: Option<String>,
) -> Result<(ViewController, Arc<SqliteNameStore>)> {
    let store = Arc::new(SqliteNameStore::open(config).await?);
    let client = Arc::new(HttpLookupClient::new(&config.lookup)?);
    let hint = match country {
        Some(c) => Some(parse_country(&c)?),
        None => locale::country_hint(&config.lookup),
    };
    tracing::debug!(country = ?hint, "country hint");

    let controller = ViewController::new(store.clone(), client, hint);
    Ok((controller, store))
}

/// `nameinfo lookup <name>`
pub async fn run_lookup(
    config: &Config,
    name: &str,
    country: Option<String>,
    refresh: bool,
    json: bool,
) -> Result<()> {
    let (controller, store) = open_controller(config, country).await?;
    controller.set_input_name(name);

    let outcome = if refresh {
        controller.refresh().await
    } else {
        controller.submit().await
    };
    store.close().await;

    let resolution = outcome?;
    let record = controller.displayed_record();

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!(
            "{}",
            render::render_record(&record, &config.display, render::use_color())
        );
        if resolution == Resolution::Cached {
            eprintln!("(cached; use --refresh to query again)");
        }
    }
    Ok(())
}

/// `nameinfo recent`
pub async fn run_recent(config: &Config, limit: Option<usize>, json: bool) -> Result<()> {
    let store = SqliteNameStore::open(config).await?;
    let mut records = store.get_all().await?;
    store.close().await;

    if let Some(limit) = limit {
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
    }

    if json {
        let newest_first: Vec<_> = records.iter().rev().collect();
        println!("{}", serde_json::to_string_pretty(&newest_first)?);
    } else {
        print!("{}", render::render_recents(&records, render::use_color()));
    }
    Ok(())
}

/// `nameinfo show <name>`: display a cached record without any network call.
pub async fn run_show(config: &Config, name: &str, json: bool) -> Result<()> {
    let key = normalize(name);
    let (controller, store) = open_controller(config, None).await?;
    let found = controller.recents().into_iter().find(|r| r.name == key);
    store.close().await;

    let record = match found {
        Some(r) => r,
        None => bail!("'{}' is not in the cache", key),
    };
    controller.select_recent(&record);
    let record = controller.displayed_record();

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!(
            "{}",
            render::render_record(&record, &config.display, render::use_color())
        );
    }
    Ok(())
}

/// `nameinfo forget <name>`
pub async fn run_forget(config: &Config, name: &str) -> Result<()> {
    let (controller, store) = open_controller(config, None).await?;
    let removed = controller.forget(name).await;
    store.close().await;

    if removed? {
        println!("Removed '{}'.", normalize(name));
    } else {
        println!("'{}' was not cached.", normalize(name));
    }
    Ok(())
}
