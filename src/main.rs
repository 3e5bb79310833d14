//! dirmark: bookmark directories and jump between them from the shell.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;

use dirmark::bookmarks::{BookmarkStore, JUMP_EXIT_CODE};
use dirmark::configs::{ConfigManager, Settings};
use dirmark::info;
use dirmark::loggers::LoggerBuilder;

const DATA_DIR_NAME: &str = ".dirmark";

#[derive(Parser)]
#[command(
    name = "dirmark",
    version,
    about = "bookmark directories and jump between them"
)]
struct Cli {
    /// install the shell helper under the given command name
    #[arg(short = 'i', value_name = "NAME")]
    init: Option<String>,

    /// bookmark a directory
    #[arg(short = 'a', value_name = "DIR")]
    add: Option<String>,

    /// remove a bookmark by key
    #[arg(short = 'r', value_name = "KEY")]
    remove: Option<String>,

    /// re-key a bookmark
    #[arg(short = 'c', value_name = "OLD,NEW")]
    rename: Option<String>,

    /// bookmark key to jump to; with no arguments the list is printed
    keys: Vec<String>,
}

fn data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DATA_DIR_NAME),
        None => PathBuf::from(DATA_DIR_NAME),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let data_dir = data_dir();

    let settings = match ConfigManager::load(&data_dir) {
        Ok(manager) => manager.get(),
        Err(e) => {
            eprintln!("load settings err[{e}], using defaults");
            Arc::new(Settings::default())
        }
    };

    let logger = match LoggerBuilder::from_settings(&settings, &data_dir).build() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let store = BookmarkStore::new(&data_dir, logger.clone());

    if let Some(name) = &cli.init {
        if dirmark::shell::init(name, &data_dir, &logger).await.is_err() {
            logger.terminate(1).await;
        }
        let _ = info!(logger, "init ok").await;
        logger.wait().await;
        return;
    }

    if let Some(dir) = &cli.add {
        if store.add(dir).await.is_err() {
            logger.terminate(1).await;
        }
        show_dirs(&store);
        logger.wait().await;
        return;
    }

    if let Some(key) = &cli.remove {
        if store.remove(key).await.is_err() {
            logger.terminate(1).await;
        }
        show_dirs(&store);
        logger.wait().await;
        return;
    }

    if let Some(param) = &cli.rename {
        if store.rename(param).await.is_err() {
            logger.terminate(1).await;
        }
        show_dirs(&store);
        logger.wait().await;
        return;
    }

    // a bare argument is a jump request: print the target and exit with the
    // jump code so the shell helper cds into it
    if let Some(key) = cli.keys.first() {
        match store.get(key).await {
            Ok(dir) => {
                println!("{dir}");
                logger.terminate(JUMP_EXIT_CODE).await;
            }
            Err(_) => logger.terminate(1).await,
        }
    }

    show_dirs(&store);
    logger.wait().await;
}

fn show_dirs(store: &BookmarkStore) {
    let entries = store.list();
    print_green(&format!("total num[{}], below is dir list:\n", entries.len()));
    for (key, dir) in entries {
        print_green(&format!("{key:<10} {dir}\n"));
    }
}

fn print_green(text: &str) {
    print!("{}", text.green().bold());
}
