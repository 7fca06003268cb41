//! CLI module for ip2region-rs
//!
//! This module handles command line argument parsing and query logic.

use crate::config::AppConfig;
use crate::database::{DatabaseManager, LoadMode};
use crate::entity::{formatter, parser};
use crate::error::{RegionError, Result};
use crate::server::{self, AppState};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "ip2region-rs")]
#[command(version, about = "Offline IPv4 region lookup over ip2region databases")]
#[command(long_about = "ip2region-rs resolves IPv4 addresses to country, region, province, city and ISP\n\
    using a local ip2region.db file.\n\n\
    Addresses can be given as arguments, piped in as text, typed interactively,\n\
    or queried over HTTP with --serve.\n\n\
    Queries must be strict dotted quads such as 1.2.3.4 to be resolved\n\
    directly; anything else (1.x.3.4, 1.2.3) is treated as text and only the\n\
    addresses found inside it are annotated. The HTTP endpoint accepts the\n\
    lenient form, where a non-numeric component counts as 0.\n\n\
    Examples:\n  \
    $ ip2region-rs 202.102.9.110\n  \
    $ echo \"Server IP: 8.8.8.8\" | ip2region-rs\n  \
    $ ip2region-rs --json 1.2.3.4\n  \
    $ ip2region-rs --serve --listen 127.0.0.1:8080\n  \
    $ curl 'http://127.0.0.1:8080/?ip=202.102.9.110'")]
pub struct Cli {
    /// IP addresses or text to annotate (read from stdin when omitted)
    #[arg(value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Output JSON
    #[arg(short, long)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the ip2region.db file
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Memory-map the database instead of reading it onto the heap
    #[arg(long)]
    pub mmap: bool,

    /// Run the HTTP query server
    #[arg(long)]
    pub serve: bool,

    /// Listen address for --serve
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,
}

impl Cli {
    pub async fn run(&self, mut config: AppConfig) -> Result<()> {
        self.apply_to(&mut config);

        let db_manager = DatabaseManager::open(&config)?;

        if self.serve {
            let state = AppState::new(
                Arc::new(db_manager),
                Duration::from_secs(config.server.request_timeout_secs),
            );
            return server::serve(state, &config.server).await;
        }

        if !self.queries.is_empty() {
            self.process_queries_from_args(&db_manager, &config)
        } else {
            self.process_queries_from_stdin(&db_manager, &config)
        }
    }

    /// Apply CLI options to config
    fn apply_to(&self, config: &mut AppConfig) {
        if self.json {
            config.output.json = true;
        }
        if self.verbose {
            config.global.verbose = true;
        }
        if let Some(ref db) = self.db {
            config.database.path = Some(db.clone());
        }
        if self.mmap {
            config.database.load_mode = LoadMode::Mmap;
        }
        if let Some(ref listen) = self.listen {
            config.server.listen = listen.clone();
        }
    }

    /// Process queries from command line arguments
    fn process_queries_from_args(&self, db_manager: &DatabaseManager, config: &AppConfig) -> Result<()> {
        for query in &self.queries {
            if let Ok(ip) = query.parse::<Ipv4Addr>() {
                println!("{}", render_query(ip, db_manager, config)?);
            } else {
                // Treat as text that may contain addresses
                println!("{}", process_line(query, db_manager, config)?);
            }
        }
        Ok(())
    }

    /// Process queries from stdin (pipe or interactive mode)
    fn process_queries_from_stdin(&self, db_manager: &DatabaseManager, config: &AppConfig) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        if atty::is(atty::Stream::Stdin) {
            println!("ip2region-rs interactive mode (type quit or Ctrl+D to exit)");

            for line in stdin.lock().lines() {
                let line = line?;
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }

                if trimmed == "quit" || trimmed == "exit" {
                    break;
                }

                let result = match trimmed.parse::<Ipv4Addr>() {
                    Ok(ip) => render_query(ip, db_manager, config)?,
                    Err(_) => process_line(trimmed, db_manager, config)?,
                };
                println!("{}", result);
                stdout.flush()?;
            }
        } else {
            // Pipe mode keeps every input line, annotated in place
            for line in stdin.lock().lines() {
                let line = line?;
                writeln!(stdout, "{}", process_line(&line, db_manager, config)?)?;
            }
            stdout.flush()?;
        }

        Ok(())
    }
}

/// Resolve a single address into one output line
pub fn render_query(ip: Ipv4Addr, db_manager: &DatabaseManager, config: &AppConfig) -> Result<String> {
    match db_manager.query_ip(ip) {
        Ok(record) => {
            if config.output.json {
                Ok(serde_json::to_string_pretty(&record)?)
            } else {
                Ok(format!("{} -> {}", ip, formatter::format_region_compact(&record)))
            }
        }
        Err(RegionError::NotFound(_)) => Ok(format!("{} -> [Not found]", ip)),
        Err(e) => Err(e),
    }
}

/// Annotate every IPv4 address in a line of text
pub fn process_line(line: &str, db_manager: &DatabaseManager, config: &AppConfig) -> Result<String> {
    let mut entities = parser::parse_line(line);

    for entity in &mut entities.entities {
        if let Some(ip) = entity.as_ip() {
            match db_manager.query_ip(ip) {
                Ok(record) => entity.region = Some(record),
                Err(e) if e.is_not_found() => log::debug!("{} {}", ip, e),
                Err(e) => return Err(e),
            }
        }
    }

    let complete = parser::build_complete_entities(line, entities);

    if config.output.json {
        Ok(formatter::format_json(&complete)?)
    } else {
        Ok(formatter::format_text(&complete, config.output.enable_colors))
    }
}
