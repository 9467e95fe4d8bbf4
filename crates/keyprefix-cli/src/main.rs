#![doc = include_str!("../README.md")]

mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::{Context, anyhow};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use clap::Parser;
use keyprefix::KeyGenerator;
use rand::Rng;
use tracing::{debug, info};

use crate::config::{CliArgs, LoadConfig};

type Sink = Mutex<BufWriter<Box<dyn Write + Send>>>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let config = LoadConfig::try_from(args)?;
    run(&config)
}

fn run(config: &LoadConfig) -> anyhow::Result<()> {
    let generator = KeyGenerator::new(config.prefix_bits)?;
    let dates: Vec<NaiveDate> = config
        .start
        .iter_days()
        .take_while(|d| *d <= config.finish)
        .collect();

    let sink: Box<dyn Write + Send> = match &config.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let writer = Mutex::new(BufWriter::new(sink));
    let completed = AtomicU64::new(0);

    info!(
        days = dates.len(),
        threads = config.threads,
        prefix_bits = config.prefix_bits,
        "fill started"
    );
    let started = Instant::now();

    let results: Vec<anyhow::Result<()>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..config.threads)
            .map(|worker| {
                let generator = &generator;
                let writer = &writer;
                let completed = &completed;
                let dates = &dates;
                scope.spawn(move || -> anyhow::Result<()> {
                    // Dates are dealt round-robin; a worker owns each of
                    // its dates end to end.
                    for date in dates.iter().skip(worker).step_by(config.threads) {
                        fill_date(config, generator, writer, *date, completed)?;
                    }
                    Ok(())
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(anyhow!("worker thread panicked")))
            })
            .collect()
    });
    for result in results {
        result?;
    }

    let mut inner = writer
        .into_inner()
        .map_err(|_| anyhow!("output writer poisoned"))?;
    inner.flush()?;

    let batches = completed.load(Ordering::Relaxed);
    info!(
        batches,
        rows = batches * config.rows_per_batch,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fill finished"
    );
    Ok(())
}

fn fill_date(
    config: &LoadConfig,
    generator: &KeyGenerator,
    writer: &Sink,
    date: NaiveDate,
    completed: &AtomicU64,
) -> anyhow::Result<()> {
    debug!(%date, "filling date");
    let mut chunk = String::new();
    for _ in 0..config.batches_per_date {
        chunk.clear();
        // One shared prefix per batch keeps the batch in one partition
        // range.
        let prefix = generator.next_prefix();
        for _ in 0..config.rows_per_batch {
            write_row(&mut chunk, generator, prefix, date, config.keys_only)?;
        }
        let mut sink = writer
            .lock()
            .map_err(|_| anyhow!("output writer poisoned"))?;
        sink.write_all(chunk.as_bytes())?;
        drop(sink);
        completed.fetch_add(1, Ordering::Relaxed);
    }
    debug!(%date, "completed date");
    Ok(())
}

/// Appends one generated row: three related keys sharing the batch prefix,
/// plus a timestamp inside the covered day.
fn write_row(
    out: &mut String,
    generator: &KeyGenerator,
    prefix: u64,
    date: NaiveDate,
    keys_only: bool,
) -> anyhow::Result<()> {
    use std::fmt::Write as _;

    let main_id = generator.next_key_on(prefix, date);
    if keys_only {
        writeln!(out, "{main_id}")?;
        return Ok(());
    }
    let sub_id = generator.next_key_on(prefix, date);
    let ref_id = generator.next_key_on(prefix, date);
    let seconds = rand::rng().random_range(0..86_400);
    let tv = date.and_time(NaiveTime::MIN) + TimeDelta::seconds(seconds);
    writeln!(out, "{main_id}\t{sub_id}\t{ref_id}\t{tv}")?;
    Ok(())
}
