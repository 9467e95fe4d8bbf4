use std::path::PathBuf;

use anyhow::bail;
use chrono::NaiveDate;
use clap::Parser;
use keyprefix::DEFAULT_PREFIX_BITS;

/// Runtime configuration for the `keyprefix-cli` binary.
///
/// These settings control the shape and volume of generated rows. All values
/// are parsed from CLI arguments or environment variables, with defaults
/// matching a small local run.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "keyprefix-cli",
    version,
    about = "Bulk generator for partition-prefixed text keys"
)]
pub struct CliArgs {
    /// Number of prefix bits embedded in each key.
    ///
    /// Controls how many partition ranges the keys spread across (2^bits).
    /// The default of 12 suits tables with up to 4k partitions.
    ///
    /// Environment variable: `PREFIX_BITS`
    #[arg(long, env = "PREFIX_BITS", default_value_t = DEFAULT_PREFIX_BITS)]
    pub prefix_bits: u32,

    /// First date to generate rows for, inclusive (e.g. 2024-01-01).
    ///
    /// Environment variable: `GEN_START`
    #[arg(long, env = "GEN_START")]
    pub start: NaiveDate,

    /// Last date to generate rows for, inclusive.
    ///
    /// Environment variable: `GEN_FINISH`
    #[arg(long, env = "GEN_FINISH")]
    pub finish: NaiveDate,

    /// Batches generated per date. Each batch draws one shared prefix, so
    /// its rows land in one partition range.
    ///
    /// Environment variable: `GEN_SCALE`
    #[arg(long, env = "GEN_SCALE", default_value_t = 100)]
    pub batches_per_date: u64,

    /// Rows per batch.
    ///
    /// Environment variable: `GEN_BATCH_ROWS`
    #[arg(long, env = "GEN_BATCH_ROWS", default_value_t = 200)]
    pub rows_per_batch: u64,

    /// Worker threads. Dates are dealt round-robin, one worker owning a
    /// date end to end.
    ///
    /// Environment variable: `GEN_THREADS`
    #[arg(long, env = "GEN_THREADS", default_value_t = 4)]
    pub threads: usize,

    /// Output file. Rows go to stdout when omitted.
    ///
    /// Environment variable: `GEN_OUTPUT`
    #[arg(long, env = "GEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Emit bare keys, one per line, instead of full rows.
    #[arg(long, default_value_t = false)]
    pub keys_only: bool,
}

/// Validated configuration derived from [`CliArgs`].
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub prefix_bits: u32,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub batches_per_date: u64,
    pub rows_per_batch: u64,
    pub threads: usize,
    pub output: Option<PathBuf>,
    pub keys_only: bool,
}

impl TryFrom<CliArgs> for LoadConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.threads == 0 {
            bail!("GEN_THREADS must be greater than 0");
        }
        if args.batches_per_date == 0 || args.rows_per_batch == 0 {
            bail!("GEN_SCALE and GEN_BATCH_ROWS must be greater than 0");
        }
        if args.finish < args.start {
            bail!(
                "GEN_FINISH ({}) precedes GEN_START ({})",
                args.finish,
                args.start
            );
        }

        Ok(Self {
            prefix_bits: args.prefix_bits,
            start: args.start,
            finish: args.finish,
            batches_per_date: args.batches_per_date,
            rows_per_batch: args.rows_per_batch,
            threads: args.threads,
            output: args.output,
            keys_only: args.keys_only,
        })
    }
}
