// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, built on `clap`.
// All real work is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` — encode/cache both splits, print a summary
//   2. `peek`    — draw batches onto a device, print first rows

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PeekArgs, PrepareArgs};

use crate::application::{
    peek_use_case::PeekUseCase,
    prepare_use_case::PrepareUseCase,
};
use crate::data::placement::Target;
use crate::domain::split::Mode;

#[derive(Parser, Debug)]
#[command(
    name = "seqbatch",
    version,
    about = "Sequential (input, target) token-window batches over a cached, tokenized corpus."
)]
pub struct Cli {
    /// The subcommand to run (prepare or peek)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Peek(args)    => run_peek(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    let cfg = args.data.resolve()?;
    tracing::info!("Preparing dataset '{}' from '{}'", cfg.dataset, cfg.data_dir.display());

    let report = PrepareUseCase::new(cfg).execute()?;

    println!("train tokens:      {}", report.train_tokens);
    println!("val tokens:        {}", report.val_tokens);
    println!("vocab size:        {}", report.vocab_size);
    println!("tokens per batch:  {}", report.tokens_per_batch);
    println!("train batches/cycle: {}", report.train_batches);
    println!("val batches/cycle:   {}", report.val_batches);
    Ok(())
}

fn run_peek(args: PeekArgs) -> Result<()> {
    // reject bad mode/device before any loading happens
    let mode: Mode = args.mode.parse()?;
    let target: Target = args.device.parse()?;
    let cfg = args.data.resolve()?;

    let previews = PeekUseCase::new(cfg, mode, args.count, target).execute()?;

    for (i, p) in previews.iter().enumerate() {
        println!(
            "#{i} @{} shape={:?}\n  x[0] = {:?}\n  y[0] = {:?}",
            p.offset, p.shape, p.first_input, p.first_target
        );
    }
    Ok(())
}
