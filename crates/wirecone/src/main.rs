//! Entry point for the wirecone one-shot primitive viewer: initialises
//! tracing, then hands control to `run.rs`, which drives the linear
//! generate → render → export sequence.

mod defaults;
mod paths;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    run::initialise_tracing();
    run::run()
}
