//! Binary entrypoint: read one JSON record from stdin, write its score to stdout.

use std::io::{self, Read, Write};
use stress_model::{Record, ScoreOutput, StressModel};

fn main() {
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "stress-model error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let record: Record = serde_json::from_str(&raw)?;

  let out = ScoreOutput {
    score: StressModel::default().predict(&record),
  };
  let json = serde_json::to_vec(&out)?;
  io::stdout().write_all(&json)?;
  Ok(())
}
