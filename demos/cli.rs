//! Read a linear program from stdin and print its optimal vertex.
//!
//! The first line is the objective and every other non-blank line is a
//! constraint:
//!
//! ```text
//! $ printf '3x + 5y\nx <= 4\n2y <= 12\n3x + 2y <= 18\nx >= 0\ny >= 0\n' \
//!     | RUST_LOG=debug cargo run --example cli
//! ```

use planar_lp::LinearProgram;
use std::io::{BufRead, BufReader};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    let mut lines = Vec::new();

    for line in BufReader::new(stdin.lock()).lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }

    let (objective, constraints) = match lines.split_first() {
        Some(pair) => pair,
        None => return Err("Expected an objective on the first line".into()),
    };

    let program = LinearProgram::from_text(objective, constraints)?;

    println!("Maximising {}", program.objective());
    println!("Subject to:");
    for constraint in &program {
        println!("  {}", constraint);
    }

    let solution = program.solve()?;

    println!("Feasible vertices:");
    for vertex in &solution.vertices {
        println!("  ({:.2}, {:.2})", vertex.x + 0.0, vertex.y + 0.0);
    }

    println!("{}", solution);

    Ok(())
}
