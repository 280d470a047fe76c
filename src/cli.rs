//! Command-line driver for inclusion queries over automaton files.
//!
//! The binary parses two automaton files against a shared symbol table and
//! decides `L(A) ⊆ L(B)`. When the files declare no independence pairs the
//! classical engine answers exactly; otherwise the bounded engine runs with
//! the spurious-trace protocol: a counter-example found under the bound is
//! re-checked as a single-word automaton, and the bound is raised until the
//! answer is definitive or [`MAX_BOUND`] is reached.

use crate::automaton::{ExplicitAutomaton, SymbolId, SymbolTable, WordAutomaton};
use crate::dot::write_dot;
use crate::format::parse_automaton;
use crate::inclusion::{BoundedInclusion, ClassicalInclusion, InclusionResult};
use crate::independence::IndependentPairs;
use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Bound the independence engine starts from; 1 or 2 is usually a good start.
pub const INITIAL_BOUND: usize = 2;

/// Give up raising the bound past this point. The bounded check may diverge
/// in general, so the loop needs some cut-off.
pub const MAX_BOUND: usize = 10;

/// Decide language inclusion between two automaton files.
#[derive(Debug, Parser)]
#[command(name = "libinclusion")]
#[command(about = "Check language inclusion between two finite automata")]
#[command(version)]
pub struct Cli {
    /// File with the automaton whose language is tested for inclusion (A)
    pub file_a: PathBuf,

    /// File with the automaton tested against (B)
    pub file_b: PathBuf,

    /// Write DOT renderings of the parsed automata into this directory
    #[arg(long, value_name = "DIR")]
    pub emit_dot: Option<PathBuf>,
}

/// Execute the query described by the parsed arguments.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let source_a = fs::read_to_string(&cli.file_a)
        .with_context(|| format!("reading {}", cli.file_a.display()))?;
    let source_b = fs::read_to_string(&cli.file_b)
        .with_context(|| format!("reading {}", cli.file_b.display()))?;

    let mut table = SymbolTable::new();
    let a = parse_automaton(&source_a, &mut table)
        .with_context(|| format!("parsing {}", cli.file_a.display()))?;
    let b = parse_automaton(&source_b, &mut table)
        .with_context(|| format!("parsing {}", cli.file_b.display()))?;

    if let Some(directory) = &cli.emit_dot {
        emit_dot(directory, &a, &table)?;
        emit_dot(directory, &b, &table)?;
    }

    println!("Language inclusion check...");
    let start = Instant::now();
    let result = decide(&a, &b, &table)?;
    render(&result, &table);
    println!("TIME: {:.3} s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Decide `L(a) ⊆ L(b)` with the engine the declared relation calls for.
pub fn decide(
    a: &ExplicitAutomaton,
    b: &ExplicitAutomaton,
    table: &SymbolTable,
) -> anyhow::Result<InclusionResult<SymbolId>> {
    if table.independence_is_empty() {
        info!("no independence pairs declared, using the classical engine");
        let mut engine = ClassicalInclusion::new(a, b)?;
        return Ok(engine.run());
    }

    let independence = table.independence();
    let mut engine = BoundedInclusion::with_bound(a, b, INITIAL_BOUND, independence.clone())?;
    while engine.bound() < MAX_BOUND {
        let result = engine.run();
        // positive verdicts and unbounded negatives are always definitive
        if result.included || !result.bound_hit {
            return Ok(result);
        }

        info!(
            bound = result.max_bound,
            length = result.counter_example.len(),
            "bound hit, re-checking candidate counter-example"
        );
        if !accepted_modulo(&result.counter_example, b, &independence)? {
            return Ok(result);
        }
        engine.increase_bound(engine.bound() + 1)?;
    }
    bail!("no definitive answer up to bound {MAX_BOUND}")
}

/// Whether B accepts `word` modulo the independence relation.
///
/// The word is replayed as a single-word automaton with the bound at the
/// word's length, which that run can never exceed, so its verdict is exact.
fn accepted_modulo(
    word: &[SymbolId],
    b: &ExplicitAutomaton,
    independence: &IndependentPairs<SymbolId>,
) -> anyhow::Result<bool> {
    let candidate = WordAutomaton::new(word.to_vec());
    let bound = candidate.len();
    let mut check = BoundedInclusion::with_bound(candidate, b, bound, independence.clone())?;
    let verdict = check.run();
    debug_assert!(!verdict.bound_hit);
    Ok(verdict.included)
}

fn render(result: &InclusionResult<SymbolId>, table: &SymbolTable) {
    if result.included {
        println!("{}", "Included".green().bold());
    } else {
        let verdict = if result.bound_hit {
            format!("Not Included; bound {}", result.max_bound)
        } else {
            "Not Included".to_owned()
        };
        println!("{}", verdict.red().bold());
        for symbol in &result.counter_example {
            println!("{}", table.name(*symbol));
        }
    }
}

fn emit_dot(
    directory: &Path,
    automaton: &ExplicitAutomaton,
    table: &SymbolTable,
) -> anyhow::Result<()> {
    fs::create_dir_all(directory)
        .with_context(|| format!("creating {}", directory.display()))?;
    let path = directory.join(format!("{}.dot", automaton.name()));
    let mut file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_dot(
        automaton,
        &mut file,
        |state| automaton.state_name(*state).to_owned(),
        |symbol| table.name(*symbol).to_owned(),
    )
    .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "wrote DOT rendering");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(table: &mut SymbolTable, input: &str) -> ExplicitAutomaton {
        parse_automaton(input, table).unwrap()
    }

    #[test]
    fn decide_uses_classical_engine_without_independence() {
        let mut table = SymbolTable::new();
        let a = parse(
            &mut table,
            "Ops a:2\nAutomaton A\nStates q0\nFinal States q0\nTransitions\ninit -> q0\na(q0) -> q0\n",
        );
        let b = parse(
            &mut table,
            "Ops a:2\nAutomaton B\nStates r0\nFinal States r0\nTransitions\ninit -> r0\na(r0) -> r0\n",
        );
        let result = decide(&a, &b, &table).unwrap();
        assert!(result.included);
        assert_eq!(result.max_bound, 0);
    }

    #[test]
    fn decide_resolves_commutation_with_bound_raises() {
        // A reads aaabbb, B reads bbbaaa; fully independent letters, so the
        // languages agree modulo commutation, but matching them needs stack
        // depth 3 while the initial bound is 2.
        let mut table = SymbolTable::new();
        let a = parse(
            &mut table,
            "Ops a:2 b:2\nIndependence (a b)\nAutomaton A\nStates q0 q1 q2 q3 q4 q5 q6\nFinal States q6\nTransitions\ninit -> q0\na(q0) -> q1\na(q1) -> q2\na(q2) -> q3\nb(q3) -> q4\nb(q4) -> q5\nb(q5) -> q6\n",
        );
        let b = parse(
            &mut table,
            "Ops a:2 b:2\nAutomaton B\nStates r0 r1 r2 r3 r4 r5 r6\nFinal States r6\nTransitions\ninit -> r0\nb(r0) -> r1\nb(r1) -> r2\nb(r2) -> r3\na(r3) -> r4\na(r4) -> r5\na(r5) -> r6\n",
        );
        let result = decide(&a, &b, &table).unwrap();
        assert!(result.included);
    }

    #[test]
    fn decide_reports_real_counter_example_under_independence() {
        let mut table = SymbolTable::new();
        let a = parse(
            &mut table,
            "Ops a:2 b:2 c:2\nIndependence (a b)\nAutomaton A\nStates q0 q1\nFinal States q1\nTransitions\ninit -> q0\nc(q0) -> q1\n",
        );
        let b = parse(
            &mut table,
            "Ops a:2 b:2 c:2\nAutomaton B\nStates r0 r1\nFinal States r1\nTransitions\ninit -> r0\na(r0) -> r1\n",
        );
        let result = decide(&a, &b, &table).unwrap();
        assert!(!result.included);
        let c = table.find("c").unwrap();
        assert_eq!(result.counter_example, vec![c]);
    }
}
