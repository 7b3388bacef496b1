mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use fr_core::FourRussians;
use fr_types::{Aligner, Alphabet, Cost, CostModel, Seq};
use std::{io::Write, ops::ControlFlow, time::Instant};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let alphabet = Alphabet::new(args.alphabet.as_bytes(), b'-')
        .context("invalid alphabet")?;
    let costs = CostModel::new(args.sub, 1, 1).context("invalid cost model")?;
    let mut aligner = FourRussians::new(args.dimension, costs);
    aligner.alphabet = alphabet;
    aligner.trace = !args.no_path;

    let mut out = args
        .output
        .as_ref()
        .map(std::fs::File::create)
        .transpose()
        .context("cannot create output file")?;

    let mut pairs = 0usize;
    let mut total_cost: Cost = 0;
    let start = Instant::now();

    args.process_input_pairs(|a: Seq, b: Seq| {
        let (cost, alignment) = aligner.align(a, b);
        pairs += 1;
        total_cost += cost;

        if !args.silent {
            match &alignment {
                Some((a_aligned, b_aligned)) => println!(
                    "{cost}\n{}\n{}",
                    fr_types::seq_to_string(a_aligned),
                    fr_types::seq_to_string(b_aligned)
                ),
                None => println!("{cost}"),
            }
        }
        if let Some(out) = &mut out {
            let (a_aligned, b_aligned) = alignment.unwrap_or_default();
            writeln!(
                out,
                "{cost},{},{}",
                fr_types::seq_to_string(&a_aligned),
                fr_types::seq_to_string(&b_aligned)
            )
            .unwrap();
        }
        ControlFlow::Continue(())
    })?;

    log::info!(
        "aligned {pairs} pair(s), total cost {total_cost}, in {:.3?}",
        start.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    #[test]
    fn cli_test() {
        <super::Cli as clap::CommandFactory>::command().debug_assert();
    }
}
