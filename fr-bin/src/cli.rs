use bio::io::fasta;
use clap::{value_parser, Parser};
use fr_types::{Cost, Seq};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::ControlFlow,
    path::PathBuf,
};

#[derive(Parser, Serialize, Deserialize)]
#[clap(author, about, disable_version_flag(true))]
pub struct Cli {
    /// A .seq, .txt, or Fasta file with sequence pairs to align.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub input: Option<PathBuf>,

    /// Write a .csv of `{cost},{alignedA},{alignedB}` lines.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub output: Option<PathBuf>,

    /// Block dimension. 0 derives it from the input length.
    #[clap(short, long, default_value_t = 0)]
    pub dimension: usize,

    /// Substitution cost, 1 or 2. Insertions and deletions cost 1.
    #[clap(long, default_value_t = 2)]
    pub sub: Cost,

    /// Alphabet symbols. The padding symbol '-' is reserved.
    #[clap(long, default_value = "ACGT")]
    pub alphabet: String,

    /// Only compute the distance, skip alignment reconstruction.
    #[clap(long)]
    pub no_path: bool,

    /// Print only the summary line.
    #[arg(short, long)]
    pub silent: bool,

    /// Options to generate an input pair when no file is given.
    #[clap(flatten, next_help_heading = "Generated input")]
    pub generate: fr_generate::DatasetGenerator,
}

impl Cli {
    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(Seq, Seq) -> ControlFlow<()>,
    ) -> anyhow::Result<()> {
        if let Some(input) = &self.input {
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                input
                    .read_dir()
                    .map_err(|_| anyhow::anyhow!("{} is not a file or directory", input.display()))?
                    .map(|x| x.map(|e| e.path()))
                    .collect::<Result<Vec<_>, _>>()?
            };

            'outer: for f in files {
                let ext = f
                    .extension()
                    .ok_or_else(|| anyhow::anyhow!("{} has no file extension", f.display()))?;
                match ext {
                    ext if ext == "seq" || ext == "txt" => {
                        let f = BufReader::new(File::open(&f)?);
                        for (a, b) in f.lines().map_ok(|l| l.into_bytes()).tuples() {
                            let (mut a, mut b) = (a?, b?);
                            if ext == "seq" {
                                anyhow::ensure!(a.starts_with(b">") && b.starts_with(b"<"));
                                a.remove(0);
                                b.remove(0);
                            }
                            if let ControlFlow::Break(()) = run_pair(&a, &b) {
                                break 'outer;
                            }
                        }
                    }
                    ext if ext == "fna" || ext == "fa" || ext == "fasta" => {
                        for (a, b) in fasta::Reader::new(BufReader::new(File::open(&f)?))
                            .records()
                            .tuples()
                        {
                            let (a, b) = (a?, b?);
                            if let ControlFlow::Break(()) = run_pair(a.seq(), b.seq()) {
                                break 'outer;
                            }
                        }
                    }
                    ext => anyhow::bail!(
                        "Unknown file extension {ext:?}. Must be in {{seq,txt,fna,fa,fasta}}."
                    ),
                }
            }
        } else {
            // Generate random input.
            let seed = self.generate.seed.unwrap_or_else(|| {
                let seed = ChaCha8Rng::from_entropy().gen_range(0..1_000);
                eprintln!("Seed: {seed}");
                seed
            });
            let rng = &mut ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..self.generate.cnt {
                let (a, b) = self.generate.generate(rng);
                if let ControlFlow::Break(()) = run_pair(&a, &b) {
                    break;
                }
            }
        }
        Ok(())
    }
}
