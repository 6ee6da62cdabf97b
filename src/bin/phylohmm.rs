use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use phylohmm::{
    cli,
    config::PipelineConfig,
    io::{alphas, exons, fasta, tree::read_tree},
    likelihood::alpha_of_index,
    prelude::*,
};
use std::convert::TryFrom;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Opts {
    /// JSON file with pipeline settings
    #[clap(long)]
    config: Option<PathBuf>,
    /// Edge list of the tree, `name parent branch_length` per line
    #[clap(short, long)]
    tree: PathBuf,
    /// Name of the root node
    #[clap(long)]
    root: Option<String>,
    /// Evaluate windows on a single thread
    #[clap(long)]
    serial: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Likelihood of a column showing the same base at every leaf
    Likelihood {
        #[clap(short, long, default_value = "A")]
        base: char,
        #[clap(short, long, default_values = &["1000000000", "1.0", "0.2", "0.0"])]
        alphas: Vec<f64>,
    },
    /// Best alpha of each window of the alignment
    Scan {
        #[clap(short, long)]
        alignment: PathBuf,
        #[clap(short, long)]
        window: Option<usize>,
        /// Number of windows listed
        #[clap(short = 'n', long, default_value_t = 10)]
        show: usize,
    },
    /// Frequencies of best alphas in windows with and without exons
    Histogram {
        #[clap(short, long)]
        alignment: PathBuf,
        /// 1-based inclusive `start end` pairs on the reference
        #[clap(short, long)]
        exons: PathBuf,
        #[clap(short, long)]
        reference: Option<String>,
        #[clap(short, long)]
        window: Option<usize>,
    },
    /// Discretized best alphas of the reference gap-free windows, written to a file
    Alphas {
        #[clap(short, long)]
        alignment: PathBuf,
        #[clap(short, long)]
        output: PathBuf,
        #[clap(short, long)]
        reference: Option<String>,
        #[clap(short, long)]
        window: Option<usize>,
    },
    /// Train the exon HMM on the leading windows and evaluate it on the rest
    Segment {
        /// Discretized alphas written by `alphas`
        #[clap(long)]
        alphas: PathBuf,
        #[clap(short, long)]
        exons: PathBuf,
        #[clap(short, long)]
        window: Option<usize>,
        #[clap(long)]
        train_fraction: Option<f64>,
        /// Dump the trained parameters as JSON
        #[clap(long)]
        dump_params: Option<PathBuf>,
    },
}

fn load_config(opts: &Opts) -> anyhow::Result<PipelineConfig> {
    let mut config = match &opts.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(root) = &opts.root {
        config.root = root.clone();
    }
    if opts.serial {
        config.parallel = false;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    let start = chrono::Local::now();
    info!("started at {}", start);
    let mut config = load_config(&opts)?;

    let tree = read_tree(&opts.tree, &config.root)
        .with_context(|| format!("loading tree {}", opts.tree.display()))?;
    info!("tree with {} nodes ({} leaves)", tree.size(), tree.n_leaves());

    match &opts.command {
        Command::Likelihood { base, alphas } => {
            let base = u8::try_from(*base).context("base must be an ascii character")?;
            for (alpha, p) in cli::uniform_column_likelihoods(&tree, base, alphas)? {
                println!("alpha = {}\tPr = {}", alpha, p);
            }
        }
        Command::Scan {
            alignment,
            window,
            show,
        } => {
            if let Some(w) = window {
                config.scan_window = *w;
            }
            config.validate()?;
            let alignment = fasta::read_alignment(alignment)?;
            let best = cli::scan(&alignment, &tree, &config)?;
            println!("window\tbest alpha\tlog likelihood");
            for (i, b) in best.iter().take(*show).enumerate() {
                println!("{}\t{:.1}\t{}", i + 1, b.alpha, b.likelihood.to_log_value());
            }
        }
        Command::Histogram {
            alignment,
            exons: exons_path,
            reference,
            window,
        } => {
            if let Some(w) = window {
                config.scan_window = *w;
            }
            if let Some(r) = reference {
                config.reference = r.clone();
            }
            config.validate()?;
            let alignment = fasta::read_alignment(alignment)?;
            let exons = exons::read_exons(exons_path)
                .with_context(|| format!("loading exons {}", exons_path.display()))?;
            let hist = cli::histogram(&alignment, &tree, &exons, &config)?;
            print!("{}", hist);
        }
        Command::Alphas {
            alignment,
            output,
            reference,
            window,
        } => {
            if let Some(w) = window {
                config.hmm_window = *w;
            }
            if let Some(r) = reference {
                config.reference = r.clone();
            }
            config.validate()?;
            let alignment = fasta::read_alignment(alignment)?;
            let indices = cli::compute_alphas(&alignment, &tree, &config)?;
            alphas::save_alphas(output, &indices)
                .with_context(|| format!("writing alphas {}", output.display()))?;
            let mean =
                indices.iter().map(|&a| alpha_of_index(a)).sum::<f64>() / indices.len() as f64;
            info!("wrote {} alphas (mean {:.3})", indices.len(), mean);
        }
        Command::Segment {
            alphas: alphas_path,
            exons: exons_path,
            window,
            train_fraction,
            dump_params,
        } => {
            if let Some(w) = window {
                config.hmm_window = *w;
            }
            if let Some(f) = train_fraction {
                config.train_fraction = *f;
            }
            let indices = alphas::read_alphas(alphas_path)
                .with_context(|| format!("loading alphas {}", alphas_path.display()))?;
            let exons = exons::read_exons(exons_path)
                .with_context(|| format!("loading exons {}", exons_path.display()))?;
            let seg = cli::segment(&indices, &exons, &config)?;
            println!("HMM: window={}", config.hmm_window);
            println!("{}", seg.params);
            println!(
                "trained on {} windows, tested on {}",
                seg.n_train, seg.n_test
            );
            println!("{}", seg.evaluation);
            if let Some(path) = dump_params {
                let params: &HMMParams = &seg.params;
                let json = serde_json::to_string_pretty(params)?;
                phylohmm::io::write_string(&path.to_string_lossy(), &json)?;
            }
        }
    }

    let end = chrono::Local::now();
    info!(
        "finished at {} ({})",
        end,
        end.signed_duration_since(start)
    );
    Ok(())
}
