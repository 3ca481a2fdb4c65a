use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use scwalk::api::{generate, load_dataset, save_dataset, Dataset, SynthParams};
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{base_block, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Generate and inspect simplicial walk datasets")]
struct Cmd {
    /// Label recorded in provenance sidecars and logs (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the generator and save the dataset directory
    Generate {
        #[arg(long)]
        out: PathBuf,
        /// JSON file with `SynthParams`; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        nodes: Option<usize>,
        #[arg(long)]
        walks: Option<usize>,
        #[arg(long, value_delimiter = ',')]
        hops: Option<Vec<usize>>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        train_fraction: Option<f64>,
    },
    /// Load a dataset, log its shapes and print a JSON summary
    Inspect {
        #[arg(long)]
        dir: PathBuf,
        /// Per-example table (.csv or .parquet)
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Flag overrides on top of the config file (or the defaults).
#[derive(Default)]
struct Overrides {
    nodes: Option<usize>,
    walks: Option<usize>,
    hops: Option<Vec<usize>>,
    seed: Option<u64>,
    train_fraction: Option<f64>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            out,
            config,
            nodes,
            walks,
            hops,
            seed,
            train_fraction,
        } => {
            let overrides = Overrides {
                nodes,
                walks,
                hops,
                seed,
                train_fraction,
            };
            let params = resolve_params(config.as_deref(), overrides)?;
            run_generate(&params, &out, cmd.tags)
        }
        Action::Inspect { dir, summary } => inspect(&dir, summary.as_deref()),
        Action::Report => report(&cmd.tags),
    }
}

fn resolve_params(config: Option<&Path>, o: Overrides) -> Result<SynthParams> {
    let mut params = match config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<SynthParams>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SynthParams::default(),
    };
    if let Some(n) = o.nodes {
        params.nodes = n;
    }
    if let Some(m) = o.walks {
        params.walks = m;
    }
    if let Some(h) = o.hops {
        params.hops = h;
    }
    if let Some(s) = o.seed {
        params.seed = Some(s);
    }
    if let Some(f) = o.train_fraction {
        params.train_fraction = f;
    }
    params.validate().context("validating params")?;
    Ok(params)
}

fn run_generate(params: &SynthParams, out: &Path, tags: Vec<String>) -> Result<()> {
    tracing::info!(
        nodes = params.nodes,
        walks = params.walks,
        hops = ?params.hops,
        seed = ?params.seed,
        out = %out.display(),
        "generate"
    );
    let run = generate(params).context("generating dataset")?;
    save_dataset(&run.dataset, out).with_context(|| format!("saving {}", out.display()))?;

    let ds = &run.dataset;
    let mut payload = Payload::new(serde_json::to_value(params)?);
    payload.tags = tags;
    payload.stats = json!({
        "seed": run.seed,
        "nodes": ds.node_count(),
        "valid_nodes": run.complex.valid_idxs.len(),
        "edges": ds.edge_count(),
        "faces": ds.face_count(),
        "max_degree": ds.max_degree(),
        "examples": ds.example_count(),
        "region_sizes": run
            .regions
            .sizes()
            .into_iter()
            .map(|(r, n)| (r.to_string(), n))
            .collect::<std::collections::BTreeMap<_, _>>(),
    });
    let prov = write_sidecar(out, payload)?;
    tracing::info!(provenance = %prov.display(), "dataset_written");
    Ok(())
}

fn inspect(dir: &Path, summary: Option<&Path>) -> Result<()> {
    let ds = load_dataset(dir).with_context(|| format!("loading {}", dir.display()))?;
    tracing::info!(
        flows_in = ?ds.flows_in.shape(),
        b1 = ?ds.b1.shape(),
        b2 = ?ds.b2.shape(),
        bconds = ?ds.bconds.shape(),
        targets = ?ds.targets.shape(),
        "dataset_shapes"
    );

    let mut table = example_table(&ds)?;
    let per_hop = table
        .clone()
        .lazy()
        .group_by([col("hop_slot")])
        .agg([
            col("choices").cast(DataType::Float64).mean().alias("mean_choices"),
            col("target_pos").null_count().cast(DataType::UInt32).alias("degenerate"),
        ])
        .sort(["hop_slot"], Default::default())
        .collect()?;
    let mean_choices: Vec<Option<f64>> = per_hop.column("mean_choices")?.f64()?.into_iter().collect();
    let degenerate: Vec<u32> = per_hop.column("degenerate")?.u32()?.into_no_null_iter().collect();

    let doc = json!({
        "dir": dir.to_string_lossy(),
        "nodes": ds.node_count(),
        "edges": ds.edge_count(),
        "faces": ds.face_count(),
        "max_degree": ds.max_degree(),
        "hop_slots": ds.hop_count(),
        "examples": ds.example_count(),
        "train": ds.train_mask.iter().filter(|&&t| t).count(),
        "test": ds.test_mask.iter().filter(|&&t| t).count(),
        "mean_choices_per_hop": mean_choices,
        "degenerate_targets_per_hop": degenerate,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);

    if let Some(path) = summary {
        write_table(&mut table, path)?;
        tracing::info!(
            rows = table.height(),
            cols = table.width(),
            out = %path.display(),
            "summary_written"
        );
    }
    Ok(())
}

/// One row per (hop slot, example).
fn example_table(ds: &Dataset) -> Result<DataFrame> {
    let (h, m) = (ds.hop_count(), ds.example_count());
    let mut example = Vec::with_capacity(h * m);
    let mut hop_slot = Vec::with_capacity(h * m);
    let mut last_node = Vec::with_capacity(h * m);
    let mut choices = Vec::with_capacity(h * m);
    let mut target_pos = Vec::with_capacity(h * m);
    let mut split = Vec::with_capacity(h * m);
    for k in 0..h {
        for i in 0..m {
            example.push(i as u32);
            hop_slot.push(k as u32);
            last_node.push(ds.last_nodes[i]);
            choices.push(ds.choice_count(k, i) as u32);
            target_pos.push(ds.target_position(k, i).map(|p| p as u32));
            split.push(if ds.train_mask[i] { "train" } else { "test" });
        }
    }
    let df = df!(
        "example" => example,
        "hop_slot" => hop_slot,
        "last_node" => last_node,
        "choices" => choices,
        "target_pos" => target_pos,
        "split" => split,
    )?;
    Ok(df)
}

fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            CsvWriter::new(file).include_header(true).finish(df)?;
        }
        Some("parquet") => {
            ParquetWriter::new(file).finish(df)?;
        }
        other => bail!("unsupported summary extension {other:?}; use .csv or .parquet"),
    }
    Ok(())
}

fn report(tags: &[String]) -> Result<()> {
    let mut obj = base_block(tags);
    obj["params"] = serde_json::to_value(SynthParams::default())?;
    obj["outputs"] = json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
