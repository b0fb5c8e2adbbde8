use clap::Parser;
use itertools::Itertools;
use logsift::config::MinerConfig;
use logsift::miner::TemplateMiner;
use logsift::patterns;
use logsift::tokenize::space_tokenizer;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "logsift", version, about = "Streaming log template discovery")]
struct Cli {
    /// Input files (`-` for stdin). May be repeated.
    #[arg(required = false)]
    input: Vec<String>,

    /// Prefix tree depth (token-count level plus token levels)
    #[arg(long = "depth", default_value_t = 4)]
    depth: usize,
    /// Similarity a line must reach to join an existing template
    #[arg(long = "min-similarity", default_value_t = 0.4)]
    min_similarity: f64,
    /// Fan-out cap per tree node
    #[arg(long = "max-children", default_value_t = 100)]
    max_children: usize,
    /// Cluster cache bound (0 keeps everything)
    #[arg(long = "max-clusters", default_value_t = 0)]
    max_clusters: usize,
    /// Probe line to look up (read-only) after training
    #[arg(long = "match")]
    probe: Option<String>,
    /// Output format: json | table
    #[arg(long = "format", default_value = "json")]
    format: String,
    /// Sort templates by: size | id
    #[arg(long = "sort", default_value = "size")]
    sort_by: String,
}

#[derive(Debug, Serialize)]
struct TemplateReport {
    id: u64,
    size: u64,
    template: String,
}

fn read_all_lines(paths: &[String]) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    for p in paths {
        if p == "-" {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                out.push(line?);
            }
        } else {
            let f = File::open(p)?;
            for line in BufReader::new(f).lines() {
                out.push(line?);
            }
        }
    }
    Ok(out)
}

fn main() {
    let cli = Cli::parse();

    let base = match MinerConfig::new(space_tokenizer, &patterns::common_patterns()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("logsift: {e}");
            process::exit(2);
        }
    };
    let config = MinerConfig {
        cluster_depth: cli.depth,
        min_similarity: cli.min_similarity,
        max_children: cli.max_children,
        max_clusters: cli.max_clusters,
        ..base
    };
    let mut miner = match TemplateMiner::new(config) {
        Ok(miner) => miner,
        Err(e) => {
            eprintln!("logsift: {e}");
            process::exit(2);
        }
    };

    let inputs = if cli.input.is_empty() {
        vec!["-".to_owned()]
    } else {
        cli.input.clone()
    };
    let lines = match read_all_lines(&inputs) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("logsift: {e}");
            process::exit(1);
        }
    };
    for line in &lines {
        miner.train(line);
    }

    let mut reports: Vec<TemplateReport> = miner
        .clusters()
        .into_iter()
        .map(|cluster| TemplateReport {
            id: cluster.id(),
            size: cluster.size(),
            template: cluster.tokens().iter().join(" "),
        })
        .collect();
    match cli.sort_by.as_str() {
        "id" => reports.sort_by_key(|r| r.id),
        _ => reports.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id))),
    }

    match cli.format.as_str() {
        "table" => {
            for r in &reports {
                println!("id={{{}}} : size={{{}}} : {}", r.id, r.size, r.template);
            }
        }
        _ => match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("logsift: {e}");
                process::exit(1);
            }
        },
    }

    if let Some(probe) = &cli.probe {
        match miner.match_line(probe) {
            Some(cluster) => println!("matched: {cluster}"),
            None => println!("no match"),
        }
    }
}
