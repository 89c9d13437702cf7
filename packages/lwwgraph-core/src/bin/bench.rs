use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use lwwgraph_core::{Clock, GraphConfig, LwwGraphState, MergePolicy, WallClock};

#[derive(serde::Serialize)]
struct Output {
    implementation: &'static str,
    workload: String,
    timestamp: String,
    name: String,
    total_ops: u64,
    duration_ms: f64,
    ops_per_sec: f64,
    extra: Extra,
    source_file: Option<String>,
}

#[derive(serde::Serialize)]
struct Extra {
    count: u64,
    merge_policy: String,
    path_found: bool,
}

fn main() {
    let mut count: u64 = 200;
    let mut out_file: Option<PathBuf> = None;
    let mut policy = MergePolicy::default();
    for arg in env::args().skip(1) {
        if let Some(val) = arg.strip_prefix("--count=") {
            count = val.parse().unwrap_or(count);
        } else if let Some(val) = arg.strip_prefix("--out=") {
            out_file = Some(PathBuf::from(val));
        } else if let Some(val) = arg.strip_prefix("--merge=") {
            policy = val.parse().expect("merge policy");
        }
    }

    let config = GraphConfig::default().with_merge_policy(policy);
    let mut clock = WallClock::default();
    let mut left = LwwGraphState::with_config(config);
    let mut right = LwwGraphState::with_config(config);

    let start = Instant::now();
    for i in 0..count {
        left.add_vertex(i, clock.now());
        right.add_vertex(i, clock.now());
    }
    for i in 1..count {
        let _ = left.add_edge(i - 1, i, clock.now());
    }
    left.merge(&right);
    let (_, path_found) = left.find_path(&0, &count.saturating_sub(1));
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    // vertex adds on both replicas, chain edges, one merge and one path search
    let total_ops = count * 3 + 1;
    let output = Output {
        implementation: "core-memory",
        workload: format!("chain-merge-path-{}", count),
        timestamp: chrono::Utc::now().to_rfc3339(),
        name: format!("chain-merge-path-{}", count),
        total_ops,
        duration_ms,
        ops_per_sec: if duration_ms > 0.0 {
            total_ops as f64 / duration_ms * 1000.0
        } else {
            f64::INFINITY
        },
        extra: Extra {
            count,
            merge_policy: policy.to_string(),
            path_found,
        },
        source_file: out_file.as_ref().map(|p| p.display().to_string()),
    };

    let json = serde_json::to_string_pretty(&output).expect("serialize");
    if let Some(path) = out_file {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdirs");
        }
        fs::write(&path, &json).expect("write output");
    }
    println!("{}", json);
}
