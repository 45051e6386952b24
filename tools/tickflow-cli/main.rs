use clap::Parser;
use std::time::{Duration, Instant};
use tickflow::formula::FormulaRenderer;
use tickflow::prelude::*;
use tracing_subscriber::EnvFilter;

/// Runs a dataflow program snapshot for a number of ticks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the program snapshot JSON file
    snapshot_path: String,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 1)]
    ticks: usize,

    /// Simulated time between ticks, in milliseconds
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Sleep for the interval between ticks instead of only advancing simulated time
    #[arg(long)]
    realtime: bool,

    /// Device stream to read sensor values from (digits terminated by CRLF)
    #[arg(short, long)]
    device: Option<String>,

    /// Sensor channel the device readings are published on
    #[arg(long, default_value = "device")]
    channel: String,

    /// Number of ticks kept in the snapshot history
    #[arg(long)]
    retention: Option<usize>,

    /// Extra node type names, as `Alias=BuiltinType` (e.g. `Input=Sensor`)
    #[arg(long = "alias", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,

    /// Print the graph description after the last tick
    #[arg(long)]
    describe: bool,

    /// Print each operator node's formula after the last tick
    #[arg(long)]
    formulas: bool,

    /// Where to save the updated snapshot
    #[arg(short, long)]
    output: Option<String>,
}

fn parse_alias(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(alias, builtin)| (alias.trim().to_string(), builtin.trim().to_string()))
        .filter(|(alias, builtin)| !alias.is_empty() && !builtin.is_empty())
        .ok_or_else(|| format!("expected Alias=BuiltinType, got '{}'", raw))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    run(cli).await;
}

async fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Engine ---
    let mut builder = Engine::builder();
    if let Some(retention) = cli.retention {
        builder = builder.tick_retention(retention);
    }
    for (alias, builtin) in &cli.aliases {
        if NodeKind::from_type_name(builtin).is_none() {
            exit_with_error(&format!("Unknown node type '{}' for alias '{}'", builtin, alias));
        }
        builder = builder.with_type_alias(alias, builtin);
    }
    let engine = builder.build();

    // --- 2. Loading ---
    let load_start = Instant::now();
    let snapshot = ProgramSnapshot::from_file(&cli.snapshot_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read snapshot: {}", e)));
    let mut program = engine
        .load(snapshot)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load program: {}", e)));
    let load_duration = load_start.elapsed();
    println!(
        "Loaded {} nodes and {} connections in {:?}",
        program.nodes().len(),
        program.connections().len(),
        load_duration
    );

    // --- 3. Device ---
    let device = match &cli.device {
        Some(path) => {
            let file = tokio::fs::File::open(path).await.unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to open device '{}': {}", path, e))
            });
            println!("Reading device '{}' into channel '{}'", path, cli.channel);
            Some(DeviceStream::spawn(file))
        }
        None => None,
    };

    // --- 4. Ticks ---
    let tick_start = Instant::now();
    let first_tick = program.recent_ticks().len();
    let mut warnings = 0;
    for n in 0..cli.ticks {
        let tick_number = first_tick + n + 1;
        let time_ms = tick_number as u64 * cli.interval_ms;
        if cli.realtime && n > 0 {
            tokio::time::sleep(Duration::from_millis(cli.interval_ms)).await;
        }

        let mut ctx = EvalContext::new(time_ms);
        if let Some(reading) = device.as_ref().and_then(DeviceStream::reading) {
            ctx.set_reading(cli.channel.as_str(), reading);
        }

        let evaluation = engine
            .advance_tick(&mut program, &format!("tick-{}", tick_number), &ctx)
            .unwrap_or_else(|e| exit_with_error(&format!("Tick {} failed: {}", tick_number, e)));
        warnings += evaluation.warnings.len();
    }
    let tick_duration = tick_start.elapsed();

    if let Some(device) = device {
        if let Err(e) = device.stop().await {
            eprintln!("Device reader ended with an error: {}", e);
        }
    }

    // --- 5. Results ---
    println!("\n--- Node Values ---");
    for node in program.nodes() {
        println!(
            "{:<32} {}",
            node.label(),
            program.current_value(&node.id).unwrap_or("-")
        );
    }

    if cli.formulas {
        println!("\n--- Formulas ---");
        let renderer = FormulaRenderer::new(&program);
        for node in program.nodes() {
            if let Some(formula) = renderer.render(&node.id) {
                println!("{}", formula.symbolic);
                println!("  {}", formula.with_values);
            }
        }
    }

    if cli.describe {
        println!("\n{}", to_graph_description(&program));
    }

    if let Some(output) = &cli.output {
        ProgramSnapshot::from_program(&program)
            .to_file(output)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save snapshot: {}", e)));
        println!("\nSaved snapshot to '{}'", output);
    }

    println!("\n--- Summary ---");
    println!("Ticks Run:            {}", cli.ticks);
    println!("Connection Warnings:  {}", warnings);
    println!("Loading:              {:?}", load_duration);
    println!("Ticks:                {:?}", tick_duration);
    println!("Total Execution:      {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
