use clap::Parser;
use rand::Rng;
use std::fs;

/// A CLI tool to generate a synthetic device stream for the tickflow device channel
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated stream to
    #[arg(short, long, default_value = "device_stream.txt")]
    output: String,

    /// Number of readings to generate
    #[arg(short, long, default_value_t = 100)]
    count: usize,

    /// Smallest reading value
    #[arg(long, default_value_t = 0)]
    min: u32,

    /// Largest reading value
    #[arg(long, default_value_t = 1023)]
    max: u32,

    /// Probability of inserting a non-numeric line between readings
    #[arg(long, default_value_t = 0.0)]
    noise: f64,
}

const NOISE_LINES: &[&str] = &["ok", "ERR", "#", "v="];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.noise) {
        eprintln!("Error: --noise must be between 0 and 1, got {}", cli.noise);
        std::process::exit(1);
    }

    println!(
        "Generating {} readings between {} and {}...",
        cli.count, cli.min, cli.max
    );

    let mut rng = rand::rng();
    let mut stream = String::new();
    for _ in 0..cli.count {
        if cli.noise > 0.0 && rng.random_bool(cli.noise) {
            let junk = NOISE_LINES[rng.random_range(0..NOISE_LINES.len())];
            stream.push_str(junk);
            stream.push_str("\r\n");
        }
        let reading = rng.random_range(cli.min..=cli.max);
        stream.push_str(&reading.to_string());
        stream.push_str("\r\n");
    }

    fs::write(&cli.output, stream)?;

    println!("Successfully wrote device stream to '{}'", cli.output);

    Ok(())
}
