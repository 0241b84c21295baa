use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vreg_app::{
    AppResult, RecoveryMetrics, SimulateRequest, SimulateResponse, compare_controllers,
    error_body, handle_request_json, load_options, run_trajectory, save_options,
};
use vreg_sim::{SimOptions, TrajectoryRecord};

#[derive(Parser)]
#[command(name = "vreg")]
#[command(about = "vreg CLI - LC filter load-step regulation comparison", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the load-step scenario and print the trajectory
    Simulate {
        #[command(flatten)]
        plant: PlantArgs,
        /// Options YAML file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Answer a JSON request read from a file or stdin
    Handle {
        /// Request JSON file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Options YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print recovery metrics for both controllers
    Compare {
        #[command(flatten)]
        plant: PlantArgs,
        /// Options YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Settling band half-width in volts
        #[arg(long, default_value_t = 5.0)]
        band: f64,
    },
    /// Write the default options YAML
    Config {
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct PlantArgs {
    /// Filter inductance in henries
    #[arg(short = 'L', long, default_value_t = vreg_app::request::DEFAULT_INDUCTANCE_H)]
    inductance: f64,
    /// Filter capacitance in farads
    #[arg(short = 'C', long, default_value_t = vreg_app::request::DEFAULT_CAPACITANCE_F)]
    capacitance: f64,
}

impl PlantArgs {
    fn request(&self) -> SimulateRequest {
        SimulateRequest {
            inductance_h: self.inductance,
            capacitance_f: self.capacitance,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            plant,
            config,
            format,
            output,
        } => cmd_simulate(&plant, config.as_deref(), format, output.as_deref()),
        Commands::Handle { input, config } => cmd_handle(input.as_deref(), config.as_deref()),
        Commands::Compare {
            plant,
            config,
            band,
        } => cmd_compare(&plant, config.as_deref(), band),
        Commands::Config { output } => cmd_config(output.as_deref()),
    }
}

fn options_from(config: Option<&Path>) -> AppResult<SimOptions> {
    match config {
        Some(path) => load_options(path),
        None => Ok(SimOptions::default()),
    }
}

fn cmd_simulate(
    plant: &PlantArgs,
    config: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let options = options_from(config)?;
    let record = run_trajectory(&plant.request(), &options)?;
    let samples = record.len();

    let content = match format {
        OutputFormat::Json => {
            let response = SimulateResponse::from(record);
            let mut json = serde_json::to_string_pretty(&response)
                .map_err(|e| vreg_app::AppError::Serialize(e.to_string()))?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => trajectory_csv(&record),
    };

    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!("✓ Exported {} samples to {}", samples, path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}

fn trajectory_csv(record: &TrajectoryRecord) -> String {
    let mut csv = String::from("time_ms,pid_v,kks_v,load_ohms,control_v\n");
    for i in 0..record.len() {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            record.time_ms[i],
            record.reference_v[i],
            record.feedback_v[i],
            record.load_ohms[i],
            record.control_v[i]
        ));
    }
    csv
}

fn cmd_handle(input: Option<&Path>, config: Option<&Path>) -> AppResult<()> {
    let body = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let result = options_from(config).and_then(|options| handle_request_json(&body, &options));
    match result {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(err) => {
            println!("{}", error_body(&err));
            std::process::exit(1);
        }
    }
}

fn cmd_compare(plant: &PlantArgs, config: Option<&Path>, band: f64) -> AppResult<()> {
    let options = options_from(config)?;
    let record = run_trajectory(&plant.request(), &options)?;
    let summary = compare_controllers(&record, &options, band)?;

    println!("Gain: {}", summary.gain_label);
    println!(
        "Load step at {:.2} ms, settling band ±{:.1} V",
        summary.disturbance_ms, summary.band_v
    );
    print_metrics("State feedback", &summary.feedback);
    print_metrics("Droop reference", &summary.reference);
    println!("\nSaturated steps: {}", summary.saturated_steps);

    if summary.feedback_recovers_faster() {
        println!("✓ State feedback recovers faster");
    } else {
        println!("✗ State feedback does not recover faster");
    }
    Ok(())
}

fn print_metrics(title: &str, metrics: &RecoveryMetrics) {
    println!("\n{}:", title);
    if let Some(v) = metrics.max_deviation_v {
        println!("  Max deviation: {:.2} V", v);
    }
    if let Some(v) = metrics.min_voltage_v {
        println!("  Min voltage:   {:.2} V", v);
    }
    match metrics.settling_time_ms {
        Some(t) => println!("  Settling time: {:.2} ms", t),
        None => println!("  Settling time: not settled"),
    }
    if let Some(v) = metrics.final_error_v {
        println!("  Final error:   {:.3} V", v);
    }
}

fn cmd_config(output: Option<&Path>) -> AppResult<()> {
    let options = SimOptions::default();
    match output {
        Some(path) => {
            save_options(path, &options)?;
            println!("✓ Wrote default options to {}", path.display());
        }
        None => {
            let yaml = vreg_app::options_yaml(&options)?;
            print!("{}", yaml);
        }
    }
    Ok(())
}
