//! Visitcost CLI
//!
//! Command-line interface for the clinic revisit cost calculator:
//! - Show KPIs and the break-even point
//! - Print or export the swept cost series
//! - Render the cost chart as SVG
//! - Run the HTTP API

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use visitcost::api::{serve, AppState};
use visitcost::calculator::{BreakEvenOutcome, CalculationReport, Calculator};
use visitcost::chart::svg::group_thousands;
use visitcost::chart::{ChartRenderer, SvgChart};
use visitcost::config::{generate_default_config, Config};
use visitcost::export::{export_points, ExportFormat};
use visitcost::form::RawFormInput;
use visitcost::model::{compute_visit_cost_and_count, PricingRegime};

#[derive(Parser)]
#[command(name = "visitcost")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clinic revisit cost calculator")]
#[command(long_about = "Estimates cumulative clinic visit costs as a function of the interval between visits.\nShorter intervals than the threshold are billed the repeat-visit fee, longer ones the first-visit fee.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

/// Calculator inputs. Values are read like form fields: anything that does
/// not parse falls back to a default.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Total horizon in days
    #[arg(long, allow_hyphen_values = true)]
    pub total_days: Option<String>,
    /// Largest interval to evaluate (days)
    #[arg(long, allow_hyphen_values = true)]
    pub max_interval: Option<String>,
    /// Increment between intervals (days)
    #[arg(long, allow_hyphen_values = true)]
    pub step_days: Option<String>,
    /// Months separating repeat-visit from first-visit pricing
    #[arg(long, allow_hyphen_values = true)]
    pub base_months: Option<String>,
    /// First-visit fee
    #[arg(long, allow_hyphen_values = true)]
    pub first_visit_fee: Option<String>,
    /// Repeat-visit fee
    #[arg(long, allow_hyphen_values = true)]
    pub repeat_visit_fee: Option<String>,
    /// Other fees charged on every visit
    #[arg(long, allow_hyphen_values = true)]
    pub other_fee: Option<String>,
}

impl From<InputArgs> for RawFormInput {
    fn from(args: InputArgs) -> Self {
        RawFormInput {
            total_days: args.total_days,
            max_interval: args.max_interval,
            step_days: args.step_days,
            base_months: args.base_months,
            first_visit_fee: args.first_visit_fee,
            repeat_visit_fee: args.repeat_visit_fee,
            other_fee: args.other_fee,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the KPI summary
    Calc {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the swept cost series
    Sweep {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the break-even interval and the cost there
    BreakEven {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Price a single interval
    Point {
        /// Interval between visits (days, may be fractional)
        #[arg(long)]
        interval: f64,
        #[command(flatten)]
        input: InputArgs,
    },

    /// Render the cost chart as SVG
    Chart {
        #[command(flatten)]
        input: InputArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Image width in pixels
        #[arg(long, default_value = "800")]
        width: f64,
        /// Image height in pixels
        #[arg(long, default_value = "400")]
        height: f64,
    },

    /// Export the swept series (csv, json, ndjson)
    Export {
        #[command(flatten)]
        input: InputArgs,
        /// Export format
        #[arg(long, default_value = "csv")]
        export_format: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the HTTP API
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default(),
    };

    let extra = if matches!(cli.command, Commands::Serve { .. }) {
        "tower_http=debug"
    } else {
        ""
    };
    visitcost::logging::init(&config.logging, extra);

    let calculator = config.calculator.calculator();

    match cli.command {
        Commands::Calc { input } => {
            let report = recompute(&calculator, input)?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                _ => print_kpis(&report),
            }
        }

        Commands::Sweep { input } => {
            let report = recompute(&calculator, input)?;
            match cli.format.as_str() {
                "json" => print!("{}", export_points(&report.points, ExportFormat::Json)?),
                "csv" => print!("{}", export_points(&report.points, ExportFormat::Csv)?),
                _ => print_points(&report),
            }
        }

        Commands::BreakEven { input } => {
            let report = recompute(&calculator, input)?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report.break_even)?),
                _ => match &report.break_even {
                    BreakEvenOutcome::Defined(point) => {
                        println!("Break-even interval: {:.1} days", point.interval_days);
                        println!("Cumulative cost:     {}", group_thousands(point.total_cost));
                        println!("Threshold:           {} days", report.threshold_days);
                    }
                    BreakEvenOutcome::Undefined { reason, .. } => {
                        println!("Break-even interval: undefined ({})", reason);
                    }
                },
            }
        }

        Commands::Point { interval, input } => {
            if !(interval > 0.0 && interval.is_finite()) {
                anyhow::bail!("interval must be a positive number, got {}", interval);
            }

            let values = RawFormInput::from(input).coerce(calculator.defaults());
            let cost = compute_visit_cost_and_count(
                interval,
                values.sweep.total_days,
                &values.fees,
                values.sweep.threshold_days(),
            );

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&cost)?),
                _ => {
                    let rate = match cost.regime {
                        PricingRegime::Repeat => "repeat-visit",
                        PricingRegime::First => "first-visit",
                    };
                    println!("Interval:   {} days", interval);
                    println!("Visits:     {}", cost.visit_count);
                    println!("Rate:       {} ({} per visit)", rate, values.fees.per_visit(cost.regime));
                    println!("Total cost: {}", group_thousands(cost.total_cost));
                }
            }
        }

        Commands::Chart {
            input,
            output,
            width,
            height,
        } => {
            let report = recompute(&calculator, input)?;
            let svg = SvgChart::new(width, height).render(&report.chart_spec())?;
            write_output(output, &svg)?;
        }

        Commands::Export {
            input,
            export_format,
            output,
        } => {
            let report = recompute(&calculator, input)?;
            let body = export_points(&report.points, ExportFormat::parse(&export_format))?;
            write_output(output, &body)?;
        }

        Commands::Serve { host, port } => {
            let mut api_config = config.api.clone();
            if let Some(host) = host {
                api_config.host = host;
            }
            if let Some(port) = port {
                api_config.port = port;
            }

            tracing::info!("Starting Visitcost API server v{}", env!("CARGO_PKG_VERSION"));
            let state = AppState::new(calculator, api_config.clone());
            serve(state, &api_config).await?;
        }

        Commands::Config { output } => {
            write_output(output, &generate_default_config())?;
        }
    }

    Ok(())
}

fn recompute(calculator: &Calculator, input: InputArgs) -> anyhow::Result<CalculationReport> {
    let raw = RawFormInput::from(input);
    Ok(calculator.recompute_form(&raw)?)
}

fn write_output(output: Option<PathBuf>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn print_kpis(report: &CalculationReport) {
    let kpis = &report.kpis;

    println!("Visitcost v{}", env!("CARGO_PKG_VERSION"));
    println!();
    match &kpis.break_even_interval {
        Some(interval) => println!("Break-even interval:   every {} days", interval),
        None => println!("Break-even interval:   undefined"),
    }
    println!("  Threshold:           {} days ({} months)", kpis.threshold_days, kpis.base_months);
    match kpis.break_even_cost {
        Some(cost) => println!("Cost at break-even:    {}", group_thousands(cost)),
        None => println!("Cost at break-even:    -"),
    }
    println!("  Total days:          {}", kpis.total_days);
    println!(
        "Interval range:        {} - {} days (step {})",
        kpis.range_start, kpis.range_end, kpis.step_days
    );
    println!(
        "Per-visit rates:       repeat {}, first {}",
        kpis.repeat_rate, kpis.first_rate
    );
    if let Some(cheapest) = report.cheapest() {
        println!(
            "Cheapest interval:     {} days ({})",
            cheapest.interval_days,
            group_thousands(cheapest.total_cost)
        );
    }
}

fn print_points(report: &CalculationReport) {
    println!("{:>10}  {:>8}  {:>14}", "interval", "visits", "total cost");
    println!("{}", "-".repeat(36));
    for point in &report.points {
        let marker = if f64::from(point.interval_days) >= report.threshold_days {
            " *"
        } else {
            ""
        };
        println!(
            "{:>10}  {:>8}  {:>14}{}",
            point.interval_days,
            point.visit_count,
            group_thousands(point.total_cost),
            marker
        );
    }
    println!();
    println!("* first-visit rate (interval >= {} days)", report.threshold_days);
}
