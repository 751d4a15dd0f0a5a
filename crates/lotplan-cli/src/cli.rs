use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and solve one lot-sizing instance
    Solve {
        /// Formulation to build (aggregate, dense, triangular)
        #[arg(long, default_value = "aggregate")]
        formulation: String,
        /// Instance JSON file (horizon, demand, production_cost,
        /// setup_cost, holding_cost, initial_stock)
        #[arg(long)]
        instance: Option<String>,
        /// Seed for the random parameter source
        #[arg(long)]
        seed: Option<u64>,
        /// Use the fixed stub parameters instead of random ones
        #[arg(long)]
        stub: bool,
        /// Print the solved schedule as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Solve two formulations on the same instance and compare them
    Compare {
        /// First formulation (aggregate, dense, triangular)
        #[arg(long, default_value = "aggregate")]
        left: String,
        /// Second formulation
        #[arg(long, default_value = "triangular")]
        right: String,
        /// Instance JSON file
        #[arg(long)]
        instance: Option<String>,
        /// Seed for the random parameter source
        #[arg(long)]
        seed: Option<u64>,
        /// Use the fixed stub parameters instead of random ones
        #[arg(long)]
        stub: bool,
        /// Comparison tolerance
        #[arg(long, default_value = "1e-6")]
        tolerance: f64,
        /// Print the equivalence report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Time solves per formulation across the horizon ladder
    Bench {
        /// Formulations to time (comma separated)
        #[arg(long, default_value = "aggregate,triangular")]
        formulations: String,
        /// Solves per rung, each on a fresh random instance
        #[arg(long, default_value = "100")]
        reps: usize,
        /// Number of ladder rungs to time (horizons 10, 20, ..)
        #[arg(long, default_value = "10")]
        rungs: usize,
        /// Seed for the random parameter source
        #[arg(long, default_value = "7")]
        seed: u64,
        /// Print timing records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
