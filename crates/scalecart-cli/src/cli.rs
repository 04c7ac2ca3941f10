//! CLI definition using clap

use clap::{Parser, Subcommand};
use scalecart_types::{CalibrationPolicy, OutputFormat, RegistrationPolicy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scalecart")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Self-checkout kiosk: camera + load cell item registration and tiered pricing")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Price catalog (.toml or .csv). Uses config value if not specified.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the kiosk loop (r = register item, q = checkout, x = shut down)
    Run {
        /// Replay devices from a simulation script instead of the helpers
        #[arg(long)]
        simulate: Option<PathBuf>,

        /// Reference weight in grams (overrides config)
        #[arg(long)]
        known: Option<f64>,
    },

    /// Calibrate the load cell once and print the ratio
    Calibrate {
        /// Replay the sensor from a simulation script
        #[arg(long)]
        simulate: Option<PathBuf>,

        /// Reference weight in grams. Prompts if neither this nor config is set.
        #[arg(long)]
        known: Option<f64>,
    },

    /// Price a cart file ([{"name": "rice", "weight": 600}, ...])
    Price {
        /// Path to cart JSON
        cart: PathBuf,

        /// Also write the receipt where the front-end picks it up
        #[arg(long)]
        save: bool,
    },

    /// List catalog tiers
    Catalog,

    /// Show or edit the current receipt
    Receipt {
        /// Change the quantity of a per-unit line (0-based index)
        #[arg(long, num_args = 2, value_names = ["INDEX", "COUNT"])]
        set_count: Option<Vec<u32>>,

        /// Print the customer message body
        #[arg(long)]
        message: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set price catalog path
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Set receipt path
        #[arg(long)]
        set_receipt: Option<PathBuf>,

        /// Set transaction log path
        #[arg(long)]
        set_transaction_log: Option<PathBuf>,

        /// Set detector helper command
        #[arg(long)]
        set_detector: Option<String>,

        /// Set load cell helper command
        #[arg(long)]
        set_sensor: Option<String>,

        /// Set checkout front-end command
        #[arg(long)]
        set_frontend: Option<String>,

        /// Set calibration policy
        #[arg(long)]
        set_calibration_policy: Option<CalibrationPolicy>,

        /// Set registration policy
        #[arg(long)]
        set_registration_policy: Option<RegistrationPolicy>,

        /// Set samples averaged per reading
        #[arg(long)]
        set_samples: Option<u32>,

        /// Set weight quantum in grams
        #[arg(long)]
        set_quantum: Option<u32>,

        /// Set reference weight in grams
        #[arg(long)]
        set_known_weight: Option<f64>,

        /// Set store name printed on receipts
        #[arg(long)]
        set_store_name: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
