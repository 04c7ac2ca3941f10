//! Command handlers

use crate::cli::{Cli, Commands};
use crate::operator::StdinOperator;
use crate::output::{output_catalog, output_receipt};
use indicatif::{ProgressBar, ProgressStyle};
use scalecart_app::calibration::CalibrationManager;
use scalecart_app::config::Config;
use scalecart_app::controller::{ControllerSettings, KioskDevices, KioskStores, SessionController};
use scalecart_app::repository::{open_catalog_repo, open_receipt_repo, open_transaction_log};
use scalecart_domain::device::{FrameSource, OperatorConsole, WeightSensor};
use scalecart_domain::model::CartLine;
use scalecart_domain::repository::{PriceCatalogRepository, ReceiptRepository};
use scalecart_domain::service::{format_receipt_message, reconcile};
use scalecart_infra::devices::{CommandFrameSource, CommandWeightSensor, SimulationScript};
use scalecart_infra::frontend::CommandFrontend;
use scalecart_types::{
    CalibrationError, CalibrationPolicy, ConfigError, Error, OutputFormat, RegistrationPolicy, Result,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One entry of a cart file passed to `price`
#[derive(Debug, Deserialize)]
struct CartFileEntry {
    name: String,
    weight: u32,
    #[serde(default = "default_count")]
    count: u32,
}

fn default_count() -> u32 {
    1
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref catalog) = cli.catalog {
        config.catalog_path = catalog.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Run { simulate, known } => {
            if known.is_some() {
                config.known_weight_grams = *known;
            }
            config.validate()?;
            cmd_run(&config, simulate.as_deref())
        }

        Commands::Calibrate { simulate, known } => {
            let known = known.or(config.known_weight_grams);
            cmd_calibrate(&config, simulate.as_deref(), known, output_format)
        }

        Commands::Price { cart, save } => cmd_price(&config, cart, *save, output_format),

        Commands::Catalog => cmd_catalog(&config, output_format),

        Commands::Receipt { set_count, message } => {
            cmd_receipt(&config, set_count.as_deref(), *message, output_format)
        }

        Commands::Config {
            show,
            set_catalog,
            set_receipt,
            set_transaction_log,
            set_detector,
            set_sensor,
            set_frontend,
            set_calibration_policy,
            set_registration_policy,
            set_samples,
            set_quantum,
            set_known_weight,
            set_store_name,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_catalog.clone(),
            set_receipt.clone(),
            set_transaction_log.clone(),
            set_detector.clone(),
            set_sensor.clone(),
            set_frontend.clone(),
            *set_calibration_policy,
            *set_registration_policy,
            *set_samples,
            *set_quantum,
            *set_known_weight,
            set_store_name.clone(),
            *set_output,
            *reset,
        ),
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        ConfigError::Invalid(format!(
            "{} is not set (see `scalecart config`), or run with --simulate",
            key
        ))
        .into()
    })
}

fn open_sensor(config: &Config, simulate: Option<&Path>) -> Result<Box<dyn WeightSensor>> {
    match simulate {
        Some(script) => {
            let (sensor, _) = SimulationScript::load_from_file(script)?.into_devices();
            Ok(Box::new(sensor))
        }
        None => {
            let cmd = required(config.sensor_command.as_deref(), "sensor_command")?;
            Ok(Box::new(CommandWeightSensor::new(cmd)?))
        }
    }
}

fn open_devices(
    config: &Config,
    simulate: Option<&Path>,
) -> Result<(Box<dyn WeightSensor>, Box<dyn FrameSource>)> {
    match simulate {
        Some(script) => {
            eprintln!("Simulating devices from {}", script.display());
            let (sensor, camera) = SimulationScript::load_from_file(script)?.into_devices();
            let sensor: Box<dyn WeightSensor> = Box::new(sensor);
            let camera: Box<dyn FrameSource> = Box::new(camera);
            Ok((sensor, camera))
        }
        None => {
            let sensor_cmd = required(config.sensor_command.as_deref(), "sensor_command")?;
            let detector_cmd = required(config.detector_command.as_deref(), "detector_command")?;
            let sensor: Box<dyn WeightSensor> = Box::new(CommandWeightSensor::new(sensor_cmd)?);
            let camera: Box<dyn FrameSource> = Box::new(CommandFrameSource::new(detector_cmd)?);
            Ok((sensor, camera))
        }
    }
}

fn cmd_run(config: &Config, simulate: Option<&Path>) -> Result<()> {
    let (sensor, camera) = open_devices(config, simulate)?;

    let devices = KioskDevices {
        sensor,
        camera,
        frontend: Box::new(CommandFrontend::new(
            config.frontend_command.clone(),
            config.receipt_path.clone(),
        )),
        console: Box::new(StdinOperator::stdin(&config.currency)),
    };
    let stores = KioskStores {
        catalog: Box::new(open_catalog_repo(config)),
        receipts: Box::new(open_receipt_repo(config)),
        transactions: Box::new(open_transaction_log(config)),
    };

    let mut controller = SessionController::new(ControllerSettings::from(config), devices, stores);
    let served = controller.run()?;
    println!("Served {} customer(s)", served);
    let unfinished = controller.checkouts() - served;
    if unfinished > 0 {
        println!(
            "{} checkout(s) did not reach the front-end, see {}",
            unfinished,
            config.receipt_path.display()
        );
    }
    Ok(())
}

fn cmd_calibrate(
    config: &Config,
    simulate: Option<&Path>,
    known: Option<f64>,
    output_format: OutputFormat,
) -> Result<()> {
    let mut sensor = open_sensor(config, simulate)?;
    let mut operator = StdinOperator::stdin(&config.currency);

    sensor.acquire()?;
    let mut manager = CalibrationManager::new(sensor.as_mut(), config.sample_count);
    manager.zero().map_err(CalibrationError::from)?;
    operator.await_reference_weight()?;
    let known_weight_grams = match known {
        Some(grams) => grams,
        None => operator.known_weight_grams()?,
    };

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Sampling {} readings...", config.sample_count));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = manager.calibrate(known_weight_grams);
    spinner.finish_and_clear();
    let calibration = result?;
    sensor.release();

    if output_format == OutputFormat::Json {
        let value = serde_json::json!({
            "ratio": calibration.ratio(),
            "known_weight_grams": known_weight_grams,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Calibration ratio: {:.4} raw units per gram", calibration.ratio());
    }
    Ok(())
}

fn cmd_price(config: &Config, cart_path: &Path, save: bool, output_format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(cart_path)
        .map_err(|_| Error::FileNotFound(cart_path.display().to_string()))?;
    let entries: Vec<CartFileEntry> = serde_json::from_str(&content)?;
    let lines: Vec<CartLine> = entries
        .into_iter()
        .map(|e| CartLine {
            item_name: e.name,
            captured_weight: e.weight,
            count: e.count,
        })
        .collect();

    let catalog = open_catalog_repo(config).load()?;
    let receipt = reconcile(&lines, &catalog);

    if save {
        open_receipt_repo(config).save(&receipt)?;
        eprintln!("Receipt saved to {}", config.receipt_path.display());
    }

    output_receipt(output_format, &receipt, &config.currency)
}

fn cmd_catalog(config: &Config, output_format: OutputFormat) -> Result<()> {
    let catalog = open_catalog_repo(config).load()?;
    output_catalog(output_format, &catalog)
}

fn cmd_receipt(
    config: &Config,
    set_count: Option<&[u32]>,
    message: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let repo = open_receipt_repo(config);
    let mut receipt = repo
        .load_current()?
        .ok_or_else(|| Error::FileNotFound(config.receipt_path.display().to_string()))?;

    if let Some(&[index, count]) = set_count {
        receipt.set_count(index as usize, count)?;
        repo.save(&receipt)?;
        eprintln!("Line {} set to {} pcs", index, count);
    }

    if message {
        println!(
            "{}",
            format_receipt_message(&receipt, &config.store_name, &config.currency)
        );
        return Ok(());
    }

    output_receipt(output_format, &receipt, &config.currency)
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_catalog: Option<PathBuf>,
    set_receipt: Option<PathBuf>,
    set_transaction_log: Option<PathBuf>,
    set_detector: Option<String>,
    set_sensor: Option<String>,
    set_frontend: Option<String>,
    set_calibration_policy: Option<CalibrationPolicy>,
    set_registration_policy: Option<RegistrationPolicy>,
    set_samples: Option<u32>,
    set_quantum: Option<u32>,
    set_known_weight: Option<f64>,
    set_store_name: Option<String>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(path) = set_catalog {
        config.catalog_path = path;
        modified = true;
    }

    if let Some(path) = set_receipt {
        config.receipt_path = path;
        modified = true;
    }

    if let Some(path) = set_transaction_log {
        config.transaction_log_path = path;
        modified = true;
    }

    if let Some(cmd) = set_detector {
        config.detector_command = Some(cmd);
        modified = true;
    }

    if let Some(cmd) = set_sensor {
        config.sensor_command = Some(cmd);
        modified = true;
    }

    if let Some(cmd) = set_frontend {
        config.frontend_command = Some(cmd);
        modified = true;
    }

    if let Some(policy) = set_calibration_policy {
        config.calibration_policy = policy;
        modified = true;
    }

    if let Some(policy) = set_registration_policy {
        config.registration_policy = policy;
        modified = true;
    }

    if let Some(samples) = set_samples {
        config.sample_count = samples;
        modified = true;
    }

    if let Some(quantum) = set_quantum {
        config.quantum_grams = quantum;
        modified = true;
    }

    if let Some(grams) = set_known_weight {
        config.known_weight_grams = Some(grams);
        modified = true;
    }

    if let Some(name) = set_store_name {
        config.store_name = name;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("\n{}", config);
    }

    Ok(())
}
