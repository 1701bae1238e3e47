use orbsim::{compare_integrators, write_trajectory_file};
use orbsim::{ExportFileProducer, ExportFields, NativeProducer, ProducerRequest, Scenario, ScenarioConfig, TrajectoryProducer, DEFAULT_EXPORT_FILE};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "2D Newtonian orbit simulator")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a YAML scenario and export the tracked body's trajectory
    Run {
        #[arg(short, default_value = "earth_moon.yaml")]
        file_name: String,
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
        /// Also write velocity and acceleration columns
        #[arg(long)]
        full: bool,
    },
    /// Trajectory producer contract: fixed primary at the origin, secondary on +x
    Produce {
        duration_days: f64,
        time_step: f64,
        mass_primary: f64,
        mass_secondary: f64,
        initial_distance: f64,
        #[arg(allow_negative_numbers = true)]
        initial_vx: f64,
        #[arg(allow_negative_numbers = true)]
        initial_vy: f64,
        #[arg(allow_negative_numbers = true)]
        reference_velocity: f64,
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
        /// Take the trajectory from an external producer's export file instead of simulating
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Run a scenario with every integrator and report energy drift
    Compare {
        #[arg(short, default_value = "earth_moon.yaml")]
        file_name: String,
    },
}

// a path that exists is used as is, anything else is looked up in scenarios/
fn load_scenario(file_name: &str) -> Result<Scenario> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(Scenario::build_scenario(cfg)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Run { file_name, output, full } => {
            let scenario = load_scenario(&file_name)?;
            let trajectory = scenario.run()?;
            let fields = if full { ExportFields::Full } else { ExportFields::Position };
            write_trajectory_file(&output, &trajectory, scenario.system.tracked, fields)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Command::Produce {
            duration_days,
            time_step,
            mass_primary,
            mass_secondary,
            initial_distance,
            initial_vx,
            initial_vy,
            reference_velocity,
            output,
            from,
        } => {
            let request = ProducerRequest {
                duration_days,
                time_step,
                mass_primary,
                mass_secondary,
                initial_distance,
                initial_vx,
                initial_vy,
                reference_velocity,
            };
            let producer: Box<dyn TrajectoryProducer> = match from {
                Some(path) => Box::new(ExportFileProducer { path }),
                None => Box::new(NativeProducer::default()),
            };
            let trajectory = producer.produce(&request)?;
            let secondary = request.system(orbsim::G_SI).tracked;
            write_trajectory_file(&output, &trajectory, secondary, ExportFields::Position)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Command::Compare { file_name } => {
            let scenario = load_scenario(&file_name)?;
            let reports = compare_integrators(&scenario.system, &scenario.config)?;
            for r in &reports {
                println!(
                    "{:<20} drift = {:10.3e}   end = ({:.6e}, {:.6e})   evals = {:8}   {:8.3} s",
                    r.kind.name(),
                    r.energy_drift,
                    r.final_position.x,
                    r.final_position.y,
                    r.force_evaluations,
                    r.elapsed.as_secs_f64()
                );
            }
            info!("compared {} integrators", reports.len());
        }
    }

    Ok(())
}
