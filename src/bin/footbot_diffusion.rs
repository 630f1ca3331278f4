// Foot-bot diffusion obstacle avoidance in a random cylinder arena
//
// Reads the experiment from $CONFIG_PATH (default ./config/footbot_diffusion.toml).
// Log level from $FOOTBOT_LOG (default info).
// Usage: footbot_diffusion [--plot <file.png>] [--show]

use std::env;
use std::process;

use footbot_diffusion::common::ControllerResult;
use footbot_diffusion::control::DiffusionParams;
use footbot_diffusion::registry::{ControllerRegistry, DIFFUSION_CONTROLLER_NAME};
use footbot_diffusion::simulation::{ExperimentConfig, Simulation};
use footbot_diffusion::utils::{logger, Visualizer};

#[derive(Debug, PartialEq)]
struct Options {
    plot: Option<String>,
    show: bool,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut options = Options { plot: None, show: false };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--plot" => match args.next() {
                Some(path) if !path.starts_with("--") => options.plot = Some(path),
                _ => return Err("--plot needs a file path".to_string()),
            },
            "--show" => options.show = true,
            other => eprintln!("ignoring unknown argument: {}", other),
        }
    }
    Ok(options)
}

fn run(options: &Options) -> ControllerResult<()> {
    let config = ExperimentConfig::load()?;
    if config.controller.name == DIFFUSION_CONTROLLER_NAME {
        DiffusionParams::from_node(&config.controller.params)?.validate()?;
    }

    let registry = ControllerRegistry::with_builtin();
    let simulation = Simulation::new(&config, &registry)?;
    let arena = simulation.arena().clone();
    let report = simulation.run()?;

    println!("steps:              {}", report.steps);
    println!("distance travelled: {:.2} m", report.distance_travelled());
    println!("collisions:         {}", report.collisions);
    println!("contacts:           {}", report.contacts);

    if options.plot.is_some() || options.show {
        let mut vis = Visualizer::new();
        vis.set_title("Foot-bot diffusion").plot_report(&arena, &report);
        if let Some(path) = &options.plot {
            vis.save_png(path, 800, 800)?;
            println!("Plot saved to: {}", path);
        }
        if options.show {
            vis.show()?;
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = logger::init(logger::level_from_env()) {
        eprintln!("logger: {}", e);
    }
    println!("Foot-bot diffusion start!!");
    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };
    if let Err(e) = run(&options) {
        eprintln!("{}", e);
        process::exit(1);
    }
    println!("Foot-bot diffusion finish!!");
}
