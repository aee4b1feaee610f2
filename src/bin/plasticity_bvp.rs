use env_logger::Env;
use plasticity_bvp::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::process;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "plasticity_bvp",
    about = "Sets up the simple tension or crystal shear boundary value problem"
)]
struct Options {
    /// Configuration file (JSON)
    config: String,

    /// Application
    #[structopt(long, default_value = "tension", possible_values = &["tension", "shear"])]
    app: String,

    /// Only validates the configuration and prints its summary
    #[structopt(long)]
    dry_run: bool,

    /// Overrides the refinement factor
    #[structopt(long)]
    refinement: Option<usize>,

    /// Overrides the number of increments (requires --total-displacement)
    #[structopt(long)]
    n_increment: Option<usize>,

    /// Overrides the total displacement (requires --n-increment)
    #[structopt(long)]
    total_displacement: Option<f64>,

    /// Writes an SVG image of the mesh (small serial meshes only)
    #[structopt(long)]
    mesh_image: Option<String>,

    /// Maximum number of cells drawn in the mesh image
    #[structopt(long, default_value = "1000")]
    mesh_image_threshold: usize,

    /// Writes the effective configuration (after the overrides) to a JSON file
    #[structopt(long)]
    write_config: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let options = Options::from_args();

    // the panic message is printed by the default hook; we only add the banner
    match panic::catch_unwind(AssertUnwindSafe(|| run(&options))) {
        Ok(Ok(())) => (),
        Ok(Err(message)) => {
            eprintln!("\n\n----------------------------------------------------");
            eprintln!("Exception on processing: ");
            eprintln!("{}", message);
            eprintln!("Aborting!");
            eprintln!("----------------------------------------------------");
            process::exit(1);
        }
        Err(_) => {
            eprintln!("\n\n----------------------------------------------------");
            eprintln!("Unknown exception!");
            eprintln!("Aborting!");
            eprintln!("----------------------------------------------------");
            process::exit(1);
        }
    }
}

fn run(options: &Options) -> Result<(), StrError> {
    let mut config = Config::read_json(&options.config)?;
    if let Some(refinement) = options.refinement {
        config.set_refinement(refinement)?;
    }
    match (options.n_increment, options.total_displacement) {
        (Some(n_increment), Some(total_displacement)) => {
            config.set_loading(n_increment, total_displacement)?;
        }
        (None, None) => (),
        _ => return Err("--n-increment and --total-displacement must be given together"),
    }
    if let Some(path) = &options.mesh_image {
        config.set_mesh_image(path, options.mesh_image_threshold)?;
    }
    if let Some(path) = &options.write_config {
        config.write_json(path)?;
    }
    println!("{}", config);
    if options.dry_run {
        if let Some(message) = config.validate() {
            println!("{}", message);
            return Err("configuration is invalid");
        }
        return Ok(());
    }

    let driver = match options.app.as_str() {
        "shear" => {
            let app = CrystalShear::new(config)?;
            let mut cells = CellOrientations::new();
            let (driver, field) = app.setup(&mut cells)?;
            println!("{}", field);
            println!("cells per grain = {:?}\n", cells.grain_sizes());
            driver
        }
        _ => {
            let app = SimpleTension::new(config)?;
            let mut model = PlasticityModel::new();
            let driver = app.setup(&mut model)?;
            println!("{}", model.properties());
            println!("{}", driver.tags);
            driver
        }
    };
    println!("{}", driver.mesh);

    // preview of the first increment (first and corrective iterations)
    for iteration in 0..2 {
        let step = LoadStep::new(0, iteration);
        let constraints = driver.constraints(step)?;
        println!("{}", step);
        println!("{}", constraints);
    }
    Ok(())
}
