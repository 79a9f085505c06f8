use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use rowland_torus::interfaces::Orientation;
use rowland_torus::placement::ElementArray;
use rowland_torus::rowland::{design_tilted_torus, RowlandTorus};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "rowland-torus")]
#[command(about = "Design Rowland tori and place gratings and CCDs on them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Design a tilted Rowland torus and print it as JSON
    Design {
        /// Distance between focal point and on-axis grating
        #[arg(short, long)]
        focal_length: f64,

        /// Angle to the Rowland circle centre in radians
        #[arg(short, long, allow_negative_numbers = true)]
        alpha: f64,

        /// Angle to the hinge point in radians
        #[arg(short, long, allow_negative_numbers = true)]
        beta: f64,
    },
    /// Place a grating array structure and print the layout as JSON
    Gratings {
        #[command(flatten)]
        torus: TorusArgs,

        #[command(flatten)]
        elements: ElementArgs,

        /// Bounding angles of the covered segment in radians (default: full circle)
        #[arg(long, num_args = 2, value_names = ["PHI1", "PHI2"], allow_negative_numbers = true)]
        phi: Option<Vec<f64>>,
    },
    /// Place a linear CCD array and print the layout as JSON
    Ccds {
        #[command(flatten)]
        torus: TorusArgs,

        #[command(flatten)]
        elements: ElementArgs,

        /// Direction of the line of CCD centres in radians
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        phi: f64,
    },
}

/// Torus either designed from (f, alpha, beta) or given by its radii
#[derive(Args)]
struct TorusArgs {
    /// Distance between focal point and on-axis grating
    #[arg(long)]
    focal_length: Option<f64>,

    /// Angle to the Rowland circle centre in radians
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<f64>,

    /// Angle to the hinge point in radians
    #[arg(long, allow_negative_numbers = true)]
    beta: Option<f64>,

    /// Major radius R of a torus at the origin
    #[arg(long, conflicts_with_all = ["focal_length", "alpha", "beta"])]
    major_radius: Option<f64>,

    /// Minor radius r of a torus at the origin
    #[arg(long, requires = "major_radius")]
    minor_radius: Option<f64>,
}

#[derive(Args)]
struct ElementArgs {
    /// Edge length of a square element
    #[arg(short, long)]
    d_element: f64,

    /// Local x interval searched for the torus intersection
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    x_range: Vec<f64>,

    /// Inner and outer radius in the plane perpendicular to the optical axis
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    radius: Vec<f64>,

    /// Override the default element orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Tangent,
    Focused,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Tangent => Orientation::TangentToTorus,
            OrientationArg::Focused => Orientation::FocusedRay,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = threads;
            warn!("Thread count specified but parallel feature not enabled. Ignoring.");
        }
    }

    info!("Starting rowland-torus v{}", rowland_torus::VERSION);

    match cli.command {
        Commands::Design {
            focal_length,
            alpha,
            beta,
        } => {
            let design = design_tilted_torus(focal_length, alpha, beta)
                .context("Failed to design torus")?;
            print_json(&design)
        }
        Commands::Gratings {
            torus,
            elements,
            phi,
        } => {
            let rowland = torus.build()?;
            let phi = phi.as_deref().map(pair).transpose()?;
            let mut gas = ElementArray::grating_array_structure(
                rowland,
                elements.d_element,
                pair(&elements.x_range)?,
                pair(&elements.radius)?,
                phi,
            )?;
            if let Some(orientation) = elements.orientation {
                gas = gas.with_orientation(orientation.into());
            }
            let layout = gas.layout().context("Failed to place gratings")?;
            print_json(&layout)
        }
        Commands::Ccds {
            torus,
            elements,
            phi,
        } => {
            let rowland = torus.build()?;
            let mut ccds = ElementArray::linear_ccd_array(
                rowland,
                elements.d_element,
                pair(&elements.x_range)?,
                pair(&elements.radius)?,
                phi,
            )?;
            if let Some(orientation) = elements.orientation {
                ccds = ccds.with_orientation(orientation.into());
            }
            let layout = ccds.layout().context("Failed to place CCDs")?;
            print_json(&layout)
        }
    }
}

impl TorusArgs {
    fn build(&self) -> anyhow::Result<RowlandTorus> {
        match (self.major_radius, self.focal_length) {
            (Some(major), _) => {
                let minor = self.minor_radius.unwrap_or(major);
                Ok(RowlandTorus::at_origin(major, minor)?)
            }
            (None, Some(f)) => {
                let alpha = self.alpha.unwrap_or(0.0);
                let beta = self.beta.unwrap_or(2.0 * alpha);
                info!("Designing torus for f={}, alpha={}, beta={}", f, alpha, beta);
                Ok(design_tilted_torus(f, alpha, beta)?.into_torus()?)
            }
            (None, None) => bail!("Either --focal-length or --major-radius is required"),
        }
    }
}

fn pair(values: &[f64]) -> anyhow::Result<[f64; 2]> {
    match values {
        [a, b] => Ok([*a, *b]),
        _ => bail!("Expected two values, got {}", values.len()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
