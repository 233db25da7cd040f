use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use enrollment_records::config::{Config, ConfigOverrides};
use enrollment_records::filters::{EnrollmentFilter, EnrollmentQuery};
use enrollment_records::output::csv::{average_to_csv, metrics_to_csv};
use enrollment_records::output::render_json;
use enrollment_records::output::table::{render_average_table, render_metrics_table};
use enrollment_records::reports::{average_grade, metrics_by_program};
use enrollment_records::seed::{seed_store, SeedPlan};
use enrollment_records::server::run_server;
use enrollment_records::store::RecordStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "enrollment-records",
    about = "Academic enrollment records and grade reports"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    db: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the REST API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fill the store with mock programs, students, courses and enrollments
    Seed {
        #[arg(long)]
        students: Option<usize>,
        #[arg(long)]
        courses: Option<usize>,
        #[arg(long)]
        enrollments: Option<usize>,
        #[arg(long = "rng-seed")]
        rng_seed: Option<u64>,
    },
    /// Average grade, optionally for a single course code
    Average {
        #[arg(long = "course-code")]
        course_code: Option<String>,
    },
    /// Average grade and failure rate per undergraduate program
    Metrics,
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    let (host, port) = match &cli.command {
        Commands::Serve { host, port } => (host.clone(), *port),
        _ => (None, None),
    };
    config.apply_overrides(ConfigOverrides {
        db_path: cli.db.clone(),
        host,
        port,
    });
    init_tracing(&config);

    if let Commands::Config { init, show } = &cli.command {
        return handle_config_command(*init, *show, &config, &config_path);
    }
    if let Commands::Serve { .. } = &cli.command {
        let bind = config.bind_addr()?;
        return run_server(config, bind).await;
    }

    let db_path = config.resolved_db_path();
    let store = RecordStore::open(&db_path)?;

    match &cli.command {
        Commands::Seed {
            students,
            courses,
            enrollments,
            rng_seed,
        } => {
            let plan = SeedPlan {
                students: students.unwrap_or(config.seed.students),
                courses: courses.unwrap_or(config.seed.courses),
                enrollments: enrollments.unwrap_or(config.seed.enrollments),
                rng_seed: *rng_seed,
            };
            let summary = seed_store(&store, &plan)?;
            info!("seeded {}", db_path.display());
            println!("{}", render_json(&summary)?);
        }
        Commands::Average { course_code } => {
            let filter = EnrollmentFilter::from_query(EnrollmentQuery {
                course_code: course_code.clone(),
            });
            let average = average_grade(&store.enrollment_grades(&filter)?)?;
            let label = filter.course_code.as_deref();
            match cli.output {
                OutputFormat::Table => println!("{}", render_average_table(label, &average)),
                OutputFormat::Json => println!("{}", render_json(&average)?),
                OutputFormat::Csv => print!("{}", average_to_csv(label, &average)?),
            }
        }
        Commands::Metrics => {
            let metrics = metrics_by_program(&store.program_grades()?)?;
            match cli.output {
                OutputFormat::Table => println!("{}", render_metrics_table(&metrics)),
                OutputFormat::Json => println!("{}", render_json(&metrics)?),
                OutputFormat::Csv => print!("{}", metrics_to_csv(&metrics)?),
            }
        }
        Commands::Config { .. } | Commands::Serve { .. } => {}
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn handle_config_command(
    init: bool,
    show: bool,
    config: &Config,
    config_path: &PathBuf,
) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}
