use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use route_api::EnvironmentVariable;
use route_core::variables::merge_variables;
use route_core::{BuildContext, BuildType, ResolveInput, ResolvedRoutes, RouteDefaults, RouteResolver};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod input;

#[derive(Parser)]
#[command(name = "route-resolver")]
#[command(about = "Resolve the routes of one environment build")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Deployment configuration file
    #[arg(long, env = "LAGOON_YAML", default_value = ".lagoon.yml")]
    config: PathBuf,

    /// JSON file with the routes defined through the API
    #[arg(long, env = "LAGOON_API_ROUTES")]
    api_routes: Option<PathBuf>,

    /// JSON file with the workloads of the environment
    #[arg(long, env = "LAGOON_WORKLOADS")]
    workloads: Option<PathBuf>,

    #[arg(long, env = "PROJECT")]
    project: String,

    #[arg(long, env = "ENVIRONMENT")]
    environment: String,

    #[arg(long, env = "BUILD_TYPE", default_value = "branch")]
    build_type: BuildType,

    /// Project variables as a JSON array
    #[arg(long, env = "LAGOON_PROJECT_VARIABLES")]
    project_variables: Option<String>,

    /// Environment variables as a JSON array
    #[arg(long, env = "LAGOON_ENVIRONMENT_VARIABLES")]
    environment_variables: Option<String>,

    #[arg(long, env = "DEFAULT_INGRESS_CLASS", default_value = "nginx")]
    ingress_class: String,

    /// Environment takes part in active/standby switching
    #[arg(long, env = "ACTIVE_STANDBY")]
    active_standby: bool,

    #[arg(long, env = "LAGOON_FASTLY_NOCACHE_SERVICE_ID", default_value = "")]
    fastly_no_cache_service_id: String,

    #[arg(long, env = "ROUTE_FASTLY_SERVICE_ID", default_value = "")]
    fastly_service_id: String,

    #[arg(long, env = "ROUTE_FASTLY_API_SECRET_PREFIX", default_value = "fastly-api-")]
    fastly_api_secret_prefix: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Output {
    #[serde(flatten)]
    resolved: ResolvedRoutes,
    variables: Vec<EnvironmentVariable>,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    info!("Resolving routes for {}/{}", cli.project, cli.environment);

    let config = input::read_config(&cli.config)?;
    let api_routes = input::read_api_routes(cli.api_routes.as_deref())?;
    let workloads = input::read_workloads(cli.workloads.as_deref())?;
    let variables = merge_variables(
        input::parse_variables("LAGOON_PROJECT_VARIABLES", cli.project_variables.as_deref())?,
        input::parse_variables("LAGOON_ENVIRONMENT_VARIABLES", cli.environment_variables.as_deref())?,
    );
    let declared = config.environment_routes(&cli.environment);

    let resolver = RouteResolver::new(
        RouteDefaults {
            ingress_class: cli.ingress_class,
            active_standby: cli.active_standby,
            fastly_no_cache_service_id: cli.fastly_no_cache_service_id,
            fastly_service_id: cli.fastly_service_id,
            fastly_api_secret_prefix: cli.fastly_api_secret_prefix,
        },
        BuildContext::new(cli.project, cli.environment, cli.build_type),
    );

    let resolution = resolver
        .resolve(&ResolveInput {
            declared: &declared,
            api_routes: &api_routes,
            variables: &variables,
            workloads: &workloads,
            autogenerate: &config.routes.autogenerate,
        })
        .context("route resolution failed")?;

    let output = Output {
        variables: resolution.resolved.summary.to_variables(),
        resolved: resolution.resolved,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    // merged routes are printed even when autogeneration failed
    match resolution.autogenerate_error {
        Some(err) => Err(err).context("route autogeneration failed"),
        None => Ok(()),
    }
}
