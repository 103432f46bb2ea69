use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use artisan_market_api::{
    auth::{AuthConfig, AuthService, TokenSubject},
    config::{self, AppConfig},
    db,
    openapi::ApiDocV1,
    services::shop_regions::{
        NormalizeRegionsRequest, RegionNormalizationSummary, ShopRegionService,
    },
};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use utoipa::OpenApi;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => {
            let cfg = load_config()?;
            let pool = db::establish_connection_from_app_config(&cfg)
                .await
                .context("failed to connect to the database")?;
            db::run_migrations(&pool)
                .await
                .context("failed to apply migrations")?;
            println!("Migrations applied");
        }
        Commands::NormalizeRegions(args) => {
            let cfg = load_config()?;
            handle_normalize_regions(&cfg, args, cli.json).await?
        }
        Commands::IssueToken(args) => {
            let cfg = load_config()?;
            handle_issue_token(&cfg, args, cli.json)?
        }
        Commands::Openapi(args) => handle_openapi(args)?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "artisan-market",
    about = "Operator CLI for the artisan marketplace backend",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Parse free-text shop regions into department and municipality
    NormalizeRegions(NormalizeRegionsArgs),
    /// Mint a bearer token for local testing
    IssueToken(IssueTokenArgs),
    /// Print or write the OpenAPI document
    Openapi(OpenapiArgs),
}

#[derive(Args)]
struct NormalizeRegionsArgs {
    /// Write the parsed values; without this flag the run only reports
    #[arg(long, action = ArgAction::SetTrue)]
    apply: bool,
    /// Restrict the run to one shop
    #[arg(long)]
    shop_id: Option<Uuid>,
}

#[derive(Args)]
struct IssueTokenArgs {
    /// Token subject; a random UUID when omitted
    #[arg(long)]
    user_id: Option<Uuid>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    name: Option<String>,
    /// Role to grant; repeat for several
    #[arg(long = "role")]
    roles: Vec<String>,
}

#[derive(Args)]
struct OpenapiArgs {
    /// Output file; stdout when omitted
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct IssuedToken {
    user_id: String,
    roles: Vec<String>,
    token: String,
}

fn load_config() -> Result<AppConfig> {
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);
    Ok(cfg)
}

async fn handle_normalize_regions(
    cfg: &AppConfig,
    args: NormalizeRegionsArgs,
    json: bool,
) -> Result<()> {
    let pool = db::establish_connection_from_app_config(cfg)
        .await
        .context("failed to connect to the database")?;
    let service = ShopRegionService::new(Arc::new(pool));

    let summary = service
        .normalize_shop_regions(NormalizeRegionsRequest {
            dry_run: !args.apply,
            shop_id: args.shop_id,
        })
        .await
        .context("region normalization failed")?;

    if json {
        print_json(&summary)?;
    } else {
        print_region_summary(&summary);
    }
    Ok(())
}

fn print_region_summary(summary: &RegionNormalizationSummary) {
    for detail in &summary.details {
        let parsed = detail
            .parsed
            .as_ref()
            .map(|p| {
format!("{} / {}", p.department, p.municipality)
            })
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<38} {:<30} {:<40} {:?}",
            detail.shop_id, detail.shop_name, parsed, detail.status
        );
    }
    println!(
        "{} shops: {} processed, {} updated, {} skipped, {} errors{}",
        summary.total,
        summary.processed,
        summary.updated,
        summary.skipped,
        summary.errors,
        if summary.dry_run { " (dry run)" } else { "" }
    );
}

fn handle_issue_token(cfg: &AppConfig, args: IssueTokenArgs, json: bool) -> Result<()> {
    let auth = AuthService::new(AuthConfig::from(cfg));
    let subject = TokenSubject {
        user_id: args.user_id.unwrap_or_else(Uuid::new_v4).to_string(),
        name: args.name,
        email: args.email,
        roles: args.roles,
    };
    let token = auth
        .generate_token(&subject)
        .context("failed to sign token")?;

    if json {
        print_json(&IssuedToken {
            user_id: subject.user_id,
            roles: subject.roles,
            token,
        })?;
    } else {
        println!("{}", token);
    }
    Ok(())
}

fn handle_openapi(args: OpenapiArgs) -> Result<()> {
    let document = ApiDocV1::openapi()
        .to_pretty_json()
        .context("failed to render OpenAPI document")?;
    match args.output {
        Some(path) => {
            fs::write(&path, document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("OpenAPI document written to {}", path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
