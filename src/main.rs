//! `fitclub` command-line front end.
//!
//! Every run loads the roster from the data file, executes one command and
//! writes the data file back when the command changed the roster.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fitness_club_service::{
    adapters::{roster::memory::MemoryRoster, storage::fs::FsStorage},
    commands::{
        member_command::{MemberCommand, MemberCommandRequest},
        register::{MembershipDetails, RegisterMemberRequest},
        roster_file::{
            ExportReportRequest, ImportRecordsRequest, ListMembersRequest, SaveRecordsRequest,
        },
        DomainLogic, Error,
    },
    config::Config,
    domain::Plan,
    formats::listing,
    ports::storage,
};
use tracing_subscriber::EnvFilter;

type Domain = DomainLogic<MemoryRoster, FsStorage>;

#[derive(Parser)]
#[command(name = "fitclub")]
#[command(about = "Fitness club membership roster")]
struct Cli {
    /// Record file to load and save, overrides FITCLUB_DATA_FILE
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    /// Report destination for `export`, overrides FITCLUB_REPORT_FILE
    #[arg(long, global = true)]
    report_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a member on a Basic, Standard or Deluxe plan
    RegisterRegular {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long, default_value = "Basic")]
        plan: String,
        #[arg(long)]
        referral: String,
    },
    /// Register a premium member with a personal trainer
    RegisterPremium {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long)]
        trainer: String,
    },
    Activate {
        id: String,
    },
    Deactivate {
        id: String,
    },
    /// Record a visit for an active member
    Attend {
        id: String,
    },
    /// Move a regular member to a higher plan
    Upgrade {
        id: String,
        plan: Plan,
    },
    /// Reset a regular member and record why
    RevertRegular {
        id: String,
        #[arg(long)]
        reason: String,
    },
    /// Reset a premium member and clear their payments
    RevertPremium {
        id: String,
    },
    /// Pay towards the premium charge
    Pay {
        id: String,
        amount: f64,
    },
    /// Apply the discount for a fully paid premium member
    Discount {
        id: String,
    },
    /// One row per member
    List,
    /// Full details of every member
    Show,
    /// Write the bordered member report
    Export,
    /// Replace the roster with the records in PATH
    Import {
        path: PathBuf,
    },
}

#[derive(Args)]
struct ProfileArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    /// Local part of the email address, the configured domain is appended
    #[arg(long)]
    email: String,
    #[arg(long)]
    gender: String,
    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    dob: NaiveDate,
    /// Membership start date as YYYY-MM-DD
    #[arg(long)]
    start: NaiveDate,
}

impl ProfileArgs {
    fn into_request(self, details: MembershipDetails) -> RegisterMemberRequest {
        RegisterMemberRequest {
            id: self.id,
            name: self.name,
            phone_number: self.phone,
            email: self.email,
            gender: self.gender,
            date_of_birth: self.dob,
            membership_start_date: self.start,
            details,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Optional .env file
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_filter))?,
        )
        .with_writer(std::io::stderr)
        .init();

    let data_file = cli.data_file.unwrap_or(config.data_file);
    let report_file = cli.report_file.unwrap_or(config.report_file);

    let mut domain = DomainLogic::new(
        Arc::new(MemoryRoster::default()),
        Arc::new(FsStorage),
        config.email_domain,
    );
    load(&mut domain, &data_file).await?;

    if run(&mut domain, cli.command, &report_file).await? {
        save(&mut domain, &data_file).await?;
    }

    Ok(())
}

/// Execute a single command, returning whether the roster changed
async fn run(domain: &mut Domain, command: Commands, report_file: &Path) -> anyhow::Result<bool> {
    let (member_id, command) = match command {
        Commands::RegisterRegular {
            profile,
            plan,
            referral,
        } => {
            let req = profile.into_request(MembershipDetails::Regular {
                plan,
                referral_source: referral,
            });
            return register(domain, req).await;
        }
        Commands::RegisterPremium { profile, trainer } => {
            let req = profile.into_request(MembershipDetails::Premium {
                personal_trainer: trainer,
            });
            return register(domain, req).await;
        }
        Commands::List => {
            let res = domain.execute(ListMembersRequest).await?;
            print!("{}", listing::render_summary(&res.members));
            return Ok(false);
        }
        Commands::Show => {
            let res = domain.execute(ListMembersRequest).await?;
            print!("{}", listing::render_details(&res.members));
            return Ok(false);
        }
        Commands::Export => {
            let res = domain
                .execute(ExportReportRequest {
                    path: report_file.to_path_buf(),
                })
                .await?;
            println!("Exported {} members to {}", res.count, res.path.display());
            return Ok(false);
        }
        Commands::Import { path } => {
            let res = domain
                .execute(ImportRecordsRequest { path })
                .await
                .context("import failed")?;
            println!("Imported {} members from {}", res.count, res.path.display());
            return Ok(true);
        }
        Commands::Activate { id } => (id, MemberCommand::Activate),
        Commands::Deactivate { id } => (id, MemberCommand::Deactivate),
        Commands::Attend { id } => (id, MemberCommand::MarkAttendance),
        Commands::Upgrade { id, plan } => (id, MemberCommand::UpgradePlan { plan }),
        Commands::RevertRegular { id, reason } => (id, MemberCommand::RevertRegular { reason }),
        Commands::RevertPremium { id } => (id, MemberCommand::RevertPremium),
        Commands::Pay { id, amount } => (id, MemberCommand::PayDueAmount { amount }),
        Commands::Discount { id } => (id, MemberCommand::CalculateDiscount),
    };

    let res = domain
        .execute(MemberCommandRequest { member_id, command })
        .await?;
    for event in &res.events {
        println!("{}: {event}", res.member.name());
    }

    Ok(true)
}

async fn register(domain: &mut Domain, req: RegisterMemberRequest) -> anyhow::Result<bool> {
    let res = domain.execute(req).await?;
    println!(
        "Registered {} member {} ({}) as {}",
        res.member.kind(),
        res.member.id(),
        res.member.name(),
        res.member.profile().email
    );

    Ok(true)
}

async fn load(domain: &mut Domain, path: &Path) -> anyhow::Result<()> {
    let req = ImportRecordsRequest {
        path: path.to_path_buf(),
    };
    match domain.execute(req).await {
        Ok(res) => {
            tracing::debug!(path = %path.display(), count = res.count, "roster loaded");
            Ok(())
        }
        Err(Error::Storage(storage::Error::NotFound(_))) => {
            tracing::info!(path = %path.display(), "no data file yet, starting with an empty roster");
            Ok(())
        }
        Err(err) => Err(err).with_context(|| format!("cannot load {}", path.display())),
    }
}

async fn save(domain: &mut Domain, path: &Path) -> anyhow::Result<()> {
    let req = SaveRecordsRequest {
        path: path.to_path_buf(),
    };
    match domain.execute(req).await {
        Ok(_) | Err(Error::NothingToExport) => Ok(()),
        Err(err) => Err(err).with_context(|| format!("cannot save {}", path.display())),
    }
}
