use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use server_api::{password::hash_password, ApiContext, TokenConfig};
use shared::{
    domain::{AdminId, SubmissionId},
    error::ApiException,
};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://./data/portfolio.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreateAdmin {
        username: String,
        email: String,
        password: String,
    },
    ListSubmissions {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        per_page: u32,
        #[arg(long)]
        unread: bool,
    },
    MarkRead {
        submission_id: i64,
        #[arg(long)]
        unread: bool,
    },
    Delete {
        submission_id: i64,
    },
    Stats,
    Deactivate {
        admin_id: i64,
    },
    ResetPassword {
        admin_id: i64,
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;
    // Operations below never mint tokens.
    let ctx = ApiContext {
        storage,
        tokens: TokenConfig {
            secret: String::new(),
            ttl_hours: 0,
        },
    };

    match cli.command {
        Command::CreateAdmin {
            username,
            email,
            password,
        } => {
            if password.len() < 8 {
                bail!("password must be at least 8 characters");
            }
            let admin_id = ctx
                .storage
                .create_admin(&username, &email, &hash_password(&password))
                .await
                .with_context(|| format!("failed to create admin '{username}'"))?;
            println!("created admin_id={}", admin_id.0);
        }
        Command::ListSubmissions {
            page,
            per_page,
            unread,
        } => {
            let filter = unread.then_some(false);
            let listing = server_api::list_submissions(&ctx, Some(page), Some(per_page), filter)
                .await
                .map_err(ApiException::from)?;
            for item in &listing.submissions {
                println!(
                    "{:>5} {} {} {} <{}> [{}]",
                    item.id.0,
                    if item.is_read { " " } else { "*" },
                    item.submitted_at.format("%Y-%m-%d %H:%M"),
                    item.name,
                    item.email,
                    item.service
                );
            }
            let p = listing.pagination;
            println!("page {} of {} ({} total)", p.page, p.pages.max(1), p.total);
        }
        Command::MarkRead {
            submission_id,
            unread,
        } => {
            let record =
                server_api::mark_submission_read(&ctx, SubmissionId(submission_id), !unread)
                    .await
                    .map_err(ApiException::from)?;
            println!("submission {} is_read={}", record.id.0, record.is_read);
        }
        Command::Delete { submission_id } => {
            server_api::delete_submission(&ctx, SubmissionId(submission_id))
                .await
                .map_err(ApiException::from)?;
            println!("deleted submission {submission_id}");
        }
        Command::Stats => {
            let stats = server_api::admin_stats(&ctx, Utc::now())
                .await
                .map_err(ApiException::from)?;
            println!("total:  {}", stats.total_submissions);
            println!("unread: {}", stats.unread_submissions);
            println!("last {} days: {}", server_api::RECENT_WINDOW_DAYS, stats.recent_submissions);
            for entry in stats.service_breakdown {
                println!("  {:<32} {}", entry.service, entry.count);
            }
        }
        Command::Deactivate { admin_id } => {
            if !ctx.storage.set_admin_active(AdminId(admin_id), false).await? {
                bail!("admin {admin_id} not found");
            }
            println!("deactivated admin {admin_id}");
        }
        Command::ResetPassword { admin_id, password } => {
            if password.len() < 8 {
                bail!("password must be at least 8 characters");
            }
            if !ctx
                .storage
                .update_admin_password(AdminId(admin_id), &hash_password(&password))
                .await?
            {
                bail!("admin {admin_id} not found");
            }
            println!("password updated for admin {admin_id}");
        }
    }

    Ok(())
}
