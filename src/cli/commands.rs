//! Command handlers
//!
//! Every backend call goes through the context's [`RequestScope`] so Ctrl-C
//! aborts it. A 401 from any call drops the saved session.

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::{Local, NaiveDate};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{render, Cli, Commands, ConfigCommands, FdCommands, OutputFormat, UsersCommands};
use crate::api::client::ApiClient;
use crate::api::{ApiError, ApiResult, FdApi, RequestScope};
use crate::closure::{ClosureDraft, ClosureError};
use crate::config::{generate_default_config, Config};
use crate::forms::{CreateFdForm, CreateUserForm, FieldErrors, Form, LoginForm, SystemConfigForm};
use crate::guard::{GuardDecision, Route, ACCESS_DENIED_MESSAGE};
use crate::models::{receipt_file_name, FdStatus, InterestType, SystemConfig, Tenure};
use crate::preview::{compute_preview, PreviewInputs};
use crate::session::token::TokenStore;
use crate::register::{DashboardStats, FdFilter, RegisterView};
use crate::session::{FileTokenStore, SessionState, SessionStore};

const NOT_LOGGED_IN: &str = "Not logged in. Run `fdctl login` first.";
const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Everything a handler needs
struct Context {
    store: SessionStore<ApiClient, FileTokenStore>,
    scope: RequestScope,
    format: OutputFormat,
}

impl Context {
    fn api(&self) -> &Arc<ApiClient> {
        self.store.api()
    }

    /// Run a gateway call in the scope, mapping failures for the terminal
    async fn call<T>(&self, request: impl Future<Output = ApiResult<T>>) -> Result<T> {
        self.scope.run(request).await.map_err(|e| self.failure(e))
    }

    fn failure(&self, error: ApiError) -> anyhow::Error {
        if error.is_unauthorized() {
            self.store.forget();
            anyhow!(SESSION_EXPIRED)
        } else if error.is_network() {
            anyhow!("{} (backend: {})", error, self.api().base_url())
        } else {
            anyhow!(error)
        }
    }

    /// Run a non-gateway future in the scope; only cancellation fails
    async fn scoped<T>(&self, work: impl Future<Output = T>) -> Result<T> {
        self.scope
            .run(async { Ok(work.await) })
            .await
            .map_err(|e| anyhow!(e))
    }

    /// Restore the saved session and apply the route's guard
    async fn authorize(&self, route: &Route) -> Result<SessionState> {
        let state = self.scoped(self.store.restore()).await?;
        match route.check(&state) {
            GuardDecision::Allow => Ok(state),
            GuardDecision::AccessDenied => bail!(ACCESS_DENIED_MESSAGE),
            GuardDecision::RedirectToLogin | GuardDecision::Loading => {
                // A token that survived restore could not be checked
                if matches!(self.store.tokens().load(), Ok(Some(_))) {
                    bail!(
                        "Could not reach the FD backend at {}",
                        self.api().base_url()
                    )
                }
                bail!(NOT_LOGGED_IN)
            }
        }
    }

    fn print(&self, text: String) {
        print!("{}", text);
    }
}

/// Execute one parsed command line
pub async fn run(cli: Cli, mut config: Config, scope: RequestScope) -> Result<()> {
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let api = Arc::new(ApiClient::new(config.client_config())?);
    let ctx = Context {
        store: SessionStore::new(api, config.token_store()),
        scope,
        format: cli.format,
    };

    if let Some(route) = cli.command.route().filter(|route| route.gate().is_some()) {
        ctx.authorize(&route).await?;
    }

    match cli.command {
        Commands::Login { username, password } => login(&ctx, username, password).await,
        Commands::Logout => logout(&ctx).await,
        Commands::Whoami => {
            let profile = ctx.store.profile().ok_or_else(|| anyhow!(NOT_LOGGED_IN))?;
            ctx.print(render::profile(&profile, ctx.format)?);
            Ok(())
        }
        Commands::Dashboard => dashboard(&ctx).await,
        Commands::Fd(command) => fd(&ctx, command).await,
        Commands::Preview {
            amount,
            rate,
            tenure,
            unit,
            start,
            interest_type,
        } => {
            let inputs = PreviewInputs {
                principal: Some(amount),
                rate: Some(rate),
                tenure: Some(Tenure::new(tenure, unit)),
                start_date: Some(start.unwrap_or_else(today)),
            };
            preview(&inputs, interest_type, ctx.format)
        }
        Commands::Config(command) => system_config(&ctx, command).await,
        Commands::Users(command) => users(&ctx, command).await,
        Commands::InitConfig { output } => init_config(output.as_deref()),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn form_failure(errors: FieldErrors) -> anyhow::Error {
    let lines: Vec<String> = errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field, message))
        .collect();
    anyhow!("Invalid input:\n{}", lines.join("\n"))
}

fn init_config(output: Option<&Path>) -> Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Offline calculator; the interest type is given instead of fetched
fn preview(inputs: &PreviewInputs, interest_type: InterestType, format: OutputFormat) -> Result<()> {
    let config = SystemConfig {
        interest_type,
        ..SystemConfig::default()
    };
    let preview = compute_preview(inputs, &config)
        .ok_or_else(|| anyhow!("Amount, rate and tenure must all be greater than 0"))?;
    print!("{}", render::preview(&preview, format)?);
    Ok(())
}

async fn login(ctx: &Context, username: String, password: String) -> Result<()> {
    let mut form = LoginForm::new(username, password);
    let (username, password) = form.validate().map_err(form_failure)?;

    let session = ctx
        .scoped(ctx.store.login(&username, &password))
        .await?
        .map_err(|e| anyhow!(e))?;

    println!(
        "Logged in as {} ({})",
        session.username(),
        session.role().label()
    );
    Ok(())
}

async fn logout(ctx: &Context) -> Result<()> {
    match ctx.store.tokens().load() {
        Ok(Some(token)) => ctx.api().set_token(Some(token)),
        Ok(None) => {
            println!("Not logged in");
            return Ok(());
        }
        Err(e) => tracing::warn!("Could not read saved session: {}", e),
    }
    ctx.scoped(ctx.store.logout()).await?;
    println!("Logged out");
    Ok(())
}

async fn dashboard(ctx: &Context) -> Result<()> {
    let list = ctx.call(ctx.api().list_fds(None)).await?;
    let stats = DashboardStats::from_accounts(&list.fd_accounts);
    let profile = ctx.store.profile();
    ctx.print(render::dashboard(&stats, profile.as_ref(), ctx.format)?);
    Ok(())
}

async fn fd(ctx: &Context, command: FdCommands) -> Result<()> {
    match command {
        FdCommands::Create {
            name,
            id_type,
            id_number,
            amount,
            rate,
            tenure,
            unit,
            start,
            preview_only,
        } => {
            let system = ctx.call(ctx.api().get_config()).await?;
            let mut form = CreateFdForm::new(start.unwrap_or_else(today), Some(&system));
            form.customer_name = name;
            form.id_type = id_type;
            form.id_number = id_number;
            form.deposit_amount = amount;
            form.tenure_value = tenure;
            form.tenure_unit = unit;
            form.interest_rate = match rate {
                Some(rate) => rate,
                None => default_rate(&form, &system).to_string(),
            };

            let request = form.validate().map_err(form_failure)?;

            if let Some(preview) = compute_preview(&PreviewInputs::from_form(&form), &system) {
                ctx.print(render::preview(&preview, ctx.format)?);
            }
            if preview_only {
                return Ok(());
            }

            let created = ctx.call(ctx.api().create_fd(&request)).await?;
            tracing::info!(fd_no = %created.fd_no, "FD created");
            match ctx.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
                _ => println!("{} ({})", created.message, created.fd_no),
            }
            Ok(())
        }

        FdCommands::List {
            status,
            name,
            from,
            to,
            maturity_from,
            maturity_to,
            remote,
        } => {
            let filter = FdFilter {
                status,
                customer_name: name,
                start_date_from: from,
                start_date_to: to,
                maturity_date_from: maturity_from,
                maturity_date_to: maturity_to,
            };
            let list = if remote {
                ctx.call(ctx.api().list_fds(Some(&filter))).await?
            } else {
                ctx.call(ctx.api().list_fds(None)).await?
            };

            // The server already filtered, so an empty answer means no matches
            let view = if remote && list.fd_accounts.is_empty() && !filter.is_empty() {
                RegisterView::NoMatches
            } else {
                RegisterView::build(&list.fd_accounts, &filter)
            };
            ctx.print(render::register(&view, ctx.format)?);
            Ok(())
        }

        FdCommands::Show { fd_no } => {
            let fd = ctx.call(ctx.api().get_fd(&fd_no)).await?;
            ctx.print(render::fd_details(&fd, ctx.format)?);
            Ok(())
        }

        FdCommands::Simulate { fd_no, date } => {
            let date = date.unwrap_or_else(today);
            let simulation = ctx.call(ctx.api().simulate_closure(&fd_no, date)).await?;
            ctx.print(render::simulation(&simulation, ctx.format)?);
            Ok(())
        }

        FdCommands::Close { fd_no, date, yes } => {
            let fd = ctx.call(ctx.api().get_fd(&fd_no)).await?;
            if fd.status != FdStatus::Active {
                bail!("FD is already {}.", fd.status.label());
            }

            let mut draft = ClosureDraft::new(date.unwrap_or_else(today));
            let simulation = ctx.call(draft.simulate(ctx.api().as_ref(), &fd_no)).await?;
            ctx.print(render::simulation(&simulation, ctx.format)?);

            if !yes {
                println!(
                    "\nNothing closed. Re-run with --yes to close {} on {}.",
                    fd_no,
                    draft.closure_date()
                );
                return Ok(());
            }

            match ctx.scoped(draft.close(ctx.api().as_ref(), &fd)).await? {
                Ok(message) => {
                    tracing::info!(fd_no = %fd_no, date = %draft.closure_date(), "FD closed");
                    println!("{}", message.message);
                    Ok(())
                }
                Err(ClosureError::Api(e)) => Err(ctx.failure(e)),
                Err(e @ ClosureError::Blocked(_)) => Err(anyhow!(e)),
            }
        }

        FdCommands::Mature { fd_no } => {
            let fd = ctx.call(ctx.api().get_fd(&fd_no)).await?;
            if fd.status != FdStatus::Active {
                bail!("FD is already {}.", fd.status.label());
            }
            if !fd.can_mature(today()) {
                bail!(
                    "Maturity date has not been reached yet ({}).",
                    fd.maturity_date
                );
            }
            let message = ctx.call(ctx.api().mature_fd(&fd_no)).await?;
            println!("{}", message.message);
            Ok(())
        }

        FdCommands::Receipt { fd_no, output } => {
            let bytes = ctx.call(ctx.api().download_receipt(&fd_no)).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(receipt_file_name(&fd_no)));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Receipt saved to {} ({} bytes)", path.display(), bytes.len());
            Ok(())
        }
    }
}

/// Configured rate for the tenure on the form, or the 12-month rate while
/// the tenure is not a valid number
fn default_rate(form: &CreateFdForm, system: &SystemConfig) -> f64 {
    match form.tenure_value.trim().parse::<u32>() {
        Ok(value) if value > 0 => system.default_rate_for(Tenure::new(value, form.tenure_unit)),
        _ => system.default_rate_12m,
    }
}

async fn system_config(ctx: &Context, command: ConfigCommands) -> Result<()> {
    let current = ctx.call(ctx.api().get_config()).await?;

    match command {
        ConfigCommands::Show => {
            ctx.print(render::system_config(&current, ctx.format)?);
            Ok(())
        }
        ConfigCommands::Set {
            interest_type,
            penalty,
            rate_12m,
            rate_24m,
            rate_36m,
        } => {
            let mut form = SystemConfigForm::from_config(&current);
            if let Some(interest_type) = interest_type {
                form.interest_type = interest_type;
            }
            if let Some(penalty) = penalty {
                form.penalty_percent = penalty;
            }
            if let Some(rate) = rate_12m {
                form.default_rate_12m = rate;
            }
            if let Some(rate) = rate_24m {
                form.default_rate_24m = rate;
            }
            if let Some(rate) = rate_36m {
                form.default_rate_36m = rate;
            }

            let update = form.validate().map_err(form_failure)?;
            let updated = ctx.call(ctx.api().update_config(&update)).await?;
            println!("{}", updated.message);
            if !updated.updated_fields.is_empty() {
                println!("Updated: {}", updated.updated_fields.join(", "));
            }
            Ok(())
        }
    }
}

async fn users(ctx: &Context, command: UsersCommands) -> Result<()> {
    match command {
        UsersCommands::List => {
            let users = ctx.call(ctx.api().list_users()).await?;
            ctx.print(render::users(&users, ctx.format)?);
            Ok(())
        }
        UsersCommands::Create {
            username,
            password,
            role,
        } => {
            let mut form = CreateUserForm {
                username,
                password,
                role,
                ..Default::default()
            };
            let request = form.validate().map_err(form_failure)?;
            let message = ctx.call(ctx.api().create_user(&request)).await?;
            println!("{}", message.message);
            Ok(())
        }
    }
}
