//! # CLI Layer
//!
//! This module is **one possible UI client** for salesdesk, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin prompts)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data directory, load config, open the API
//! 3. **Confirmation**: Ask before destructive operations unless `--yes` is given
//! 4. **API Dispatch**: Call the appropriate `SalesdeskApi` method
//! 5. **Output Formatting**: Render `CmdResult` through the templates in `render`
//!
//! Errors bubble up to `main`, which prints them and exits with status 1.

use super::logging;
use super::render::{
    print_messages, render_client_list, render_config, render_dashboard, render_product_list,
    render_report, render_sale_list, RenderContext,
};
use super::setup::{ClientCommands, Cli, Commands, ProductCommands, SaleCommands};
use clap::Parser;
use directories::ProjectDirs;
use salesdesk::api::{
    ClientForm, ClientPatch, CmdMessage, ConfigAction, ConfigKey, SalePatch, SalesdeskApi,
};
use salesdesk::config::SalesdeskConfig;
use salesdesk::error::{Result, SalesdeskError};
use salesdesk::model::{Collection, PaymentStatus, RecordId};
use salesdesk::store::fs_backend::FsBackend;
use salesdesk::valuation::{parse_quantity, SaleForm};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory when `--data-dir` is absent.
pub const DATA_DIR_ENV: &str = "SALESDESK_DATA";

struct AppContext {
    api: SalesdeskApi<FsBackend>,
    render: RenderContext,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Login { username, password }) => handle_login(&ctx, &username, &password),
        Some(Commands::Logout) => handle_logout(&ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Dashboard) | None => handle_dashboard(&ctx),
        Some(Commands::Client { action }) => match action {
            ClientCommands::List => handle_client_list(&ctx),
            ClientCommands::Add {
                name,
                email,
                phone,
                status,
            } => handle_client_add(&mut ctx, name, email, phone, status),
            ClientCommands::Edit {
                id,
                name,
                email,
                phone,
                status,
            } => handle_client_edit(
                &mut ctx,
                id,
                ClientPatch {
                    name,
                    email,
                    phone,
                    status,
                },
            ),
            ClientCommands::Delete { id, yes } => handle_client_delete(&mut ctx, id, yes),
        },
        Some(Commands::Product { action }) => match action {
            ProductCommands::List => handle_product_list(&ctx),
        },
        Some(Commands::Sale { action }) => match action {
            SaleCommands::List => handle_sale_list(&ctx),
            SaleCommands::Add {
                client,
                product,
                quantity,
                payment,
                status,
            } => handle_sale_add(&mut ctx, client, product, &quantity, payment, status),
            SaleCommands::Edit {
                id,
                client,
                product,
                quantity,
                payment,
                status,
            } => {
                let quantity = quantity.as_deref().map(parse_quantity).transpose()?;
                handle_sale_edit(
                    &mut ctx,
                    id,
                    SalePatch {
                        client_id: client,
                        product_id: product,
                        quantity,
                        payment_method: payment,
                        status,
                    },
                )
            }
            SaleCommands::Delete { id, yes } => handle_sale_delete(&mut ctx, id, yes),
            SaleCommands::Clear { yes } => handle_sale_clear(&mut ctx, yes),
        },
        Some(Commands::Report { output }) => handle_report(&ctx, output.as_deref()),
        Some(Commands::Init) => handle_init(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone(), std::env::var_os(DATA_DIR_ENV))?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    let config = SalesdeskConfig::load(&data_dir)?;
    let render = RenderContext::new(
        config.currency.clone(),
        !cli.no_color && console::colors_enabled(),
    );
    let api = SalesdeskApi::open(FsBackend::new(data_dir.clone()), &config, data_dir)?;

    Ok(AppContext { api, render })
}

/// `--data-dir` wins, then `$SALESDESK_DATA`, then the platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>, env: Option<std::ffi::OsString>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = env.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "salesdesk", "salesdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SalesdeskError::Api("Could not determine a data directory".into()))
}

/// Prints what is about to be removed and waits for an explicit `Y`.
fn confirm(lines: &[String]) -> Result<bool> {
    for line in lines {
        println!("{}", line);
    }
    print!("[Y] To delete: ");
    io::stdout().flush().map_err(SalesdeskError::Io)?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(SalesdeskError::Io)?;
    Ok(input.trim() == "Y")
}

fn cancelled(ctx: &AppContext) -> Result<()> {
    print_messages(&[CmdMessage::info("Operation cancelled.")], &ctx.render);
    Ok(())
}

fn handle_login(ctx: &AppContext, username: &str, password: &str) -> Result<()> {
    let result = ctx.api.login(username, password)?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_logout(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.logout()?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.whoami()?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_dashboard(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.dashboard()?;
    if let Some(dashboard) = &result.dashboard {
        print!("{}", render_dashboard(dashboard, &ctx.render));
    }
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_client_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_clients()?;
    print!("{}", render_client_list(&result.clients, &ctx.render));
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_client_add(
    ctx: &mut AppContext,
    name: String,
    email: String,
    phone: String,
    status: PaymentStatus,
) -> Result<()> {
    let result = ctx.api.create_client(ClientForm {
        name,
        email,
        phone,
        status,
    })?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_client_edit(ctx: &mut AppContext, id: RecordId, patch: ClientPatch) -> Result<()> {
    let result = ctx.api.update_client(id, patch)?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_client_delete(ctx: &mut AppContext, id: RecordId, yes: bool) -> Result<()> {
    if !yes {
        if let Some(client) = ctx.api.get_client(id)? {
            let prompt = [
                "This will permanently remove the following client:".to_string(),
                format!("  {} {} <{}>", client.id, client.data.name, client.data.email),
            ];
            if !confirm(&prompt)? {
                return cancelled(ctx);
            }
        }
    }

    let result = ctx.api.delete_client(id)?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_product_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_products()?;
    print!("{}", render_product_list(&result.products, &ctx.render));
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_sale_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_sales()?;
    print!("{}", render_sale_list(&result.sales, &ctx.render));
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_sale_add(
    ctx: &mut AppContext,
    client_id: RecordId,
    product_id: RecordId,
    quantity: &str,
    payment_method: String,
    status: PaymentStatus,
) -> Result<()> {
    let form = SaleForm {
        client_id,
        product_id,
        quantity: parse_quantity(quantity)?,
        payment_method,
        status,
    };
    let result = ctx.api.create_sale(form)?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_sale_edit(ctx: &mut AppContext, id: RecordId, patch: SalePatch) -> Result<()> {
    let result = ctx.api.update_sale(id, patch)?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_sale_delete(ctx: &mut AppContext, id: RecordId, yes: bool) -> Result<()> {
    if !yes {
        let listed = ctx.api.list_sales()?;
        if let Some(sale) = listed.sales.iter().find(|s| s.id == id) {
            let prompt = [
                "This will permanently remove the following sale:".to_string(),
                format!(
                    "  {} {} / {} / {}",
                    sale.id,
                    sale.client_name,
                    sale.product_name,
                    ctx.render.money(sale.total_value)
                ),
            ];
            if !confirm(&prompt)? {
                return cancelled(ctx);
            }
        }
    }

    let result = ctx.api.delete_sale(id)?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_sale_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        let count = ctx
            .api
            .collection_len(Collection::Sales.name())?
            .unwrap_or(0);
        if count > 0 {
            let prompt = [format!(
                "This will permanently remove all {} sale(s). This cannot be undone.",
                count
            )];
            if !confirm(&prompt)? {
                return cancelled(ctx);
            }
        }
    }

    let result = ctx.api.clear_sales()?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_report(ctx: &AppContext, output: Option<&Path>) -> Result<()> {
    let result = ctx.api.report()?;
    let Some(report) = &result.report else {
        return Ok(());
    };

    match output {
        Some(path) => {
            std::fs::write(path, render_report(report, &ctx.render.plain()))
                .map_err(SalesdeskError::Io)?;
            print_messages(
                &[CmdMessage::success(format!(
                    "Report written to {}",
                    path.display()
                ))],
                &ctx.render,
            );
        }
        None => print!("{}", render_report(report, &ctx.render)),
    }
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match key.as_deref() {
        None => ConfigAction::ShowAll,
        Some(name) => match ConfigKey::parse(name) {
            Some(key) => match value {
                Some(v) => ConfigAction::Set(key, v),
                None => ConfigAction::ShowKey(key),
            },
            None => {
                let known: Vec<_> = ConfigKey::ALL.iter().map(|k| k.name()).collect();
                print_messages(
                    &[CmdMessage::warning(format!(
                        "Unknown config key: {} (known keys: {})",
                        name,
                        known.join(", ")
                    ))],
                    &ctx.render,
                );
                return Ok(());
            }
        },
    };

    let show_all = action == ConfigAction::ShowAll;
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config, &ctx.render));
        }
    }
    print_messages(&result.messages, &ctx.render);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment() {
        let dir = resolve_data_dir(Some(PathBuf::from("/flag")), Some("/env".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/flag"));
    }

    #[test]
    fn environment_beats_platform_default() {
        let dir = resolve_data_dir(None, Some("/env".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/env"));
    }

    #[test]
    fn empty_environment_is_ignored() {
        let dir = resolve_data_dir(None, Some("".into()));
        if let Ok(dir) = dir {
            assert_ne!(dir, PathBuf::from(""));
        }
    }
}
