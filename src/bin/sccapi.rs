//! Security and Compliance Center CLI binary.
//!
//! A command-line interface for interacting with the Security and
//! Compliance Center API.

use clap::Parser;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use sccapi::cli::{Cli, Command, Entity};
use sccapi::output::PrettyPrint;
use sccapi::{
    AccountApi, Attachment, AttachmentCollection, ControlLibrary,
    CreateScanOptions, DeleteCustomControlLibraryOptions, DeleteCustomProfileOptions,
    DeleteProfileAttachmentOptions, GetControlLibraryOptions, GetProfileAttachmentOptions,
    GetProfileOptions, GetSettingsOptions, InstanceApi, ListAllAttachmentsOptions,
    ListAttachmentsOptions, ListControlLibrariesOptions, ListProfilesOptions, Paginated, Profile,
    ProfileCollection, SccClient, SccError, CORRELATION_ID_HEADER,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

/// The surface every command is sent through.
enum Surface<'a> {
    Account(AccountApi<'a>),
    Instance(InstanceApi<'a>),
}

/// Run the same operation on whichever surface is selected.
macro_rules! on_surface {
    ($surface:expr, $api:ident => $call:expr) => {
        match $surface {
            Surface::Account($api) => $call,
            Surface::Instance($api) => $call,
        }
    };
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "sccapi=debug" } else { "sccapi=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let mut client = match SccClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set SCC_AUTH_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref id) = cli.correlation_id {
        match HeaderValue::from_str(id) {
            Ok(value) => {
                let mut headers = HeaderMap::new();
                headers.insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
                client.set_default_headers(headers);
            }
            Err(_) => {
                eprintln!("Error: invalid correlation id");
                return ExitCode::FAILURE;
            }
        }
    }

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let SccError::Api {
                trace: Some(ref trace),
                ..
            } = e
            {
                eprintln!("Trace: {trace}");
            }
            if let SccError::Validation {
                field: "profile", ..
            } = e
            {
                eprintln!("Hint: Use '--profile <id>' to select the attachment's profile");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &SccClient, cli: Cli) -> sccapi::Result<()> {
    let surface = match cli.instance {
        Some(id) => Surface::Instance(client.instance(id)),
        None => Surface::Account(client.account()),
    };

    match cli.command {
        Command::Get {
            entity,
            id,
            profile,
        } => handle_get(&surface, entity, &id, profile.as_deref(), cli.json).await,
        Command::List {
            entity,
            limit,
            start,
            profile,
        } => handle_list(&surface, entity, limit, start, profile, cli.json).await,
        Command::Delete {
            entity,
            id,
            profile,
        } => handle_delete(&surface, entity, &id, profile.as_deref(), cli.json).await,
        Command::Scan { attachment_id } => {
            let options = CreateScanOptions::new(attachment_id);
            let response = on_surface!(&surface, api => api.create_scan(&options).await)?;
            output_single(response.result.as_ref(), cli.json)
        }
        Command::Settings => {
            let options = GetSettingsOptions::default();
            let response = on_surface!(&surface, api => api.get_settings(&options).await)?;
            output_single(response.result.as_ref(), cli.json)
        }
    }
}

fn require_profile(profile: Option<&str>) -> sccapi::Result<&str> {
    profile.ok_or(SccError::validation("profile", "required for attachments"))
}

async fn handle_get(
    surface: &Surface<'_>,
    entity: Entity,
    id: &str,
    profile: Option<&str>,
    json: bool,
) -> sccapi::Result<()> {
    match entity {
        Entity::ControlLibrary => {
            let options = GetControlLibraryOptions::new(id);
            let response = on_surface!(surface, api => api.get_control_library(&options).await)?;
            output_single(response.result.as_ref(), json)
        }
        Entity::Profile => {
            let options = GetProfileOptions::new(id);
            let response = on_surface!(surface, api => api.get_profile(&options).await)?;
            output_single(response.result.as_ref(), json)
        }
        Entity::Attachment => {
            let options = GetProfileAttachmentOptions::new(require_profile(profile)?, id);
            let response =
                on_surface!(surface, api => api.get_profile_attachment(&options).await)?;
            output_single(response.result.as_ref(), json)
        }
    }
}

async fn handle_list(
    surface: &Surface<'_>,
    entity: Entity,
    limit: Option<i64>,
    start: Option<String>,
    profile: Option<String>,
    json: bool,
) -> sccapi::Result<()> {
    match entity {
        Entity::ControlLibrary => {
            let options = ListControlLibrariesOptions {
                limit,
                start,
                ..Default::default()
            };
            let response =
                on_surface!(surface, api => api.list_control_libraries(&options).await)?;
            let page = response.result.unwrap_or_default();
            output_page(&page, page_items(&page.control_libraries), json, |l| LibraryRow::from(l))
        }
        Entity::Profile => {
            let options = ListProfilesOptions {
                limit,
                start,
                ..Default::default()
            };
            let response = on_surface!(surface, api => api.list_profiles(&options).await)?;
            let page: ProfileCollection = response.result.unwrap_or_default();
            output_page(&page, page_items(&page.profiles), json, |p| ProfileRow::from(p))
        }
        Entity::Attachment => {
            let response = match profile {
                Some(profile_id) => {
                    let options = ListAttachmentsOptions {
                        limit,
                        start,
                        ..ListAttachmentsOptions::new(profile_id)
                    };
                    match surface {
                        Surface::Account(api) => api.list_attachments(&options).await?,
                        Surface::Instance(api) => api.list_profile_attachments(&options).await?,
                    }
                }
                None => {
                    let options = ListAllAttachmentsOptions {
                        limit,
                        start,
                        ..Default::default()
                    };
                    match surface {
                        Surface::Account(api) => api.list_all_attachments(&options).await?,
                        Surface::Instance(api) => api.list_attachments(&options).await?,
                    }
                }
            };
            let page: AttachmentCollection = response.result.unwrap_or_default();
            output_page(&page, page_items(&page.attachments), json, |a| AttachmentRow::from(a))
        }
    }
}

async fn handle_delete(
    surface: &Surface<'_>,
    entity: Entity,
    id: &str,
    profile: Option<&str>,
    json: bool,
) -> sccapi::Result<()> {
    match entity {
        Entity::ControlLibrary => {
            let options = DeleteCustomControlLibraryOptions::new(id);
            let response =
                on_surface!(surface, api => api.delete_custom_control_library(&options).await)?;
            output_single(response.result.as_ref(), json)
        }
        Entity::Profile => {
            let options = DeleteCustomProfileOptions::new(id);
            let response = on_surface!(surface, api => api.delete_custom_profile(&options).await)?;
            output_single(response.result.as_ref(), json)
        }
        Entity::Attachment => {
            let options = DeleteProfileAttachmentOptions::new(require_profile(profile)?, id);
            let response =
                on_surface!(surface, api => api.delete_profile_attachment(&options).await)?;
            output_single(response.result.as_ref(), json)
        }
    }
}

fn page_items<T>(items: &Option<Vec<T>>) -> &[T] {
    items.as_deref().unwrap_or_default()
}

fn output_single<T: Serialize + PrettyPrint>(item: Option<&T>, json: bool) -> sccapi::Result<()> {
    match item {
        Some(item) if json => println!("{}", serde_json::to_string_pretty(item)?),
        Some(item) => println!("{}", item.pretty_print()),
        None => eprintln!("(empty response)"),
    }
    Ok(())
}

fn output_page<P, T, R, F>(page: &P, items: &[T], json: bool, to_row: F) -> sccapi::Result<()>
where
    P: Paginated,
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        let total = page
            .total_count()
            .map(|t| format!("{t} total"))
            .unwrap_or_else(|| format!("{} shown", items.len()));
        match page.next_start() {
            Some(start) => println!("\n{total} (next page: --start {start})"),
            None => println!("\n{total} (end)"),
        }
    }
    Ok(())
}

// Table row types for non-JSON output

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Tabled)]
struct LibraryRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    library_type: String,
    version: String,
    controls: String,
}

impl From<&ControlLibrary> for LibraryRow {
    fn from(l: &ControlLibrary) -> Self {
        Self {
            id: cell(&l.id),
            name: cell(&l.control_library_name),
            library_type: cell(&l.control_library_type),
            version: cell(&l.control_library_version),
            controls: l.controls_count.map(|c| c.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ProfileRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    profile_type: String,
    version: String,
    attachments: String,
}

impl From<&Profile> for ProfileRow {
    fn from(p: &Profile) -> Self {
        Self {
            id: cell(&p.id),
            name: cell(&p.profile_name),
            profile_type: cell(&p.profile_type),
            version: cell(&p.profile_version),
            attachments: p.attachments_count.map(|c| c.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct AttachmentRow {
    id: String,
    name: String,
    profile: String,
    status: String,
    schedule: String,
}

impl From<&Attachment> for AttachmentRow {
    fn from(a: &Attachment) -> Self {
        Self {
            id: cell(&a.id),
            name: cell(&a.name),
            profile: cell(&a.profile_id),
            status: cell(&a.status),
            schedule: cell(&a.schedule),
        }
    }
}
