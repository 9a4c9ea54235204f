//! Application startup and command execution

use crate::app::cli::{Args, Command};
use crate::app::config::{load_manifest, HostManifest};
use crate::app::error::AppResult;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{init_logging, reconfigure_logging};
use crate::descriptor::api::{ItemDescriptor, OrganizationFolder};
use crate::host::api::{Host, HostResult};
use crate::output::api::RewindableFileWriter;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;
use std::sync::Arc;

/// Parse arguments, run the command and exit non-zero on failure
pub async fn startup() {
    let args = Args::parse();
    let use_color = args
        .color
        .unwrap_or_else(|| std::io::stdout().is_terminal());

    let log_file = args.log_file.as_ref().map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref().or(Some("warn")),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        std::process::exit(1);
    }

    log::debug!("orgfolder {}", crate::core::version::long_version());

    if let Err(e) = run(&args, use_color).await {
        log_error_with_context(&e, "Running orgfolder");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Build and start a host from the manifest, run the command, stop the host
pub async fn run(args: &Args, use_color: bool) -> AppResult<()> {
    let manifest = load_manifest(args.config.as_deref()).await?;
    if args.log_level.is_none() {
        apply_manifest_log_level(&manifest);
    }
    let host = Host::new();
    install_manifest(&host, &manifest).await?;
    host.start().await?;

    let result = execute(&host, &args.command, use_color);
    host.shutdown().await;
    result
}

/// Switch the running logger to the manifest's level, if it sets one
fn apply_manifest_log_level(manifest: &HostManifest) {
    let Some(level) = manifest.log_level.as_deref() else {
        return;
    };
    match reconfigure_logging(level) {
        Ok(()) => log::debug!("log level set to {} by manifest", level),
        Err(e) => log::warn!("Cannot apply manifest log level '{}': {}", level, e),
    }
}

/// Install every factory and provider the manifest declares
pub async fn install_manifest(host: &Host, manifest: &HostManifest) -> HostResult<()> {
    for factory in manifest.factories() {
        host.install_factory(factory).await?;
    }
    for provider in manifest.providers() {
        host.install_provider(Arc::new(provider)).await?;
    }
    log::info!(
        "installed {} factory(ies) and {} provider(s)",
        manifest.factory.len(),
        manifest.provider.len()
    );
    Ok(())
}

fn execute(host: &Host, command: &Command, use_color: bool) -> AppResult<()> {
    match command {
        Command::List {
            context,
            json,
            record,
            append,
        } => {
            let entries = host.new_item_entries(&context.to_context())?;
            let listing = if *json {
                render_json(&entries)?
            } else {
                render_table(&entries, use_color)
            };
            print!("{}", listing);

            if let Some(path) = record {
                let recorded = if *json {
                    listing
                } else {
                    render_table(&entries, false)
                };
                let writer = RewindableFileWriter::with_initial_append(path, *append);
                writer.write_bytes(recorded.as_bytes())?;
                writer.close()?;
                log::info!("listing recorded to {}", path.display());
            }
            Ok(())
        }
        Command::Create {
            descriptor_id,
            name,
            json,
        } => {
            let folder = host.create_item(descriptor_id, name)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&folder)?);
            } else {
                print!("{}", render_folder(&folder, use_color));
            }
            Ok(())
        }
    }
}

#[derive(Debug, Serialize)]
struct ListingEntry {
    id: String,
    display_name: String,
    description: String,
    category: String,
    icon: crate::descriptor::api::IconSpec,
}

/// Listing as a pretty-printed JSON array
pub fn render_json(entries: &[Arc<dyn ItemDescriptor>]) -> AppResult<String> {
    let rows: Vec<ListingEntry> = entries
        .iter()
        .map(|d| ListingEntry {
            id: d.id(),
            display_name: d.display_name(),
            description: d.description(),
            category: d.category_id(),
            icon: d.icon(),
        })
        .collect();
    Ok(format!("{}\n", serde_json::to_string_pretty(&rows)?))
}

/// Listing as aligned text, one descriptor per line
pub fn render_table(entries: &[Arc<dyn ItemDescriptor>], use_color: bool) -> String {
    if entries.is_empty() {
        return "No item descriptors available.\n".to_string();
    }

    let width = entries.iter().map(|d| d.id().len()).max().unwrap_or(0);
    let mut out = String::new();
    for descriptor in entries {
        let id = format!("{:<width$}", descriptor.id(), width = width);
        let category = format!("[{}]", descriptor.category_id());
        if use_color {
            out.push_str(&format!(
                "{}  {} {}\n",
                id.bold(),
                descriptor.display_name(),
                category.dimmed()
            ));
        } else {
            out.push_str(&format!(
                "{}  {} {}\n",
                id,
                descriptor.display_name(),
                category
            ));
        }
    }
    out
}

fn render_folder(folder: &OrganizationFolder, use_color: bool) -> String {
    let mut out = if use_color {
        format!("{} {}\n", "Created".green().bold(), folder.name.bold())
    } else {
        format!("Created {}\n", folder.name)
    };
    if folder.navigators.is_empty() {
        out.push_str("  (no navigators)\n");
    }
    for navigator in &folder.navigators {
        out.push_str(&format!(
            "  navigator: {} ({})\n",
            navigator.provider_id,
            navigator.name.as_deref().unwrap_or("-")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::parse_manifest;
    use crate::descriptor::api::{Context, GenericDescriptor, ORGANIZATION_FOLDER_ID};
    use std::path::Path;

    const MANIFEST: &str = r#"
[[factory]]
id = "workflow-multibranch"
display_name = "Multibranch Pipeline"

[[provider]]
id = "github"
display_name = "GitHub Organization"
"#;

    #[tokio::test]
    async fn test_install_manifest_then_start() {
        let manifest = parse_manifest(MANIFEST, Path::new("m.toml")).unwrap();
        let host = Host::new();

        install_manifest(&host, &manifest).await.unwrap();
        host.start().await.unwrap();

        assert_eq!(
            host.registry().delegating_ids().unwrap(),
            vec!["organization-folder.github".to_string()]
        );
        let folder = host
            .create_item("organization-folder.github", "acme")
            .unwrap();
        assert!(render_folder(&folder, false).contains("navigator: github (acme)"));
        host.shutdown().await;
    }

    #[test]
    fn test_render_table_aligns_ids() {
        let entries: Vec<Arc<dyn ItemDescriptor>> = vec![Arc::new(GenericDescriptor)];

        let table = render_table(&entries, false);

        assert!(table.starts_with(ORGANIZATION_FOLDER_ID));
        assert!(table.contains("Organization Folder [nested-projects]"));
        assert_eq!(render_table(&[], false), "No item descriptors available.\n");
    }

    #[test]
    fn test_render_json_lists_fields() {
        let entries: Vec<Arc<dyn ItemDescriptor>> = vec![Arc::new(GenericDescriptor)];

        let json = render_json(&entries).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["id"], ORGANIZATION_FOLDER_ID);
        assert_eq!(value[0]["category"], "nested-projects");
        assert_eq!(
            value[0]["icon"]["class_name"],
            "icon-branch-api-organization-folder"
        );
    }

    #[tokio::test]
    async fn test_generic_listed_outside_views() {
        let host = Host::new();
        host.start().await.unwrap();

        let entries = host
            .new_item_entries(&Context::ItemGroup {
                name: "root".to_string(),
            })
            .unwrap();

        assert_eq!(entries.len(), 1);
        host.shutdown().await;
    }
}
