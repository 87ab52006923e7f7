//! # Livestock Command Handler
//!
//! This module handles livestock commands: listing, creating, updating,
//! and deleting records through the herdbook HTTP API.

use crate::cli_utils;
use crate::http_utils::{ClientError, HerdbookClient};
use crate::livestock::LivestockCandidate;

const LIVESTOCK_USAGE: &str = "Usage: herdctl livestock <list|create|update|delete> [args...]";

/// Handles all livestock-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `client` - HTTP client for API communication
pub async fn handle_livestock_command(args: &[String], client: &HerdbookClient) {
    if args.is_empty() {
        cli_utils::exit_with_usage_error("No livestock subcommand specified", LIVESTOCK_USAGE);
    }
    match args[0].as_str() {
        "list" => handle_list(&args[1..], client).await,
        "create" => handle_create(&args[1..], client).await,
        "update" => handle_update(&args[1..], client).await,
        "delete" => handle_delete(&args[1..], client).await,
        other => cli_utils::exit_with_usage_error(
            &format!("Unknown livestock subcommand: {}", other),
            LIVESTOCK_USAGE,
        ),
    }
}

async fn handle_list(args: &[String], client: &HerdbookClient) {
    if !args.is_empty() {
        cli_utils::exit_with_usage_error("list takes no arguments", "Usage: herdctl livestock list");
    }
    match client.list_livestock().await {
        Ok(records) if records.is_empty() => println!("No livestock found"),
        Ok(records) => cli_utils::print_json_or_exit(&records, "livestock"),
        Err(e) => report_client_error(e, "Failed to list livestock"),
    }
}

async fn handle_create(args: &[String], client: &HerdbookClient) {
    if args.len() != 1 {
        cli_utils::exit_with_usage_error(
            "create takes exactly one JSON argument",
            "Usage: herdctl livestock create <json>",
        );
    }
    let candidate = parse_candidate_or_exit(&args[0]);
    match client.create_livestock(&candidate).await {
        Ok(record) => cli_utils::print_json_or_exit(&record, "livestock"),
        Err(e) => report_client_error(e, "Failed to create livestock"),
    }
}

async fn handle_update(args: &[String], client: &HerdbookClient) {
    if args.len() != 2 {
        cli_utils::exit_with_usage_error(
            "update takes an id and a JSON patch",
            "Usage: herdctl livestock update <id> <json>",
        );
    }
    let id = parse_id_or_exit(&args[0]);
    let patch = parse_candidate_or_exit(&args[1]);
    match client.update_livestock(id, &patch).await {
        Ok(record) => cli_utils::print_json_or_exit(&record, "livestock"),
        Err(e) => report_client_error(e, "Failed to update livestock"),
    }
}

async fn handle_delete(args: &[String], client: &HerdbookClient) {
    if args.len() != 1 {
        cli_utils::exit_with_usage_error(
            "delete takes exactly one id",
            "Usage: herdctl livestock delete <id>",
        );
    }
    let id = parse_id_or_exit(&args[0]);
    match client.delete_livestock(id).await {
        Ok(()) => println!("Deleted livestock {}", id),
        Err(e) => report_client_error(e, "Failed to delete livestock"),
    }
}

fn parse_id_or_exit(arg: &str) -> i64 {
    arg.parse()
        .unwrap_or_else(|_| cli_utils::exit_with_error(&format!("Invalid livestock id: {}", arg)))
}

fn parse_candidate_or_exit(arg: &str) -> LivestockCandidate {
    serde_json::from_str(arg)
        .unwrap_or_else(|e| cli_utils::exit_with_error(&format!("Invalid livestock JSON: {}", e)))
}

fn report_client_error(error: ClientError, context: &str) -> ! {
    match error {
        ClientError::Validation(violations) => {
            eprintln!("Error: {}: invalid submission", context);
            for violation in violations {
                eprintln!("  {}: {}", violation.field, violation.message);
            }
            std::process::exit(1);
        }
        other => cli_utils::exit_with_error(&format!("{}: {}", context, other)),
    }
}
