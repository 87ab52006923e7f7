use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use herdbook::{cli_utils, commands::handle_livestock_command, http_utils};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Base URL of the herdbook API server")]
    base_url: String,
}

const USAGE: &str = r#"Usage: herdctl [options] <command> [args...]

Options:
  --base-url <url>     Base URL of the herdbook API server (default: http://localhost:3000)

Commands:
  livestock list                   List all livestock records
  livestock create <json>          Create a livestock record from a JSON object
  livestock update <id> <json>     Merge a JSON patch onto a livestock record
  livestock delete <id>            Delete a livestock record

The JSON object carries the wire fields: type, breed, age, healthStatus.
Example:
  herdctl livestock create '{"type":"cow","breed":"Holstein","age":3,"healthStatus":"good"}'"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (options, free) = Options::from_command_line_relaxed("USAGE: herdctl <command> [args...]");

    if free.is_empty() {
        cli_utils::exit_with_usage_error("No command specified", USAGE);
    }

    let base_url = if options.base_url.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        options.base_url
    };

    let client = http_utils::HerdbookClient::new(base_url);

    match free[0].as_str() {
        "livestock" => {
            handle_livestock_command(&free[1..], &client).await;
        }
        "help" => {
            println!("{}", USAGE);
        }
        command => {
            cli_utils::exit_with_usage_error(&format!("Unknown command: {}", command), USAGE);
        }
    }

    Ok(())
}
