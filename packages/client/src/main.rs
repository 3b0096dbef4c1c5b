//! `hypertodo`: command-line client for the hypertodo API.
//!
//! Only the server root is configured; every other URL is discovered from
//! the resource map or from the `operations` attached to a todo.
//!
//! - **`resources`**: print the resource map.
//! - **`list`**: print every todo.
//! - **`show`** / **`status`**: print one todo (or its status) with its operations.
//! - **`create`**: create a todo.
//! - **`op`**: perform a named operation offered by a todo.
//! - **`demo`**: walk through fetch, `complete-todo`, then `change-task`.

use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use hypertodo_api::TodoId;
use hypertodo_client::{ClientConfig, ClientError, TodoClient, Values};
use serde::Serialize;

/// hypertodo: hypermedia todo client
///
/// Follows the links the server provides instead of hardcoding endpoints.
#[derive(Parser)]
#[command(name = "hypertodo", version, about, long_about = None)]
struct Cli {
    /// Root URL of the server.
    #[arg(long, env = "HYPERTODO_URL", default_value = ClientConfig::DEFAULT_ROOT_URL)]
    url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "HYPERTODO_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resource map served at the root.
    Resources,

    /// Print every todo, keyed by id.
    List,

    /// Print one todo together with its available operations.
    Show {
        /// Todo id, e.g. `todo3`.
        id: TodoId,
    },

    /// Print the status of one todo together with its available operations.
    Status {
        /// Todo id, e.g. `todo3`.
        id: TodoId,
    },

    /// Create a todo and print it.
    Create {
        /// Task text.
        task: String,
    },

    /// Perform an operation offered by a todo.
    ///
    /// Fetches the todo, looks up OPERATION in its `operations`, fills any
    /// templated fields from --set, and sends the request.
    ///
    /// Examples:
    ///   hypertodo op todo3 complete-todo
    ///   hypertodo op todo3 change-task --set task="Task name updated!"
    Op {
        /// Todo id, e.g. `todo3`.
        id: TodoId,

        /// Operation name, e.g. `complete-todo`.
        operation: String,

        /// Value for a templated field: NAME=VALUE. Repeatable.
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// Fetch a todo, mark it complete, then change its task.
    Demo {
        /// Todo to operate on.
        #[arg(default_value = "todo3")]
        id: TodoId,

        /// Replacement task text.
        #[arg(long, default_value = "Task name updated!")]
        task: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = ClientConfig::new(cli.url).with_timeout(Duration::from_secs(cli.timeout));

    if let Err(e) = run(&config, cli.command) {
        fatal(&e.to_string());
    }
}

fn run(config: &ClientConfig, command: Command) -> Result<(), ClientError> {
    let client = TodoClient::discover(config)?;

    match command {
        Command::Resources => print_json(client.resources()),

        Command::List => print_json(&client.list()?),

        Command::Show { id } => print_json(&client.get_todo(id)?),

        Command::Status { id } => print_json(&client.get_status(id)?),

        Command::Create { task } => print_json(&client.create(&task)?),

        Command::Op {
            id,
            operation,
            values,
        } => {
            let todo = client.get_todo(id)?;
            let values: Values = values.into_iter().collect();
            report(&operation, client.perform(&todo, &operation, &values)?)?;
        }

        Command::Demo { id, task } => {
            let todo = client.get_todo(id)?;
            println!("GET {id}:");
            print_json(&todo);

            report("complete-todo", client.perform(&todo, "complete-todo", &Values::new())?)?;

            let values = Values::from([("task".to_string(), task)]);
            report("change-task", client.perform(&todo, "change-task", &values)?)?;
        }
    }
    Ok(())
}

/// Print an operation's response status and body, whatever the status.
fn report(operation: &str, resp: reqwest::blocking::Response) -> Result<(), ClientError> {
    let status = resp.status();
    let text = resp.text()?;
    println!("{operation}: {status}");
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => print_json(&json),
        Err(_) if text.is_empty() => {}
        Err(_) => println!("{text}"),
    }
    Ok(())
}

/// Parse a `NAME=VALUE` pair for `--set`.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    if name.is_empty() {
        return Err(format!("empty name in {raw:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fatal(&format!("failed to render JSON: {e}")),
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("hypertodo: {}", msg);
    process::exit(2);
}
