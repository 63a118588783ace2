use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    #[command(about = "List students with their contacts")]
    List,

    #[command(about = "Add a student")]
    Add {
        #[arg(help = "First name (letters only)")]
        first_name: String,
        #[arg(help = "Last name")]
        last_name: Option<String>,
    },

    #[command(about = "Soft delete a student")]
    Delete {
        #[arg(help = "Student id")]
        id: u32,
    },

    #[command(about = "Restore a soft deleted student")]
    Restore {
        #[arg(help = "Student id")]
        id: u32,
    },
}

pub async fn handle(cmd: StudentCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        StudentCommands::List => {
            let response = client.get("users").await?;
            let rows = response["data"]["rows"].as_array().cloned().unwrap_or_default();

            if rows.is_empty() {
                return output_empty_collection(output_format, "students", "No students found");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "students": rows }))?);
                }
                OutputFormat::Text => {
                    println!("{}", format_table(&["ID", "NAME", "CONTACTS"], &student_rows(&rows)));
                }
            }
            Ok(())
        }
        StudentCommands::Add { first_name, last_name } => {
            let response = client
                .post("users", Some(json!({ "first_name": first_name, "last_name": last_name })))
                .await?;
            let created = response["data"].clone();
            output_success(
                output_format,
                &format!("Added student {} ({})", cell(created.get("full_name")), cell(created.get("id"))),
                Some(created),
            )
        }
        StudentCommands::Delete { id } => {
            client.delete(&format!("users/{}", id)).await?;
            output_success(output_format, &format!("Deleted student {}", id), None)
        }
        StudentCommands::Restore { id } => {
            let response = client.get(&format!("users/restore?id={}", id)).await?;
            output_success(
                output_format,
                &format!("Restored student {}", id),
                response.get("data").cloned(),
            )
        }
    }
}

fn student_rows(rows: &[Value]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|user| {
            let contacts = user["contacts"]
                .as_array()
                .map(|contacts| {
                    contacts
                        .iter()
                        .map(|c| cell(c.get("current_address")))
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .unwrap_or_default();
            vec![cell(user.get("id")), cell(user.get("full_name")), contacts]
        })
        .collect()
}
