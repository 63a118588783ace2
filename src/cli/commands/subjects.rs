use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum SubjectCommands {
    #[command(about = "List subjects with their students")]
    List,

    #[command(about = "Add a subject")]
    Add {
        #[arg(help = "Subject title")]
        title: String,
    },

    #[command(about = "Delete a subject")]
    Delete {
        #[arg(help = "Subject id")]
        id: u32,
    },
}

pub async fn handle(cmd: SubjectCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SubjectCommands::List => {
            let subjects = client.get("subjects").await?.as_array().cloned().unwrap_or_default();

            if subjects.is_empty() {
                return output_empty_collection(output_format, "subjects", "No subjects found");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "subjects": subjects }))?);
                }
                OutputFormat::Text => {
                    println!("{}", format_table(&["ID", "TITLE", "STUDENTS"], &subject_rows(&subjects)));
                }
            }
            Ok(())
        }
        SubjectCommands::Add { title } => {
            let created = client.post("subjects", Some(json!({ "title": title }))).await?;
            output_success(
                output_format,
                &format!("Added subject {} ({})", cell(created.get("title")), cell(created.get("id"))),
                Some(created),
            )
        }
        SubjectCommands::Delete { id } => {
            client.delete(&format!("subjects/{}", id)).await?;
            output_success(output_format, &format!("Deleted subject {}", id), None)
        }
    }
}

fn subject_rows(subjects: &[Value]) -> Vec<Vec<String>> {
    subjects
        .iter()
        .map(|subject| {
            let students = subject["users"]
                .as_array()
                .map(|users| {
                    users
                        .iter()
                        .map(|u| cell(u.get("first_name")))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            vec![cell(subject.get("id")), cell(subject.get("title")), students]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_list_student_first_names() {
        let rows = subject_rows(&[json!({
            "id": 2,
            "title": "Maths",
            "users": [{"first_name": "ADA"}, {"first_name": "GRACE"}]
        })]);
        assert_eq!(rows[0], vec!["2".to_string(), "Maths".to_string(), "ADA, GRACE".to_string()]);
    }
}
