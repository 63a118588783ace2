pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser, Debug)]
#[command(name = "classroom")]
#[command(about = "Classroom CLI - manage students, subjects and assignments over the Classroom API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "API base URL (defaults to CLASSROOM_API_URL or http://localhost:8000)")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "List, add, delete and restore students")]
    Students {
        #[command(subcommand)]
        cmd: commands::students::StudentCommands,
    },

    #[command(about = "List, add and delete subjects")]
    Subjects {
        #[command(subcommand)]
        cmd: commands::subjects::SubjectCommands,
    },

    #[command(about = "Assign a subject to a student")]
    Assign {
        #[arg(help = "Student (user) id")]
        student_id: u32,
        #[arg(help = "Subject id")]
        subject_id: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&client::resolve_base_url(cli.url), client::timeout_from_env())?;

    match cli.command {
        Commands::Students { cmd } => commands::students::handle(cmd, &client, output_format).await,
        Commands::Subjects { cmd } => commands::subjects::handle(cmd, &client, output_format).await,
        Commands::Assign { student_id, subject_id } => {
            commands::assign::handle(student_id, subject_id, &client, output_format).await
        }
    }
}
