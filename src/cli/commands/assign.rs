use crate::cli::client::ApiClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn handle(
    student_id: u32,
    subject_id: u32,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let response = client
        .post(&format!("subjects/assign/{}/{}", student_id, subject_id), None)
        .await?;
    let message = response["message"]
        .as_str()
        .unwrap_or("Subject assigned successfully")
        .to_string();
    output_success(
        output_format,
        &format!("{} (student {}, subject {})", message, student_id, subject_id),
        None,
    )
}
