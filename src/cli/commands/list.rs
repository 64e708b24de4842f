use crate::{
    cli::{CommandResult, formatting::format_rows},
    services::MixerService,
};

/// Renders every row, as a table or as a JSON array
pub fn execute(service: &MixerService, json: bool) -> CommandResult {
    let rows = service.model().rows();

    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    if rows.is_empty() {
        return Ok("No audio devices found".to_string());
    }
    Ok(format_rows(&rows))
}
