use nikki::LessonService;

use super::{print_json, require_entry};
use crate::error::CliError;

pub async fn run_reflect(service: &LessonService, entry: &str, level: &str) -> Result<(), CliError> {
    let entry = require_entry(entry)?;
    let reflection = service.reflect(entry, level).await?;
    print_json(&reflection)
}
