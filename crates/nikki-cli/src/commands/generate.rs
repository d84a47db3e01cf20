use nikki::LessonService;
use std::path::Path;

use super::image::write_image;
use super::{print_json, require_entry};
use crate::error::CliError;

pub async fn run_generate(
    service: &LessonService,
    entry: &str,
    level: &str,
    out: Option<&Path>,
) -> Result<(), CliError> {
    let entry = require_entry(entry)?;
    let response = service.generate(entry, level).await?;

    if let Some(out) = out {
        write_image(&response.manga.image_data_url, out)?;
    }
    print_json(&response)
}
