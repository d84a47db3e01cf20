use nikki_core::MangaPrompt;

const DEFAULT_STYLE: &str = "manga style";

/// Instruction for lesson generation
pub fn reflect_prompt(entry: &str, level: &str) -> String {
    format!(
        "You are a Japanese Manga Tutor.\n\
         Analyze the user's journal entry: \"{entry}\"\n\
         Level: {level}\n\
         \n\
         Create a short 4-panel manga script and lesson based on this.\n\
         - Script: 4 panels of dialogue in Japanese, Romaji, and English.\n\
         - Teaching: Overview, Vocab list, and a Quiz.\n\
         - Manga Prompt: Detailed visual descriptions for an image generator.\n"
    )
}

/// Instruction for drawing a page of `panel_count` panels
pub fn image_prompt(prompt: &MangaPrompt, panel_count: usize) -> String {
    let style = match prompt.style.trim() {
        "" => DEFAULT_STYLE,
        style => style,
    };

    let characters = prompt
        .characters
        .iter()
        .map(|c| format!("{} ({})", c.name, c.description))
        .collect::<Vec<_>>()
        .join(", ");

    let layout: String = prompt
        .panel_descriptions
        .iter()
        .map(|p| format!("Panel {}: {} (Dialogue: {})\n", p.panel, p.visual, p.dialogue))
        .collect();

    format!(
        "Draw a single manga page with {panel_count} panels.\n\
         Style: {style}\n\
         Characters: {characters}\n\
         \n\
         Layout:\n\
         {layout}\n\
         Ensure the text bubbles are placed but can be empty or have simulated text.\n\
         High quality, clean line art.\n"
    )
}
