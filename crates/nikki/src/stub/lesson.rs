use async_trait::async_trait;
use nikki_core::{
    Character, MangaPrompt, Overview, Panel, PanelVisual, ProcessorMetadata, Quiz, Reflector,
    ReflectionResponse, Result, Script, Teaching, Vocab,
};

/// Serves the fixed jogging lesson
#[derive(Debug, Clone, Copy, Default)]
pub struct StubReflector;

#[async_trait]
impl Reflector for StubReflector {
    async fn reflect(&self, entry: &str, level: &str) -> Result<ReflectionResponse> {
        Ok(jogging_lesson(entry, level))
    }

    fn metadata(&self) -> ProcessorMetadata {
        ProcessorMetadata::new("stub", "Fixed four-panel jogging lesson")
    }
}

fn panel(index: u32, speaker: &str, jp: &str, romaji: &str, en: &str, note: &str) -> Panel {
    Panel {
        panel: index,
        speaker: speaker.to_string(),
        jp: jp.to_string(),
        romaji: romaji.to_string(),
        en: en.to_string(),
        note: note.to_string(),
    }
}

fn vocab(word: &str, reading: &str, romaji: &str, meaning: &str) -> Vocab {
    Vocab {
        word: word.to_string(),
        reading: reading.to_string(),
        romaji: romaji.to_string(),
        meaning: meaning.to_string(),
    }
}

fn quiz(question: &str, options: [&str; 4], answer_index: usize, explanation: &str) -> Quiz {
    Quiz {
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer_index,
        explanation: explanation.to_string(),
    }
}

fn character(name: &str, description: &str) -> Character {
    Character {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn panels() -> Vec<Panel> {
    vec![
        panel(
            1,
            "You",
            "今日は公園でジョギングしました。",
            "Kyou wa kouen de jogingu shimashita.",
            "I went jogging in the park today.",
            "～しました (past tense).",
        ),
        panel(
            2,
            "Friend",
            "すごい！毎日運動しているの？",
            "Sugoi! Mainichi undou shite iru no?",
            "Nice! Do you exercise every day?",
            "～しているの？ for gently asking about habits.",
        ),
        panel(
            3,
            "You",
            "いいえ、まだ週に二回だけです。",
            "Iie, mada shuu ni nikai dake desu.",
            "No, only twice a week for now.",
            "だけ limits the amount (only).",
        ),
        panel(
            4,
            "Friend",
            "でも続けたらきっと上手くなるよ。",
            "Demo tsuzuketara kitto umaku naru yo.",
            "Keep at it and you’ll get better.",
            "～たら for if/when conditionals.",
        ),
    ]
}

const VISUALS: [&str; 4] = [
    "Morning jog in a city park, trees and path, character breathing lightly.",
    "Friend joins, encouraging expression, both stretching together.",
    "Close-up, character smiling shyly and shaking head.",
    "Both jogging side by side with a bright atmosphere.",
];

/// The fixed lesson. Only the overview's level and entry excerpt depend on
/// the input.
pub fn jogging_lesson(entry: &str, level: &str) -> ReflectionResponse {
    let panels = panels();

    let panel_descriptions = panels
        .iter()
        .zip(VISUALS)
        .map(|(panel, visual)| PanelVisual {
            panel: panel.panel,
            visual: visual.to_string(),
            dialogue: panel.jp.clone(),
        })
        .collect();

    let vocab = vec![
        vocab("運動", "うんどう", "undou", "exercise / movement"),
        vocab("続ける", "つづける", "tsuzukeru", "to continue"),
        vocab("週に二回", "しゅう に にかい", "shuu ni nikai", "twice a week"),
    ];

    let quiz = vec![
        quiz(
            "「続けたら」はどんな意味ですか？",
            [
                "If you continue",
                "If you stop",
                "When you start",
                "Unless you try",
            ],
            0,
            "たら can mean if/when; here it is encouragement for the future if you keep going.",
        ),
        quiz(
            "「だけ」のニュアンスは？",
            [
                "Emphasizing a large amount",
                "Limiting to only that amount",
                "Expressing surprise",
                "Asking a question",
            ],
            1,
            "だけ limits the amount: only twice a week.",
        ),
    ];

    let overview = Overview {
        summary_en: "A short conversation about jogging regularly and encouraging consistency."
            .to_string(),
        level: level.to_string(),
        based_on_entry: Overview::excerpt(entry),
    };

    let manga_prompt = MangaPrompt {
        style: "black and white manga, soft screentones, clean line art".to_string(),
        characters: vec![
            character("You", "Learner, casual sportswear, optimistic"),
            character("Friend", "Supportive friend, athletic, cheerful"),
        ],
        panel_descriptions,
        dialogue: panels.iter().map(|p| p.jp.clone()).collect(),
    };

    ReflectionResponse {
        script: Script {
            panels: panels.clone(),
        },
        teaching: Teaching {
            overview,
            lines: panels,
            vocab,
            quiz,
        },
        manga_prompt,
    }
}
