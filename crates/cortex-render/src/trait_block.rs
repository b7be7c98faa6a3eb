use crate::die::{DieProps, DisplaySize, render_die};
use crate::dom::{Element, Node};
use cortex_core::{DieFace, SheetConfig, Trait};
use regex::Regex;

fn die_token_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\[(d4|d6|d8|d10|d12|pp)\]").expect("valid regex"))
}

/// Die sizes picked from `dice.ratingSize` / `dice.inlineSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieSizes {
    pub rating: DisplaySize,
    pub inline: DisplaySize,
}

impl DieSizes {
    pub fn from_config(config: &SheetConfig) -> Self {
        let size = |path: &str, fallback: DisplaySize| {
            config
                .get_str(path)
                .and_then(DisplaySize::from_name)
                .unwrap_or(fallback)
        };
        Self {
            rating: size("dice.ratingSize", DisplaySize::Medium),
            inline: size("dice.inlineSize", DisplaySize::Small),
        }
    }
}

impl Default for DieSizes {
    fn default() -> Self {
        Self {
            rating: DisplaySize::Medium,
            inline: DisplaySize::Small,
        }
    }
}

pub fn render_trait(t: &Trait, container: &mut Element, sizes: DieSizes) {
    container.create_el("h3").append(Node::text(&t.title));

    if let Some(sfx) = &t.sfx {
        for (label, text) in sfx {
            container.append(paragraph_with_symbols(label, text, sizes.inline));
        }
    }

    let ratings_el = container.create_el("div");
    ratings_el.add_class("cortex-ratings");
    for (label, rating) in &t.ratings {
        let row = ratings_el.create_el("div");
        row.add_class("cortex-rating");

        let mut label_el = Element::new("div").with_class("label").with_text(label);
        if let Some(description) = &rating.description {
            label_el.set_attr("title", description);
        }
        row.append(label_el);

        let die_el = row.create_el("div");
        die_el.add_class("die");
        let props = DieProps::new(rating.die_rating).with_size(sizes.rating);
        if let Some(node) = render_die(&props) {
            die_el.append(node);
        }
    }
}

/// `<p>` with a bold label and the text, where `[d4]`…`[d12]` and `[pp]` become inline dice.
pub fn paragraph_with_symbols(label: &str, text: &str, size: DisplaySize) -> Element {
    let mut paragraph = Element::new("p");
    paragraph
        .create_el("strong")
        .append(Node::text(format!("{label}: ")));

    let mut last = 0;
    for caps in die_token_regex().captures_iter(text) {
        let (Some(token), Some(kind)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_text_span(&mut paragraph, &text[last..token.start()]);

        let span = paragraph.create_el("span");
        if let Some(face) = token_face(kind.as_str()) {
            if let Some(node) = render_die(&DieProps::new(face).with_size(size)) {
                span.append(node);
            }
        }
        last = token.end();
    }
    push_text_span(&mut paragraph, &text[last..]);

    paragraph
}

fn push_text_span(paragraph: &mut Element, segment: &str) {
    if segment.is_empty() {
        return;
    }
    paragraph
        .create_el("span")
        .append(Node::text(segment));
}

fn token_face(kind: &str) -> Option<DieFace> {
    match kind.to_ascii_lowercase().as_str() {
        "d4" => Some(DieFace::D4),
        "d6" => Some(DieFace::D6),
        "d8" => Some(DieFace::D8),
        "d10" => Some(DieFace::D10),
        "d12" => Some(DieFace::D12),
        "pp" => Some(DieFace::PlotPoint),
        _ => None,
    }
}
