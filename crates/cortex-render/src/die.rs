use crate::catalog::{self, DieGlyph};
use crate::dom::{Element, Node, SVG_NAMESPACE};
use crate::{Error, Result};
use cortex_core::DieFace;

const DEFAULT_FONT_SIZE: &str = "15px";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Unrolled,
    Selected,
    Effect,
    Ignored,
    Hitch,
    PlotPoint,
}

impl DisplayMode {
    /// Plot points default to their own mode; every other face starts unrolled.
    pub fn for_face(face: DieFace) -> Self {
        if face.is_plot_point() {
            Self::PlotPoint
        } else {
            Self::Unrolled
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unrolled => "unrolled",
            Self::Selected => "selected",
            Self::Effect => "effect",
            Self::Ignored => "ignored",
            Self::Hitch => "hitch",
            Self::PlotPoint => "plot-point",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplaySize {
    Small,
    #[default]
    Medium,
    Large,
}

impl DisplaySize {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieProps {
    pub face: DieFace,
    pub mode: DisplayMode,
    pub size: DisplaySize,
    /// What the glyph shows; usually the face itself.
    pub value: DieFace,
}

impl DieProps {
    pub fn new(face: DieFace) -> Self {
        Self {
            face,
            mode: DisplayMode::for_face(face),
            size: DisplaySize::default(),
            value: face,
        }
    }

    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_size(mut self, size: DisplaySize) -> Self {
        self.size = size;
        self
    }

    pub fn with_value(mut self, value: DieFace) -> Self {
        self.value = value;
        self
    }
}

pub fn label(mode: DisplayMode, face: DieFace, value: DieFace) -> String {
    match mode {
        DisplayMode::Unrolled => format!("A d{face}"),
        DisplayMode::Selected => format!("A selected d{face} with value {value}"),
        DisplayMode::Effect => format!("A d{face} effect die"),
        DisplayMode::Hitch => format!("A d{face} Hitch"),
        DisplayMode::PlotPoint => "A Plot Point".to_string(),
        DisplayMode::Ignored => format!("A d{face} with value {value}"),
    }
}

/// Renders a die, logging and returning `None` when the face has no catalog entry.
pub fn render_die(props: &DieProps) -> Option<Node> {
    match try_render_die(props) {
        Ok(node) => Some(node),
        Err(err) => {
            tracing::error!(error = %err, "die not rendered");
            None
        }
    }
}

pub fn try_render_die(props: &DieProps) -> Result<Node> {
    if props.face.is_unrated() {
        return Ok(Element::new("span")
            .with_class("no-rating")
            .with_text("-")
            .into());
    }

    let glyph =
        catalog::lookup(props.face).ok_or(Error::MissingGlyph { face: props.face })?;
    Ok(die_svg(glyph, props).into())
}

fn die_svg(glyph: &DieGlyph, props: &DieProps) -> Element {
    // A numeric value inside a plot point (a stepped-down "Hinder" die) keeps only the outer
    // circle and prints the value.
    let hinder = props.face.is_plot_point() && !props.value.is_plot_point();
    let paths = if hinder {
        &glyph.paths[..1]
    } else {
        glyph.paths
    };
    let show_text = hinder || !glyph.no_text;

    let mut svg = Element::svg("svg")
        .with_class("die")
        .with_class(props.mode.as_str())
        .with_class(props.size.as_str())
        .with_attr("xmlns", SVG_NAMESPACE)
        .with_attr("viewBox", glyph.view_box)
        .with_attr("role", "img")
        .with_attr("aria-label", label(props.mode, props.face, props.value));

    let group = svg.create_el("g");
    if let Some(clip) = glyph.clip_path {
        group.set_attr("clip-path", format!("url(#{})", clip.id));
    }
    for d in paths {
        group.create_el("path").set_attr("d", *d);
    }
    if show_text {
        let text = group.create_el("text");
        text.set_attr("text-anchor", "middle");
        text.set_attr("font-size", glyph.text.font_size.unwrap_or(DEFAULT_FONT_SIZE));
        text.set_attr("font-weight", "bold");
        text.set_attr("aria-hidden", "true");
        text.set_attr("x", glyph.text.x.to_string());
        text.set_attr("y", glyph.text.y.to_string());
        text.append(Node::text(props.value.to_string()));
    }

    if let Some(clip) = glyph.clip_path {
        let clip_el = svg.create_el("defs").create_el("clipPath");
        clip_el.set_attr("id", clip.id);
        let rect = clip_el.create_el("rect");
        rect.set_attr("width", clip.width.to_string());
        rect.set_attr("height", clip.height.to_string());
        rect.set_attr("fill", "white");
    }

    svg
}
