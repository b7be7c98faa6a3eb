use crate::dom::{Element, Node};
use crate::trait_block::{DieSizes, render_trait};
use cortex_core::{LAYOUT_ONE_THIRD_TWO_THIRD, LayoutRegion, StatBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Heading followed by every trait, single column.
    #[default]
    Default,
    /// Header plus a left and a right region.
    OneThirdTwoThird,
}

impl Layout {
    /// Unknown identifiers fall back to [`Layout::Default`].
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some(LAYOUT_ONE_THIRD_TWO_THIRD) => Self::OneThirdTwoThird,
            _ => Self::Default,
        }
    }
}

pub fn render_stat_block(block: &StatBlock, container: &mut Element, sizes: DieSizes) {
    let layout = Layout::from_id(block.layout.as_deref());
    tracing::debug!(?layout, name = %block.name, traits = block.traits.len(), "rendering statblock");

    match layout {
        Layout::Default => render_default(block, container, sizes),
        Layout::OneThirdTwoThird => render_one_third_two_third(block, container, sizes),
    }
}

fn render_default(block: &StatBlock, container: &mut Element, sizes: DieSizes) {
    container.create_el("h2").append(Node::text(&block.name));
    for t in &block.traits {
        render_trait(t, container, sizes);
    }
}

fn render_one_third_two_third(block: &StatBlock, container: &mut Element, sizes: DieSizes) {
    let mut header = Element::new("div").with_class("header");
    let mut left = Element::new("div").with_class("left");
    let mut right = Element::new("div").with_class("right");

    header.create_el("h2").append(Node::text(&block.name));
    for t in &block.traits {
        match t.region() {
            LayoutRegion::Left => render_trait(t, &mut left, sizes),
            LayoutRegion::Right => render_trait(t, &mut right, sizes),
        }
    }

    container.append(
        Element::new("div")
            .with_class("layout-one-third-two-thirds")
            .with_child(header)
            .with_child(left)
            .with_child(right),
    );
}
