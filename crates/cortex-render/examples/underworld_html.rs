use cortex_core::{SheetConfig, TemplateKind};

fn main() {
    let block = TemplateKind::Underworld.stat_block();
    let sheet = cortex_render::render_stat_block(&block, &SheetConfig::default());
    println!("{}", sheet.to_html());
}
