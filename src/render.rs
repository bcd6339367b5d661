use crate::{
    breakpoints::{Breakpoint, BreakpointTable},
    diff::MediaQueryMap,
    extract::StyleRecord,
};

/// What goes inside `@media (min-width: ...)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaLabel {
    /// The tier's minimum width, e.g. `1440px`.
    #[default]
    Width,
    /// The tier's name verbatim, e.g. a preprocessor variable like `$desktop-breakpoint-md`.
    Name,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOpts {
    pub media_label: MediaLabel,
}

/// Render per-tier diffs as one CSS text.
///
/// The table's base tier becomes a commented plain block; every other tier is wrapped in a
/// `min-width` media query. Each block is followed by a blank line.
pub fn render_css(map: &MediaQueryMap, table: &BreakpointTable, opts: &RenderOpts) -> String {
    let mut css = String::new();
    for tier in map.tiers() {
        if table.is_base(&tier.breakpoint.name) {
            write_base_block(&mut css, &tier.breakpoint, &tier.changes);
        } else {
            write_media_block(&mut css, &tier.breakpoint, &tier.changes, opts.media_label);
        }
    }
    css
}

fn write_base_block(css: &mut String, bp: &Breakpoint, decls: &StyleRecord) {
    css.push_str(&format!("/* Base styles ({}px) */\n", bp.min_width));
    for (prop, value) in decls.iter() {
        css.push_str(&format!("{prop}: {value};\n"));
    }
    css.push('\n');
}

fn write_media_block(css: &mut String, bp: &Breakpoint, decls: &StyleRecord, label: MediaLabel) {
    let condition = match label {
        MediaLabel::Width => format!("{}px", bp.min_width),
        MediaLabel::Name => bp.name.clone(),
    };
    css.push_str(&format!("@media (min-width: {condition}) {{\n"));
    for (prop, value) in decls.iter() {
        css.push_str(&format!("  {prop}: {value};\n"));
    }
    css.push_str("}\n\n");
}
