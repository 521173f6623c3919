use label_press_render::{format_mm, LabelPlan};
use label_press::{Alignment, LayoutStyle, PaperSize};
use quick_xml::escape::escape;

use crate::qr::qr_svg;

/// Caption before the resolved size on the minimal layout's badge.
const SIZE_CAPTION: &str = "Размер";
/// Caption before the composition line.
const COMPOSITION_CAPTION: &str = "Состав";
/// Caption before the article number.
const ARTICLE_CAPTION: &str = "Арт";

/// Pixel value formatted for CSS with a trimmed fraction.
fn fmt_px(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_owned()
}

fn align_class(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Center => "align-center",
        Alignment::Left => "align-left",
    }
}

/// Stylesheet for the label's inner markup, shared by the preview document
/// and the print document. Sizing that depends on the plan is emitted as
/// inline styles; everything static lives here.
pub fn label_css() -> &'static str {
    "\
.label-header { display: flex; flex-direction: column; min-height: 0; }\n\
.label-header.align-center { align-items: center; text-align: center; }\n\
.label-header.align-left { align-items: flex-start; text-align: left; }\n\
.label-category { font-weight: 900; color: #94a3b8; line-height: 1; margin-bottom: 1px; }\n\
.label-name { font-weight: 900; color: #000; line-height: 1.05; overflow-wrap: break-word; hyphens: auto; }\n\
.label-size-badge { font-weight: 900; color: #0f172a; margin-top: 4px; background: #f8fafc; padding: 1px 8px; border-radius: 8px; border: 1px solid #e2e8f0; }\n\
.label-article { font-family: ui-monospace, monospace; font-weight: 700; color: #64748b; margin-top: 4px; }\n\
.label-content { min-height: 0; overflow: hidden; padding: 2px 0; display: flex; flex-direction: column; justify-content: center; }\n\
.label-content.align-center { align-items: center; }\n\
.label-content.align-left { align-items: flex-start; }\n\
.label-params-inline { display: flex; flex-wrap: wrap; column-gap: 8px; row-gap: 2px; font-weight: 700; color: #334155; line-height: 1.2; }\n\
.label-params-inline.align-center { justify-content: center; }\n\
.label-params-inline.align-left { justify-content: flex-start; }\n\
.label-params-grid { display: grid; column-gap: 12px; row-gap: 2px; }\n\
.label-params-grid.two-col { grid-template-columns: 1fr 1fr; }\n\
.label-params-grid.align-center { justify-items: center; }\n\
.label-params-grid.align-left { justify-items: start; }\n\
.label-param { display: flex; gap: 6px; font-weight: 700; color: #334155; line-height: 1.2; }\n\
.param-label { color: #94a3b8; font-weight: 500; flex-shrink: 0; }\n\
.param-sep { margin-left: 8px; color: #cbd5e1; }\n\
.param-value { overflow-wrap: break-word; hyphens: auto; }\n\
.label-composition { font-weight: 700; color: #334155; line-height: 1.2; border-bottom: 1px solid #e2e8f0; margin-top: 4px; width: 100%; overflow-wrap: break-word; }\n\
.label-custom-text { font-weight: 900; color: #000; border-top: 1px solid #e2e8f0; margin-top: 2px; width: 100%; overflow-wrap: break-word; }\n\
.label-footer { padding-top: 6px; border-top: 1px solid #e2e8f0; display: flex; gap: 8px; flex-shrink: 0; }\n\
.label-footer.footer-row { flex-direction: row; justify-content: space-between; align-items: flex-end; width: 100%; padding-left: 4px; padding-right: 4px; }\n\
.label-footer.footer-col { flex-direction: column; align-items: center; }\n\
.label-footer.footer-minimal { flex: 1; justify-content: center; align-items: center; border-top: none; padding-top: 8px; }\n\
.label-price { font-weight: 900; color: #000; line-height: 1; }\n\
.label-currency { font-weight: 700; color: #94a3b8; }\n\
.label-qr svg { display: block; }\n"
}

/// Render the label's inner markup: header, parameter block, footer.
///
/// The output is well-formed (XML-parseable) so print documents can be
/// structurally checked; every piece of item-derived text is escaped.
pub fn render_label_body(plan: &LabelPlan) -> String {
    let style = plan.ui.layout_style;
    let minimal = style == LayoutStyle::Minimal;
    let base = plan.base_scale;
    let scales = plan.scales;
    let paper = plan.dimensions.paper_size;
    let portraitish = plan.oriented_mm.height > plan.oriented_mm.width;

    let mut out = String::with_capacity(1024);

    // Row 1: header. Minimal layouts always center it.
    let header_align = if minimal || plan.ui.alignment == Alignment::Center {
        "align-center"
    } else {
        "align-left"
    };
    out.push_str(&format!("<div class=\"label-header {header_align}\">"));
    if let Some(category) = &plan.category {
        out.push_str(&format!(
            "<div class=\"label-category\" style=\"font-size: {}px\">{}</div>",
            fmt_px(7.0 * base),
            escape(category)
        ));
    }
    let name_px = (if minimal { 14.0 } else { 14.5 }) * base * scales.name;
    out.push_str(&format!(
        "<div class=\"label-name\" style=\"font-size: {}px\">{}</div>",
        fmt_px(name_px),
        escape(&plan.name)
    ));
    if let Some(badge) = &plan.size_badge {
        out.push_str(&format!(
            "<div class=\"label-size-badge\" style=\"font-size: {}px\">{}: {}</div>",
            fmt_px(12.0 * base * scales.attr),
            SIZE_CAPTION,
            escape(badge)
        ));
    }
    if let Some(article) = &plan.article {
        out.push_str(&format!(
            "<div class=\"label-article\" style=\"font-size: {}px\">{}: {}</div>",
            fmt_px(8.0 * base),
            ARTICLE_CAPTION,
            escape(article)
        ));
    }
    out.push_str("</div>");

    // Row 2: parameter block. Absent entirely on minimal layouts.
    if !minimal {
        let align = align_class(plan.ui.alignment);
        out.push_str(&format!("<div class=\"label-content {align}\">"));

        let shown: Vec<_> = plan.params.iter().filter(|p| p.show).collect();
        if style == LayoutStyle::Inline {
            out.push_str(&format!(
                "<div class=\"label-params-inline {align}\" style=\"font-size: {}px\">",
                fmt_px(9.0 * base * scales.attr)
            ));
            for (idx, param) in shown.iter().enumerate() {
                out.push_str("<span>");
                out.push_str(&format!(
                    "<span class=\"param-label\">{}: </span><span>{}</span>",
                    escape(&param.label),
                    escape(&param.value)
                ));
                if idx + 1 < shown.len() {
                    out.push_str("<span class=\"param-sep\">|</span>");
                }
                out.push_str("</span>");
            }
            out.push_str("</div>");
        } else if !shown.is_empty() {
            let cols = if plan.two_columns { " two-col" } else { "" };
            let row_px = (if portraitish {
                if paper == PaperSize::S75x120 {
                    9.0
                } else {
                    11.0
                }
            } else {
                9.0
            }) * base
                * scales.attr;
            out.push_str(&format!(
                "<div class=\"label-params-grid{cols} {align}\">"
            ));
            for param in &shown {
                out.push_str(&format!(
                    "<div class=\"label-param\" style=\"font-size: {}px\">",
                    fmt_px(row_px)
                ));
                // Side-by-side hides captions and keeps bare values.
                if style != LayoutStyle::SideBySide {
                    out.push_str(&format!(
                        "<span class=\"param-label\">{}:</span>",
                        escape(&param.label)
                    ));
                }
                out.push_str(&format!(
                    "<span class=\"param-value\">{}</span></div>",
                    escape(&param.value)
                ));
            }
            out.push_str("</div>");
        }

        if let Some(composition) = &plan.composition_line {
            let comp_px = (if portraitish {
                if paper == PaperSize::S75x120 {
                    9.0
                } else {
                    10.0
                }
            } else {
                8.5
            }) * base
                * scales.attr;
            out.push_str(&format!(
                "<div class=\"label-composition\" style=\"font-size: {}px; padding-bottom: {}mm\"><span class=\"param-label\">{}: </span>{}</div>",
                fmt_px(comp_px),
                format_mm(0.5 * base),
                COMPOSITION_CAPTION,
                escape(composition)
            ));
        }
        if let Some(custom) = &plan.custom_text {
            out.push_str(&format!(
                "<div class=\"label-custom-text\" style=\"font-size: {}px; padding-top: {}mm\">{}</div>",
                fmt_px(8.0 * base * scales.attr),
                format_mm(0.5 * base),
                escape(custom)
            ));
        }
        out.push_str("</div>");
    }

    // Row 3: footer with price and QR.
    let footer_class = if minimal {
        "footer-minimal"
    } else if matches!(style, LayoutStyle::SideBySide | LayoutStyle::Inline)
        || plan.size_mm.height <= 60.0
        || paper == PaperSize::S75x120
    {
        "footer-row"
    } else {
        "footer-col"
    };
    out.push_str(&format!("<div class=\"label-footer {footer_class}\">"));
    if let Some(price) = &plan.price {
        let wide_format = matches!(paper, PaperSize::A4 | PaperSize::S75x120);
        let price_px = (if wide_format {
            24.0
        } else if portraitish {
            19.0
        } else if paper == PaperSize::S58x60 {
            14.0
        } else {
            16.0
        }) * base
            * scales.price;
        let currency_px = (if wide_format {
            12.0
        } else if portraitish {
            11.0
        } else {
            9.0
        }) * base
            * scales.price;
        out.push_str(&format!(
            "<div class=\"label-price\" style=\"font-size: {}px\">{} <span class=\"label-currency\" style=\"font-size: {}px\">{}</span></div>",
            fmt_px(price_px),
            escape(&price.amount),
            fmt_px(currency_px),
            escape(&price.currency)
        ));
    }
    if let (Some(payload), true) = (&plan.qr_payload, plan.qr_px > 0) {
        match qr_svg(payload, plan.qr_px) {
            Ok(svg) => {
                out.push_str("<div class=\"label-qr\">");
                out.push_str(&svg);
                out.push_str("</div>");
            }
            Err(err) => log::warn!("label qr skipped: {err}"),
        }
    }
    out.push_str("</div>");

    out
}

/// Inline style for the preview's label container at natural size.
///
/// `preview_scale` applies the fitted transform; pass `1.0` to render at
/// physical size.
pub fn preview_container_style(plan: &LabelPlan, preview_scale: f64) -> String {
    let rows = if plan.ui.layout_style == LayoutStyle::Minimal {
        "auto 1fr"
    } else {
        "min-content 1fr min-content"
    };
    format!(
        "width: {}mm; height: {}mm; background: #fff; color: #000; display: grid; \
         grid-template-rows: {rows}; row-gap: {}mm; padding: {}mm; overflow: hidden; \
         text-align: {}; border: 1px solid #e2e8f0; box-sizing: border-box; \
         transform: scale({preview_scale}); transform-origin: center center",
        format_mm(plan.oriented_mm.width),
        format_mm(plan.oriented_mm.height),
        format_mm(plan.base_scale),
        format_mm(plan.padding_mm),
        plan.ui.alignment.css(),
    )
}

/// Standalone preview page: one label at natural size on a neutral
/// backdrop, with the effective dimensions captioned underneath.
pub fn build_preview_document(plan: &LabelPlan) -> String {
    let body = render_label_body(plan);
    let container_style = preview_container_style(plan, 1.0);
    format!(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\"/>\n\
         <title>{} — предпросмотр</title>\n<style>\n\
         body {{ margin: 0; min-height: 100vh; display: flex; flex-direction: column; \
         align-items: center; justify-content: center; gap: 16px; background: #929292; \
         font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, sans-serif; }}\n\
         .preview-caption {{ background: #fff; border-radius: 999px; padding: 6px 16px; \
         font-size: 12px; font-weight: 700; color: #0f172a; }}\n\
         {}\
         </style>\n</head>\n<body>\n\
         <div id=\"label-preview-content\" style=\"{container_style}\">{body}</div>\n\
         <div class=\"preview-caption\">{} × {} мм</div>\n\
         </body>\n</html>\n",
        escape(&plan.name),
        label_css(),
        format_mm(plan.oriented_mm.width),
        format_mm(plan.oriented_mm.height),
    )
}
