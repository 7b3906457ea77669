//! Deck model -> PPTX package.
//!
//! Emits the minimal PresentationML part set: content types, package
//! relationships, the presentation part, one slide master + layout + theme,
//! and one slide part per deck slide. Slide backgrounds, accent colors, and
//! fonts come from the deck's template.

use std::io::{Cursor, Write};

use draftdeck_core::deck::{BgType, DeckModel, Slide, SlideKind, TemplateSpec};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::ExportError;
use crate::xml::{normalize_color, xml_escape};

// Slide geometry, in EMU (4:3, 10 x 7.5 inches).
const SLIDE_CX: i64 = 9_144_000;
const SLIDE_CY: i64 = 6_858_000;
const EMU_PER_INCH: i64 = 914_400;

/// Render a deck into PPTX bytes.
pub fn render_pptx(deck: &DeckModel) -> Result<Vec<u8>, ExportError> {
    tracing::info!(
        title = %deck.title,
        slides = deck.slides.len(),
        template = %deck.template.name,
        "rendering pptx"
    );

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut write_part = |archive: &mut ZipWriter<Cursor<Vec<u8>>>,
                          name: &str,
                          body: String|
     -> Result<(), ExportError> {
        archive.start_file(name, options)?;
        archive.write_all(body.as_bytes())?;
        Ok(())
    };

    write_part(&mut archive, "[Content_Types].xml", content_types(deck.slides.len()))?;
    write_part(&mut archive, "_rels/.rels", package_rels())?;
    write_part(&mut archive, "ppt/presentation.xml", presentation(deck.slides.len()))?;
    write_part(
        &mut archive,
        "ppt/_rels/presentation.xml.rels",
        presentation_rels(deck.slides.len()),
    )?;
    write_part(&mut archive, "ppt/slideMasters/slideMaster1.xml", slide_master())?;
    write_part(
        &mut archive,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        slide_master_rels(),
    )?;
    write_part(&mut archive, "ppt/slideLayouts/slideLayout1.xml", slide_layout())?;
    write_part(
        &mut archive,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        slide_layout_rels(),
    )?;
    write_part(&mut archive, "ppt/theme/theme1.xml", theme(&deck.template))?;

    for (index, slide) in deck.slides.iter().enumerate() {
        let number = index + 1;
        write_part(
            &mut archive,
            &format!("ppt/slides/slide{number}.xml"),
            slide_xml(slide, &deck.template),
        )?;
        write_part(
            &mut archive,
            &format!("ppt/slides/_rels/slide{number}.xml.rels"),
            slide_rels(),
        )?;
    }

    let cursor = archive.finish()?;
    Ok(cursor.into_inner())
}

fn content_types(slide_count: usize) -> String {
    let mut overrides = String::new();
    for number in 1..=slide_count {
        overrides.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{number}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         {overrides}\
         </Types>"
    )
}

fn package_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"ppt/presentation.xml\"/>\
     </Relationships>"
        .to_string()
}

fn presentation(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for number in 1..=slide_count {
        // rId1 is the master; slides start at rId2.
        slide_ids.push_str(&format!(
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            255 + number,
            number + 1
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:presentation xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
         xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>{slide_ids}</p:sldIdLst>\
         <p:sldSz cx=\"{SLIDE_CX}\" cy=\"{SLIDE_CY}\"/>\
         <p:notesSz cx=\"{SLIDE_CY}\" cy=\"{SLIDE_CX}\"/>\
         </p:presentation>"
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let mut rels = String::from(
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>",
    );
    for number in 1..=slide_count {
        rels.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"slides/slide{number}.xml\"/>",
            number + 1
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{rels}</Relationships>"
    )
}

fn empty_sp_tree() -> &'static str {
    "<p:spTree>\
     <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
     <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
     <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
     </p:spTree>"
}

fn slide_master() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldMaster xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
         xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
         <p:cSld>\
         <p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"FFFFFF\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>\
         {tree}\
         </p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" \
         accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" \
         accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         </p:sldMaster>",
        tree = empty_sp_tree()
    )
}

fn slide_master_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
     <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\
     </Relationships>"
        .to_string()
}

fn slide_layout() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldLayout xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
         xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\" type=\"blank\">\
         <p:cSld name=\"Blank\">{tree}</p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sldLayout>",
        tree = empty_sp_tree()
    )
}

fn slide_layout_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
     </Relationships>"
        .to_string()
}

fn slide_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
     </Relationships>"
        .to_string()
}

/// Theme with the template's accent wired into the color scheme.
fn theme(template: &TemplateSpec) -> String {
    let accent = normalize_color(template.accent_or_default(), "0A74DA");
    let major = template.font_title.as_deref().unwrap_or("Calibri");
    let minor = template.font_body.as_deref().unwrap_or("Calibri");
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <a:theme xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" name=\"DraftDeck\">\
         <a:themeElements>\
         <a:clrScheme name=\"DraftDeck\">\
         <a:dk1><a:srgbClr val=\"000000\"/></a:dk1><a:lt1><a:srgbClr val=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2><a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"{accent}\"/></a:accent1>\
         <a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
         <a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
         <a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
         <a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"DraftDeck\">\
         <a:majorFont><a:latin typeface=\"{major}\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"{minor}\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"DraftDeck\">\
         <a:fillStyleLst>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         </a:fillStyleLst>\
         <a:lnStyleLst>\
         <a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         <a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         <a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
         </a:lnStyleLst>\
         <a:effectStyleLst>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle>\
         </a:effectStyleLst>\
         <a:bgFillStyleLst>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
         </a:bgFillStyleLst>\
         </a:fmtScheme>\
         </a:themeElements>\
         </a:theme>",
        accent = xml_escape(&accent),
        major = xml_escape(major),
        minor = xml_escape(minor),
    )
}

/// Slide background fill from the template (solid or gradient).
fn background_fill(template: &TemplateSpec) -> String {
    match template.bg_type {
        BgType::Gradient => {
            let (from, to) = match &template.bg_gradient {
                Some(gradient) => (
                    normalize_color(&gradient.from, "FFFFFF"),
                    normalize_color(&gradient.to, "FFFFFF"),
                ),
                None => {
                    let bg = normalize_color(template.bg_or_default(), "FFFFFF");
                    (bg.clone(), bg)
                }
            };
            format!(
                "<a:gradFill><a:gsLst>\
                 <a:gs pos=\"0\"><a:srgbClr val=\"{from}\"/></a:gs>\
                 <a:gs pos=\"100000\"><a:srgbClr val=\"{to}\"/></a:gs>\
                 </a:gsLst><a:lin ang=\"5400000\" scaled=\"1\"/></a:gradFill>"
            )
        }
        // Image backgrounds would need embedded media parts; fall back to
        // the solid color (best-effort policy).
        BgType::Solid | BgType::Image => {
            let bg = normalize_color(template.bg_or_default(), "FFFFFF");
            format!("<a:solidFill><a:srgbClr val=\"{bg}\"/></a:solidFill>")
        }
    }
}

fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64) as i64
}

/// One text run with explicit size/weight/color/font.
fn run(text: &str, size_pt: u32, bold: bool, color: &str, font: &str) -> String {
    format!(
        "<a:r><a:rPr lang=\"en-US\" sz=\"{size}\" b=\"{b}\">\
         <a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill>\
         <a:latin typeface=\"{font}\"/></a:rPr>\
         <a:t>{text}</a:t></a:r>",
        size = size_pt * 100,
        b = if bold { 1 } else { 0 },
        color = color,
        font = xml_escape(font),
        text = xml_escape(text),
    )
}

fn paragraph(content: String, centered: bool) -> String {
    let props = if centered { "<a:pPr algn=\"ctr\"/>" } else { "" };
    format!("<a:p>{props}{content}</a:p>")
}

/// A plain text box shape at the given position.
fn text_box(id: u32, name: &str, x: i64, y: i64, w: i64, h: i64, paragraphs: String) -> String {
    format!(
        "<p:sp>\
         <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{w}\" cy=\"{h}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\"><a:normAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody>\
         </p:sp>",
        name = xml_escape(name),
    )
}

/// A filled rectangle (heading strip).
fn filled_rect(id: u32, x: i64, y: i64, w: i64, h: i64, color: &str) -> String {
    format!(
        "<p:sp>\
         <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Strip\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{w}\" cy=\"{h}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\
         <a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill><a:ln><a:noFill/></a:ln></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody>\
         </p:sp>"
    )
}

/// Linearize a slide's content into body lines.
///
/// Experience/projects/education slides carry structured `items`; they are
/// flattened to text lines in the same order the authoring UI shows them.
fn body_lines(slide: &Slide) -> Vec<String> {
    let mut lines: Vec<String> = slide.bullets.iter().map(|b| format!("\u{2022} {b}")).collect();

    for item in &slide.items {
        match slide.kind {
            SlideKind::Experience => {
                let role = item.get("role").and_then(|v| v.as_str()).unwrap_or("");
                let company = item.get("company").and_then(|v| v.as_str()).unwrap_or("");
                let dates = item.get("dates").and_then(|v| v.as_str()).unwrap_or("");
                if !(role.is_empty() && company.is_empty() && dates.is_empty()) {
                    lines.push(format!("{role} - {company} ({dates})"));
                }
                if let Some(bullets) = item.get("bullets").and_then(|v| v.as_array()) {
                    for bullet in bullets {
                        if let Some(text) = bullet.as_str() {
                            lines.push(format!("  \u{2022} {text}"));
                        }
                    }
                }
            }
            SlideKind::Education => {
                let degree = item.get("degree").and_then(|v| v.as_str()).unwrap_or("");
                let school = item.get("school").and_then(|v| v.as_str()).unwrap_or("");
                let dates = item.get("dates").and_then(|v| v.as_str()).unwrap_or("");
                lines.push(format!("{degree} - {school} ({dates})"));
            }
            _ => {
                let title = item.get("title").and_then(|v| v.as_str()).unwrap_or("");
                let description = item.get("description").and_then(|v| v.as_str()).unwrap_or("");
                if description.is_empty() {
                    lines.push(title.to_string());
                } else {
                    lines.push(format!("{title}: {description}"));
                }
            }
        }
    }

    lines
}

fn slide_xml(slide: &Slide, template: &TemplateSpec) -> String {
    let accent = normalize_color(template.accent_or_default(), "0A74DA");
    let title_font = template.font_title.as_deref().unwrap_or("Calibri");
    let body_font = template.font_body.as_deref().unwrap_or("Calibri");
    let title_size = template.title_font_size.unwrap_or(40);
    let subtitle_size = template.subtitle_font_size.unwrap_or(18);
    let heading_size = template.heading_font_size.unwrap_or(22);
    let body_size = template.body_font_size.unwrap_or(16);

    let mut shapes = String::new();
    let mut next_id = 2u32;

    match slide.kind {
        SlideKind::Title => {
            let mut paragraphs = String::new();
            if let Some(title) = &slide.title {
                paragraphs.push_str(&paragraph(
                    run(title, title_size, true, &accent, title_font),
                    true,
                ));
            }
            if let Some(subtitle) = &slide.subtitle {
                paragraphs.push_str(&paragraph(
                    run(subtitle, subtitle_size, false, "404040", body_font),
                    true,
                ));
            }
            shapes.push_str(&text_box(
                next_id,
                "Title",
                inches(1.0),
                inches(2.2),
                SLIDE_CX - inches(2.0),
                inches(2.5),
                paragraphs,
            ));
        }
        _ => {
            // Heading strip with the slide title on it.
            shapes.push_str(&filled_rect(
                next_id,
                0,
                inches(0.3),
                SLIDE_CX,
                inches(0.6),
                &accent,
            ));
            next_id += 1;

            let heading = slide.title.clone().unwrap_or_default();
            shapes.push_str(&text_box(
                next_id,
                "Heading",
                inches(0.5),
                inches(0.3),
                SLIDE_CX - inches(1.0),
                inches(0.6),
                paragraph(run(&heading, heading_size, true, "FFFFFF", title_font), false),
            ));
            next_id += 1;

            let lines = body_lines(slide);
            if !lines.is_empty() {
                let paragraphs: String = lines
                    .iter()
                    .map(|line| paragraph(run(line, body_size, false, "202020", body_font), false))
                    .collect();
                shapes.push_str(&text_box(
                    next_id,
                    "Body",
                    inches(0.7),
                    inches(1.2),
                    SLIDE_CX - inches(1.4),
                    SLIDE_CY - inches(2.2),
                    paragraphs,
                ));
            }
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sld xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
         xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
         <p:cSld>\
         <p:bg><p:bgPr>{bg}<a:effectLst/></p:bgPr></p:bg>\
         <p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
         <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
         {shapes}\
         </p:spTree>\
         </p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sld>",
        bg = background_fill(template),
    )
}
