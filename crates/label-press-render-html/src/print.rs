use core::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use label_press::LayoutStyle;
use label_press_render::{format_mm, page_size_directive, LabelPlan};
use quick_xml::escape::escape;

use crate::markup::{label_css, render_label_body};

/// Printing failure. The only expected case is an unavailable output target
/// (pop-up blocked in a browser shell); it is non-fatal and retryable.
#[derive(Debug)]
pub enum PrintError {
    /// The output target refused to open. Nothing was written.
    TargetUnavailable,
    /// Writing the document failed midway.
    Io(io::Error),
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetUnavailable => write!(f, "print target unavailable"),
            Self::Io(err) => write!(f, "print write failed: {err}"),
        }
    }
}

impl std::error::Error for PrintError {}

impl From<io::Error> for PrintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Output sink for generated print documents.
///
/// `open` returning `None` models a blocked pop-up window: the caller
/// surfaces a warning and aborts without side effects.
pub trait PrintTarget {
    /// Open the output, or `None` when the shell blocked it.
    fn open(&mut self) -> Option<&mut dyn Write>;
}

/// Writes the print document to a file. Parent directories are created on
/// demand; creation failure behaves like a blocked target.
#[derive(Debug, Default)]
pub struct FilePrintTarget {
    path: PathBuf,
    file: Option<File>,
}

impl FilePrintTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PrintTarget for FilePrintTarget {
    fn open(&mut self) -> Option<&mut dyn Write> {
        if self.file.is_none() {
            if let Some(parent) = self.path.parent() {
                if let Err(err) = fs::create_dir_all(parent) {
                    log::warn!("print target {}: {err}", self.path.display());
                    return None;
                }
            }
            match File::create(&self.path) {
                Ok(file) => self.file = Some(file),
                Err(err) => {
                    log::warn!("print target {}: {err}", self.path.display());
                    return None;
                }
            }
        }
        self.file.as_mut().map(|f| f as &mut dyn Write)
    }
}

/// Target that always refuses to open; simulates a blocked pop-up.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockedPrintTarget;

impl PrintTarget for BlockedPrintTarget {
    fn open(&mut self) -> Option<&mut dyn Write> {
        None
    }
}

/// Build the complete print document for a plan.
///
/// The page matches the chosen physical size and orientation, the label is
/// tiled `quantity` times into a flex-wrapped page, and a global rule forces
/// everything black for print fidelity. The document triggers the native
/// print flow once loaded.
pub fn build_print_document(plan: &LabelPlan) -> String {
    let body = render_label_body(plan);
    let size = plan.oriented_mm;
    let rows = if plan.ui.layout_style == LayoutStyle::Minimal {
        "auto 1fr"
    } else {
        "min-content 1fr min-content"
    };

    let mut labels = String::with_capacity(body.len() * plan.ui.quantity as usize + 256);
    for _ in 0..plan.ui.quantity {
        labels.push_str(&format!(
            "<div class=\"label-container\" style=\"text-align: {}\">{body}</div>",
            plan.ui.alignment.css()
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\"/>\n\
         <title>Печать этикеток - {title}</title>\n<style>\n\
         @page {{ size: {page_size}; margin: 0; }}\n\
         body {{ margin: 0; padding: 0; box-sizing: border-box; \
         font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, sans-serif; }}\n\
         .label-page {{ width: 100%; height: 100vh; display: flex; flex-wrap: wrap; \
         align-content: flex-start; }}\n\
         .label-container {{ width: {w}mm; height: {h}mm; page-break-inside: avoid; \
         display: grid; grid-template-rows: {rows}; padding: 4mm; box-sizing: border-box; \
         overflow: hidden; border: 1px dotted #eee; }}\n\
         @media print {{ .label-container {{ border: none; }} }}\n\
         * {{ color: black !important; border-color: black !important; }}\n\
         {css}\
         </style>\n</head>\n<body>\n<div class=\"label-page\">\n{labels}\n</div>\n\
         <script>window.onload = () => {{ window.print(); }};</script>\n\
         </body>\n</html>\n",
        title = escape(&plan.name),
        page_size = page_size_directive(&plan.dimensions),
        w = format_mm(size.width),
        h = format_mm(size.height),
        rows = rows,
        css = label_css(),
        labels = labels,
    )
}

/// Generate the print document and hand it to `target`.
///
/// A blocked target logs a warning and returns
/// [`PrintError::TargetUnavailable`] without writing anything; the caller
/// may retry after the user unblocks the output.
pub fn print_labels(plan: &LabelPlan, target: &mut dyn PrintTarget) -> Result<(), PrintError> {
    let Some(sink) = target.open() else {
        log::warn!("print aborted: output target blocked");
        return Err(PrintError::TargetUnavailable);
    };
    let document = build_print_document(plan);
    sink.write_all(document.as_bytes())?;
    sink.flush()?;
    Ok(())
}
