//! Standalone label preview: renders an inventory item to an HTML document,
//! either the on-screen preview page or the tiled print document, with an
//! optional local server for quick visual checks.

use std::env;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, ExitCode};
use std::time::Duration;

use label_press::{
    Alignment, AttributeCatalog, InventoryItem, LayoutStyle, PaperSize, SettingsAction,
    SettingsState,
};
use label_press_render::{LabelJob, LayoutEngine};
use label_press_render_html::{build_preview_document, build_print_document};

const DEFAULT_OUT_PATH: &str = "target/label-preview/index.html";
const DEFAULT_PORT: u16 = 42819;

#[derive(Clone, Debug)]
struct Args {
    item_path: Option<String>,
    out_path: String,
    serve: bool,
    open_browser: bool,
    port: u16,
    print_document: bool,
    paper: Option<String>,
    custom_mm: Option<(f64, f64)>,
    landscape: bool,
    layout: Option<String>,
    align: Option<String>,
    copies: Option<u32>,
    custom_text: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            item_path: None,
            out_path: DEFAULT_OUT_PATH.to_string(),
            serve: false,
            open_browser: false,
            port: DEFAULT_PORT,
            print_document: false,
            paper: None,
            custom_mm: None,
            landscape: false,
            layout: None,
            align: None,
            copies: None,
            custom_text: None,
        }
    }
}

fn main() -> ExitCode {
    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", help_text());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let cli = parse_args(args)?;
    let item = load_item(cli.item_path.as_deref())?;
    let settings = build_settings(&cli)?;
    let catalog = AttributeCatalog::default();
    let engine = LayoutEngine::default();
    let plan = engine.plan(&LabelJob {
        item: &item,
        catalog: &catalog,
        settings: &settings,
    });

    let html = if cli.print_document {
        build_print_document(&plan)
    } else {
        build_preview_document(&plan)
    };

    if cli.serve {
        return run_server(&html, cli.port, cli.open_browser);
    }

    if cli.out_path.is_empty() {
        return Err("--out must not be empty".to_string());
    }
    if let Some(parent) = Path::new(&cli.out_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }
    std::fs::write(&cli.out_path, &html).map_err(|e| e.to_string())?;

    println!(
        "wrote {} to {} ({}x{}mm, density={:.1}, copies={})",
        if cli.print_document {
            "print document"
        } else {
            "label preview"
        },
        cli.out_path,
        plan.oriented_mm.width,
        plan.oriented_mm.height,
        plan.density,
        plan.ui.quantity,
    );
    Ok(())
}

fn load_item(path: Option<&str>) -> Result<InventoryItem, String> {
    let Some(path) = path else {
        return Ok(demo_item());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: invalid item json: {}", path, e))
}

fn demo_item() -> InventoryItem {
    serde_json::from_value(serde_json::json!({
        "id": "demo-001",
        "name": "Футболка Promo Classic",
        "sku": "TS-PROMO-001",
        "sizeCode": "m",
        "attributeCode": "black",
        "attributes": { "Сезон": "Весна-Лето", "Принт": "логотип" },
        "materialComposition": { "Хлопок": 95.0, "Эластан": 5.0 },
        "sellingPrice": 1290.0,
        "category": "Одежда"
    }))
    .unwrap_or_default()
}

fn build_settings(cli: &Args) -> Result<SettingsState, String> {
    let mut settings = SettingsState::default();
    settings.apply(SettingsAction::DialogOpened);

    if let Some(paper) = &cli.paper {
        let size = parse_paper(paper)?;
        settings.apply(SettingsAction::SetPaperSize(size));
    }
    if let Some((width_mm, height_mm)) = cli.custom_mm {
        settings.apply(SettingsAction::SetPaperSize(PaperSize::Custom));
        settings.apply(SettingsAction::SetCustomSize {
            width_mm,
            height_mm,
        });
    }
    if cli.landscape {
        settings.apply(SettingsAction::SetLandscape(true));
    }
    if let Some(layout) = &cli.layout {
        settings.apply(SettingsAction::SetLayoutStyle(parse_layout(layout)?));
    }
    if let Some(align) = &cli.align {
        let alignment = match align.as_str() {
            "center" => Alignment::Center,
            "left" => Alignment::Left,
            other => return Err(format!("unknown alignment: {}", other)),
        };
        settings.apply(SettingsAction::SetAlignment(alignment));
    }
    if let Some(copies) = cli.copies {
        settings.apply(SettingsAction::SetQuantity(copies));
    }
    if let Some(text) = &cli.custom_text {
        settings.apply(SettingsAction::SetCustomText(text.clone()));
    }
    Ok(settings)
}

fn parse_paper(text: &str) -> Result<PaperSize, String> {
    match text {
        "58x40" => Ok(PaperSize::S58x40),
        "58x60" => Ok(PaperSize::S58x60),
        "75x120" => Ok(PaperSize::S75x120),
        "a4" => Ok(PaperSize::A4),
        "custom" => Ok(PaperSize::Custom),
        other => Err(format!("unknown paper size: {}", other)),
    }
}

fn parse_layout(text: &str) -> Result<LayoutStyle, String> {
    match text {
        "standard" => Ok(LayoutStyle::Standard),
        "side-by-side" => Ok(LayoutStyle::SideBySide),
        "inline" => Ok(LayoutStyle::Inline),
        "minimal" => Ok(LayoutStyle::Minimal),
        other => Err(format!("unknown layout style: {}", other)),
    }
}

fn parse_args(raw: Vec<String>) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = raw.into_iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .ok_or_else(|| format!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--help" | "-h" => return Err("help requested".to_string()),
            "--out" => args.out_path = value_for("--out")?,
            "--serve" => args.serve = true,
            "--open" => args.open_browser = true,
            "--port" => {
                args.port = value_for("--port")?
                    .parse()
                    .map_err(|e| format!("invalid --port: {}", e))?;
            }
            "--print" => args.print_document = true,
            "--paper" => args.paper = Some(value_for("--paper")?),
            "--custom" => {
                let pair = value_for("--custom")?;
                let (w, h) = pair
                    .split_once('x')
                    .ok_or_else(|| format!("--custom expects WxH in mm, got {}", pair))?;
                let width: f64 = w.parse().map_err(|e| format!("invalid --custom: {}", e))?;
                let height: f64 = h.parse().map_err(|e| format!("invalid --custom: {}", e))?;
                args.custom_mm = Some((width, height));
            }
            "--landscape" => args.landscape = true,
            "--layout" => args.layout = Some(value_for("--layout")?),
            "--align" => args.align = Some(value_for("--align")?),
            "--copies" => {
                args.copies = Some(
                    value_for("--copies")?
                        .parse()
                        .map_err(|e| format!("invalid --copies: {}", e))?,
                );
            }
            "--custom-text" => args.custom_text = Some(value_for("--custom-text")?),
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {}", other));
            }
            other => {
                if args.item_path.is_some() {
                    return Err(format!("unexpected argument: {}", other));
                }
                args.item_path = Some(other.to_string());
            }
        }
    }
    Ok(args)
}

fn run_server(html: &str, port: u16, open_browser: bool) -> Result<(), String> {
    let listener = TcpListener::bind(("127.0.0.1", port)).map_err(|e| e.to_string())?;
    let addr = listener.local_addr().map_err(|e| e.to_string())?;
    let url = format!("http://{}:{}/", addr.ip(), addr.port());

    println!("serving label preview at {}", url);

    if open_browser {
        try_open_browser(&url);
    }

    for incoming in listener.incoming() {
        let mut stream = match incoming {
            Ok(stream) => stream,
            Err(err) => {
                eprintln!("accept error: {}", err);
                continue;
            }
        };
        if let Err(err) = stream.set_read_timeout(Some(Duration::from_secs(15))) {
            eprintln!("set timeout failed: {}", err);
        }
        if let Err(err) = handle_connection(&mut stream, html) {
            eprintln!("request error: {}", err);
        }
    }

    Ok(())
}

fn try_open_browser(url: &str) {
    let mut opened = false;

    if let Ok(status) = Command::new("open").arg(url).status() {
        if status.success() {
            opened = true;
        }
    }

    if !opened {
        let _ = Command::new("xdg-open").arg(url).status();
    }
}

fn handle_connection(stream: &mut TcpStream, html: &str) -> Result<(), String> {
    let mut buf = [0u8; 4096];
    let read = stream.read(&mut buf).map_err(|e| e.to_string())?;
    let head = String::from_utf8_lossy(&buf[..read]);
    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    match path {
        "/" => write_http_response(stream, "200 OK", "text/html; charset=utf-8", html.as_bytes()),
        _ => write_http_response(stream, "404 Not Found", "text/plain", b"not found"),
    }
}

fn write_http_response(
    stream: &mut TcpStream,
    status: &str,
    content_type: &str,
    body: &[u8],
) -> Result<(), String> {
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    stream
        .write_all(header.as_bytes())
        .and_then(|()| stream.write_all(body))
        .map_err(|e| e.to_string())
}

fn help_text() -> &'static str {
    r#"label-preview - render an inventory item's label to HTML

USAGE:
  cargo run -p label-press-render-html --bin label-preview -- [item.json] [options]

MODES:
  default: generate a standalone HTML file at --out
  --serve: serve the rendered document on a local port

OPTIONS:
  --out <file>           output HTML path (default: target/label-preview/index.html)
  --serve                start local server mode
  --open                 open browser automatically (use with --serve)
  --port <n>             server port in --serve mode (default: 42819)

  --print                emit the tiled print document instead of the preview
  --paper <size>         58x40|58x60|75x120|a4|custom (default: 58x40)
  --custom <WxH>         custom size in mm, implies --paper custom
  --landscape            swap effective width/height
  --layout <style>       standard|side-by-side|inline|minimal (default: side-by-side)
  --align <mode>         center|left (default: center)
  --copies <n>           labels tiled into the print document (default: 1)
  --custom-text <s>      free text line printed on the label

DEFAULT ITEM:
  a built-in demo tee-shirt item
"#
}
