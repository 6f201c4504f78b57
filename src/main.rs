//! # Gridplan CLI
//!
//! Usage:
//!   gridplan planner.json -o planner.pdf
//!   echo '{ ... }' | gridplan -o planner.pdf
//!   gridplan --example > planner.json
//!
//! Set `RUST_LOG=gridplan=debug` to see per-page layout and render logs.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_planner_json());
        return;
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        match fs::read_to_string(&args[1]) {
            Ok(s) => s,
            Err(e) => fail(&format!("Failed to read {}: {e}", args[1])),
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            fail(&format!("Failed to read stdin: {e}"));
        }
        buf
    };

    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "planner.pdf".to_string());

    match gridplan::render_json(&input) {
        Ok(pdf_bytes) => {
            if let Err(e) = fs::write(&output_path, &pdf_bytes) {
                fail(&format!("Failed to write {output_path}: {e}"));
            }
            eprintln!("✓ Written {} bytes to {}", pdf_bytes.len(), output_path);
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("✗ {message}");
    process::exit(1);
}

fn example_planner_json() -> &'static str {
    r##"{
  "metadata": {
    "title": "Planner 2026",
    "author": "Gridplan"
  },
  "grid": { "unit": 14.173228, "cols": 43, "rows": 55 },
  "theme": {
    "header": { "fontSize": 16, "fontWeight": 700 },
    "tab": { "fontSize": 7 },
    "tab.active": {
      "backgroundColor": { "r": 0.1, "g": 0.1, "b": 0.1 },
      "color": { "r": 1, "g": 1, "b": 1 }
    }
  },
  "pages": [
    {
      "id": "index",
      "content": { "col": 1, "row": 1, "width": 41, "height": 53 },
      "layout": {
        "type": "Column",
        "gap": 1,
        "children": [
          { "type": "Text", "content": "Planner 2026", "size": { "Fixed": 3 }, "styleKey": "header" },
          {
            "type": "Row",
            "size": { "Fixed": 2 },
            "gap": 1,
            "children": [
              { "type": "NavLink", "destination": "week-1", "label": "Week 1" },
              { "type": "NavLink", "destination": "week-2", "label": "Week 2" },
              { "type": "NavLink", "destination": "notes", "label": "Notes" }
            ]
          },
          { "type": "Field", "label": "Goals", "lines": "Auto" }
        ]
      }
    },
    {
      "id": "week-1",
      "content": { "col": 1, "row": 1, "width": 41, "height": 53 },
      "layout": {
        "type": "Row",
        "children": [
          {
            "type": "Column",
            "gap": 1,
            "children": [
              { "type": "Text", "content": "Week 1", "size": { "Fixed": 2 }, "styleKey": "header" },
              { "type": "Divider", "size": { "Fixed": 1 } },
              { "type": "RuledLines" }
            ]
          },
          {
            "type": "Column",
            "size": { "Fixed": 2 },
            "children": [
              { "type": "Tab", "destinations": ["week-1", "week-2"], "label": "Weeks", "rotation": 90, "size": { "Fixed": 6 }, "styleKey": "tab" },
              { "type": "Tab", "destinations": ["notes"], "label": "Notes", "rotation": 90, "size": { "Fixed": 6 }, "styleKey": "tab" },
              { "type": "Spacer" }
            ]
          }
        ]
      }
    },
    {
      "id": "week-2",
      "content": { "col": 1, "row": 1, "width": 41, "height": 53 },
      "layout": {
        "type": "Row",
        "children": [
          {
            "type": "Column",
            "gap": 1,
            "children": [
              { "type": "Text", "content": "Week 2", "size": { "Fixed": 2 }, "styleKey": "header" },
              { "type": "Divider", "size": { "Fixed": 1 } },
              { "type": "RuledLines", "line": "Dotted" }
            ]
          },
          {
            "type": "Column",
            "size": { "Fixed": 2 },
            "children": [
              { "type": "Tab", "destinations": ["week-1", "week-2"], "label": "Weeks", "rotation": 90, "size": { "Fixed": 6 }, "styleKey": "tab" },
              { "type": "Tab", "destinations": ["notes"], "label": "Notes", "rotation": 90, "size": { "Fixed": 6 }, "styleKey": "tab" },
              { "type": "Spacer" }
            ]
          }
        ]
      }
    },
    {
      "id": "notes",
      "content": { "col": 1, "row": 1, "width": 41, "height": 53 },
      "layout": {
        "type": "Column",
        "gap": 1,
        "children": [
          {
            "type": "Row",
            "size": { "Fixed": 2 },
            "children": [
              { "type": "Text", "content": "Notes", "styleKey": "header" },
              { "type": "NavLink", "destination": "index", "label": "Index", "size": { "Fixed": 6 } }
            ]
          },
          { "type": "DotGrid" }
        ]
      }
    }
  ]
}
"##
}
